/*
 *  The evolutionary engine: selection, crossover, mutation, fitness, and the
 *  generational loop that drives them.
 */

pub(crate) mod crossover;
pub(crate) mod fitness;
pub(crate) mod mutation;
pub(crate) mod selection;

pub use crossover::{Crossover, CrossoverMethod};
pub use fitness::{match_weight, FitnessEvaluator};
pub use mutation::{Mutation, MutationMethod};
pub use selection::{Roulette, Select, SelectionMethod, Tournament, TOURNAMENT_SIZE};

use crate::eternity::prelude::*;

/// Generations without a best-fitness improvement before the population is
/// thrown away and rebuilt from scratch.
pub const STAGNATION_LIMIT: i32 = 200;

/// The validated run configuration. Produced by the settings adapter; the
/// core refuses to start on a record that fails [`Settings::validate`].
#[derive(Clone, Debug)]
pub struct Settings {
    pub board_size: usize,
    pub pattern_num: usize,
    pub pop_size: usize,
    pub selection: SelectionMethod,
    pub crossover: CrossoverMethod,
    pub mutation: MutationMethod,
    pub mut_rate: f64,
    pub elite_rate: usize,
    pub start_piece: bool,
}

impl Settings {
    /// Range and combination checks over the whole record.
    pub fn validate(&self) -> std::result::Result<(), PuzzleError> {
        let complain = |what: String| Err(PuzzleError::InvalidConfig(what));

        if self.board_size < 4 {
            return complain(format!("board size {} is below the minimum of 4", self.board_size));
        }
        if self.pattern_num < 2 || self.pattern_num > Pattern::MAX as usize {
            return complain(format!("pattern count {} is outside 2..=255", self.pattern_num));
        }
        if self.pop_size < 2 {
            return complain(format!("population size {} is below the minimum of 2", self.pop_size));
        }
        if !(0.0..=100.0).contains(&self.mut_rate) {
            return complain(format!("mutation rate {} is outside 0..=100", self.mut_rate));
        }
        if self.elite_rate > 100 {
            return complain(format!("elitism rate {} is outside 0..=100", self.elite_rate));
        }
        if self.start_piece && self.board_size != START_BOARD_SIZE {
            return complain(format!(
                "the start-piece rule only applies to the official {START_BOARD_SIZE}x{START_BOARD_SIZE} puzzle"
            ));
        }
        if self.mutation == MutationMethod::RegionSwap && self.board_size < 6 {
            return complain("region-swap needs two disjoint 2x2 inner blocks, board size 6 or more".into());
        }
        Ok(())
    }
}

/// Scalar record of one finished generation, for the fitness trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationSummary {
    pub generation: usize,
    pub best_fitness: i32,
    pub best_matches: i32,
    pub solved: bool,
    pub restarted: bool,
}

/// The generational loop. Owns the populations, the master piece list and
/// the random source; the operators borrow what they need for the duration
/// of their phase.
pub struct Solver {
    settings: Settings,
    pieces: Vec<Piece>,
    rng: RandomSource,
    builder: BoardBuilder,
    evaluator: FitnessEvaluator,
    crossover: Crossover,
    mutation: Mutation,
    current: Vec<Board>,
    previous: Vec<Board>,
    generation: usize,
    best_fitness: i32,
    best_matches: i32,
    stagnation: i32,
    best_board: Option<Board>,
}

impl Solver {
    /// Builds a solver over a validated configuration and piece set.
    pub fn new(
        settings: Settings,
        pieces: Vec<Piece>,
        rng: RandomSource,
    ) -> std::result::Result<Solver, PuzzleError> {
        settings.validate()?;
        Solver::validate_pieces(&settings, &pieces)?;

        let size = settings.board_size;
        let builder = BoardBuilder::new(size, settings.start_piece);
        let evaluator = FitnessEvaluator::new(size);
        let crossover = Crossover::new(
            settings.crossover,
            settings.selection.strategy(),
            settings.pop_size,
            settings.elite_rate,
            settings.start_piece,
        );
        let mutation = Mutation::new(
            settings.mutation,
            settings.mut_rate,
            settings.pop_size,
            size,
            settings.start_piece,
        );

        Ok(Solver {
            settings,
            pieces,
            rng,
            builder,
            evaluator,
            crossover,
            mutation,
            current: vec![],
            previous: vec![],
            generation: 0,
            best_fitness: 0,
            best_matches: 0,
            stagnation: STAGNATION_LIMIT,
            best_board: None,
        })
    }

    /// The fitness of a fully solved board.
    pub fn max_fitness(&self) -> i32 {
        self.evaluator.max_fitness()
    }

    /// The match count of a fully solved board.
    pub fn max_matches(&self) -> i32 {
        self.evaluator.max_matches()
    }

    /// The best board seen over the whole run, surviving restarts.
    pub fn best_board(&self) -> Option<&Board> {
        self.best_board.as_ref()
    }

    /// Advances one generation: seed the first population, rebuild it after
    /// stagnation, or breed and mutate the next one; then evaluate and track
    /// records.
    pub fn step(&mut self) -> std::result::Result<GenerationSummary, PuzzleError> {
        let mut restarted = false;
        if self.current.is_empty() {
            self.seed_population()?;
        } else if self.stagnation <= 0 {
            log::debug!(
                "no improvement in {STAGNATION_LIMIT} generations, rebuilding the population"
            );
            self.seed_population()?;
            self.best_fitness = 0;
            self.best_matches = 0;
            self.stagnation = STAGNATION_LIMIT;
            restarted = true;
        } else {
            self.advance();
        }

        let evaluator = self.evaluator;
        for board in self.current.iter_mut() {
            evaluator.evaluate(board);
        }
        self.generation += 1;

        // per-generation maxima are tracked independently, like the record
        // they feed
        let gen_fitness = self.current.iter().map(|board| board.fit_score).max().unwrap_or(0);
        let gen_matches = self.current.iter().map(|board| board.match_count).max().unwrap_or(0);

        if gen_fitness > self.best_fitness {
            self.best_fitness = gen_fitness;
            self.stagnation = STAGNATION_LIMIT;
        } else {
            self.stagnation -= 1;
        }
        if gen_matches > self.best_matches {
            self.best_matches = gen_matches;
        }
        if let Some(champion) = self.current.iter().max() {
            if self.best_board.as_ref().is_none_or(|best| champion > best) {
                self.best_board = Some(champion.clone());
            }
        }

        Ok(GenerationSummary {
            generation: self.generation,
            best_fitness: gen_fitness,
            best_matches: gen_matches,
            solved: gen_fitness == self.evaluator.max_fitness(),
            restarted,
        })
    }

    /// Runs generations until solved, reporting each one to the observer.
    pub fn solve<F>(&mut self, mut observe: F) -> Result<Board>
    where
        F: FnMut(&GenerationSummary) -> Result<()>,
    {
        loop {
            let summary = self.step()?;
            observe(&summary)?;
            if summary.solved {
                return self
                    .current
                    .iter()
                    .max()
                    .cloned()
                    .ok_or(anyhow!("solved with an empty population"));
            }
        }
    }

    // Builds a fresh population of random boards, one refilled inventory per
    // board.
    fn seed_population(&mut self) -> std::result::Result<(), PuzzleError> {
        let mut population = Vec::with_capacity(self.settings.pop_size);
        for index in 0..self.settings.pop_size {
            let mut inventory = PieceInventory::load(&self.pieces);
            population.push(self.builder.build(index + 1, &mut inventory, &mut self.rng)?);
        }
        self.current = population;
        Ok(())
    }

    // Promotes current to previous and breeds a mutated replacement. Only
    // the bred share mutates; elite copies carry over untouched.
    fn advance(&mut self) {
        self.previous = std::mem::take(&mut self.current);
        self.crossover
            .run(&self.pieces, &self.previous, &mut self.current, &mut self.rng);
        let elites = self.crossover.elite_count().min(self.current.len());
        self.mutation.run(&mut self.current[elites..], &mut self.rng);
    }

    // The piece set itself is part of the configuration: it must be a legal
    // frame for the configured board.
    fn validate_pieces(
        settings: &Settings,
        pieces: &[Piece],
    ) -> std::result::Result<(), PuzzleError> {
        let complain = |what: String| Err(PuzzleError::InvalidConfig(what));
        let size = settings.board_size;

        if pieces.len() != size * size {
            return complain(format!(
                "piece set holds {} pieces, a {size}x{size} board needs {}",
                pieces.len(),
                size * size
            ));
        }
        let ids: HashSet<usize> = pieces.iter().map(|piece| piece.id).collect();
        if ids.len() != pieces.len() {
            return complain("piece set repeats a piece id".into());
        }
        if let Some(piece) = pieces
            .iter()
            .find(|piece| piece.segments().iter().any(|&s| s as usize > settings.pattern_num))
        {
            return complain(format!(
                "piece {} uses a pattern beyond the configured {}",
                piece.id, settings.pattern_num
            ));
        }

        let census = |kind: PieceKind| pieces.iter().filter(|piece| piece.kind == kind).count();
        let expected = [4, 4 * (size - 2), (size - 2) * (size - 2)];
        for (kind, expected) in PieceKind::all().into_iter().zip(expected) {
            let found = census(kind);
            if found != expected {
                return complain(format!(
                    "piece set holds {found} {kind} pieces, a {size}x{size} board needs {expected}"
                ));
            }
        }

        if settings.start_piece
            && !pieces
                .iter()
                .any(|piece| piece.id == START_PIECE_ID && piece.kind == PieceKind::Inner)
        {
            return complain(format!("start-piece rule needs inner piece {START_PIECE_ID}"));
        }
        Ok(())
    }
}
