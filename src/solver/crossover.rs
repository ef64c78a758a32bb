use std::collections::VecDeque;

use itertools::Itertools;

use crate::eternity::prelude::*;

use super::selection::Select;

/// The configured splice shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrossoverMethod {
    OnePoint,
    TwoPoint,
}

impl CrossoverMethod {
    /// Notates the method, for filenames and logs.
    pub fn notate(&self) -> String {
        match self {
            CrossoverMethod::OnePoint => "one-point",
            CrossoverMethod::TwoPoint => "two-point",
        }.into()
    }
}

impl std::str::FromStr for CrossoverMethod {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "one-point" => Ok(CrossoverMethod::OnePoint),
            "two-point" => Ok(CrossoverMethod::TwoPoint),
            _           => Err(anyhow!("invalid notation {s} for crossover method")),
        }
    }
}

/// Breeds the next generation: elites carry over verbatim, the rest of the
/// population is filled with spliced offspring repaired back into piece
/// permutations.
pub struct Crossover {
    method: CrossoverMethod,
    select: Box<dyn Select>,
    pop_size: usize,
    elite_count: usize,
    start_piece: bool,
}

impl Crossover {
    /// Constructs the operator. The elite count is the configured percentage
    /// of the population, rounded down.
    pub fn new(
        method: CrossoverMethod,
        select: Box<dyn Select>,
        pop_size: usize,
        elite_rate: usize,
        start_piece: bool,
    ) -> Crossover {
        Crossover {
            method,
            select,
            pop_size,
            elite_count: elite_rate * pop_size / 100,
            start_piece,
        }
    }

    /// The number of candidates carried over verbatim each generation.
    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    /// Fills `next` from `prev` up to the population size. `pieces` is the
    /// master piece list the repair pass draws replacements from.
    pub fn run(&self, pieces: &[Piece], prev: &[Board], next: &mut Vec<Board>, rng: &mut RandomSource) {
        self.carry_elites(prev, next);
        while next.len() < self.pop_size {
            let parents = [self.select.select(prev, rng), self.select.select(prev, rng)];
            let (first, second) = self.cross(pieces, &prev[parents[0]], &prev[parents[1]], rng);
            for mut child in [first, second] {
                if next.len() == self.pop_size {
                    break;
                }
                child.board_id = next.len() + 1;
                next.push(child);
            }
        }
    }

    /// Splices two parents into two complementary children, each a valid
    /// permutation of the piece set.
    pub fn cross(&self, pieces: &[Piece], p1: &Board, p2: &Board, rng: &mut RandomSource) -> (Board, Board) {
        let slots = p1.size() * p1.size();
        let (k1, k2) = match self.method {
            CrossoverMethod::OnePoint => (rng.rand_int(1, slots - 1), slots),
            CrossoverMethod::TwoPoint => {
                let a = rng.rand_int(1, slots - 1);
                let b = loop {
                    let b = rng.rand_int(1, slots - 1);
                    if b != a {
                        break b;
                    }
                };
                (a.min(b), a.max(b))
            }
        };
        (self.splice(pieces, p1, p2, k1, k2), self.splice(pieces, p2, p1, k1, k2))
    }

    // Child takes [0, k1) and [k2, n^2) from `keeper` and [k1, k2) from
    // `donor`, then gets repaired into a permutation.
    fn splice(&self, pieces: &[Piece], keeper: &Board, donor: &Board, k1: usize, k2: usize) -> Board {
        let size = keeper.size();
        let slots: Vec<Piece> = (0..size * size)
            .map(|index| {
                let at = Coord::from_index(index, size);
                if index < k1 || index >= k2 {
                    *keeper.piece(at)
                } else {
                    *donor.piece(at)
                }
            })
            .collect();
        let mut child = Board::new(0, Grid::from_slots(size, slots).unwrap());

        self.repair(pieces, &mut child);
        if self.start_piece {
            let pinned = child.pin_start_piece();
            debug_assert!(pinned, "start piece lost during crossover");
        }
        child.debug_validate(self.start_piece);
        child
    }

    // An arbitrary splice duplicates some pieces and omits others. Keep the
    // first occurrence of every duplicate and hand later occurrences to the
    // pieces missing from the child, kind against slot kind.
    fn repair(&self, pieces: &[Piece], board: &mut Board) {
        let size = board.size();

        let present: HashSet<usize> = board.grid.iter().map(|(_, piece)| piece.id).collect();
        let mut missing: [VecDeque<Piece>; 3] = Default::default();
        for piece in pieces {
            if !present.contains(&piece.id) {
                missing[piece.kind as usize].push_back(*piece);
            }
        }

        let mut seen = HashSet::new();
        for index in 0..size * size {
            let at = Coord::from_index(index, size);
            if seen.insert(board.piece(at).id) {
                continue;
            }
            // both parents are slot-valid, so duplicates on a slot kind are
            // balanced by missing pieces of that same kind
            let Some(replacement) = missing[at.slot_kind(size) as usize].pop_front() else {
                debug_assert!(false, "repair ran out of {} pieces", at.slot_kind(size));
                continue;
            };
            seen.insert(replacement.id);
            *board.piece_mut(at) = replacement;
            board.fix_orientation(at);
        }
    }

    // The configured number of best previous boards survive unchanged.
    fn carry_elites(&self, prev: &[Board], next: &mut Vec<Board>) {
        for board in prev.iter().sorted_by(|a, b| b.cmp(a)).take(self.elite_count) {
            next.push(board.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eternity::builder::generate_piece_set;
    use crate::solver::selection::{SelectionMethod, Tournament};

    fn build_parents(size: usize, start_piece: bool, seed: u64) -> (Vec<Piece>, Board, Board) {
        let mut rng = RandomSource::with_seed(seed);
        let pieces = generate_piece_set(size, 3, &mut rng).unwrap();
        let builder = BoardBuilder::new(size, start_piece);
        let mut inventory = PieceInventory::load(&pieces);
        let p1 = builder.build(1, &mut inventory, &mut rng).unwrap();
        let mut inventory = PieceInventory::load(&pieces);
        let p2 = builder.build(2, &mut inventory, &mut rng).unwrap();
        (pieces, p1, p2)
    }

    fn assert_permutation(board: &Board, pieces: &[Piece]) {
        let mut ids: Vec<usize> = board.grid.iter().map(|(_, piece)| piece.id).collect();
        ids.sort_unstable();
        let mut expected: Vec<usize> = pieces.iter().map(|piece| piece.id).collect();
        expected.sort_unstable();
        assert_eq!(ids, expected);
    }

    fn assert_slot_valid(board: &Board) {
        let size = board.size();
        for (at, piece) in board.grid.iter() {
            assert_eq!(piece.kind, at.slot_kind(size));
            for seg in at.outward_segments(size) {
                assert_eq!(piece.pattern(seg), BORDER_PATTERN);
            }
        }
    }

    #[test]
    fn children_are_repaired_permutations() {
        for method in [CrossoverMethod::OnePoint, CrossoverMethod::TwoPoint] {
            let (pieces, p1, p2) = build_parents(6, false, 17);
            let crossover = Crossover::new(method, Box::new(Tournament { size: 3 }), 10, 0, false);
            let mut rng = RandomSource::with_seed(23);
            for _ in 0..20 {
                let (c1, c2) = crossover.cross(&pieces, &p1, &p2, &mut rng);
                for child in [&c1, &c2] {
                    assert_permutation(child, &pieces);
                    assert_slot_valid(child);
                }
            }
        }
    }

    #[test]
    fn crossover_keeps_the_start_piece_pinned() {
        let (pieces, p1, p2) = build_parents(START_BOARD_SIZE, true, 29);
        let crossover =
            Crossover::new(CrossoverMethod::OnePoint, Box::new(Tournament { size: 3 }), 10, 0, true);
        let mut rng = RandomSource::with_seed(31);
        for _ in 0..10 {
            let (c1, c2) = crossover.cross(&pieces, &p1, &p2, &mut rng);
            for child in [&c1, &c2] {
                let piece = child.piece(START_SLOT);
                assert_eq!((piece.id, piece.orientation), (START_PIECE_ID, 0));
            }
        }
    }

    #[test]
    fn elites_survive_verbatim() {
        let size = 5;
        let mut rng = RandomSource::with_seed(41);
        let pieces = generate_piece_set(size, 3, &mut rng).unwrap();
        let builder = BoardBuilder::new(size, false);
        let mut prev: Vec<Board> = (0..10)
            .map(|index| {
                let mut inventory = PieceInventory::load(&pieces);
                let mut board = builder.build(index + 1, &mut inventory, &mut rng).unwrap();
                board.fit_score = index as i32;
                board
            })
            .collect();
        prev[7].fit_score = 100;

        let crossover = Crossover::new(
            CrossoverMethod::OnePoint,
            SelectionMethod::Tournament.strategy(),
            10,
            20,
            false,
        );
        let mut next = Vec::new();
        crossover.run(&pieces, &prev, &mut next, &mut rng);

        assert_eq!(next.len(), 10);
        // elite_count = 20% of 10 = 2: the two best boards lead the new
        // population with their grids untouched
        let expected: Vec<Vec<(usize, u8)>> = [&prev[7], &prev[9]]
            .iter()
            .map(|board| board.snapshot().cells)
            .collect();
        for (elite, cells) in next.iter().take(2).zip(expected) {
            assert_eq!(elite.snapshot().cells, cells);
        }
    }
}
