/*
 *  The console driver and its file adapters: settings in, pieces in,
 *  fitness traces and boards out. The solver core never touches a file.
 */

mod options;
pub mod output;
pub mod pieces;
pub mod settings;

pub use options::SolverOptions;
pub use output::TraceWriter;

use crate::eternity::prelude::*;
use crate::solver::{GenerationSummary, Solver};

/// Wires the adapters and the solver together and runs the show.
pub struct Driver {
    options: SolverOptions,
}

impl Driver {
    /// Produces a driver over parsed command-line options.
    pub fn new(options: SolverOptions) -> Driver {
        Driver { options }
    }

    /// Loads the configuration and pieces, then advances generations until
    /// the puzzle is solved or the generation cap runs out.
    pub fn run(&self) -> Result<()> {
        let settings = settings::read_settings(&self.options.settings)?;
        log::info!(
            "{0}x{0} board, {1} patterns, population {2}",
            settings.board_size,
            settings.pattern_num,
            settings.pop_size
        );
        log::info!(
            "selection {}, crossover {}, mutation {} at {}%, elitism {}%",
            settings.selection.notate(),
            settings.crossover.notate(),
            settings.mutation.notate(),
            settings.mut_rate,
            settings.elite_rate
        );

        let mut rng = match self.options.seed {
            Some(seed) => RandomSource::with_seed(seed),
            None       => RandomSource::from_clock(),
        };
        let pieces = pieces::load_or_generate(&self.options.data_dir, &settings, &mut rng)?;

        let run_name = output::run_name(&settings);
        let mut trace = TraceWriter::create(&self.options.out_dir, &run_name)?;
        let mut solver = Solver::new(settings, pieces, rng)?;
        let [max_fitness, max_matches] = [solver.max_fitness(), solver.max_matches()];

        loop {
            let summary = solver.step()?;
            trace.record(&summary)?;
            self.report(&summary, max_fitness, max_matches);

            if summary.solved {
                let board = solver
                    .best_board()
                    .ok_or(anyhow!("solved with no best board on record"))?;
                let path = output::write_board(&self.options.out_dir, &run_name, board, summary.generation)?;
                log::info!(
                    "solved in {} generations, board written to {}",
                    summary.generation,
                    path.display()
                );
                return Ok(());
            }
            if self.options.max_generations.is_some_and(|cap| summary.generation >= cap) {
                if let Some(board) = solver.best_board() {
                    let path = output::write_board(&self.options.out_dir, &run_name, board, summary.generation)?;
                    log::info!(
                        "gave up after {} generations; best board (fitness {}/{max_fitness}) written to {}",
                        summary.generation,
                        board.fit_score,
                        path.display()
                    );
                }
                return Ok(());
            }
        }
    }

    // One console line per generation, mirroring the fitness trace.
    fn report(&self, summary: &GenerationSummary, max_fitness: i32, max_matches: i32) {
        if summary.restarted {
            log::info!("generation {}: stagnated, population rebuilt", summary.generation);
        }
        log::info!(
            "generation {}: fitness {}/{} {:.2}%, matches {}/{} {:.2}%",
            summary.generation,
            summary.best_fitness,
            max_fitness,
            summary.best_fitness as f64 / max_fitness as f64 * 100.0,
            summary.best_matches,
            max_matches,
            summary.best_matches as f64 / max_matches as f64 * 100.0
        );
    }
}
