use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use itertools::Itertools;

use crate::eternity::prelude::*;
use crate::solver::{GenerationSummary, Settings};

/// A run name carrying the start time and the configured methods, shared by
/// every file the run produces.
pub fn run_name(settings: &Settings) -> String {
    format!(
        "{}_{}_{}_{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        settings.selection.notate(),
        settings.crossover.notate(),
        settings.mutation.notate()
    )
}

/// Appends one `generation fitness` record per finished generation.
pub struct TraceWriter {
    file: std::fs::File,
}

impl TraceWriter {
    /// Creates the trace file for a run.
    pub fn create(dir: &Path, run_name: &str) -> Result<TraceWriter> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{run_name}_fitness.txt"));
        let file = std::fs::File::create(&path)
            .with_context(|| format!("creating fitness trace {}", path.display()))?;
        Ok(TraceWriter { file })
    }

    /// Records one generation.
    pub fn record(&mut self, summary: &GenerationSummary) -> Result<()> {
        writeln!(self.file, "{} {}", summary.generation, summary.best_fitness)?;
        Ok(())
    }
}

/// Writes a board twice over: the grid of piece ids with orientations, so
/// the layout can be rebuilt, and the grid of pattern read-outs, so the
/// matches can be checked by eye.
pub fn write_board(dir: &Path, run_name: &str, board: &Board, generation: usize) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{run_name}_board.txt"));

    let snapshot = board.snapshot();
    let mut text = format!(
        "generation {generation}: fitness {} with {} matches\n\n",
        snapshot.fit_score, snapshot.match_count
    );

    for row in 0..snapshot.size {
        let cells = &snapshot.cells[row * snapshot.size..(row + 1) * snapshot.size];
        text.push_str(&cells.iter().map(|(id, orientation)| format!("{id:>3}/{orientation}")).join(" "));
        text.push('\n');
    }
    text.push('\n');

    for row in 0..snapshot.size {
        let tiles: Vec<Coord> = (0..snapshot.size).map(|col| Coord::new(row, col)).collect();
        let mut top = tiles.iter().map(|&at| format!("  {:>3}    ", board.pattern(at, SegLocation::Top)));
        let mut sides = tiles.iter().map(|&at| {
            format!(
                "{:>3}  {:>3} ",
                board.pattern(at, SegLocation::Left),
                board.pattern(at, SegLocation::Right)
            )
        });
        let mut bottom = tiles.iter().map(|&at| format!("  {:>3}    ", board.pattern(at, SegLocation::Bottom)));
        for line in [top.join(""), sides.join(""), bottom.join("")] {
            text.push_str(line.trim_end());
            text.push('\n');
        }
    }

    std::fs::write(&path, text).with_context(|| format!("writing board to {}", path.display()))?;
    Ok(path)
}
