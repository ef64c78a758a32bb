use std::path::PathBuf;

use clap::Parser;

/// Command-line options for the solver binary.
#[derive(Clone, Debug, Parser)]
pub struct SolverOptions {
    /// Path to the settings file.
    #[arg(short, long, default_value = "settings.ini")]
    pub settings: PathBuf,

    /// Directory scanned for piece database files.
    #[arg(short, long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory the fitness trace and board outputs land in.
    #[arg(short, long, default_value = "out")]
    pub out_dir: PathBuf,

    /// Fixed random seed; defaults to the wall clock.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Give up after this many generations.
    #[arg(short, long)]
    pub max_generations: Option<usize>,

    #[arg(short, long)]
    pub log_level: Option<String>,
}
