use thiserror::Error;

use super::consts::PieceKind;

/// The recoverable failure modes of the puzzle core. Configuration errors
/// abort startup; build errors abort the run and surface the best board so
/// far; an empty inventory is caught by the board builder and reported as
/// an unbuildable board.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("board could not be completed: {0}")]
    UnbuildableBoard(String),

    #[error("no {kind} pieces left in the inventory")]
    InventoryEmpty { kind: PieceKind },
}
