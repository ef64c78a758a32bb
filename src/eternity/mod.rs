/*
 *  The Eternity II puzzle domain: pieces, boards, and the machinery
 *  that assembles valid candidates from a piece inventory.
 */

pub(crate) mod board;
pub(crate) mod builder;
pub(crate) mod consts;
pub mod coords;
pub(crate) mod error;
pub(crate) mod inventory;
pub(crate) mod piece;
pub(crate) mod random;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::{Board, BoardSnapshot, Grid},
        builder::{generate_piece_set, BoardBuilder},
        consts::*,
        coords::{self, *},
        error::PuzzleError,
        inventory::PieceInventory,
        piece::Piece,
        random::RandomSource,
    };
}
