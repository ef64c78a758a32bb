use crate::utils::prelude::*;

use super::coords::Coord;

/// A pattern id on one segment of a piece.
pub type Pattern = u8;

/// The distinguished pattern that must face outward on every perimeter segment.
pub const BORDER_PATTERN: Pattern = 0;

/// Fitness weight of a matched boundary touching a corner slot.
pub const CORNER_MATCH: i32 = 4;
/// Fitness weight of a matched boundary touching an edge slot but no corner.
pub const EDGE_MATCH: i32 = 2;
/// Fitness weight of a matched boundary between two inner slots.
pub const INNER_MATCH: i32 = 1;
/// Weight of an outward-facing segment showing the border pattern. Outward
/// segments are orientation-fixed at placement, so every candidate earns the
/// same constant here; it is kept out of the solvability threshold.
pub const BORDER_MATCH: i32 = 0;

/// The piece the official 16x16 rule book pins to [`START_SLOT`].
pub const START_PIECE_ID: usize = 139;
/// The slot the official 16x16 rule book pins [`START_PIECE_ID`] to.
pub const START_SLOT: Coord = Coord { row: 7, col: 8 };
/// The start-piece constraint only exists for the official puzzle.
pub const START_BOARD_SIZE: usize = 16;

// A segment position on a piece, read clockwise from the top.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SegLocation {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl SegLocation {
    /// Gets the segment locations in clockwise order.
    pub fn all() -> [SegLocation; 4] {
        [SegLocation::Top, SegLocation::Right, SegLocation::Bottom, SegLocation::Left]
    }

    /// The index of the segment in a piece's pattern array at orientation 0.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

// The placement class of a piece, fixed by how many border segments it has.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    Corner = 0,
    Edge = 1,
    Inner = 2,
}

impl PieceKind {
    /// Gets the piece kinds in order.
    pub fn all() -> [PieceKind; 3] {
        [PieceKind::Corner, PieceKind::Edge, PieceKind::Inner]
    }

    /// Notates the kind.
    pub fn notate(&self) -> String {
        match self {
            PieceKind::Corner => "corner",
            PieceKind::Edge   => "edge",
            PieceKind::Inner  => "inner",
        }.into()
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notate())
    }
}

impl From<u8> for PieceKind {
    fn from(value: u8) -> Self {
        match value {
            0 => PieceKind::Corner,
            1 => PieceKind::Edge,
            2 => PieceKind::Inner,
            _ => panic!("expected PieceKind of 0-2, received {value}"),
        }
    }
}

impl std::str::FromStr for PieceKind {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "corner" => Ok(PieceKind::Corner),
            "edge"   => Ok(PieceKind::Edge),
            "inner"  => Ok(PieceKind::Inner),
            _        => Err(anyhow!("invalid notation {s} for piece kind")),
        }
    }
}
