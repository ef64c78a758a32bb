use super::prelude::*;

/// A puzzle piece: an immutable identity (id plus the four segment patterns
/// at orientation 0, clockwise from the top) and the mutable rotation it is
/// currently placed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub id: usize,
    pub kind: PieceKind,
    pub orientation: u8,
    segments: [Pattern; 4],
}

impl Piece {
    /// Builds a piece at orientation 0, deriving its kind from the number of
    /// border-pattern segments. Three or four border segments cannot be
    /// placed anywhere on a board, so such data is rejected.
    pub fn new(id: usize, segments: [Pattern; 4]) -> Result<Piece> {
        let kind = match segments.iter().filter(|&&s| s == BORDER_PATTERN).count() {
            2 => PieceKind::Corner,
            1 => PieceKind::Edge,
            0 => PieceKind::Inner,
            n => { return Err(anyhow!("piece {id} has {n} border segments")); }
        };
        if kind == PieceKind::Corner && !Piece::adjacent_borders(&segments) {
            return Err(anyhow!("piece {id} has opposite border segments"));
        }
        Ok(Piece { id, kind, orientation: 0, segments })
    }

    /// Reads the pattern showing at the given segment location, accounting
    /// for the piece's clockwise rotation.
    pub fn pattern(&self, seg: SegLocation) -> Pattern {
        self.segments[(seg.index() + 4 - self.orientation as usize) % 4]
    }

    /// Rotates the piece 90 degrees clockwise.
    pub fn rotate(&mut self) {
        self.orientation = (self.orientation + 1) % 4;
    }

    /// Produces a copy of the piece at the given orientation.
    pub fn oriented(&self, orientation: u8) -> Piece {
        Piece { orientation: orientation % 4, ..*self }
    }

    /// The segment patterns at orientation 0, clockwise from the top.
    pub fn segments(&self) -> [Pattern; 4] {
        self.segments
    }

    /// Rotates the piece to the unique orientation that shows the border
    /// pattern on every given outward-facing segment. Returns false when no
    /// orientation fits, which means the piece does not belong on that slot.
    pub fn face_border(&mut self, outward: &[SegLocation]) -> bool {
        for _ in 0..4 {
            if outward.iter().all(|&seg| self.pattern(seg) == BORDER_PATTERN) {
                return true;
            }
            self.rotate();
        }
        false
    }

    // corner borders must share a piece corner, i.e. sit on adjacent segments
    fn adjacent_borders(segments: &[Pattern; 4]) -> bool {
        !(segments[0] == BORDER_PATTERN && segments[2] == BORDER_PATTERN)
            && !(segments[1] == BORDER_PATTERN && segments[3] == BORDER_PATTERN)
    }
}
