use super::consts::{PieceKind, SegLocation};

/// A slot position on the N x N grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Constructs a new coord.
    pub fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    /// The row-major linear index of the slot on a board of the given size.
    pub fn index(&self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Recovers the coord from a row-major linear index.
    pub fn from_index(index: usize, size: usize) -> Coord {
        Coord { row: index / size, col: index % size }
    }

    /// Determines whether or not the coord is in bounds.
    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// The placement class a slot at this position demands. The four corner
    /// slots take corner pieces, the rest of the perimeter takes edge pieces,
    /// and everything else takes inner pieces.
    pub fn slot_kind(&self, size: usize) -> PieceKind {
        let on_row_rim = self.row == 0 || self.row == size - 1;
        let on_col_rim = self.col == 0 || self.col == size - 1;
        match (on_row_rim, on_col_rim) {
            (true, true)   => PieceKind::Corner,
            (false, false) => PieceKind::Inner,
            _              => PieceKind::Edge,
        }
    }

    /// The segment locations of this slot that face off the board. Empty for
    /// inner slots, one entry for edge slots, two for corners.
    pub fn outward_segments(&self, size: usize) -> Vec<SegLocation> {
        let mut outward = Vec::with_capacity(2);
        if self.row == 0 {
            outward.push(SegLocation::Top);
        }
        if self.col == size - 1 {
            outward.push(SegLocation::Right);
        }
        if self.row == size - 1 {
            outward.push(SegLocation::Bottom);
        }
        if self.col == 0 {
            outward.push(SegLocation::Left);
        }
        outward
    }

    /// The canonical notation of the coord.
    pub fn notate(&self) -> String {
        format!("({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_kinds_partition_the_grid() {
        let size = 4;
        let mut census = [0usize; 3];
        for row in 0..size {
            for col in 0..size {
                census[Coord::new(row, col).slot_kind(size) as usize] += 1;
            }
        }
        assert_eq!(census, [4, 8, 4]);
    }

    #[test]
    fn outward_segments_match_slot_kind() {
        let size = 5;
        for row in 0..size {
            for col in 0..size {
                let at = Coord::new(row, col);
                let expected = match at.slot_kind(size) {
                    PieceKind::Corner => 2,
                    PieceKind::Edge   => 1,
                    PieceKind::Inner  => 0,
                };
                assert_eq!(at.outward_segments(size).len(), expected, "at {}", at.notate());
            }
        }
    }

    #[test]
    fn linear_index_round_trips() {
        let size = 7;
        for index in 0..size * size {
            assert_eq!(Coord::from_index(index, size).index(size), index);
        }
    }
}
