use super::prelude::*;

/// The N x N grid of placed pieces, row-major.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    slots: Vec<Piece>,
}

impl Grid {
    /// Wraps a row-major slot vector. The vector must hold exactly size^2 pieces.
    pub fn from_slots(size: usize, slots: Vec<Piece>) -> std::result::Result<Grid, PuzzleError> {
        if slots.len() != size * size {
            return Err(PuzzleError::UnbuildableBoard(format!(
                "expected {} placed pieces, found {}",
                size * size,
                slots.len()
            )));
        }
        Ok(Grid { size, slots })
    }

    /// The side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Iterates the grid in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Piece)> {
        let size = self.size;
        self.slots
            .iter()
            .enumerate()
            .map(move |(index, piece)| (Coord::from_index(index, size), piece))
    }

    /// Swaps the pieces in two slots.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        let [ia, ib] = [a.index(self.size), b.index(self.size)];
        self.slots.swap(ia, ib);
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Piece;
    fn index(&self, at: Coord) -> &Piece {
        &self.slots[at.index(self.size)]
    }
}

impl std::ops::IndexMut<Coord> for Grid {
    fn index_mut(&mut self, at: Coord) -> &mut Piece {
        &mut self.slots[at.index(self.size)]
    }
}

/// A candidate solution: a fully-placed grid plus the scores derived from it
/// by the fitness evaluator.
#[derive(Clone, Debug)]
pub struct Board {
    pub grid: Grid,
    pub fit_score: i32,
    pub match_count: i32,
    pub board_id: usize,
}

/// A read-only view of a board for the output adapters.
#[derive(Clone, Debug)]
pub struct BoardSnapshot {
    pub size: usize,
    pub cells: Vec<(usize, u8)>,
    pub fit_score: i32,
    pub match_count: i32,
}

impl Board {
    /// Wraps a grid into an unevaluated board.
    pub fn new(board_id: usize, grid: Grid) -> Board {
        Board { grid, fit_score: 0, match_count: 0, board_id }
    }

    /// The side length of the board.
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// The piece in a slot.
    pub fn piece(&self, at: Coord) -> &Piece {
        &self.grid[at]
    }

    /// Mutable access to the piece in a slot.
    pub fn piece_mut(&mut self, at: Coord) -> &mut Piece {
        &mut self.grid[at]
    }

    /// Reads the pattern a slot shows at a segment location, honouring the
    /// orientation of the piece placed there.
    pub fn pattern(&self, at: Coord, seg: SegLocation) -> Pattern {
        self.grid[at].pattern(seg)
    }

    /// Locates a piece by id.
    pub fn find_piece(&self, id: usize) -> Option<Coord> {
        self.grid.iter().find(|(_, piece)| piece.id == id).map(|(at, _)| at)
    }

    /// Swaps the pieces in two slots, re-fixing orientations on any border
    /// slot involved so outward segments keep showing the border pattern.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        self.grid.swap(a, b);
        self.fix_orientation(a);
        self.fix_orientation(b);
    }

    /// Rotates the piece in a border slot to the unique orientation that puts
    /// the border pattern on every outward-facing segment. Inner slots are
    /// left untouched.
    pub fn fix_orientation(&mut self, at: Coord) {
        let outward = at.outward_segments(self.grid.size());
        if outward.is_empty() {
            return;
        }
        let fixed = self.grid[at].face_border(&outward);
        debug_assert!(
            fixed,
            "piece {} cannot face the border at {}",
            self.grid[at].id,
            at.notate()
        );
    }

    /// Moves the distinguished start piece into the distinguished slot at
    /// orientation 0, swapping it with the current occupant. Both slots are
    /// interior, so piece/slot agreement is preserved. Returns false when the
    /// piece set has no start piece at all.
    pub fn pin_start_piece(&mut self) -> bool {
        let Some(found) = self.find_piece(START_PIECE_ID) else {
            return false;
        };
        if found != START_SLOT {
            self.grid.swap(found, START_SLOT);
        }
        let piece = &mut self.grid[START_SLOT];
        piece.orientation = 0;
        true
    }

    /// Captures a read-only view for the output adapters.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.grid.size(),
            cells: self.grid.iter().map(|(_, piece)| (piece.id, piece.orientation)).collect(),
            fit_score: self.fit_score,
            match_count: self.match_count,
        }
    }

    /// Debug-build postcondition check: every operator must hand back a board
    /// that is a permutation of the piece set, slot-type valid, border-fixed,
    /// and start-pinned when the constraint is active.
    pub fn debug_validate(&self, start_piece: bool) {
        if cfg!(debug_assertions) {
            let size = self.grid.size();
            let mut seen = HashSet::new();
            for (at, piece) in self.grid.iter() {
                debug_assert!(seen.insert(piece.id), "piece {} appears twice", piece.id);
                debug_assert!(
                    piece.kind == at.slot_kind(size),
                    "{} piece {} sits on a {} slot {}",
                    piece.kind,
                    piece.id,
                    at.slot_kind(size),
                    at.notate()
                );
                for seg in at.outward_segments(size) {
                    debug_assert!(
                        piece.pattern(seg) == BORDER_PATTERN,
                        "piece {} shows pattern {} off the board at {}",
                        piece.id,
                        piece.pattern(seg),
                        at.notate()
                    );
                }
            }
            if start_piece {
                let piece = self.piece(START_SLOT);
                debug_assert!(
                    piece.id == START_PIECE_ID && piece.orientation == 0,
                    "start slot holds piece {} at orientation {}",
                    piece.id,
                    piece.orientation
                );
            }
        }
    }
}

// Boards order by fitness, tie-broken by raw match count.

impl Ord for Board {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.fit_score, self.match_count).cmp(&(other.fit_score, other.match_count))
    }
}

impl PartialOrd for Board {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Board {}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_grid() -> Grid {
        // a hand-built 2x2 of corner pieces, borders facing out
        let pieces = vec![
            Piece::new(1, [0, 1, 1, 0]).unwrap().oriented(0),
            Piece::new(2, [0, 0, 1, 1]).unwrap().oriented(0),
            Piece::new(3, [1, 1, 0, 0]).unwrap().oriented(0),
            Piece::new(4, [1, 0, 0, 1]).unwrap().oriented(0),
        ];
        Grid::from_slots(2, pieces).unwrap()
    }

    #[test]
    fn ordering_prefers_fitness_then_matches() {
        let mut a = Board::new(1, tiny_grid());
        let mut b = Board::new(2, tiny_grid());
        a.fit_score = 10;
        b.fit_score = 12;
        assert!(a < b);
        b.fit_score = 10;
        a.match_count = 3;
        b.match_count = 5;
        assert!(a < b);
    }

    #[test]
    fn swap_fixes_border_orientations() {
        let mut board = Board::new(1, tiny_grid());
        let [a, b] = [Coord::new(0, 0), Coord::new(1, 1)];
        board.swap(a, b);
        for at in [a, b] {
            for seg in at.outward_segments(2) {
                assert_eq!(board.pattern(at, seg), BORDER_PATTERN);
            }
        }
        board.debug_validate(false);
    }

    #[test]
    fn snapshot_reflects_the_grid() {
        let board = Board::new(9, tiny_grid());
        let snapshot = board.snapshot();
        assert_eq!(snapshot.size, 2);
        assert_eq!(snapshot.cells.len(), 4);
        assert_eq!(snapshot.cells[0], (1, 0));
    }
}
