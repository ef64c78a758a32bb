use super::prelude::*;

/// Builds fully-placed boards from a piece inventory. The fill runs in three
/// phases: the top edge first, then the interior together with the remaining
/// border (corners last), then the start-piece fix-up when the official
/// constraint is active.
#[derive(Clone, Copy, Debug)]
pub struct BoardBuilder {
    size: usize,
    start_piece: bool,
}

impl BoardBuilder {
    /// Constructs a builder for boards of the given side length.
    pub fn new(size: usize, start_piece: bool) -> BoardBuilder {
        BoardBuilder { size, start_piece }
    }

    /// Builds one full board, consuming pieces from the inventory. The caller
    /// refills the inventory before the next build; running dry mid-build is
    /// an unbuildable board, not a recoverable state.
    pub fn build(
        &self,
        board_id: usize,
        inventory: &mut PieceInventory,
        rng: &mut RandomSource,
    ) -> std::result::Result<Board, PuzzleError> {
        let size = self.size;
        let mut slots: Vec<Option<Piece>> = vec![None; size * size];

        // Phase 1: the top edge, left to right.
        for col in 1..size - 1 {
            self.place(&mut slots, Coord::new(0, col), inventory, rng)?;
        }

        // Phase 2: interior rows with their flanking edges, then the bottom
        // edge, then the four corners.
        for row in 1..size - 1 {
            self.place(&mut slots, Coord::new(row, 0), inventory, rng)?;
            for col in 1..size - 1 {
                self.place(&mut slots, Coord::new(row, col), inventory, rng)?;
            }
            self.place(&mut slots, Coord::new(row, size - 1), inventory, rng)?;
        }
        for col in 1..size - 1 {
            self.place(&mut slots, Coord::new(size - 1, col), inventory, rng)?;
        }
        for at in [
            Coord::new(0, 0),
            Coord::new(0, size - 1),
            Coord::new(size - 1, 0),
            Coord::new(size - 1, size - 1),
        ] {
            self.place(&mut slots, at, inventory, rng)?;
        }

        let placed: Option<Vec<Piece>> = slots.into_iter().collect();
        let grid = Grid::from_slots(size, placed.unwrap_or_default())?;
        let mut board = Board::new(board_id, grid);

        // Phase 3: pin the start piece when the official constraint is on.
        if self.start_piece && !board.pin_start_piece() {
            return Err(PuzzleError::UnbuildableBoard(format!(
                "piece set has no start piece {START_PIECE_ID}"
            )));
        }

        board.debug_validate(self.start_piece);
        Ok(board)
    }

    // Draws a random piece of the slot's kind and places it, rotated so all
    // outward segments show the border pattern.
    fn place(
        &self,
        slots: &mut [Option<Piece>],
        at: Coord,
        inventory: &mut PieceInventory,
        rng: &mut RandomSource,
    ) -> std::result::Result<(), PuzzleError> {
        let kind = at.slot_kind(self.size);
        let mut piece = inventory
            .take_random(kind, rng)
            .map_err(|_| PuzzleError::UnbuildableBoard(format!("no {kind} pieces left for {}", at.notate())))?;
        let outward = at.outward_segments(self.size);
        if !piece.face_border(&outward) {
            return Err(PuzzleError::UnbuildableBoard(format!(
                "piece {} cannot face the border at {}",
                piece.id,
                at.notate()
            )));
        }
        slots[at.index(self.size)] = Some(piece);
        Ok(())
    }
}

/// Generates a solvable piece set for a board of the given size: a solved
/// board is laid out by drawing a random pattern for every internal boundary
/// and the border pattern for the perimeter, then cut into pieces in
/// row-major order, ids starting at 1.
pub fn generate_piece_set(size: usize, patterns: usize, rng: &mut RandomSource) -> Result<Vec<Piece>> {
    // vertical[r][c] sits between (r, c) and (r, c + 1); horizontal[r][c]
    // between (r, c) and (r + 1, c)
    let vertical: Vec<Vec<Pattern>> = (0..size)
        .map(|_| (0..size - 1).map(|_| rng.rand_int(1, patterns) as Pattern).collect())
        .collect();
    let horizontal: Vec<Vec<Pattern>> = (0..size - 1)
        .map(|_| (0..size).map(|_| rng.rand_int(1, patterns) as Pattern).collect())
        .collect();

    let mut pieces = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            let top = if row == 0 { BORDER_PATTERN } else { horizontal[row - 1][col] };
            let right = if col == size - 1 { BORDER_PATTERN } else { vertical[row][col] };
            let bottom = if row == size - 1 { BORDER_PATTERN } else { horizontal[row][col] };
            let left = if col == 0 { BORDER_PATTERN } else { vertical[row][col - 1] };
            pieces.push(Piece::new(row * size + col + 1, [top, right, bottom, left])?);
        }
    }
    Ok(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_one(size: usize, start_piece: bool, seed: u64) -> Board {
        let mut rng = RandomSource::with_seed(seed);
        let pieces = generate_piece_set(size, 3, &mut rng).unwrap();
        let mut inventory = PieceInventory::load(&pieces);
        BoardBuilder::new(size, start_piece)
            .build(1, &mut inventory, &mut rng)
            .unwrap()
    }

    #[test]
    fn generated_sets_have_a_legal_census() {
        let mut rng = RandomSource::with_seed(11);
        let pieces = generate_piece_set(6, 4, &mut rng).unwrap();
        assert_eq!(pieces.len(), 36);
        let corners = pieces.iter().filter(|p| p.kind == PieceKind::Corner).count();
        let edges = pieces.iter().filter(|p| p.kind == PieceKind::Edge).count();
        let inners = pieces.iter().filter(|p| p.kind == PieceKind::Inner).count();
        assert_eq!((corners, edges, inners), (4, 16, 16));
    }

    #[test]
    fn built_boards_use_every_piece_once() {
        let board = build_one(5, false, 21);
        let mut ids: Vec<usize> = board.grid.iter().map(|(_, piece)| piece.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=25).collect::<Vec<usize>>());
    }

    #[test]
    fn built_boards_respect_slot_kinds_and_borders() {
        let board = build_one(6, false, 5);
        for (at, piece) in board.grid.iter() {
            assert_eq!(piece.kind, at.slot_kind(6));
            for seg in at.outward_segments(6) {
                assert_eq!(piece.pattern(seg), BORDER_PATTERN);
            }
        }
    }

    #[test]
    fn start_piece_lands_pinned() {
        let board = build_one(START_BOARD_SIZE, true, 77);
        let piece = board.piece(START_SLOT);
        assert_eq!(piece.id, START_PIECE_ID);
        assert_eq!(piece.orientation, 0);
    }

    #[test]
    fn exhausted_inventory_is_unbuildable() {
        let mut rng = RandomSource::with_seed(2);
        let pieces = generate_piece_set(4, 2, &mut rng).unwrap();
        let mut inventory = PieceInventory::load(&pieces);
        let builder = BoardBuilder::new(4, false);
        builder.build(1, &mut inventory, &mut rng).unwrap();
        match builder.build(2, &mut inventory, &mut rng) {
            Err(PuzzleError::UnbuildableBoard(_)) => {}
            other => panic!("expected an unbuildable board, got {other:?}"),
        }
    }
}
