use crate::eternity::prelude::*;

/// The weight of a matched boundary between two slot kinds. Corner
/// adjacencies are the scarcest and score highest, inner adjacencies the
/// most plentiful and score lowest.
pub fn match_weight(a: PieceKind, b: PieceKind) -> i32 {
    if a == PieceKind::Corner || b == PieceKind::Corner {
        CORNER_MATCH
    } else if a == PieceKind::Edge || b == PieceKind::Edge {
        EDGE_MATCH
    } else {
        INNER_MATCH
    }
}

/// Scores boards by scanning every tile boundary: outward perimeter segments
/// and both internal boundary directions.
#[derive(Clone, Copy, Debug)]
pub struct FitnessEvaluator {
    size: usize,
}

impl FitnessEvaluator {
    /// Constructs an evaluator for boards of the given side length.
    pub fn new(size: usize) -> FitnessEvaluator {
        FitnessEvaluator { size }
    }

    /// Evaluates a board in place, updating its fit score and match count.
    pub fn evaluate(&self, board: &mut Board) {
        let size = self.size;
        let mut fit_score = 0;
        let mut match_count = 0;

        for row in 0..size {
            for col in 0..size {
                let at = Coord::new(row, col);

                // outward perimeter segments; fixed at placement, so this is
                // a constant contribution kept for generality
                for seg in at.outward_segments(size) {
                    if board.pattern(at, seg) == BORDER_PATTERN {
                        fit_score += BORDER_MATCH;
                    }
                }

                // boundary with the right-hand neighbour
                if col + 1 < size {
                    let right = Coord::new(row, col + 1);
                    if board.pattern(at, SegLocation::Right) == board.pattern(right, SegLocation::Left) {
                        fit_score += match_weight(at.slot_kind(size), right.slot_kind(size));
                        match_count += 1;
                    }
                }

                // boundary with the neighbour below
                if row + 1 < size {
                    let below = Coord::new(row + 1, col);
                    if board.pattern(at, SegLocation::Bottom) == board.pattern(below, SegLocation::Top) {
                        fit_score += match_weight(at.slot_kind(size), below.slot_kind(size));
                        match_count += 1;
                    }
                }
            }
        }

        board.fit_score = fit_score;
        board.match_count = match_count;
    }

    /// The fitness of a 100% solved board, in closed form.
    pub fn max_fitness(&self) -> i32 {
        let size = self.size as i32;
        8 * CORNER_MATCH
            + ((size - 2) * 2 - 1) * 4 * EDGE_MATCH
            + (size - 3) * (size - 2) * 2 * INNER_MATCH
    }

    /// The match count of a 100% solved board, in closed form.
    pub fn max_matches(&self) -> i32 {
        let size = self.size as i32;
        8 + ((size - 2) * 2 - 1) * 4 + (size - 3) * (size - 2) * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eternity::builder::generate_piece_set;

    #[test]
    fn closed_forms_count_every_internal_boundary() {
        for size in [4usize, 8, 16] {
            let evaluator = FitnessEvaluator::new(size);
            let boundaries = (2 * size * (size - 1)) as i32;
            assert_eq!(evaluator.max_matches(), boundaries);
        }
    }

    #[test]
    fn four_by_four_maxima() {
        let evaluator = FitnessEvaluator::new(4);
        assert_eq!(evaluator.max_fitness(), 8 * CORNER_MATCH + 12 * EDGE_MATCH + 4 * INNER_MATCH);
        assert_eq!(evaluator.max_matches(), 24);
    }

    #[test]
    fn solved_layout_scores_the_maximum() {
        // generated sets are cut from a solved board in row-major id order,
        // so placing ids 1..n^2 back in order reproduces the solution
        let size = 5;
        let mut rng = RandomSource::with_seed(13);
        let pieces = generate_piece_set(size, 4, &mut rng).unwrap();
        let grid = Grid::from_slots(size, pieces).unwrap();
        let mut board = Board::new(1, grid);

        let evaluator = FitnessEvaluator::new(size);
        evaluator.evaluate(&mut board);
        assert_eq!(board.fit_score, evaluator.max_fitness());
        assert_eq!(board.match_count, evaluator.max_matches());
    }

    #[test]
    fn random_boards_stay_within_bounds() {
        let size = 6;
        let mut rng = RandomSource::with_seed(31);
        let pieces = generate_piece_set(size, 2, &mut rng).unwrap();
        let evaluator = FitnessEvaluator::new(size);
        for seed in 0..10 {
            let mut build_rng = RandomSource::with_seed(seed);
            let mut inventory = PieceInventory::load(&pieces);
            let mut board = BoardBuilder::new(size, false)
                .build(1, &mut inventory, &mut build_rng)
                .unwrap();
            evaluator.evaluate(&mut board);
            assert!(board.fit_score >= 0 && board.fit_score <= evaluator.max_fitness());
            assert!(board.match_count >= 0 && board.match_count <= evaluator.max_matches());
        }
    }
}
