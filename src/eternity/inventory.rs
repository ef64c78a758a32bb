use super::prelude::*;

/// All pieces of a puzzle, partitioned by placement class. Each board build
/// consumes one inventory; the solver refills it from the master piece list
/// before the next build.
#[derive(Clone, Debug, Default)]
pub struct PieceInventory {
    corners: Vec<Piece>,
    edges: Vec<Piece>,
    inners: Vec<Piece>,
}

impl PieceInventory {
    /// Loads an inventory from a piece list, classifying by kind.
    pub fn load(pieces: &[Piece]) -> PieceInventory {
        let mut inventory = PieceInventory::default();
        for &piece in pieces {
            inventory.put_back(piece);
        }
        inventory
    }

    /// The number of pieces of a kind still available.
    pub fn count(&self, kind: PieceKind) -> usize {
        self.shelf(kind).len()
    }

    /// Determines whether every shelf has been exhausted.
    pub fn is_empty(&self) -> bool {
        PieceKind::all().iter().all(|&kind| self.count(kind) == 0)
    }

    /// Removes and returns a uniformly random piece of the given kind.
    pub fn take_random(&mut self, kind: PieceKind, rng: &mut RandomSource) -> std::result::Result<Piece, PuzzleError> {
        let shelf = self.shelf_mut(kind);
        if shelf.is_empty() {
            return Err(PuzzleError::InventoryEmpty { kind });
        }
        let chosen = rng.rand_int(0, shelf.len() - 1);
        Ok(shelf.swap_remove(chosen))
    }

    /// Removes and returns the first piece of the given kind that can be
    /// rotated to show every wanted pattern at its wanted location, already
    /// placed at that rotation. Returns none when no piece qualifies.
    pub fn take_matching(&mut self, kind: PieceKind, wanted: &[(SegLocation, Pattern)]) -> Option<Piece> {
        let shelf = self.shelf_mut(kind);
        for index in 0..shelf.len() {
            for orientation in 0..4 {
                let candidate = shelf[index].oriented(orientation);
                if wanted.iter().all(|&(seg, pattern)| candidate.pattern(seg) == pattern) {
                    shelf.swap_remove(index);
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Returns a piece to its shelf.
    pub fn put_back(&mut self, piece: Piece) {
        self.shelf_mut(piece.kind).push(piece);
    }

    fn shelf(&self, kind: PieceKind) -> &Vec<Piece> {
        match kind {
            PieceKind::Corner => &self.corners,
            PieceKind::Edge   => &self.edges,
            PieceKind::Inner  => &self.inners,
        }
    }

    fn shelf_mut(&mut self, kind: PieceKind) -> &mut Vec<Piece> {
        match kind {
            PieceKind::Corner => &mut self.corners,
            PieceKind::Edge   => &mut self.edges,
            PieceKind::Inner  => &mut self.inners,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<Piece> {
        vec![
            Piece::new(1, [0, 1, 2, 0]).unwrap(),
            Piece::new(2, [0, 2, 1, 3]).unwrap(),
            Piece::new(3, [0, 1, 1, 2]).unwrap(),
            Piece::new(4, [1, 2, 1, 2]).unwrap(),
        ]
    }

    #[test]
    fn partitions_by_kind() {
        let inventory = PieceInventory::load(&fixture());
        assert_eq!(inventory.count(PieceKind::Corner), 1);
        assert_eq!(inventory.count(PieceKind::Edge), 2);
        assert_eq!(inventory.count(PieceKind::Inner), 1);
    }

    #[test]
    fn take_random_exhausts_to_an_error() {
        let mut inventory = PieceInventory::load(&fixture());
        let mut rng = RandomSource::with_seed(3);
        assert!(inventory.take_random(PieceKind::Corner, &mut rng).is_ok());
        assert_eq!(
            inventory.take_random(PieceKind::Corner, &mut rng),
            Err(PuzzleError::InventoryEmpty { kind: PieceKind::Corner })
        );
    }

    #[test]
    fn take_matching_orients_the_match() {
        let mut inventory = PieceInventory::load(&fixture());
        // piece 4 shows 2 on top at orientation 1 (or 3)
        let found = inventory
            .take_matching(PieceKind::Inner, &[(SegLocation::Top, 2)])
            .unwrap();
        assert_eq!(found.id, 4);
        assert_eq!(found.pattern(SegLocation::Top), 2);
        assert_eq!(inventory.count(PieceKind::Inner), 0);
        assert!(inventory.take_matching(PieceKind::Inner, &[(SegLocation::Top, 2)]).is_none());
    }

    #[test]
    fn put_back_refills_the_shelf() {
        let mut inventory = PieceInventory::load(&fixture());
        let mut rng = RandomSource::with_seed(9);
        let piece = inventory.take_random(PieceKind::Edge, &mut rng).unwrap();
        inventory.put_back(piece);
        assert_eq!(inventory.count(PieceKind::Edge), 2);
    }
}
