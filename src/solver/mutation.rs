use crate::eternity::prelude::*;

/// The configured neighbourhood operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationMethod {
    Swap,
    Rotate,
    RotateSwap,
    RegionRotate,
    RegionSwap,
}

impl MutationMethod {
    /// Notates the method, for filenames and logs.
    pub fn notate(&self) -> String {
        match self {
            MutationMethod::Swap         => "swap",
            MutationMethod::Rotate       => "rotate",
            MutationMethod::RotateSwap   => "rotate-swap",
            MutationMethod::RegionRotate => "region-rotate",
            MutationMethod::RegionSwap   => "region-swap",
        }.into()
    }
}

impl std::str::FromStr for MutationMethod {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "swap"          => Ok(MutationMethod::Swap),
            "rotate"        => Ok(MutationMethod::Rotate),
            "rotate-swap"   => Ok(MutationMethod::RotateSwap),
            "region-rotate" => Ok(MutationMethod::RegionRotate),
            "region-swap"   => Ok(MutationMethod::RegionSwap),
            _               => Err(anyhow!("invalid notation {s} for mutation method")),
        }
    }
}

// the slots of a 2x2 block, clockwise from its top-left anchor
const BLOCK_OFFSETS: [(usize, usize); 4] = [(0, 0), (0, 1), (1, 1), (1, 0)];

/// Perturbs candidates in place. Every operator ends with a plain swap: a
/// rotation cannot change the outcome for border pieces whose orientation is
/// already fixed, so the trailing swap keeps every method able to move the
/// search out of a local maximum.
pub struct Mutation {
    method: MutationMethod,
    per_generation: usize,
    size: usize,
    start_piece: bool,
}

impl Mutation {
    /// Constructs the operator. The mutation count per generation is the
    /// configured percentage of the population, rounded down.
    pub fn new(method: MutationMethod, rate: f64, pop_size: usize, size: usize, start_piece: bool) -> Mutation {
        Mutation {
            method,
            per_generation: ((rate * pop_size as f64) / 100.0) as usize,
            size,
            start_piece,
        }
    }

    /// Applies the configured number of mutations, each to a uniformly
    /// chosen candidate. The GA loop passes the breedable share of the
    /// population; elite copies stay verbatim until the next generation.
    pub fn run(&self, population: &mut [Board], rng: &mut RandomSource) {
        if population.is_empty() {
            return;
        }
        for _ in 0..self.per_generation {
            let target = rng.rand_int(0, population.len() - 1);
            self.apply(&mut population[target], rng);
        }
    }

    /// Applies one mutation of the configured method to a board.
    pub fn apply(&self, board: &mut Board, rng: &mut RandomSource) {
        match self.method {
            MutationMethod::Swap         => self.swap(board, rng),
            MutationMethod::Rotate       => self.rotate(board, rng),
            MutationMethod::RotateSwap   => self.rotate_swap(board, rng),
            MutationMethod::RegionRotate => self.region_rotate(board, rng),
            MutationMethod::RegionSwap   => self.region_swap(board, rng),
        }
        board.debug_validate(self.start_piece);
    }

    // Swaps two random distinct slots of one random piece kind.
    fn swap(&self, board: &mut Board, rng: &mut RandomSource) {
        let kind = PieceKind::from(rng.rand_int(0, 2) as u8);
        let a = self.rand_slot(kind, rng);
        let b = loop {
            let b = self.rand_slot(kind, rng);
            if b != a {
                break b;
            }
        };
        board.swap(a, b);
    }

    // Rotates one random inner piece, then swaps.
    fn rotate(&self, board: &mut Board, rng: &mut RandomSource) {
        let at = self.rand_inner(rng);
        board.piece_mut(at).rotate();
        self.swap(board, rng);
    }

    // Rotates two random distinct inner pieces and swaps them, then swaps.
    fn rotate_swap(&self, board: &mut Board, rng: &mut RandomSource) {
        let a = self.rand_inner(rng);
        let b = loop {
            let b = self.rand_inner(rng);
            if b != a {
                break b;
            }
        };
        board.piece_mut(a).rotate();
        board.piece_mut(b).rotate();
        board.swap(a, b);
        self.swap(board, rng);
    }

    // Rotates every piece of a random 2x2 inner block, then swaps.
    fn region_rotate(&self, board: &mut Board, rng: &mut RandomSource) {
        let anchor = self.rand_block(rng);
        for (dr, dc) in BLOCK_OFFSETS {
            board.piece_mut(Coord::new(anchor.row + dr, anchor.col + dc)).rotate();
        }
        self.swap(board, rng);
    }

    // Swaps two random non-overlapping 2x2 inner blocks position for
    // position, then swaps. Anchors redraw as a pair: a centre anchor on a
    // small board has no disjoint partner at all.
    fn region_swap(&self, board: &mut Board, rng: &mut RandomSource) {
        let [mut a, mut b] = [self.rand_block(rng), self.rand_block(rng)];
        while a.row.abs_diff(b.row) < 2 && a.col.abs_diff(b.col) < 2 {
            [a, b] = [self.rand_block(rng), self.rand_block(rng)];
        }
        for (dr, dc) in BLOCK_OFFSETS {
            board.swap(Coord::new(a.row + dr, a.col + dc), Coord::new(b.row + dr, b.col + dc));
        }
        self.swap(board, rng);
    }

    fn rand_slot(&self, kind: PieceKind, rng: &mut RandomSource) -> Coord {
        match kind {
            PieceKind::Corner => self.rand_corner(rng),
            PieceKind::Edge   => self.rand_edge(rng),
            PieceKind::Inner  => self.rand_inner(rng),
        }
    }

    fn rand_corner(&self, rng: &mut RandomSource) -> Coord {
        let rim = self.size - 1;
        match rng.rand_int(0, 3) {
            0 => Coord::new(0, 0),
            1 => Coord::new(0, rim),
            2 => Coord::new(rim, 0),
            _ => Coord::new(rim, rim),
        }
    }

    fn rand_edge(&self, rng: &mut RandomSource) -> Coord {
        let rim = self.size - 1;
        let along = rng.rand_int(1, self.size - 2);
        match rng.rand_int(0, 3) {
            0 => Coord::new(0, along),
            1 => Coord::new(along, 0),
            2 => Coord::new(along, rim),
            _ => Coord::new(rim, along),
        }
    }

    // Inner draws never land on the distinguished slot while the start-piece
    // constraint is active.
    fn rand_inner(&self, rng: &mut RandomSource) -> Coord {
        loop {
            let at = Coord::new(rng.rand_int(1, self.size - 2), rng.rand_int(1, self.size - 2));
            if !(self.start_piece && at == START_SLOT) {
                return at;
            }
        }
    }

    // Anchors stay off the last inner row and column so the block fits, and
    // off the distinguished slot's block while the constraint is active.
    fn rand_block(&self, rng: &mut RandomSource) -> Coord {
        loop {
            let at = Coord::new(rng.rand_int(1, self.size - 3), rng.rand_int(1, self.size - 3));
            let covers_start = START_SLOT.row >= at.row
                && START_SLOT.row <= at.row + 1
                && START_SLOT.col >= at.col
                && START_SLOT.col <= at.col + 1;
            if !(self.start_piece && covers_start) {
                return at;
            }
        }
    }
}
