use crate::eternity::prelude::*;

/// How many uniform samples a tournament draws before keeping the winner.
pub const TOURNAMENT_SIZE: usize = 5;

/// The configured way of picking parents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMethod {
    Roulette,
    Tournament,
}

impl SelectionMethod {
    /// Notates the method, for filenames and logs.
    pub fn notate(&self) -> String {
        match self {
            SelectionMethod::Roulette   => "roulette",
            SelectionMethod::Tournament => "tournament",
        }.into()
    }

    /// Produces the strategy for this method.
    pub fn strategy(&self) -> Box<dyn Select> {
        match self {
            SelectionMethod::Roulette   => Box::new(Roulette),
            SelectionMethod::Tournament => Box::new(Tournament { size: TOURNAMENT_SIZE }),
        }
    }
}

impl std::str::FromStr for SelectionMethod {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "roulette"   => Ok(SelectionMethod::Roulette),
            "tournament" => Ok(SelectionMethod::Tournament),
            _            => Err(anyhow!("invalid notation {s} for selection method")),
        }
    }
}

/// Picks a parent from the previous generation.
pub trait Select {
    fn select(&self, prev: &[Board], rng: &mut RandomSource) -> usize;
}

/// Fitness-proportional selection by inverse CDF over the population. A
/// population with no fitness at all falls back to a uniform draw.
pub struct Roulette;

impl Select for Roulette {
    fn select(&self, prev: &[Board], rng: &mut RandomSource) -> usize {
        let total: i64 = prev.iter().map(|board| board.fit_score as i64).sum();
        if total <= 0 {
            return rng.rand_int(0, prev.len() - 1);
        }
        let mut ticket = rng.rand_int(0, total as usize - 1) as i64;
        for (index, board) in prev.iter().enumerate() {
            ticket -= board.fit_score as i64;
            if ticket < 0 {
                return index;
            }
        }
        prev.len() - 1
    }
}

/// Best-of-K selection: sample K candidates uniformly and keep the winner by
/// the board ordering.
pub struct Tournament {
    pub size: usize,
}

impl Select for Tournament {
    fn select(&self, prev: &[Board], rng: &mut RandomSource) -> usize {
        let mut winner = rng.rand_int(0, prev.len() - 1);
        for _ in 1..self.size {
            let challenger = rng.rand_int(0, prev.len() - 1);
            if prev[challenger] > prev[winner] {
                winner = challenger;
            }
        }
        winner
    }
}
