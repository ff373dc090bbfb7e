use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::error::ParseError;

/// AI difficulty. Each game matches every variant; a tier a game does not
/// support plays uniformly at random.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Uniform random legal move.
    Naive,
    /// Win/block/center cascade on boards, behavioral prediction in RPS.
    Biased,
    /// Exhaustive game-tree search.
    Minimax,
    /// Tabular Q-learning.
    Learning,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Naive, Tier::Biased, Tier::Minimax, Tier::Learning];

    pub fn name(self) -> &'static str {
        match self {
            Tier::Naive => "naive",
            Tier::Biased => "biased",
            Tier::Minimax => "minimax",
            Tier::Learning => "rl",
        }
    }

    /// Parse a tier name, falling back to `Naive` for anything unknown.
    pub fn from_name_or_naive(name: &str) -> Tier {
        name.parse().unwrap_or_else(|err| {
            warn!("{err}, falling back to naive");
            Tier::Naive
        })
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" => Ok(Tier::Naive),
            "biased" | "biassed" | "heuristic" => Ok(Tier::Biased),
            "minimax" => Ok(Tier::Minimax),
            "rl" | "learning" => Ok(Tier::Learning),
            _ => Err(ParseError::UnknownTier(s.to_string())),
        }
    }
}
