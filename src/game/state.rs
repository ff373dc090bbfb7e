use crate::ai::Tier;

use super::Player;

/// A board coordinate. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

/// Result of a legal move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continuing,
    Win { player: Player, line: Vec<Coord> },
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continuing)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// Cells to highlight: the winning line, or nothing.
    pub fn line(&self) -> &[Coord] {
        match self {
            Outcome::Win { line, .. } => line,
            _ => &[],
        }
    }
}

/// Why a move was refused. A refused move never touches the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell {0} is already taken")]
    Occupied(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("{0} is out of range")]
    OutOfRange(usize),

    #[error("the game is over")]
    GameOver,
}

/// Rounds won by each side. Survives `new_round`, cleared by `reset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u32,
    pub ai: u32,
}

impl Score {
    /// Credit a round to `winner`.
    pub fn record(&mut self, winner: Player) {
        match winner {
            Player::One => self.player += 1,
            Player::Two => self.ai += 1,
        }
    }
}

/// The surface the scene shell drives for the two board games.
pub trait BoardGame {
    type Move: Copy + PartialEq + std::fmt::Debug;

    /// Apply a move for the player to act.
    fn play(&mut self, mv: Self::Move) -> Result<Outcome, MoveError>;

    /// Pick a move for the player to act using the given tier. `None` when
    /// the game is over or no move is left.
    fn ai_move(&mut self, tier: Tier) -> Option<Self::Move>;

    /// Clear the board and the score.
    fn reset(&mut self);

    /// Clear the board, keep the score.
    fn new_round(&mut self);

    fn legal_moves(&self) -> Vec<Self::Move>;

    fn current_player(&self) -> Player;

    fn score(&self) -> Score;

    fn is_over(&self) -> bool;
}
