//! Rules engines for the three games: boards, turn order, win/draw detection,
//! and scoring. Each engine also answers `ai_move` for a requested tier.

mod board;
mod connect_four;
mod player;
pub mod rps;
mod state;
pub mod tictactoe;

pub use board::{Board, CENTER_COL, COLS, ROWS, WIN_LINES};
pub use connect_four::ConnectFour;
pub use player::{Cell, Player};
pub use rps::{Choice, RockPaperScissors, Round};
pub use state::{BoardGame, Coord, MoveError, Outcome, Score};
pub use tictactoe::TicTacToe;

use crate::ai::Tier;

/// The games on the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    TicTacToe,
    RockPaperScissors,
    ConnectFour,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [
        GameKind::TicTacToe,
        GameKind::RockPaperScissors,
        GameKind::ConnectFour,
    ];

    pub fn title(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "Tic-Tac-Toe",
            GameKind::RockPaperScissors => "Rock Paper Scissors",
            GameKind::ConnectFour => "Connect 4",
        }
    }

    /// Tiers offered on this game's mode menu, easiest first.
    pub fn tiers(self) -> &'static [Tier] {
        match self {
            GameKind::TicTacToe => &[Tier::Naive, Tier::Biased, Tier::Minimax],
            GameKind::RockPaperScissors => &[Tier::Naive, Tier::Biased, Tier::Learning],
            GameKind::ConnectFour => &[Tier::Naive, Tier::Biased],
        }
    }

    pub fn tier_label(self, tier: Tier) -> &'static str {
        match (self, tier) {
            (_, Tier::Naive) => "Easy (Naive)",
            (GameKind::RockPaperScissors, Tier::Biased) => "Medium (Biased)",
            (_, Tier::Biased) => "Medium (Heuristic)",
            (_, Tier::Minimax) => "Hard (Minimax)",
            (_, Tier::Learning) => "Hard (RL)",
        }
    }
}
