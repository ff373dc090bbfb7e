#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    /// The player occupying this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }
}

/// One of the two seats at a board. The human always sits in seat one and
/// moves first; the AI answers from seat two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const HUMAN: Player = Player::One;
    pub const AI: Player = Player::Two;

    /// Numeric id, 1 or 2.
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Player> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Get the other player (`3 - id`)
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::One => Cell::One,
            Player::Two => Cell::Two,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::One => "You",
            Player::Two => "AI",
        }
    }
}
