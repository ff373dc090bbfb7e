use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{BoardGame, Cell, Coord, MoveError, Outcome, Player, Score};
use crate::ai::{Speculate, Tier, best_move, greedy_move, random_move};

pub const CELLS: usize = 9;
pub const CENTER: usize = 4;

/// The eight lines of the 3x3 grid as row-major cell indices.
pub const WIN_LINES: [[usize; 3]; 8] = [
    // rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // cols
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // diags
    [0, 4, 8],
    [2, 4, 6],
];

/// Row/column of a row-major cell index.
pub fn coord(index: usize) -> Coord {
    Coord::new(index / 3, index % 3)
}

/// Tic-Tac-Toe grid, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Build a board from a row-major id layout: 0 empty, 1 and 2 players.
    pub fn from_ids(ids: [u8; CELLS]) -> Self {
        let mut board = Board::new();
        for (cell, id) in board.cells.iter_mut().zip(ids) {
            *cell = Player::from_id(id).map_or(Cell::Empty, Player::to_cell);
        }
        board
    }

    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Empty cells, ascending.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..CELLS).filter(|&i| self.cells[i] == Cell::Empty).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    /// First line held by `player`, in `WIN_LINES` order.
    pub fn winning_line(&self, player: Player) -> Option<[usize; 3]> {
        let cell = player.to_cell();
        WIN_LINES
            .iter()
            .find(|line| line.iter().all(|&i| self.cells[i] == cell))
            .copied()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Speculate for Board {
    type Move = usize;

    fn candidate_moves(&self) -> Vec<usize> {
        self.legal_moves()
    }

    fn place(&mut self, index: usize, player: Player) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) if *cell == Cell::Empty => {
                *cell = player.to_cell();
                true
            }
            _ => false,
        }
    }

    fn retract(&mut self, index: usize) {
        self.cells[index] = Cell::Empty;
    }

    fn has_won(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    fn preferred_move(&self) -> usize {
        CENTER
    }
}

/// Tic-Tac-Toe against the AI. The human (X) moves first each round.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    board: Board,
    current: Player,
    game_over: bool,
    score: Score,
    rng: StdRng,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic AI choices, for tests and `--seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        TicTacToe {
            board: Board::new(),
            current: Player::HUMAN,
            game_over: false,
            score: Score::default(),
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardGame for TicTacToe {
    type Move = usize;

    fn play(&mut self, index: usize) -> Result<Outcome, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        if index >= CELLS {
            return Err(MoveError::OutOfRange(index));
        }
        if self.board.cells[index] != Cell::Empty {
            return Err(MoveError::Occupied(index));
        }

        self.board.cells[index] = self.current.to_cell();

        if let Some(line) = self.board.winning_line(self.current) {
            self.game_over = true;
            self.score.record(self.current);
            return Ok(Outcome::Win {
                player: self.current,
                line: line.iter().map(|&i| coord(i)).collect(),
            });
        }
        if self.board.is_full() {
            self.game_over = true;
            return Ok(Outcome::Draw);
        }

        self.current = self.current.other();
        Ok(Outcome::Continuing)
    }

    fn ai_move(&mut self, tier: Tier) -> Option<usize> {
        if self.game_over {
            return None;
        }
        let mut scratch = self.board;
        match tier {
            Tier::Naive => random_move(&mut self.rng, &self.board.legal_moves()),
            Tier::Biased => greedy_move(&mut scratch, self.current, &mut self.rng),
            Tier::Minimax => best_move(&mut scratch, self.current),
            Tier::Learning => {
                warn!("tic-tac-toe has no {} tier, playing a random cell", tier.name());
                random_move(&mut self.rng, &self.board.legal_moves())
            }
        }
    }

    fn reset(&mut self) {
        self.new_round();
        self.score = Score::default();
    }

    fn new_round(&mut self) {
        self.board = Board::new();
        self.current = Player::HUMAN;
        self.game_over = false;
    }

    fn legal_moves(&self) -> Vec<usize> {
        if self.game_over {
            return Vec::new();
        }
        self.board.legal_moves()
    }

    fn current_player(&self) -> Player {
        self.current
    }

    fn score(&self) -> Score {
        self.score
    }

    fn is_over(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_line_is_detected() {
        for line in WIN_LINES {
            let mut ids = [0; CELLS];
            for i in line {
                ids[i] = 1;
            }
            let board = Board::from_ids(ids);
            assert_eq!(board.winning_line(Player::One), Some(line));
            assert_eq!(board.winning_line(Player::Two), None);
        }
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let mut game = TicTacToe::with_seed(0);
        // X O X / X O O / O X X
        let moves = [0, 1, 2, 4, 3, 5, 7, 6, 8];
        let (last, rest) = moves.split_last().unwrap();
        for &m in rest {
            assert_eq!(game.play(m), Ok(Outcome::Continuing));
        }
        assert_eq!(game.play(*last), Ok(Outcome::Draw));
        assert!(game.is_over());
        assert_eq!(game.score(), Score::default());
    }

    #[test]
    fn test_win_reports_line_and_scores() {
        let mut game = TicTacToe::with_seed(0);
        for m in [0, 3, 1, 4] {
            game.play(m).unwrap();
        }
        let outcome = game.play(2).unwrap();
        assert_eq!(
            outcome,
            Outcome::Win {
                player: Player::HUMAN,
                line: vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)],
            }
        );
        assert_eq!(game.score(), Score { player: 1, ai: 0 });
        assert_eq!(game.play(5), Err(MoveError::GameOver));
        assert_eq!(game.ai_move(Tier::Minimax), None);
    }

    #[test]
    fn test_invalid_moves_are_rejected() {
        let mut game = TicTacToe::with_seed(0);
        game.play(4).unwrap();
        let before = *game.board();

        assert_eq!(game.play(4), Err(MoveError::Occupied(4)));
        assert_eq!(game.play(9), Err(MoveError::OutOfRange(9)));
        assert_eq!(*game.board(), before);
        assert_eq!(game.current_player(), Player::AI);
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = TicTacToe::with_seed(0);
        game.play(0).unwrap();
        game.play(4).unwrap();
        game.play(8).unwrap();
        let board = game.board();
        assert_eq!(board.get(0), Cell::One);
        assert_eq!(board.get(4), Cell::Two);
        assert_eq!(board.get(8), Cell::One);
        assert_eq!(game.current_player(), Player::AI);
    }

    #[test]
    fn test_biased_cascade() {
        let mut game = TicTacToe::with_seed(5);
        // Opening: nothing to win or block, take the center.
        game.play(0).unwrap();
        assert_eq!(game.ai_move(Tier::Biased), Some(CENTER));
        game.play(CENTER).unwrap();

        // X threatens 0-1-2: block at 2.
        game.play(1).unwrap();
        assert_eq!(game.ai_move(Tier::Biased), Some(2));
        game.play(2).unwrap();

        // X blocks 2-4-6 and threatens 0-3-6; O has no win, so block at 3.
        game.play(6).unwrap();
        assert_eq!(game.ai_move(Tier::Biased), Some(3));
        game.play(3).unwrap();

        // O has 2 3 4: 3-4-5 wins at 5, which beats blocking anything.
        game.play(8).unwrap();
        assert_eq!(game.ai_move(Tier::Biased), Some(5));
    }

    #[test]
    fn test_ai_move_leaves_board_untouched() {
        let mut game = TicTacToe::with_seed(11);
        game.play(0).unwrap();
        let before = *game.board();
        for tier in [Tier::Naive, Tier::Biased, Tier::Minimax, Tier::Learning] {
            let mv = game.ai_move(tier).unwrap();
            assert!(game.legal_moves().contains(&mv));
            assert_eq!(*game.board(), before);
        }
    }

    #[test]
    fn test_reset_clears_score_new_round_keeps_it() {
        let mut game = TicTacToe::with_seed(0);
        for m in [0, 3, 1, 4, 2] {
            game.play(m).unwrap();
        }
        assert_eq!(game.score().player, 1);

        game.new_round();
        assert_eq!(game.score().player, 1);
        assert_eq!(*game.board(), Board::new());
        assert_eq!(game.current_player(), Player::HUMAN);
        assert!(!game.is_over());

        game.play(4).unwrap();
        game.reset();
        assert_eq!(game.score(), Score::default());
        assert_eq!(*game.board(), Board::new());
    }
}
