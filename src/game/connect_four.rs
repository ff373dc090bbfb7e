use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::board::{Board, COLS};
use super::{BoardGame, MoveError, Outcome, Player, Score};
use crate::ai::{Tier, greedy_move, random_move};

/// Connect Four against the AI. The human drops first each round.
#[derive(Debug, Clone)]
pub struct ConnectFour {
    board: Board,
    current: Player,
    game_over: bool,
    score: Score,
    rng: StdRng,
}

impl ConnectFour {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic AI choices, for tests and `--seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        ConnectFour {
            board: Board::new(),
            current: Player::HUMAN,
            game_over: false,
            score: Score::default(),
            rng,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardGame for ConnectFour {
    type Move = usize;

    fn play(&mut self, col: usize) -> Result<Outcome, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        if col >= COLS {
            return Err(MoveError::OutOfRange(col));
        }

        self.board.drop_piece(col, self.current.to_cell())?;

        if let Some(line) = self.board.winning_line(self.current) {
            self.game_over = true;
            self.score.record(self.current);
            return Ok(Outcome::Win {
                player: self.current,
                line: line.to_vec(),
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
        let moves = self.board.legal_moves();
        match tier {
            Tier::Naive => random_move(&mut self.rng, &moves),
            Tier::Biased => {
                let mut scratch = self.board;
                greedy_move(&mut scratch, self.current, &mut self.rng)
            }
            Tier::Minimax | Tier::Learning => {
                warn!("connect four has no {} tier, playing a random column", tier.name());
                random_move(&mut self.rng, &moves)
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
