use std::ops::{Deref, DerefMut};

use crate::game::Player;

/// A board that supports trying a move and taking it back.
pub trait Speculate {
    type Move: Copy + PartialEq + std::fmt::Debug;

    /// Moves still open, in ascending order.
    fn candidate_moves(&self) -> Vec<Self::Move>;

    /// Put `player`'s piece down for `mv`. Returns false, leaving the board
    /// untouched, when `mv` cannot be played.
    fn place(&mut self, mv: Self::Move, player: Player) -> bool;

    /// Undo the most recent successful `place` of `mv`.
    fn retract(&mut self, mv: Self::Move);

    fn has_won(&self, player: Player) -> bool;

    /// Positional preference when nothing tactical is on the board.
    fn preferred_move(&self) -> Self::Move;
}

/// A speculative move that is retracted when the guard drops, on every exit
/// path out of the probing scope.
pub struct ScopedMove<'a, B: Speculate> {
    board: &'a mut B,
    mv: B::Move,
    placed: bool,
}

impl<'a, B: Speculate> ScopedMove<'a, B> {
    pub fn new(board: &'a mut B, mv: B::Move, player: Player) -> Self {
        let placed = board.place(mv, player);
        ScopedMove { board, mv, placed }
    }

    /// Whether the move actually went down. A refused move is not retracted.
    pub fn placed(&self) -> bool {
        self.placed
    }
}

impl<B: Speculate> Deref for ScopedMove<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.board
    }
}

impl<B: Speculate> DerefMut for ScopedMove<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.board
    }
}

impl<B: Speculate> Drop for ScopedMove<'_, B> {
    fn drop(&mut self) {
        if self.placed {
            self.board.retract(self.mv);
        }
    }
}
