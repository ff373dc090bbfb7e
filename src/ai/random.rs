use rand::Rng;
use rand::seq::IndexedRandom;

/// Uniform pick among legal moves; `None` when there are none.
pub fn random_move<T: Copy, R: Rng + ?Sized>(rng: &mut R, moves: &[T]) -> Option<T> {
    moves.choose(rng).copied()
}
