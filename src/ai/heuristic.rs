use rand::Rng;
use rand::seq::IndexedRandom;

use super::probe::{ScopedMove, Speculate};
use crate::game::Player;

/// Greedy one-ply cascade for `me`:
/// 1. a move that wins on the spot,
/// 2. a move that takes away the opponent's immediate win,
/// 3. the board's preferred move (center) if open,
/// 4. any open move at random.
///
/// Each step scans every candidate in ascending order before the next one
/// is tried.
pub fn greedy_move<B, R>(board: &mut B, me: Player, rng: &mut R) -> Option<B::Move>
where
    B: Speculate,
    R: Rng + ?Sized,
{
    let moves = board.candidate_moves();
    if moves.is_empty() {
        return None;
    }

    for target in [me, me.other()] {
        if let Some(mv) = moves
            .iter()
            .copied()
            .find(|&mv| completes_line(&mut *board, mv, target))
        {
            return Some(mv);
        }
    }

    let preferred = board.preferred_move();
    if moves.contains(&preferred) {
        return Some(preferred);
    }
    moves.choose(rng).copied()
}

/// Would `player` win by playing `mv`?
pub fn completes_line<B: Speculate>(board: &mut B, mv: B::Move, player: Player) -> bool {
    let probe = ScopedMove::new(board, mv, player);
    probe.has_won(player)
}
