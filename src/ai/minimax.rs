use super::probe::{ScopedMove, Speculate};
use crate::game::Player;

/// Score of a won game before the depth penalty.
const WIN_SCORE: i32 = 10;

/// Full-depth minimax for `me`, the player to move. Returns the move with
/// the strictly greatest score; ties keep the earliest candidate.
///
/// Meant for boards small enough to search to the end (tic-tac-toe).
pub fn best_move<B: Speculate>(board: &mut B, me: Player) -> Option<B::Move> {
    let mut best: Option<(i32, B::Move)> = None;

    for mv in board.candidate_moves() {
        let score = {
            let mut probe = ScopedMove::new(&mut *board, mv, me);
            minimax(&mut *probe, me, 0, false)
        };
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, mv));
        }
    }

    best.map(|(_, mv)| mv)
}

/// Value of `board` for `me`, `depth` plies after `me`'s candidate move.
/// A win for `me` scores `10 - depth`, a loss `depth - 10`, a draw 0.
pub fn minimax<B: Speculate>(board: &mut B, me: Player, depth: i32, maximizing: bool) -> i32 {
    if board.has_won(me) {
        return WIN_SCORE - depth;
    }
    if board.has_won(me.other()) {
        return depth - WIN_SCORE;
    }
    let moves = board.candidate_moves();
    if moves.is_empty() {
        return 0;
    }

    let mover = if maximizing { me } else { me.other() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for mv in moves {
        let mut probe = ScopedMove::new(&mut *board, mv, mover);
        let score = minimax(&mut *probe, me, depth + 1, !maximizing);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}
