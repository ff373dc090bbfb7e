//! First-order behavioral prediction for rock-paper-scissors.
//!
//! Counts how often each player choice followed each other one, predicts the
//! successor of the player's latest choice, and answers with its counter.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::game::{Choice, Round};

/// Opening weights before any history exists, in `Choice::ALL` order.
const OPENING_WEIGHTS: [u32; 3] = [2, 1, 1];

/// `counts[a][b]`: how often the player followed `a` with `b`.
pub type TransitionCounts = [[u32; 3]; 3];

pub fn transition_counts(history: &[Round]) -> TransitionCounts {
    let mut counts = [[0; 3]; 3];
    for pair in history.windows(2) {
        counts[pair[0].player.index()][pair[1].player.index()] += 1;
    }
    counts
}

/// Laplace-smoothed distribution of what follows `last`.
pub fn successor_distribution(counts: &TransitionCounts, last: Choice) -> [f64; 3] {
    let row = counts[last.index()];
    let total = f64::from(row.iter().sum::<u32>()) + row.len() as f64;
    row.map(|count| (f64::from(count) + 1.0) / total)
}

/// Most likely next player choice; ties go to the earliest in
/// rock, paper, scissors order. `None` without history.
pub fn predict_next(history: &[Round]) -> Option<Choice> {
    let last = history.last()?.player;
    let probs = successor_distribution(&transition_counts(history), last);
    let mut best = Choice::ALL[0];
    for choice in Choice::ALL {
        if probs[choice.index()] > probs[best.index()] {
            best = choice;
        }
    }
    Some(best)
}

/// The AI's answer: the counter to the predicted choice, or a rock-leaning
/// opening draw when there is nothing to go on.
pub fn respond<R: Rng + ?Sized>(history: &[Round], rng: &mut R) -> Choice {
    match predict_next(history) {
        Some(predicted) => predicted.counter(),
        None => opening(rng),
    }
}

fn opening<R: Rng + ?Sized>(rng: &mut R) -> Choice {
    Choice::ALL
        .choose_weighted(rng, |c| OPENING_WEIGHTS[c.index()])
        .copied()
        .unwrap_or(Choice::Rock)
}
