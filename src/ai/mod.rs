//! AI opponents: a move-probing board abstraction, the search and greedy
//! players built on it, and the rock-paper-scissors predictors.

mod heuristic;
pub mod markov;
mod minimax;
mod probe;
mod qlearning;
mod qtable;
mod random;
mod tier;

pub use heuristic::{completes_line, greedy_move};
pub use minimax::{best_move, minimax};
pub use probe::{ScopedMove, Speculate};
pub use qlearning::{QLearner, QLearningConfig};
pub use qtable::{ActionValues, QTable, RpsState};
pub use random::random_move;
pub use tier::Tier;
