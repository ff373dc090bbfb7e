use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::qtable::{QTable, RpsState};
use crate::game::Choice;

/// Q-learning hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// Learning rate.
    pub alpha: f64,
    /// Discount factor.
    pub gamma: f64,
    /// Exploration rate.
    pub epsilon: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            gamma: 0.95,
            epsilon: 0.1,
        }
    }
}

/// Epsilon-greedy tabular learner for rock-paper-scissors.
#[derive(Debug)]
pub struct QLearner {
    config: QLearningConfig,
    table: QTable,
    rng: StdRng,
}

impl QLearner {
    pub fn new(config: QLearningConfig, table: QTable) -> Self {
        Self::with_rng(config, table, StdRng::from_os_rng())
    }

    pub fn with_seed(config: QLearningConfig, table: QTable, seed: u64) -> Self {
        Self::with_rng(config, table, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: QLearningConfig, table: QTable, rng: StdRng) -> Self {
        Self { config, table, rng }
    }

    /// Pick an action for `state`. Explores uniformly with probability
    /// epsilon, otherwise picks uniformly among the highest-valued actions.
    /// Materializes `state` in the table.
    pub fn select(&mut self, state: RpsState) -> Choice {
        let values = *self.table.entry(state);
        let candidates = if self.rng.random_range(0.0..1.0) < self.config.epsilon {
            Choice::ALL.to_vec()
        } else {
            values.best_actions()
        };
        candidates
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Choice::Rock)
    }

    /// Bellman update: `Q(s,a) += alpha * (reward + gamma * max Q(s') - Q(s,a))`.
    /// Materializes both `state` and `next`.
    pub fn update(&mut self, state: RpsState, action: Choice, reward: f64, next: RpsState) {
        let next_max = self.table.entry(next).max();
        let QLearningConfig { alpha, gamma, .. } = self.config;
        let q = &mut self.table.entry(state)[action];
        *q += alpha * (reward + gamma * next_max - *q);
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut QTable {
        &mut self.table
    }

    pub fn into_table(self) -> QTable {
        self.table
    }
}
