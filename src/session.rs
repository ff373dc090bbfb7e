use log::{error, info};

use crate::ai::{QLearner, QLearningConfig, QTable};
use crate::config::AppConfig;
use crate::error::PersistenceError;
use crate::game::{ConnectFour, RockPaperScissors, TicTacToe};
use crate::persistence::QTableStore;

/// One sitting at the game suite: the three engines plus the store the
/// learned table is loaded from and saved back to.
pub struct Session {
    store: QTableStore,
    tictactoe: TicTacToe,
    connect_four: ConnectFour,
    rps: RockPaperScissors,
}

impl Session {
    /// Load the learned table and build fresh engines. With a seed every
    /// engine gets its own deterministic generator.
    pub fn open(config: &AppConfig, seed: Option<u64>) -> Self {
        let store = QTableStore::from_config(&config.persistence);
        let table = store.load();
        let session = Self::with_table(store, config.learning, table, seed);
        info!(
            "session opened (seed: {})",
            seed.map_or_else(|| "entropy".to_string(), |s| s.to_string())
        );
        session
    }

    fn with_table(
        store: QTableStore,
        learning: QLearningConfig,
        table: QTable,
        seed: Option<u64>,
    ) -> Self {
        match seed {
            Some(seed) => Session {
                store,
                tictactoe: TicTacToe::with_seed(seed),
                connect_four: ConnectFour::with_seed(seed.wrapping_add(1)),
                rps: RockPaperScissors::with_seed(
                    QLearner::with_seed(learning, table, seed.wrapping_add(3)),
                    seed.wrapping_add(2),
                ),
            },
            None => Session {
                store,
                tictactoe: TicTacToe::new(),
                connect_four: ConnectFour::new(),
                rps: RockPaperScissors::new(QLearner::new(learning, table)),
            },
        }
    }

    /// Write the learned table back to disk.
    pub fn save(&self) -> Result<(), PersistenceError> {
        self.store.save(self.rps.learner().table())
    }

    /// End the session. A failed save is logged and otherwise ignored.
    pub fn close(self) {
        if let Err(e) = self.save() {
            error!("could not save Q-table on exit: {e}");
        }
        info!("session closed");
    }

    /// Forget everything learned, on disk and in memory.
    pub fn reset_learning(&mut self) -> Result<(), PersistenceError> {
        self.rps.learner_mut().table_mut().clear();
        self.store.reset()
    }

    pub fn store(&self) -> &QTableStore {
        &self.store
    }

    pub fn tictactoe(&self) -> &TicTacToe {
        &self.tictactoe
    }

    pub fn tictactoe_mut(&mut self) -> &mut TicTacToe {
        &mut self.tictactoe
    }

    pub fn connect_four(&self) -> &ConnectFour {
        &self.connect_four
    }

    pub fn connect_four_mut(&mut self) -> &mut ConnectFour {
        &mut self.connect_four
    }

    pub fn rps(&self) -> &RockPaperScissors {
        &self.rps
    }

    pub fn rps_mut(&mut self) -> &mut RockPaperScissors {
        &mut self.rps
    }
}
