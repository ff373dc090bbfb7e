use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::format::{TableDocument, from_document, to_document};
use crate::ai::QTable;
use crate::error::PersistenceError;

/// Where learned tables live.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub dir: PathBuf,
    pub rps_table: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        PersistenceConfig {
            dir: PathBuf::from("."),
            rps_table: "q_table_rps.json".to_string(),
        }
    }
}

impl PersistenceConfig {
    pub fn rps_table_path(&self) -> PathBuf {
        self.dir.join(&self.rps_table)
    }
}

/// Loads and saves one Q-table file.
#[derive(Debug, Clone)]
pub struct QTableStore {
    path: PathBuf,
}

impl QTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        QTableStore { path: path.into() }
    }

    pub fn from_config(config: &PersistenceConfig) -> Self {
        Self::new(config.rps_table_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the table. `Ok(None)` when the file does not exist.
    pub fn try_load(&self) -> Result<Option<QTable>, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        let document: TableDocument =
            serde_json::from_str(&content).map_err(|e| PersistenceError::Parse {
                path: self.path.clone(),
                source: e,
            })?;
        Ok(Some(from_document(&document)))
    }

    /// Read the table, starting empty when the file is missing or unreadable.
    pub fn load(&self) -> QTable {
        match self.try_load() {
            Ok(Some(table)) => {
                info!(
                    "loaded Q-table with {} states from {}",
                    table.len(),
                    self.path.display()
                );
                table
            }
            Ok(None) => {
                info!("no Q-table at {}, starting fresh", self.path.display());
                QTable::new()
            }
            Err(e) => {
                warn!("{e}, starting with an empty Q-table");
                QTable::new()
            }
        }
    }

    /// Overwrite the file with `table`.
    pub fn save(&self, table: &QTable) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(&to_document(table))?;
        self.write_atomic(&json)?;
        info!(
            "saved Q-table with {} states to {}",
            table.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Replace the file with an empty table.
    pub fn reset(&self) -> Result<(), PersistenceError> {
        self.write_atomic("{}")?;
        info!("reset Q-table at {}", self.path.display());
        Ok(())
    }

    fn write_atomic(&self, content: &str) -> Result<(), PersistenceError> {
        let write_err = |source: io::Error| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, content).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)
    }
}
