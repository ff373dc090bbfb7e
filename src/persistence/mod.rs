//! On-disk form of the learned rock-paper-scissors table.

mod format;
mod store;

pub use format::{TableDocument, from_document, to_document};
pub use store::{PersistenceConfig, QTableStore};
