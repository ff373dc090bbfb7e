use std::collections::BTreeMap;

use log::debug;

use crate::ai::{ActionValues, QTable, RpsState};
use crate::game::Choice;

/// JSON shape of a saved table: state key -> action name -> value.
pub type TableDocument = BTreeMap<String, BTreeMap<String, f64>>;

pub fn to_document(table: &QTable) -> TableDocument {
    table
        .iter()
        .map(|(state, values)| {
            let actions = values
                .iter()
                .map(|(choice, q)| (choice.name().to_string(), q))
                .collect();
            (state.to_string(), actions)
        })
        .collect()
}

/// Build a table from a parsed document. Unknown state keys and action names
/// are skipped; missing actions read as 0.
pub fn from_document(document: &TableDocument) -> QTable {
    let mut table = QTable::new();
    for (key, actions) in document {
        let state = match key.parse::<RpsState>() {
            Ok(state) => state,
            Err(err) => {
                debug!("skipping Q-table entry: {err}");
                continue;
            }
        };
        let mut values = ActionValues::default();
        for (name, &q) in actions {
            match name.parse::<Choice>() {
                Ok(choice) => values[choice] = q,
                Err(err) => debug!("skipping action in state '{key}': {err}"),
            }
        }
        table.insert(state, values);
    }
    table
}
