use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::ParseError;
use crate::game::Choice;

const START: &str = "start";

/// Learning state for rock-paper-scissors: the player's two most recent
/// choices, oldest first. `None` stands for "no choice yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RpsState {
    older: Option<Choice>,
    last: Option<Choice>,
}

impl RpsState {
    pub const START: RpsState = RpsState {
        older: None,
        last: None,
    };

    /// State after the player shows `choice`.
    pub fn next(self, choice: Choice) -> RpsState {
        RpsState {
            older: self.last,
            last: Some(choice),
        }
    }

    /// Every state reachable from `START`.
    pub fn reachable() -> Vec<RpsState> {
        let mut states = vec![RpsState::START];
        states.extend(Choice::ALL.map(|c| RpsState::START.next(c)));
        for older in Choice::ALL {
            for last in Choice::ALL {
                states.push(RpsState::START.next(older).next(last));
            }
        }
        states
    }
}

impl fmt::Display for RpsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = |c: Option<Choice>| c.map_or(START, Choice::name);
        write!(f, "{},{}", slot(self.older), slot(self.last))
    }
}

impl FromStr for RpsState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidStateKey(s.to_string());
        let slot = |part: &str| -> Result<Option<Choice>, ParseError> {
            if part.trim() == START {
                Ok(None)
            } else {
                part.parse().map(Some).map_err(|_| invalid())
            }
        };
        let (older, last) = s.split_once(',').ok_or_else(invalid)?;
        let state = RpsState {
            older: slot(older)?,
            last: slot(last)?,
        };
        // a real choice is never followed by the sentinel
        if state.older.is_some() && state.last.is_none() {
            return Err(invalid());
        }
        Ok(state)
    }
}

/// One value per action, indexed by `Choice`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionValues([f64; 3]);

impl ActionValues {
    pub fn new(rock: f64, paper: f64, scissors: f64) -> Self {
        ActionValues([rock, paper, scissors])
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Actions holding the maximum value, in `Choice::ALL` order.
    pub fn best_actions(&self) -> Vec<Choice> {
        let max = self.max();
        Choice::ALL
            .into_iter()
            .filter(|&c| self[c] == max)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Choice, f64)> + '_ {
        Choice::ALL.into_iter().map(|c| (c, self[c]))
    }
}

impl Index<Choice> for ActionValues {
    type Output = f64;

    fn index(&self, choice: Choice) -> &f64 {
        &self.0[choice.index()]
    }
}

impl IndexMut<Choice> for ActionValues {
    fn index_mut(&mut self, choice: Choice) -> &mut f64 {
        &mut self.0[choice.index()]
    }
}

/// Learned action values per state. States appear only once touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    values: HashMap<RpsState, ActionValues>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values for `state` without materializing it.
    pub fn get(&self, state: &RpsState) -> Option<&ActionValues> {
        self.values.get(state)
    }

    /// Stored value, 0 when unseen.
    pub fn value(&self, state: &RpsState, action: Choice) -> f64 {
        self.values.get(state).map_or(0.0, |v| v[action])
    }

    /// Values for `state`, materializing zeros on first touch.
    pub fn entry(&mut self, state: RpsState) -> &mut ActionValues {
        self.values.entry(state).or_default()
    }

    pub fn insert(&mut self, state: RpsState, values: ActionValues) {
        self.values.insert(state, values);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RpsState, &ActionValues)> {
        self.values.iter()
    }
}
