//! Counter value and its append-only operation history.
//!
//! `Counter` is plain data: it has no interior locking. The server wraps one
//! instance in a single mutex so that read-compute-write-append happens as a
//! single step per request.

use std::fmt;
use std::str::FromStr;

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{CounterError, Result};

/// Inclusive range for the startup draw.
pub const INITIAL_MIN: i64 = 1;
pub const INITIAL_MAX: i64 = 100;

/// Verbs accepted from clients. Closed set; anything else fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Add,
    Subtract,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Add => "add",
            ActionKind::Subtract => "subtract",
        }
    }

    /// Result of applying this verb to `current`. Wraps on overflow.
    pub fn apply(self, current: i64, value: i64) -> i64 {
        match self {
            ActionKind::Add => current.wrapping_add(value),
            ActionKind::Subtract => current.wrapping_sub(value),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = CounterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(ActionKind::Add),
            "subtract" => Ok(ActionKind::Subtract),
            other => Err(CounterError::Validation(format!(
                "unknown action: {other} (expected add or subtract)"
            ))),
        }
    }
}

/// Markers that can appear in the history. `Initialize` is history-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Initialize,
    Add,
    Subtract,
}

impl HistoryAction {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryAction::Initialize => "initialize",
            HistoryAction::Add => "add",
            HistoryAction::Subtract => "subtract",
        }
    }
}

impl From<ActionKind> for HistoryAction {
    fn from(a: ActionKind) -> Self {
        match a {
            ActionKind::Add => HistoryAction::Add,
            ActionKind::Subtract => HistoryAction::Subtract,
        }
    }
}

/// One history record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub action: HistoryAction,
    pub value: i64,
}

/// The counter and everything that has been applied to it.
#[derive(Debug, Clone)]
pub struct Counter {
    value: i64,
    history: Vec<Operation>,
}

impl Counter {
    /// Start from a known value. History begins with the `initialize` record.
    pub fn new(initial: i64) -> Self {
        Self {
            value: initial,
            history: vec![Operation {
                action: HistoryAction::Initialize,
                value: initial,
            }],
        }
    }

    /// Start from a uniform draw in `[INITIAL_MIN, INITIAL_MAX]`.
    ///
    /// The generator is seeded from the OS entropy source; if that source is
    /// unavailable the counter cannot be initialized and this fails.
    pub fn random() -> Result<Self> {
        let mut rng = StdRng::from_rng(OsRng)
            .map_err(|e| CounterError::Internal(format!("random source unavailable: {e}")))?;
        Ok(Self::new(rng.gen_range(INITIAL_MIN..=INITIAL_MAX)))
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn history(&self) -> &[Operation] {
        &self.history
    }

    /// Number of history entries (always >= 1).
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Value recorded by the synthetic `initialize` entry.
    pub fn initial_value(&self) -> i64 {
        self.history[0].value
    }

    /// Apply one validated mutation and record it. Returns the new value.
    pub fn apply(&mut self, action: ActionKind, value: i64) -> i64 {
        self.value = action.apply(self.value, value);
        self.history.push(Operation {
            action: action.into(),
            value,
        });
        self.value
    }
}
