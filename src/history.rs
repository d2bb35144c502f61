//! Calculation history.
//!
//! Successful evaluations are kept most-recent-first, bounded by an optional
//! limit. Persistence goes through the [`HistoryStore`] trait so the UI layer
//! decides where the list lives; [`JsonFileStore`] keeps it in the user's data
//! directory under the `logix_history` key.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculator::CalcResult;

/// Storage key for the persisted history.
pub const HISTORY_KEY: &str = "logix_history";

/// Entries kept when no limit is configured.
pub const DEFAULT_LIMIT: usize = 5;

/// One successful calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression as evaluated, parentheses balanced.
    pub expression: String,
    /// The formatted result.
    pub result: String,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }

    /// Create an entry from a successful result. Errors are never recorded.
    pub fn from_calc_result(result: &CalcResult) -> Option<Self> {
        match result {
            CalcResult::Success {
                expression, result, ..
            } => Some(Self::new(expression.as_str(), result.as_str())),
            CalcResult::Error { .. } => None,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

/// Bounded, most-recent-first list of calculations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Some(DEFAULT_LIMIT))
    }
}

impl History {
    /// Create an empty history. `None` keeps every entry.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    /// Build a history from stored entries (most recent first), applying the limit.
    pub fn from_entries(entries: Vec<HistoryEntry>, limit: Option<usize>) -> Self {
        let mut history = Self::new(limit);
        history.entries = entries.into();
        history.truncate();
        history
    }

    /// Load from a store. A store that cannot be read yields an empty history.
    pub fn load(store: &dyn HistoryStore, limit: Option<usize>) -> Self {
        match store.load() {
            Ok(entries) => Self::from_entries(entries, limit),
            Err(e) => {
                warn!("Could not load history: {:#}", e);
                Self::new(limit)
            }
        }
    }

    /// Write the current entries to a store. Failures are logged, not returned.
    pub fn persist(&self, store: &dyn HistoryStore) {
        if let Err(e) = store.save(&self.list()) {
            warn!("Could not save history: {:#}", e);
        }
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        debug!("history append: {}", entry);
        self.entries.push_front(entry);
        self.truncate();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, most recent first.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn truncate(&mut self) {
        if let Some(limit) = self.limit {
            self.entries.truncate(limit);
        }
    }
}

/// Where the history list is persisted between sessions.
pub trait HistoryStore {
    /// Stored entries, most recent first. A missing store is an empty list.
    fn load(&self) -> Result<Vec<HistoryEntry>>;

    /// Replace the stored list as a whole.
    fn save(&self, entries: &[HistoryEntry]) -> Result<()>;
}

/// JSON file store, one array per file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/logix/logix_history.json`, if the platform has a data dir.
    pub fn default_location() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::in_dir(dir.join("logix")))
    }

    /// A store named after [`HISTORY_KEY`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{HISTORY_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

/// In-memory store, for tests and UI layers with their own persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<Vec<HistoryEntry>>,
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.entries.borrow().clone())
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        *self.entries.borrow_mut() = entries.to_vec();
        Ok(())
    }
}
