// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Read-only snapshot of the log history handed to observers.
//!
//! This struct is the boundary between the repository and any consumer
//! (log viewer, diagnostic console). Consumers depend only on `LogHistory`
//! (and `LogEntry`), never on `LogRepository` internals, so a viewer layer
//! can be extracted independently in the future.

use serde::Serialize;

use crate::entry::LogEntry;

/// Snapshot of recorded transactions, ordered **oldest first**.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct LogHistory {
    entries: Vec<LogEntry>,
}

impl LogHistory {
    /// Create an empty history (nothing observed yet).
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a history from a pre-sorted (oldest-first) list of entries.
    pub fn new(entries: Vec<LogEntry>) -> Self {
        Self { entries }
    }

    /// The most recently appended entry, if any.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Iterate over all entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Entries still waiting for a response or error.
    pub fn pending(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|e| !e.is_terminal())
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
