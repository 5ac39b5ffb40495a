// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Shared in-memory store of observed transactions.
//!
//! One repository instance is created by the application and injected into
//! every component that records or reads history. All mutation happens
//! under a single lock, so a reader never observes an entry halfway through
//! its pending-to-terminal transition.
//!
//! Completion policy: first completion wins. A second completion for the
//! same id is ignored. A completion with no matching entry synthesizes a
//! terminal entry instead of failing, which covers completions racing a
//! `clear()` or a ring-buffer eviction.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::entry::{EntryId, LogEntry, Outcome};
use crate::history::LogHistory;

/// Thread-safe, insertion-ordered store of `LogEntry` records.
///
/// Cloning the handle shares the underlying store.
#[derive(Debug, Clone)]
pub struct LogRepository {
    entries: Arc<RwLock<VecDeque<LogEntry>>>,
    max_entries: Option<usize>,
}

impl LogRepository {
    /// Unbounded repository (the default policy: keep everything).
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::new())),
            max_entries: None,
        }
    }

    /// Ring-buffer repository holding at most `max` entries, evicting the
    /// oldest on overflow. `max == 0` means unbounded.
    pub fn bounded(max: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::new())),
            max_entries: (max > 0).then_some(max),
        }
    }

    /// Append a new entry. Insertion order is what `all()` reports.
    pub fn append(&self, entry: LogEntry) {
        match self.entries.write() {
            Ok(mut entries) => {
                push_bounded(&mut entries, entry, self.max_entries);
            }
            Err(_) => {
                tracing::warn!("LogRepository lock poisoned during append");
            }
        }
    }

    /// Attach a terminal outcome to the entry with this id.
    ///
    /// An already-terminal entry is left untouched; a missing entry is
    /// synthesized so every completion hook still yields exactly one record.
    pub fn complete(&self, id: EntryId, outcome: Outcome) {
        match self.entries.write() {
            Ok(mut entries) => {
                // Scan newest-first: recent entries complete soonest.
                match entries.iter_mut().rev().find(|e| e.id == id) {
                    Some(entry) if entry.is_terminal() => {
                        tracing::debug!(%id, "ignoring completion for already-terminal entry");
                    }
                    Some(entry) => {
                        entry.state = outcome.into_state();
                    }
                    None => {
                        push_bounded(
                            &mut entries,
                            LogEntry::synthesized(id, outcome),
                            self.max_entries,
                        );
                    }
                }
            }
            Err(_) => {
                tracing::warn!("LogRepository lock poisoned during complete");
            }
        }
    }

    /// Snapshot of all entries in insertion order (oldest first).
    pub fn all(&self) -> LogHistory {
        match self.entries.read() {
            Ok(entries) => LogHistory::new(entries.iter().cloned().collect()),
            Err(_) => {
                tracing::warn!("LogRepository lock poisoned during read");
                LogHistory::empty()
            }
        }
    }

    /// Drop all recorded entries.
    pub fn clear(&self) {
        match self.entries.write() {
            Ok(mut entries) => entries.clear(),
            Err(_) => {
                tracing::warn!("LogRepository lock poisoned during clear");
            }
        }
    }

    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(entries) => entries.len(),
            Err(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LogRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn push_bounded(entries: &mut VecDeque<LogEntry>, entry: LogEntry, max: Option<usize>) {
    if let Some(max) = max {
        while entries.len() >= max {
            if entries.pop_front().is_none() {
                break;
            }
        }
    }
    entries.push_back(entry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryStatus;
    use crate::test_helpers::{failure_outcome, make_test_entry, success_outcome};
    use crate::error::FailureKind;
    use std::thread;

    #[test]
    fn append_then_all_preserves_insertion_order() {
        let repo = LogRepository::new();
        let a = make_test_entry("GET", "https://example.com/a");
        let b = make_test_entry("GET", "https://example.com/b");
        let c = make_test_entry("GET", "https://example.com/c");
        repo.append(a.clone());
        repo.append(b.clone());
        repo.append(c.clone());

        // Completing out of program order does not reorder anything.
        repo.complete(c.id, success_outcome(200, ""));
        repo.complete(a.id, success_outcome(200, ""));

        let ids: Vec<_> = repo.all().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[test]
    fn first_completion_wins() {
        let repo = LogRepository::new();
        let e = make_test_entry("GET", "https://example.com/x");
        repo.append(e.clone());

        repo.complete(e.id, success_outcome(200, "first"));
        repo.complete(e.id, failure_outcome(FailureKind::Other, "second"));

        let history = repo.all();
        assert_eq!(history.len(), 1);
        let entry = history.latest().expect("entry");
        assert_eq!(entry.status(), EntryStatus::Succeeded);
    }

    #[test]
    fn completion_without_append_synthesizes_terminal_entry() {
        let repo = LogRepository::new();
        let id = crate::entry::EntryId::fresh();
        repo.complete(id, failure_outcome(FailureKind::Connect, "refused"));

        let history = repo.all();
        assert_eq!(history.len(), 1);
        let entry = history.latest().expect("entry");
        assert_eq!(entry.id, id);
        assert_eq!(entry.status(), EntryStatus::Failed);
        assert_eq!(entry.method, "-");
    }

    #[test]
    fn clear_empties_and_later_completion_synthesizes() {
        let repo = LogRepository::new();
        let e = make_test_entry("GET", "https://example.com/x");
        repo.append(e.clone());
        repo.clear();
        assert!(repo.is_empty());

        repo.complete(e.id, success_outcome(204, ""));
        let history = repo.all();
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().map(|x| x.status()), Some(EntryStatus::Succeeded));
    }

    #[test]
    fn round_trip_success_fields() {
        let repo = LogRepository::new();
        let e = make_test_entry("GET", "https://api.example.com/x");
        repo.append(e.clone());
        repo.complete(e.id, success_outcome(200, "ok"));

        let history = repo.all();
        assert_eq!(history.len(), 1);
        let entry = history.latest().expect("entry");
        assert_eq!(entry.method, "GET");
        assert_eq!(entry.url, "https://api.example.com/x");
        match &entry.state {
            crate::entry::EntryState::Succeeded(resp) => {
                assert_eq!(resp.status, 200);
                assert_eq!(resp.body.as_text(), Some("ok"));
                assert!(entry.started_at <= resp.completed_at);
            }
            other => panic!("expected succeeded state, got {:?}", other),
        }
    }

    #[test]
    fn bounded_repository_evicts_oldest() {
        let repo = LogRepository::bounded(3);
        let mut ids = Vec::new();
        for i in 0..5 {
            let e = make_test_entry("GET", &format!("https://example.com/{}", i));
            ids.push(e.id);
            repo.append(e);
        }

        let history = repo.all();
        assert_eq!(history.len(), 3);
        let kept: Vec<_> = history.iter().map(|e| e.id).collect();
        assert_eq!(kept, ids[2..].to_vec());
    }

    #[test]
    fn bounded_zero_is_unbounded() {
        let repo = LogRepository::bounded(0);
        for i in 0..10 {
            repo.append(make_test_entry("GET", &format!("https://example.com/{}", i)));
        }
        assert_eq!(repo.len(), 10);
    }

    #[test]
    fn completion_for_evicted_entry_synthesizes() {
        let repo = LogRepository::bounded(1);
        let old = make_test_entry("GET", "https://example.com/old");
        repo.append(old.clone());
        repo.append(make_test_entry("GET", "https://example.com/new"));

        repo.complete(old.id, success_outcome(200, ""));
        let history = repo.all();
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().map(|e| e.id), Some(old.id));
    }

    #[test]
    fn concurrent_appends_produce_exactly_n_entries() {
        let repo = LogRepository::new();
        let threads = 8;
        let per_thread = 50;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let repo = repo.clone();
                thread::spawn(move || {
                    for i in 0..per_thread {
                        let e = make_test_entry(
                            "GET",
                            &format!("https://example.com/{}/{}", t, i),
                        );
                        let id = e.id;
                        repo.append(e);
                        repo.complete(id, success_outcome(200, ""));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("thread completed");
        }

        let history = repo.all();
        assert_eq!(history.len(), threads * per_thread);
        let mut seen = std::collections::HashSet::new();
        for e in history.iter() {
            assert!(seen.insert(e.id), "duplicate entry for {}", e.id);
            assert_eq!(e.status(), EntryStatus::Succeeded);
        }
    }

    #[test]
    fn readers_never_observe_partial_entries() {
        let repo = LogRepository::new();
        let writer = {
            let repo = repo.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    let e = make_test_entry("GET", &format!("https://example.com/{}", i));
                    let id = e.id;
                    repo.append(e);
                    repo.complete(id, success_outcome(200, "ok"));
                }
            })
        };
        let reader = {
            let repo = repo.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    for e in repo.all().iter() {
                        // A terminal entry must carry its full outcome.
                        if let crate::entry::EntryState::Succeeded(resp) = &e.state {
                            assert_eq!(resp.status, 200);
                        }
                    }
                }
            })
        };
        writer.join().expect("writer");
        reader.join().expect("reader");
    }

    #[test]
    fn all_handles_poisoned_lock() {
        let repo = LogRepository::new();
        let entries = repo.entries.clone();
        let handle = thread::spawn(move || {
            let _guard = entries.write().unwrap();
            panic!("intentional panic to poison lock");
        });
        let _ = handle.join();

        assert!(repo.all().is_empty());
        assert_eq!(repo.len(), 0);
    }
}
