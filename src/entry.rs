// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Canonical log entry struct describing one observed HTTP transaction.

use chrono::{DateTime, Utc};
use hyper::HeaderMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::body::BodyCapture;
use crate::error::FailureKind;

/// Opaque correlation key linking the request phase of a call to its
/// completion phase. Assigned once in `on_request` and carried through the
/// host client's extension slot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Three-valued lifecycle view of an entry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Pending,
    Succeeded,
    Failed,
}

/// Response portion attached when a call succeeds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResponseInfo {
    pub status: u16,
    #[serde(
        serialize_with = "crate::serde_helpers::serialize_headers",
        deserialize_with = "crate::serde_helpers::deserialize_headers"
    )]
    pub headers: HeaderMap,
    pub body: BodyCapture,
    pub completed_at: DateTime<Utc>,
}

/// Failure portion attached when a call errors out.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FailureInfo {
    pub kind: FailureKind,
    pub message: String,
    pub completed_at: DateTime<Utc>,
}

/// Lifecycle state of an entry. Terminal states are absorbing: once a
/// response or failure is attached, the entry never changes again.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum EntryState {
    Pending,
    Succeeded(ResponseInfo),
    Failed(FailureInfo),
}

/// Terminal outcome handed to the repository by a completion hook.
#[derive(Debug, Clone)]
pub enum Outcome {
    Success(ResponseInfo),
    Failure(FailureInfo),
}

impl Outcome {
    pub fn completed_at(&self) -> DateTime<Utc> {
        match self {
            Self::Success(r) => r.completed_at,
            Self::Failure(f) => f.completed_at,
        }
    }

    pub fn into_state(self) -> EntryState {
        match self {
            Self::Success(r) => EntryState::Succeeded(r),
            Self::Failure(f) => EntryState::Failed(f),
        }
    }
}

/// One observed HTTP transaction, from request sent to response or error.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LogEntry {
    pub id: EntryId,
    pub method: String,
    pub url: String,
    #[serde(
        serialize_with = "crate::serde_helpers::serialize_headers",
        deserialize_with = "crate::serde_helpers::deserialize_headers"
    )]
    pub request_headers: HeaderMap,
    pub request_body: BodyCapture,
    pub started_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: EntryState,
}

impl LogEntry {
    /// Create a pending entry at the moment the request hook fires.
    pub fn pending(id: EntryId, method: String, url: String) -> Self {
        Self {
            id,
            method,
            url,
            request_headers: HeaderMap::new(),
            request_body: BodyCapture::Omitted,
            started_at: Utc::now(),
            state: EntryState::Pending,
        }
    }

    /// Create a terminal entry for a completion that has no pending
    /// predecessor (the store was cleared or trimmed mid-flight). Request
    /// context is unknown at that point; method and url are recorded as "-".
    pub fn synthesized(id: EntryId, outcome: Outcome) -> Self {
        Self {
            id,
            method: "-".to_string(),
            url: "-".to_string(),
            request_headers: HeaderMap::new(),
            request_body: BodyCapture::Omitted,
            started_at: outcome.completed_at(),
            state: outcome.into_state(),
        }
    }

    pub fn status(&self) -> EntryStatus {
        match self.state {
            EntryState::Pending => EntryStatus::Pending,
            EntryState::Succeeded(_) => EntryStatus::Succeeded,
            EntryState::Failed(_) => EntryStatus::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status() != EntryStatus::Pending
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            EntryState::Pending => None,
            EntryState::Succeeded(r) => Some(r.completed_at),
            EntryState::Failed(f) => Some(f.completed_at),
        }
    }

    /// Wall-clock duration of the call, once it has completed.
    pub fn duration_ms(&self) -> Option<u64> {
        self.completed_at()
            .map(|done| done.signed_duration_since(self.started_at).num_milliseconds())
            .map(|ms| ms.max(0) as u64)
    }
}
