// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Transport error surface for observed calls.
//!
//! `TransportError` is what the observed client hands back when a call
//! fails. It wraps the original failure untouched (available via
//! `source()`), so calling code keeps its error-handling behavior; the
//! extra fields exist only so the failure can be recorded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entry::EntryId;

/// Category of an observed call failure.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Could not reach the remote (DNS, refused, TLS handshake).
    Connect,
    /// The call timed out at the transport layer.
    Timeout,
    /// The response body could not be read to completion.
    Body,
    /// The request could not be constructed from the given URL.
    InvalidUrl,
    Other,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Body => "body",
            Self::InvalidUrl => "invalid-url",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of an observed HTTP call, with the original error as `source`.
#[derive(Debug, Error)]
#[error("{method} {url} failed ({kind}): {source}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub method: String,
    pub url: String,
    /// Correlation key attached during `on_request`, if the call got far
    /// enough for the request hook to run.
    pub id: Option<EntryId>,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    pub fn new(
        kind: FailureKind,
        method: impl Into<String>,
        url: impl Into<String>,
        id: Option<EntryId>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self {
            kind,
            method: method.into(),
            url: url.into(),
            id,
            source,
        }
    }

    /// Message of the underlying failure, as recorded in the log entry.
    pub fn message(&self) -> String {
        self.source.to_string()
    }
}

/// Walk an error's source chain looking for a transport-level timeout.
pub(crate) fn classify_source(err: &(dyn std::error::Error + 'static)) -> FailureKind {
    let mut cur: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = cur {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::TimedOut {
                return FailureKind::Timeout;
            }
        }
        cur = e.source();
    }
    FailureKind::Other
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FailureKind::Connect, "connect")]
    #[case(FailureKind::Timeout, "timeout")]
    #[case(FailureKind::Body, "body")]
    #[case(FailureKind::InvalidUrl, "invalid-url")]
    #[case(FailureKind::Other, "other")]
    fn kind_display(#[case] kind: FailureKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }

    #[test]
    fn display_includes_call_context_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = TransportError::new(
            FailureKind::Connect,
            "GET",
            "http://example/",
            None,
            Box::new(io),
        );
        let s = err.to_string();
        assert!(s.contains("GET http://example/"));
        assert!(s.contains("connect"));
        assert!(s.contains("refused"));
    }

    #[test]
    fn source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = TransportError::new(
            FailureKind::Connect,
            "GET",
            "http://example/",
            None,
            Box::new(io),
        );
        let src = std::error::Error::source(&err).expect("source");
        assert_eq!(src.to_string(), "refused");
        assert_eq!(err.message(), "refused");
    }

    #[test]
    fn classify_finds_io_timeout_in_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline elapsed");
        assert_eq!(classify_source(&io), FailureKind::Timeout);
    }

    #[test]
    fn classify_defaults_to_other() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        assert_eq!(classify_source(&io), FailureKind::Other);
    }
}
