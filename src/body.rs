// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Best-effort payload capture with a safe fallback for non-text bodies.
//!
//! Capture never fails: payloads that cannot be represented as text are
//! recorded as a placeholder marker, and oversized text is truncated on a
//! char boundary. The underlying request or response is never affected by
//! the capture decision.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Captured form of a request or response body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BodyCapture {
    /// Capture disabled by configuration, or the body was empty.
    Omitted,
    /// UTF-8 payload within the configured limit.
    Text { text: String },
    /// UTF-8 payload over the limit; a prefix is kept.
    Truncated { text: String, total_len: u64 },
    /// Non-UTF-8 payload; only the length is recorded.
    Binary { len: u64 },
}

impl BodyCapture {
    /// Capture `bytes`, keeping at most `max_len` bytes of text.
    pub fn from_bytes(bytes: &Bytes, max_len: usize) -> Self {
        if bytes.is_empty() {
            return Self::Omitted;
        }
        match std::str::from_utf8(bytes) {
            Ok(s) if s.len() <= max_len => Self::Text {
                text: s.to_string(),
            },
            Ok(s) => {
                let mut end = max_len;
                while !s.is_char_boundary(end) {
                    end -= 1;
                }
                Self::Truncated {
                    text: s[..end].to_string(),
                    total_len: bytes.len() as u64,
                }
            }
            Err(_) => Self::Binary {
                len: bytes.len() as u64,
            },
        }
    }

    /// Capture `bytes` only when `enabled`; otherwise record `Omitted`.
    pub fn captured(bytes: &Bytes, enabled: bool, max_len: usize) -> Self {
        if enabled {
            Self::from_bytes(bytes, max_len)
        } else {
            Self::Omitted
        }
    }

    /// Captured text, if the body was representable as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } | Self::Truncated { text, .. } => Some(text),
            _ => None,
        }
    }
}
