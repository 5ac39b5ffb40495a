// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Shared test utilities to reduce duplication across test modules.

use chrono::Utc;
use hyper::HeaderMap;

use crate::body::BodyCapture;
use crate::entry::{EntryId, FailureInfo, LogEntry, Outcome, ResponseInfo};
use crate::error::FailureKind;

/// Create a pending entry with a fresh id and standard test headers.
pub fn make_test_entry(method: &str, url: &str) -> LogEntry {
    let mut entry = LogEntry::pending(EntryId::fresh(), method.to_string(), url.to_string());
    entry.request_headers = make_headers_from_pairs(&[("user-agent", "watch-http-test")]);
    entry
}

/// Build a HeaderMap from name/value pairs.
pub fn make_headers_from_pairs(pairs: &[(&str, &str)]) -> HeaderMap {
    let mut hm = HeaderMap::new();
    for (k, v) in pairs {
        let name =
            hyper::header::HeaderName::from_bytes(k.as_bytes()).expect("valid test header name");
        hm.insert(name, v.parse().expect("valid test header value"));
    }
    hm
}

/// Successful outcome with the given status and text body.
pub fn success_outcome(status: u16, body: &str) -> Outcome {
    Outcome::Success(ResponseInfo {
        status,
        headers: HeaderMap::new(),
        body: if body.is_empty() {
            BodyCapture::Omitted
        } else {
            BodyCapture::Text {
                text: body.to_string(),
            }
        },
        completed_at: Utc::now(),
    })
}

/// Failed outcome with the given kind and message.
pub fn failure_outcome(kind: FailureKind, message: &str) -> Outcome {
    Outcome::Failure(FailureInfo {
        kind,
        message: message.to_string(),
        completed_at: Utc::now(),
    })
}
