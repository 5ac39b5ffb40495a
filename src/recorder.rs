// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Repository-backed interceptor: turns lifecycle hooks into log entries.
//!
//! `on_request` assigns the correlation id and stores it in the request's
//! extension slot; the observed client carries it over to the response (or
//! error) so the completion hook can find the pending entry again. If the
//! id went missing on the way back, the repository synthesizes a terminal
//! entry rather than dropping the observation.

use bytes::Bytes;
use chrono::Utc;
use hyper::{Request, Response};

use crate::body::BodyCapture;
use crate::config::CaptureConfig;
use crate::entry::{EntryId, FailureInfo, LogEntry, Outcome, ResponseInfo};
use crate::error::TransportError;
use crate::interceptor::Interceptor;
use crate::repository::LogRepository;

pub struct Recorder {
    repository: LogRepository,
    capture: CaptureConfig,
}

impl Recorder {
    pub fn new(repository: LogRepository, capture: CaptureConfig) -> Self {
        Self {
            repository,
            capture,
        }
    }
}

impl Interceptor for Recorder {
    fn on_request(&self, req: &mut Request<Bytes>) {
        let id = EntryId::fresh();
        req.extensions_mut().insert(id);

        let mut entry = LogEntry::pending(
            id,
            req.method().as_str().to_string(),
            req.uri().to_string(),
        );
        entry.request_headers = req.headers().clone();
        entry.request_body = BodyCapture::captured(
            req.body(),
            self.capture.request_bodies,
            self.capture.max_body_bytes,
        );
        self.repository.append(entry);
    }

    fn on_response(&self, resp: &mut Response<Bytes>) {
        let id = resp
            .extensions()
            .get::<EntryId>()
            .copied()
            .unwrap_or_else(EntryId::fresh);

        let info = ResponseInfo {
            status: resp.status().as_u16(),
            headers: resp.headers().clone(),
            body: BodyCapture::captured(
                resp.body(),
                self.capture.response_bodies,
                self.capture.max_body_bytes,
            ),
            completed_at: Utc::now(),
        };
        self.repository.complete(id, Outcome::Success(info));
    }

    fn on_error(&self, err: &TransportError) {
        let id = err.id.unwrap_or_else(EntryId::fresh);
        let info = FailureInfo {
            kind: err.kind,
            message: err.message(),
            completed_at: Utc::now(),
        };
        self.repository.complete(id, Outcome::Failure(info));
    }
}
