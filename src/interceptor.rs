// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Interceptor seam invoked around each observed HTTP call.
//!
//! Hooks are transparent: an implementation may read the value and touch
//! the `Extensions` metadata slot, but the request, response, or error the
//! host client works with is otherwise unchanged. A hook must never make
//! the underlying call fail or behave differently than it would without
//! observation attached.

use std::sync::Arc;

use bytes::Bytes;
use hyper::{Request, Response};

use crate::error::TransportError;

/// Lifecycle hooks for one HTTP call. Each method has a no-op default, so
/// implementations override only the phases they care about.
pub trait Interceptor: Send + Sync {
    /// The request is about to be sent.
    fn on_request(&self, _req: &mut Request<Bytes>) {}

    /// A response arrived and its body has been collected.
    fn on_response(&self, _resp: &mut Response<Bytes>) {}

    /// The call failed; the error is re-signaled to the caller afterwards.
    fn on_error(&self, _err: &TransportError) {}
}

/// Ordered collection of interceptors, invoked in registration order at
/// every lifecycle point.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn on_request(&self, req: &mut Request<Bytes>) {
        for interceptor in &self.interceptors {
            interceptor.on_request(req);
        }
    }

    pub fn on_response(&self, resp: &mut Response<Bytes>) {
        for interceptor in &self.interceptors {
            interceptor.on_response(resp);
        }
    }

    pub fn on_error(&self, err: &TransportError) {
        for interceptor in &self.interceptors {
            interceptor.on_error(err);
        }
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}
