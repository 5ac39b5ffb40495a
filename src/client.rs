// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Observed HTTP client: a shared hyper client with interceptor hooks
//! wired around every outbound call.
//!
//! The client collects response bodies fully before handing them back, so
//! hooks see complete payloads and callers get plain `Bytes`. The value
//! flowing through the hooks is otherwise exactly what the caller sent or
//! what the wire returned; observation never changes what the application
//! sees from the network.

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, Response};
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client as LegacyClient;
use hyper_util::rt::TokioExecutor;
use tracing::trace;

use crate::config::Config;
use crate::entry::EntryId;
use crate::error::{classify_source, FailureKind, TransportError};
use crate::interceptor::{Interceptor, InterceptorChain};
use crate::recorder::Recorder;
use crate::repository::LogRepository;

type HttpsClient = LegacyClient<
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>,
    Full<Bytes>,
>;

pub struct ObservedClient {
    client: HttpsClient,
    chain: InterceptorChain,
}

impl ObservedClient {
    /// Build a client with a `Recorder` writing into `repository` as the
    /// first registered interceptor.
    pub fn new(cfg: &Config, repository: LogRepository) -> anyhow::Result<Self> {
        let https = HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build();
        let client: HttpsClient = LegacyClient::builder(TokioExecutor::new()).build(https);

        let mut chain = InterceptorChain::new();
        chain.push(Arc::new(Recorder::new(repository, cfg.capture.clone())));
        Ok(Self { client, chain })
    }

    /// Register an additional interceptor. Hooks run in registration order,
    /// after the recorder.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.chain.push(interceptor);
        self
    }

    /// Send a request through the hook chain and return the response with
    /// its body collected. On failure the original error travels back inside
    /// the returned `TransportError`.
    pub async fn request(&self, req: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        let mut req = req;
        self.chain.on_request(&mut req);

        let id = req.extensions().get::<EntryId>().copied();
        let method = req.method().as_str().to_string();
        let url = req.uri().to_string();
        trace!(%method, %url, "sending observed request");

        let upstream = req.map(Full::new);
        let resp = match self.client.request(upstream).await {
            Ok(r) => r,
            Err(e) => {
                let kind = if e.is_connect() {
                    FailureKind::Connect
                } else {
                    classify_source(&e)
                };
                let err = TransportError::new(kind, method, url, id, Box::new(e));
                self.chain.on_error(&err);
                return Err(err);
            }
        };

        let (mut parts, body) = resp.into_parts();
        let bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                let err =
                    TransportError::new(FailureKind::Body, method, url, id, Box::new(e));
                self.chain.on_error(&err);
                return Err(err);
            }
        };

        // Carry the correlation id over so the completion hooks can find
        // the entry appended in on_request.
        if let Some(id) = id {
            parts.extensions.insert(id);
        }
        let mut resp = Response::from_parts(parts, bytes);
        self.chain.on_response(&mut resp);
        Ok(resp)
    }

    /// Convenience GET with an empty body.
    pub async fn get(&self, url: &str) -> Result<Response<Bytes>, TransportError> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(url)
            .body(Bytes::new())
            .map_err(|e| {
                TransportError::new(FailureKind::InvalidUrl, "GET", url, None, Box::new(e))
            })?;
        self.request(req).await
    }
}
