//! The network seam between `RequestHelper` and the outside world.
//!
//! # Design
//! `Transport` performs exactly one round-trip per `send` and reports either
//! a raw `HttpResponse` (any status) or a `TransportError` when nothing came
//! back. Status interpretation is left to `RequestHelper::classify`.
//!
//! `UreqTransport` runs ureq's blocking call on tokio's blocking pool so the
//! calling task is suspended rather than polling. Once a status line has
//! arrived the response is always reported with its status: bodies are read
//! as bytes and decoded lossily, and a body past the read limit becomes
//! `TransportError::BodyTooLarge` rather than a network failure.

use std::future::Future;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one `HttpRequest` against the network.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Default cap on a response body, matching ureq's own default.
pub const DEFAULT_BODY_LIMIT: u64 = 10 * 1024 * 1024;

/// Transport backed by a `ureq::Agent`.
///
/// 4xx/5xx responses are returned as data rather than `Err`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    body_limit: u64,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Read at most `bytes` of each response body.
    pub fn with_body_limit(mut self, bytes: u64) -> Self {
        self.body_limit = bytes;
        self
    }

    pub fn body_limit(&self) -> u64 {
        self.body_limit
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        let agent = self.agent.clone();
        let limit = self.body_limit;
        async move {
            tokio::task::spawn_blocking(move || execute(&agent, request, limit))
                .await
                .map_err(|e| TransportError::NoResponse(format!("transport task failed: {e}")))?
        }
    }
}

fn execute(
    agent: &ureq::Agent,
    req: HttpRequest,
    limit: u64,
) -> Result<HttpResponse, TransportError> {
    let url = req.url.as_str();
    let result = match req.method {
        HttpMethod::Get => with_headers(agent.get(url), &req.headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(url), &req.headers).call(),
        HttpMethod::Post => send_payload(agent.post(url), &req.headers, req.body.as_deref()),
        HttpMethod::Put => send_payload(agent.put(url), &req.headers, req.body.as_deref()),
        HttpMethod::Patch => send_payload(agent.patch(url), &req.headers, req.body.as_deref()),
    };
    let mut response = result.map_err(|e| TransportError::NoResponse(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let bytes = response
        .body_mut()
        .with_config()
        .limit(limit)
        .read_to_vec()
        .map_err(|e| match e {
            ureq::Error::BodyExceedsLimit(limit) => TransportError::BodyTooLarge { status, limit },
            other => TransportError::NoResponse(format!("reading response body: {other}")),
        })?;
    let body = String::from_utf8_lossy(&bytes).into_owned();

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_payload(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    headers: &[(String, String)],
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    let builder = with_headers(builder, headers);
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
