//! The request helper: one call, one request, one result.
//!
//! # Design
//! `RequestHelper` holds a `Transport` and an immutable `HelperConfig`, and
//! carries no mutable state between calls. `request` is split into a pure
//! `build` step that produces an `HttpRequest` and a pure `classify` step
//! that consumes an `HttpResponse`; only the transport does I/O in between.
//! There is no retry, no timeout and no cancellation. A caller that needs a
//! deadline wraps the returned future in `tokio::time::timeout`.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::HelperConfig;
use crate::error::RequestError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Response, ResponseData, ResponseFormat};

/// Stateless, promise-style wrapper around a `Transport`.
#[derive(Debug, Clone)]
pub struct RequestHelper<T> {
    transport: T,
    config: HelperConfig,
}

impl<T> RequestHelper<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, HelperConfig::default())
    }

    pub fn with_config(transport: T, config: HelperConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &HelperConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Describe the request `request` would send, without sending it.
    ///
    /// Relative URLs are joined onto the configured base URL. The body is
    /// serialized only for methods that carry a payload; for GET and DELETE
    /// it is ignored.
    pub fn build<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest, RequestError> {
        let url = self.config.resolve_url(url)?;
        let body = match body {
            Some(body) if method.carries_body() => Some(
                serde_json::to_string(body)
                    .map_err(|e| RequestError::Serialization(e.to_string()))?,
            ),
            _ => None,
        };
        Ok(HttpRequest {
            method,
            url,
            headers: self.config.headers.clone(),
            body,
        })
    }

    /// Turn a raw response into the caller-facing outcome.
    ///
    /// Status >= 400 is a failure carrying the exact status. Anything else
    /// is a success decoded per the configured `ResponseFormat`. An empty
    /// body in JSON mode decodes to `null`.
    pub fn classify(&self, response: HttpResponse) -> Result<Response, RequestError> {
        let HttpResponse {
            status,
            headers,
            body,
        } = response;

        if status >= 400 {
            let err = if status < 500 {
                RequestError::ClientError { status, body }
            } else {
                RequestError::ServerError { status, body }
            };
            warn!(status, "request failed");
            return Err(err);
        }

        let data = match self.config.format {
            ResponseFormat::Text => ResponseData::Text(body),
            ResponseFormat::Json if body.trim().is_empty() => {
                ResponseData::Json(serde_json::Value::Null)
            }
            ResponseFormat::Json => ResponseData::Json(
                serde_json::from_str(&body)
                    .map_err(|e| RequestError::Deserialization(e.to_string()))?,
            ),
        };
        Ok(Response {
            status,
            headers,
            data,
        })
    }
}

impl<T: Transport> RequestHelper<T> {
    /// Send one request and wait for its outcome.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&B>,
    ) -> Result<Response, RequestError> {
        let request = self.build(method, url, body)?;
        debug!(%method, url, "sending request");

        let response = self.transport.send(request).await.map_err(|e| {
            warn!(%method, url, error = %e, "transport failed");
            RequestError::from(e)
        })?;
        debug!(%method, url, status = response.status, "response received");

        self.classify(response)
    }

    pub async fn get(&self, url: &str) -> Result<Response, RequestError> {
        self.request::<()>(HttpMethod::Get, url, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Response, RequestError> {
        self.request(HttpMethod::Post, url, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Response, RequestError> {
        self.request(HttpMethod::Put, url, Some(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Response, RequestError> {
        self.request(HttpMethod::Patch, url, Some(body)).await
    }

    pub async fn delete(&self, url: &str) -> Result<Response, RequestError> {
        self.request::<()>(HttpMethod::Delete, url, None).await
    }
}
