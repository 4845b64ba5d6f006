//! Promise-style HTTP request helper.
//!
//! # Overview
//! `RequestHelper::request(method, url, body)` issues exactly one HTTP
//! request and resolves to a single `Result`: a `Response` with decoded
//! data for statuses below 400, or a `RequestError` for error statuses,
//! transport failures and malformed JSON.
//!
//! # Design
//! - `RequestHelper` is stateless between calls; it holds a `Transport` and
//!   an immutable `HelperConfig`.
//! - Each call is split into `build` (produces request) and `classify`
//!   (consumes response), so the I/O boundary is explicit and both halves
//!   are testable without a network.
//! - `UreqTransport` is the stock transport; anything implementing
//!   `Transport` can stand in for it.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::RequestHelper;
pub use config::HelperConfig;
pub use error::{FailureCause, RequestError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Response, ResponseData, ResponseFormat};
