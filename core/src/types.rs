//! Success-side outcome types.
//!
//! # Design
//! A `Response` is created per call and handed to the caller by value; it
//! keeps the status and headers next to the decoded data so the caller can
//! still inspect them (`getResponseHeader`-style) after classification.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::http::find_header;

/// How a successful response body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Parse as JSON; malformed bodies are a `Deserialization` error.
    #[default]
    Json,
    /// Keep the body as raw text.
    Text,
}

/// Decoded body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseData {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseData::Json(value) => Some(value),
            ResponseData::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Json(_) => None,
            ResponseData::Text(text) => Some(text),
        }
    }
}

/// A response with a status below 400.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub data: ResponseData,
}

impl Response {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Convert JSON data into `T`. Text data is parsed as JSON first.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        let result = match &self.data {
            ResponseData::Json(value) => T::deserialize(value),
            ResponseData::Text(text) => serde_json::from_str(text),
        };
        result.map_err(|e| RequestError::Deserialization(e.to_string()))
    }
}
