//! Writes a request outcome for a human reader.
//!
//! The target writer is passed in by the caller; nothing here reaches for
//! stdout on its own.

use std::io::{self, Write};

use ajax_core::{RequestError, Response, ResponseData};

pub fn render_outcome<W: Write>(
    out: &mut W,
    outcome: &Result<Response, RequestError>,
) -> io::Result<()> {
    match outcome {
        Ok(response) => render_response(out, response),
        Err(err) => render_failure(out, err),
    }
}

pub fn render_response<W: Write>(out: &mut W, response: &Response) -> io::Result<()> {
    writeln!(out, "Request Completed ({})", response.status)?;
    match &response.data {
        ResponseData::Json(value) => {
            let pretty = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
            writeln!(out, "{pretty}")
        }
        ResponseData::Text(text) => write!(out, "{text}"),
    }
}

pub fn render_failure<W: Write>(out: &mut W, err: &RequestError) -> io::Result<()> {
    match (err.cause(), err.status()) {
        (Some(cause), Some(status)) => writeln!(out, "Request Failed! ({cause}, status {status})"),
        (Some(_), None) => writeln!(out, "Error!! {err}"),
        (None, _) => writeln!(out, "Request Failed! {err}"),
    }
}
