mod render;

use std::io::{self, Write};

use ajax_core::transport::DEFAULT_BODY_LIMIT;
use ajax_core::{HelperConfig, HttpMethod, RequestHelper, ResponseFormat, UreqTransport};
use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Issue one HTTP request and print the outcome.
#[derive(Debug, Parser)]
#[command(name = "ajax", version)]
struct Args {
    /// HTTP verb: GET, POST, PUT, PATCH or DELETE (any case).
    method: String,

    /// Target URL. Relative URLs need --base-url.
    url: String,

    /// Base that relative URLs are joined onto.
    #[arg(long)]
    base_url: Option<String>,

    /// Largest response body to read, in bytes.
    #[arg(long, default_value_t = DEFAULT_BODY_LIMIT)]
    max_body_bytes: u64,

    /// JSON payload, sent for POST, PUT and PATCH.
    #[arg(short, long)]
    data: Option<String>,

    /// Extra request header as NAME:VALUE. May be repeated.
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Keep the response body as raw text instead of parsing JSON.
    #[arg(long)]
    text: bool,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in {raw:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let method: HttpMethod = args.method.parse()?;
    let body: Option<serde_json::Value> = args
        .data
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .context("--data is not valid JSON")?;

    let mut config = HelperConfig::default();
    for (name, value) in &args.headers {
        config = config.with_header(name, value);
    }
    if args.text {
        config = config.with_format(ResponseFormat::Text);
    }
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url);
    }

    let transport = UreqTransport::new().with_body_limit(args.max_body_bytes);
    let helper = RequestHelper::with_config(transport, config);
    let outcome = helper.request(method, &args.url, body.as_ref()).await;

    let mut stdout = io::stdout().lock();
    render::render_outcome(&mut stdout, &outcome)?;
    stdout.flush()?;

    if outcome.is_err() {
        bail!("{} {} did not succeed", method, args.url);
    }
    Ok(())
}
