//! Shared HTTP request helpers for CLI commands.

use anyhow::{Context, Result, anyhow, bail};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Error body the server sends on 4xx/5xx.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Join `segments` onto `base`, percent-encoding each one.
pub fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("invalid server url {base}"))?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("server url {base} cannot take a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// GET `url` and return the body text of a successful response.
pub async fn get_text(url: Url) -> Result<String> {
    let resp = reqwest::get(url.clone())
        .await
        .with_context(|| format!("failed to connect to skydeskd at {url} — is it running?"))?;
    read_body(resp).await
}

/// POST `body` as JSON to `url` and return the body text of a successful response.
pub async fn post_text<T: Serialize>(url: Url, body: &T) -> Result<String> {
    let resp = reqwest::Client::new()
        .post(url.clone())
        .json(body)
        .send()
        .await
        .with_context(|| format!("failed to connect to skydeskd at {url} — is it running?"))?;
    read_body(resp).await
}

/// Decode a response body fetched with [`get_text`] or [`post_text`].
pub fn parse<R>(text: &str) -> Result<R>
where
    R: for<'de> Deserialize<'de>,
{
    serde_json::from_str(text).context("failed to parse response")
}

async fn read_body(resp: reqwest::Response) -> Result<String> {
    let status = resp.status();
    let text = resp.text().await.context("failed to read response")?;
    check_status(status, text)
}

/// Pass the body through on success, turn it into an error otherwise.
fn check_status(status: reqwest::StatusCode, text: String) -> Result<String> {
    if !status.is_success() {
        bail!("{}", error_message(status, &text));
    }
    Ok(text)
}

/// Human-readable message for a failed response.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => format!("{} ({})", err.error, status),
        Err(_) if body.trim().is_empty() => format!("server returned {status}"),
        Err(_) => format!("server returned {status}: {}", body.trim()),
    }
}
