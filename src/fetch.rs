use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::Context as _;
use reqwest::header::{ACCEPT, USER_AGENT};
use url::Url;

use crate::credential::RequestSource;
use crate::formats::{CredlyResponse, FeedResponse};

pub const FEED_URL: &str =
    "https://api.rss2json.com/v1/api.json?rss_url=https://medium.com/feed/@jonakrusze";

pub(crate) const AGENT: &str = "foliosync/0.1";

pub fn build_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .context("build http client")
}

/// One network call, no retries. A failure here aborts the whole run.
pub async fn fetch_badges(
    client: &reqwest::Client,
    source: &RequestSource,
) -> anyhow::Result<CredlyResponse> {
    let body = match source {
        RequestSource::CurlCommand(command) => run_request_command(command)?,
        RequestSource::Url(url) => http_get(client, url).await?,
    };

    parse_badge_response(&body)
}

pub async fn fetch_articles(client: &reqwest::Client, url: &Url) -> anyhow::Result<FeedResponse> {
    let body = http_get(client, url).await?;
    parse_feed_response(&body)
}

fn run_request_command(command: &str) -> anyhow::Result<String> {
    tracing::debug!("running operator-supplied request command");

    let output = Command::new("sh")
        .args(["-c", command])
        .stdin(Stdio::null())
        .output()
        .context("run badge request command")?;

    if !output.status.success() {
        anyhow::bail!(
            "badge request command failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim(),
        );
    }

    String::from_utf8(output.stdout).context("decode badge request output")
}

async fn http_get(client: &reqwest::Client, url: &Url) -> anyhow::Result<String> {
    let response = client
        .get(url.clone())
        .header(USER_AGENT, AGENT)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .with_context(|| format!("GET {url}"))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("request failed ({status}): {url}");
    }

    response.text().await.context("read response body")
}

pub fn parse_badge_response(body: &str) -> anyhow::Result<CredlyResponse> {
    let value: serde_json::Value =
        serde_json::from_str(body).context("parse badge response json")?;

    if !value.get("data").is_some_and(|data| data.is_array()) {
        anyhow::bail!("badge response is missing a data array");
    }

    serde_json::from_value(value).context("decode badge response")
}

pub fn parse_feed_response(body: &str) -> anyhow::Result<FeedResponse> {
    let value: serde_json::Value = serde_json::from_str(body).context("parse feed response json")?;

    match value.get("status").and_then(serde_json::Value::as_str) {
        Some("ok") => {}
        Some(other) => anyhow::bail!("feed returned status {other:?}"),
        None => anyhow::bail!("feed response is missing a status field"),
    }

    if !value.get("items").is_some_and(|items| items.is_array()) {
        anyhow::bail!("feed response is missing an items array");
    }

    serde_json::from_value(value).context("decode feed response")
}
