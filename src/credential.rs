use std::path::Path;

use anyhow::Context as _;
use url::Url;

/// How the authenticated badge request reaches the provider: either a raw
/// curl command pasted by the operator (executed verbatim, cookies and all)
/// or a plain URL fetched with the built-in HTTP client.
#[derive(Debug, Clone)]
pub enum RequestSource {
    CurlCommand(String),
    Url(Url),
}

pub fn load_request_file(path: &Path) -> anyhow::Result<RequestSource> {
    if !path.exists() {
        anyhow::bail!(
            "request file not found: {path}\n\
             Create it by copying the authenticated request from your browser:\n\
             open DevTools (F12), go to the Network tab, visit your Credly\n\
             badges page, find the badges API request, then\n\
             right-click > Copy > Copy as cURL and paste the result into {path}",
            path = path.display(),
        );
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read request file: {}", path.display()))?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        anyhow::bail!(
            "request file is empty: {}\n\
             Paste the curl command copied from your browser DevTools into it",
            path.display(),
        );
    }

    parse_request_source(trimmed)
}

pub fn parse_request_source(input: &str) -> anyhow::Result<RequestSource> {
    if input.starts_with("curl") {
        return Ok(RequestSource::CurlCommand(input.to_owned()));
    }

    if input.starts_with("http") {
        let url = Url::parse(input).context("parse request url")?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("request url must be http/https: {url}");
        }
        return Ok(RequestSource::Url(url));
    }

    anyhow::bail!("request input must be a URL or a curl command");
}
