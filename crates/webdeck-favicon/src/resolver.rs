//! Favicon resolution against live sites.
//!
//! Orchestrates the whole pipeline: normalize the input, fetch the page
//! (following redirects), extract icon hints from the markup, assemble an
//! ordered candidate list with `/favicon.ico` fallbacks, then probe
//! candidates in priority order until one validates as an image.
//!
//! # Failure containment
//!
//! Every network failure is absorbed where it occurs. A dead page fetch
//! skips straight to the fallbacks; a dead candidate probe moves on to the
//! next candidate. The only outcomes are `Some(icon_url)` or `None` —
//! nothing in here is ever fatal to the caller.
//!
//! # Trust model
//!
//! Certificate validation is disabled on purpose. The expected targets
//! are private-network services running self-signed TLS; rejecting their
//! certificates would make icon resolution useless exactly where this
//! tool is pointed.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::error::ResolverError;
use crate::extract::{SCAN_LIMIT, extract_icon_hrefs};
use crate::normalize::normalize_url;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Path extensions accepted as image evidence when a server's
/// content-type header is missing or unhelpful.
const IMAGE_EXTENSIONS: [&str; 6] = [".ico", ".png", ".jpg", ".jpeg", ".svg", ".webp"];

/// Resolves a usable icon URL for an arbitrary site URL.
///
/// Stateless apart from the shared HTTP client; concurrent resolutions
/// need no coordination. Within one resolution, candidates are probed
/// sequentially — the expected candidate count is tiny (typically ≤4), so
/// total latency is bounded by roughly `timeout × candidates`.
pub struct FaviconResolver {
    client: Client,
    timeout: Duration,
}

impl FaviconResolver {
    /// Build a resolver with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::ClientBuild`] if the HTTP client cannot be
    /// constructed (TLS backend initialization).
    pub fn new(timeout: Duration) -> Result<Self, ResolverError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .redirect(Policy::limited(10))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, timeout })
    }

    /// Build a resolver with the default 4-second timeout.
    ///
    /// # Errors
    ///
    /// Same as [`FaviconResolver::new`].
    pub fn with_defaults() -> Result<Self, ResolverError> {
        Self::new(DEFAULT_TIMEOUT)
    }

    /// Resolve an icon URL for `site_url`, or `None` when nothing usable
    /// was found.
    ///
    /// Extracted `<link>` hints are authoritative and probed first, in
    /// document order, resolved against the final (post-redirect) page
    /// URL. `/favicon.ico` on the final origin comes next, then — only
    /// when the site redirected to a different origin — `/favicon.ico` on
    /// the original origin. The first candidate that validates as an
    /// image wins.
    pub async fn resolve(&self, site_url: &str) -> Option<String> {
        let normalized = normalize_url(site_url);
        if normalized.is_empty() {
            return None;
        }
        let base = Url::parse(&normalized).ok()?;
        base.host_str()?;

        let mut final_url = base.clone();
        let mut candidates: Vec<String> = Vec::new();

        match self.fetch_page(&normalized).await {
            Ok((page_url, body)) => {
                final_url = page_url;
                for href in extract_icon_hrefs(&body) {
                    match final_url.join(&href) {
                        Ok(resolved) => candidates.push(resolved.to_string()),
                        Err(err) => {
                            debug!(%href, %err, "discarding unresolvable icon href");
                        }
                    }
                }
            }
            Err(err) => {
                debug!(url = %normalized, %err, "page fetch failed, falling back to /favicon.ico");
            }
        }

        // The universal convention, always probed: final origin first
        // (the site's actual current location), then the original origin
        // when a redirect moved us elsewhere.
        if let Ok(fallback) = final_url.join("/favicon.ico") {
            candidates.push(fallback.to_string());
        }
        if final_url.origin() != base.origin() {
            if let Ok(fallback) = base.join("/favicon.ico") {
                candidates.push(fallback.to_string());
            }
        }

        let mut seen = HashSet::new();
        for candidate in candidates {
            if candidate.is_empty() || !seen.insert(candidate.clone()) {
                continue;
            }
            if self.is_valid_image(&candidate).await {
                debug!(icon = %candidate, "favicon resolved");
                return Some(candidate);
            }
        }

        debug!(url = %normalized, "no valid icon candidate");
        None
    }

    /// Check whether `candidate` serves something that looks like an image.
    ///
    /// HEAD first because it is cheap. A HEAD that answers with a
    /// non-error status is conclusive either way; a refused or erroring
    /// HEAD falls through to a GET whose body is never read — plenty of
    /// embedded servers reject HEAD outright, and a dropped GET response
    /// costs headers, not a download.
    pub async fn is_valid_image(&self, candidate: &str) -> bool {
        match self.client.head(candidate).timeout(self.timeout).send().await {
            Ok(response) if is_acceptable_status(&response) => {
                return looks_like_image(&response, candidate);
            }
            Ok(response) => {
                debug!(url = %candidate, status = %response.status(), "HEAD probe rejected, retrying as GET");
            }
            Err(err) => {
                debug!(url = %candidate, %err, "HEAD probe failed, retrying as GET");
            }
        }

        match self.client.get(candidate).timeout(self.timeout).send().await {
            Ok(response) => {
                is_acceptable_status(&response) && looks_like_image(&response, candidate)
            }
            Err(err) => {
                debug!(url = %candidate, %err, "GET probe failed");
                false
            }
        }
    }

    /// Fetch the page and return its final (post-redirect) URL plus a
    /// body prefix capped at the markup scan limit.
    async fn fetch_page(&self, url: &str) -> Result<(Url, String), reqwest::Error> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;
        let final_url = response.url().clone();
        let body = read_prefix(response, SCAN_LIMIT).await?;
        Ok((final_url, body))
    }
}

/// Read at most `limit` bytes of a response body, then drop the rest of
/// the stream. Icon links live in the first few kilobytes; servers
/// routinely hand back multi-megabyte documents.
async fn read_prefix(mut response: Response, limit: usize) -> Result<String, reqwest::Error> {
    let mut buf: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if buf.len() + chunk.len() >= limit {
            buf.extend_from_slice(&chunk[..limit - buf.len()]);
            break;
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Anything below 400 counts as acceptable; redirects were already
/// followed by the client.
fn is_acceptable_status(response: &Response) -> bool {
    response.status().as_u16() < 400
}

/// Accept when the declared content type mentions "image", or when the
/// URL path carries a well-known image extension — many small servers
/// serve icons as `application/octet-stream`.
fn looks_like_image(response: &Response, candidate: &str) -> bool {
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if content_type.contains("image") {
        return true;
    }
    has_image_extension(candidate)
}

fn has_image_extension(candidate: &str) -> bool {
    let path = Url::parse(candidate)
        .map_or_else(|_| candidate.to_ascii_lowercase(), |url| url.path().to_ascii_lowercase());
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
