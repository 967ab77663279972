//! URL canonicalization for user-entered host strings.
//!
//! Users paste anything: bare hostnames, `host:port` pairs, full URLs.
//! Normalization coerces these into an absolute, fetchable URL without
//! ever failing — garbage in means garbage out, and the resolver rejects
//! it downstream when it fails to parse.

use url::Url;

/// Canonicalize a raw user-entered URL or host string.
///
/// Empty or whitespace-only input returns an empty string. Input already
/// carrying an `http://` or `https://` prefix is returned trimmed and
/// otherwise unchanged; anything else gets `http://` prepended.
///
/// The scheme-prefix check is case-sensitive: `HTTP://host` is treated as
/// schemeless and becomes `http://HTTP://host`. That matches the behavior
/// stored URLs have always been normalized under, so it is kept and pinned
/// by a test rather than silently corrected.
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }
    if value.starts_with("http://") || value.starts_with("https://") {
        value.to_owned()
    } else {
        format!("http://{value}")
    }
}

/// Extract just the `host[:port]` component of a URL or host string.
///
/// Display helper for listing pages; returns an empty string when the
/// input cannot be parsed as a URL with an authority.
#[must_use]
pub fn extract_host(value: &str) -> String {
    let Ok(parsed) = Url::parse(&normalize_url(value)) else {
        return String::new();
    };
    match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_owned(),
        (None, _) => String::new(),
    }
}
