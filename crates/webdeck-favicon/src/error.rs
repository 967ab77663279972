/// Errors from resolver construction.
///
/// Resolution itself never errors — invalid input and network failures all
/// collapse to "no icon". Building the HTTP client is the one operation
/// that can genuinely fail (TLS backend initialization), and that happens
/// once, at startup.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// The underlying HTTP client could not be constructed.
    #[error("http client construction failed: {0}")]
    ClientBuild(#[from] reqwest::Error),
}
