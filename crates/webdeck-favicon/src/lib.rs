//! Site-metadata resolver for webdeck.
//!
//! Given an arbitrary user-supplied URL, discovers a usable icon image by
//! probing the live site: fetch the page (following redirects), scan the
//! markup for `<link rel="...icon...">` hints, then fall back to the
//! conventional `/favicon.ico` on both the final and original origins.
//!
//! The targets are private-network services — homelab dashboards, NAS
//! admin panels, router UIs — so TLS certificate validation is
//! deliberately disabled and every network failure degrades to "no icon"
//! rather than an error.

pub mod extract;
pub mod normalize;
pub mod resolver;

mod error;

pub use error::ResolverError;
