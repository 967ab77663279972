//! Key derivation for the credential vault.
//!
//! The application secret is an arbitrary operator-chosen string; hashing
//! it with SHA-256 yields a valid 256-bit cipher key regardless of the raw
//! secret's length. Derivation is a pure function: the same secret always
//! produces the same key, within a process and across restarts.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a derived key in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// A symmetric key derived from an application secret.
///
/// Key bytes are zeroized when the value is dropped. The secret itself is
/// never stored; callers re-derive on demand.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    /// Derive a key from an application secret.
    ///
    /// Deterministic: identical input always yields an identical key.
    /// Which secret to use (the application-wide key or a dedicated
    /// credentials key) is the caller's decision; this function takes the
    /// chosen secret explicitly rather than reading ambient configuration.
    #[must_use]
    pub fn derive(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        Self(digest.into())
    }

    /// Raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn same_secret_same_key() {
        let a = DerivedKey::derive("correct horse battery staple");
        let b = DerivedKey::derive("correct horse battery staple");
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn different_secret_different_key() {
        let a = DerivedKey::derive("secret-one");
        let b = DerivedKey::derive("secret-two");
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn short_and_long_secrets_both_yield_full_length_keys() {
        let short = DerivedKey::derive("x");
        let long = DerivedKey::derive(&"y".repeat(4096));
        assert_eq!(short.as_bytes().len(), KEY_LEN);
        assert_eq!(long.as_bytes().len(), KEY_LEN);
    }

    #[test]
    fn debug_redacts_key_material() {
        let key = DerivedKey::derive("hunter2");
        let rendered = format!("{key:?}");
        assert!(rendered.contains("redacted"));
        assert!(!rendered.contains("hunter2"));
    }
}
