//! Error types for `webdeck-vault`.
//!
//! These errors are internal to the crate: the public cipher API converts
//! every failure into an absence value. They exist so that absorbed
//! failures can be logged with enough context to diagnose without a
//! debugger. No variant ever carries key material or plaintext.

/// Errors from cryptographic operations.
#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    /// AES-256-GCM encryption failed.
    #[error("encryption failed")]
    Encryption,

    /// AES-256-GCM decryption failed (wrong key, corrupted ciphertext, or tampered tag).
    #[error("decryption failed")]
    Decryption,

    /// The ciphertext was not valid URL-safe base64.
    #[error("ciphertext encoding invalid: {reason}")]
    InvalidEncoding { reason: String },

    /// Decoded ciphertext is too short to contain a nonce and a tag.
    #[error("ciphertext too short: expected at least {expected} bytes, got {actual}")]
    CiphertextTooShort { expected: usize, actual: usize },

    /// Decryption succeeded but the plaintext was not valid UTF-8.
    #[error("decrypted plaintext is not valid UTF-8")]
    InvalidUtf8,
}
