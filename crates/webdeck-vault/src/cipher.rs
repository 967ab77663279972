//! Authenticated secret cipher.
//!
//! Small strings (per-service login credentials) are encrypted with
//! AES-256-GCM under a [`DerivedKey`]. The wire format is URL-safe base64
//! of `nonce || ciphertext || tag`; the nonce is fresh per encryption, so
//! the same plaintext encrypted twice yields different ciphertexts.
//!
//! # Failure containment
//!
//! The public API never returns an error. Empty input means "no secret"
//! on the way in, and any decryption failure means "no secret" on the way
//! out. Callers treat an unrecoverable credential exactly like one that
//! was never configured.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL;
use tracing::debug;

use crate::error::CipherError;
use crate::key::DerivedKey;

/// AES-GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

/// Authenticated encryption for credential strings.
pub struct SecretCipher {
    key: DerivedKey,
}

impl SecretCipher {
    /// Create a cipher over an already-derived key.
    #[must_use]
    pub fn new(key: DerivedKey) -> Self {
        Self { key }
    }

    /// Convenience constructor: derive the key from a secret string.
    #[must_use]
    pub fn from_secret(secret: &str) -> Self {
        Self::new(DerivedKey::derive(secret))
    }

    /// Encrypt a credential.
    ///
    /// Empty plaintext returns `None` ("no secret"), not an error.
    /// Encryption is non-deterministic: a fresh nonce is generated per
    /// call, so repeated encryption of the same plaintext differs.
    #[must_use]
    pub fn encrypt(&self, plaintext: &str) -> Option<String> {
        if plaintext.is_empty() {
            return None;
        }
        match self.encrypt_inner(plaintext) {
            Ok(ciphertext) => Some(ciphertext),
            Err(err) => {
                debug!(%err, "secret encryption failed");
                None
            }
        }
    }

    /// Decrypt a stored credential.
    ///
    /// Empty ciphertext returns `None` ("no secret"). So does every
    /// failure mode: malformed encoding, truncated input, a rotated key,
    /// or a tampered ciphertext. The caller never sees an error, only
    /// absence.
    #[must_use]
    pub fn decrypt(&self, ciphertext: &str) -> Option<String> {
        if ciphertext.is_empty() {
            return None;
        }
        match self.decrypt_inner(ciphertext) {
            Ok(plaintext) => Some(plaintext),
            Err(err) => {
                debug!(%err, "stored secret could not be decrypted; treating as unset");
                None
            }
        }
    }

    fn encrypt_inner(&self, plaintext: &str) -> Result<String, CipherError> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.key.as_bytes()));
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CipherError::Encryption)?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(BASE64_URL.encode(out))
    }

    fn decrypt_inner(&self, ciphertext: &str) -> Result<String, CipherError> {
        let raw = BASE64_URL
            .decode(ciphertext)
            .map_err(|e| CipherError::InvalidEncoding {
                reason: e.to_string(),
            })?;

        // Need at least the nonce plus the 16-byte GCM tag.
        if raw.len() < NONCE_LEN + 16 {
            return Err(CipherError::CiphertextTooShort {
                expected: NONCE_LEN + 16,
                actual: raw.len(),
            });
        }

        let (nonce, sealed) = raw.split_at(NONCE_LEN);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.key.as_bytes()));
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| CipherError::Decryption)?;

        String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8)
    }
}
