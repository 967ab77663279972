//! Credential vault for webdeck.
//!
//! Encrypts and decrypts per-service login credentials at rest using a key
//! derived deterministically from the application secret. The cipher is
//! built for strict failure containment: a rotated secret, a corrupted
//! ciphertext, or a malformed encoding all surface as "no secret", never
//! as an error the caller has to handle. Rotating the application secret
//! silently invalidates previously stored credentials instead of crashing
//! anything that tries to read them.

pub mod cipher;
pub mod error;
pub mod key;
