//! Symmetric authenticated encryption for embedded markers.
//!
//! Tokens are XChaCha20-Poly1305 ciphertexts framed as
//! `version || nonce || ciphertext+tag` and encoded as URL-safe base64, so
//! they can be stored as a Latin-1 PNG text value.
//!
//! # Example
//!
//! ```
//! use stegatool_core::cipher::{decrypt, encrypt, BatchKey};
//!
//! let key = BatchKey::generate();
//! let token = encrypt(&key, b"Watermarked for alice").unwrap();
//! assert_eq!(decrypt(&key, &token).unwrap(), b"Watermarked for alice");
//! ```

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Result, StegaError};

/// Raw key length in bytes (256-bit key).
pub const KEY_LEN: usize = 32;

/// XChaCha20 nonce length in bytes.
pub const NONCE_LEN: usize = 24;

/// Poly1305 tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Leading byte of every token.
pub const TOKEN_VERSION: u8 = 0x01;

const HEADER_LEN: usize = 1 + NONCE_LEN;

/// Reasons a token cannot be opened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecryptionError {
    #[error("token is not valid URL-safe base64")]
    Encoding,

    #[error("token is truncated ({0} bytes)")]
    Truncated(usize),

    #[error("unsupported token version {0:#04x}")]
    UnsupportedVersion(u8),

    #[error("authentication failed (wrong key or tampered token)")]
    Authentication,
}

/// The single symmetric key shared by every issuance in one run.
///
/// Key bytes are wiped when the value is dropped. The text form is the
/// 44-character URL-safe base64 encoding of the raw bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BatchKey {
    bytes: [u8; KEY_LEN],
}

impl BatchKey {
    /// Generate a fresh key from the operating system CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Text form handed to the operator.
    pub fn encode(&self) -> String {
        URL_SAFE.encode(self.bytes)
    }

    /// Parse the text form produced by [`BatchKey::encode`].
    pub fn decode(text: &str) -> Result<Self> {
        let raw = Zeroizing::new(
            URL_SAFE
                .decode(text.trim())
                .map_err(|e| StegaError::InvalidKey(format!("not URL-safe base64: {e}")))?,
        );

        if raw.len() != KEY_LEN {
            return Err(StegaError::InvalidKey(format!(
                "expected {KEY_LEN} bytes, got {}",
                raw.len()
            )));
        }

        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&raw);
        Ok(Self { bytes })
    }

    fn cipher(&self) -> XChaCha20Poly1305 {
        XChaCha20Poly1305::new(Key::from_slice(&self.bytes))
    }
}

impl FromStr for BatchKey {
    type Err = StegaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl fmt::Debug for BatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BatchKey(<redacted>)")
    }
}

/// Encrypt `plaintext` into a self-contained text token.
///
/// A fresh random nonce is drawn for every call, so encrypting the same
/// plaintext twice yields different tokens.
pub fn encrypt(key: &BatchKey, plaintext: &[u8]) -> Result<String> {
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = XNonce::from_slice(&nonce_bytes);

    let ciphertext = key
        .cipher()
        .encrypt(nonce, plaintext)
        .map_err(|_| StegaError::Encryption("AEAD encryption failed".into()))?;

    let mut blob = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    blob.push(TOKEN_VERSION);
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);

    Ok(URL_SAFE.encode(blob))
}

/// Open a token produced by [`encrypt`].
pub fn decrypt(key: &BatchKey, token: &str) -> std::result::Result<Vec<u8>, DecryptionError> {
    let blob = URL_SAFE
        .decode(token.trim())
        .map_err(|_| DecryptionError::Encoding)?;

    if blob.len() < HEADER_LEN + TAG_LEN {
        return Err(DecryptionError::Truncated(blob.len()));
    }

    let (version, rest) = blob.split_at(1);
    if version[0] != TOKEN_VERSION {
        return Err(DecryptionError::UnsupportedVersion(version[0]));
    }

    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);
    key.cipher()
        .decrypt(XNonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| DecryptionError::Authentication)
}
