//! Envelope format parameters
//!
//! The salt, nonce and tag sizes, the PBKDF2 hash and the iteration count
//! are all part of the wire format. Changing any of them makes previously
//! produced envelopes undecryptable, so they are bound to a format version
//! instead of being tunable.

use serde::{Deserialize, Serialize};

use crate::error::{EnvelopeError, EnvelopeResult};

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce length in bytes (96 bits)
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes
pub const TAG_LEN: usize = 16;

/// Derived key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Parameters describing one envelope format version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatParams {
    /// Format version
    pub version: u8,
    /// Salt length in bytes
    pub salt_len: usize,
    /// Nonce length in bytes
    pub nonce_len: usize,
    /// Authentication tag length in bytes
    pub tag_len: usize,
    /// Derived key length in bytes
    pub key_len: usize,
    /// PBKDF2 iteration count
    pub iterations: u32,
    /// PBKDF2 pseudorandom function
    pub prf: PrfHash,
}

/// Hash used as the PBKDF2 pseudorandom function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrfHash {
    /// HMAC-SHA-512
    HmacSha512,
}

impl FormatParams {
    /// The only envelope format this crate reads and writes
    pub const V1: FormatParams = FormatParams {
        version: 1,
        salt_len: SALT_LEN,
        nonce_len: NONCE_LEN,
        tag_len: TAG_LEN,
        key_len: KEY_LEN,
        iterations: PBKDF2_ITERATIONS,
        prf: PrfHash::HmacSha512,
    };

    /// Length of the salt and nonce prefix
    pub const fn header_len(&self) -> usize {
        self.salt_len + self.nonce_len
    }

    /// Smallest valid envelope: header plus the tag of an empty plaintext
    pub const fn min_envelope_len(&self) -> usize {
        self.header_len() + self.tag_len
    }

    /// Parse a serialized parameter set, accepting only supported versions
    pub fn from_json(json: &str) -> EnvelopeResult<Self> {
        let params: FormatParams = serde_json::from_str(json)?;
        params.ensure_supported()?;
        Ok(params)
    }

    /// Serialize the parameter set
    pub fn to_json(&self) -> EnvelopeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Fail unless these parameters match a supported format exactly
    pub fn ensure_supported(&self) -> EnvelopeResult<()> {
        if *self == Self::V1 {
            return Ok(());
        }
        Err(EnvelopeError::Config(format!(
            "Unsupported envelope format (version {})",
            self.version
        )))
    }
}

impl Default for FormatParams {
    fn default() -> Self {
        Self::V1
    }
}
