//! Custom error types for passphrase envelopes
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions. Messages never carry passphrases,
//! key material or plaintext.

use thiserror::Error;

/// The main error type for envelope and certificate operations
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// Decoded blob is too short to hold salt, nonce and tag
    #[error("Invalid ciphertext: input is not an encrypted envelope")]
    InvalidCiphertext,

    /// AEAD tag verification failed (wrong passphrase or tampered data)
    #[error("Decryption failed: wrong passphrase or corrupted data")]
    AuthenticationFailed,

    /// Decrypted bytes are not valid UTF-8
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// PBKDF2 could not be performed by the provider
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Certificate bytes are not a usable SPKI public key
    #[error("Key import error: {0}")]
    KeyImport(String),

    /// Internal failure while sealing or drawing randomness
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Signature did not verify under the imported key
    #[error("Signature verification failed")]
    Verification,

    /// Caller-imposed deadline elapsed before the operation finished
    #[error("Operation aborted")]
    OperationAborted,

    /// Format parameters do not describe a supported envelope version
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EnvelopeError {
    /// Check if this is an authentication failure
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }

    /// Check if the error was caused by the caller's input rather than the provider
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCiphertext
                | Self::AuthenticationFailed
                | Self::Decoding(_)
                | Self::KeyImport(_)
                | Self::Verification
        )
    }
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for envelope operations
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;
