//! Cryptographic functions for passphrase envelopes
//!
//! Provides AES-256-GCM envelopes with PBKDF2-HMAC-SHA-512 key derivation,
//! the base64 codec they travel in, and RSA-PSS verification key import.

pub mod certificate;
pub mod codec;
pub mod encryption;
pub mod key_derivation;
pub mod provider;

pub use certificate::{
    import_verification_key, import_verification_key_with, strip_pem_armor, CertificateKeyHandle,
};
pub use encryption::{decrypt, encrypt, Envelope, EnvelopeCipher};
pub use key_derivation::{DerivedKey, KeyMaterial};
pub use provider::{CryptoProvider, OsCryptoProvider};

use crate::config::SALT_LEN;
use crate::error::EnvelopeResult;

/// Derive a key with the default provider, generating a salt when none is given
pub fn derive_key(passphrase: &str, salt: Option<&[u8; SALT_LEN]>) -> EnvelopeResult<KeyMaterial> {
    key_derivation::derive_key(&OsCryptoProvider, passphrase, salt)
}
