//! Key derivation using PBKDF2-HMAC-SHA-512
//!
//! Stretches a passphrase into a 256-bit AES key. The hash and iteration
//! count come from [`FormatParams::V1`](crate::config::FormatParams::V1)
//! and are part of the envelope format.

use std::fmt;

use zeroize::Zeroizing;

use crate::config::{FormatParams, KEY_LEN, SALT_LEN};
use crate::error::{EnvelopeError, EnvelopeResult};

use super::provider::CryptoProvider;

/// A derived AES-256-GCM key
///
/// The key bytes never leave the crate; they are wiped when the key is
/// dropped.
pub struct DerivedKey {
    key: Zeroizing<[u8; KEY_LEN]>,
}

impl DerivedKey {
    pub(crate) fn bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// A derived key together with the salt it was derived from
#[derive(Debug)]
pub struct KeyMaterial {
    /// Key usable for a single encrypt or decrypt call
    pub key: DerivedKey,
    /// Salt to store alongside the ciphertext
    pub salt: [u8; SALT_LEN],
}

/// Derive an encryption key from a passphrase
///
/// When `salt` is `None` a fresh random salt is drawn from the provider.
pub fn derive_key<P: CryptoProvider + ?Sized>(
    provider: &P,
    passphrase: &str,
    salt: Option<&[u8; SALT_LEN]>,
) -> EnvelopeResult<KeyMaterial> {
    let salt = match salt {
        Some(salt) => *salt,
        None => {
            let mut fresh = [0u8; SALT_LEN];
            provider
                .fill_random(&mut fresh)
                .map_err(|e| EnvelopeError::KeyDerivation(format!("Salt generation failed: {}", e)))?;
            fresh
        }
    };

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    provider.pbkdf2_sha512(
        passphrase.as_bytes(),
        &salt,
        FormatParams::V1.iterations,
        key.as_mut_slice(),
    )?;

    Ok(KeyMaterial {
        key: DerivedKey { key },
        salt,
    })
}
