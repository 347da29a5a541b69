//! Passphrase envelopes using AES-256-GCM
//!
//! An envelope is `salt ‖ nonce ‖ ciphertext‖tag`, base64 encoded. Each
//! encryption derives a fresh key from a fresh salt and draws a fresh
//! nonce, so the same text and passphrase never produce the same blob.

use tracing::debug;
use zeroize::Zeroizing;

use crate::config::{FormatParams, NONCE_LEN, SALT_LEN};
use crate::error::{EnvelopeError, EnvelopeResult};

use super::codec;
use super::key_derivation::{self, KeyMaterial};
use super::provider::{CryptoProvider, OsCryptoProvider};

/// Parsed envelope: salt, nonce and sealed ciphertext with its tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    salt: [u8; SALT_LEN],
    nonce: [u8; NONCE_LEN],
    sealed: Vec<u8>,
}

impl Envelope {
    /// Split raw envelope bytes into their fields
    ///
    /// Anything not longer than the salt and nonce cannot hold even the tag
    /// of an empty plaintext and is rejected.
    pub fn from_bytes(bytes: &[u8]) -> EnvelopeResult<Self> {
        if bytes.len() <= FormatParams::V1.header_len() {
            return Err(EnvelopeError::InvalidCiphertext);
        }

        let (salt, rest) = bytes.split_at(SALT_LEN);
        let (nonce, sealed) = rest.split_at(NONCE_LEN);

        let mut envelope = Self {
            salt: [0u8; SALT_LEN],
            nonce: [0u8; NONCE_LEN],
            sealed: sealed.to_vec(),
        };
        envelope.salt.copy_from_slice(salt);
        envelope.nonce.copy_from_slice(nonce);
        Ok(envelope)
    }

    /// Decode and split a base64 envelope
    pub fn from_base64(text: &str) -> EnvelopeResult<Self> {
        let bytes = codec::decode(text).map_err(|_| EnvelopeError::InvalidCiphertext)?;
        Self::from_bytes(&bytes)
    }

    /// Concatenate the fields in wire order
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(SALT_LEN + NONCE_LEN + self.sealed.len());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.sealed);
        bytes
    }

    /// Canonical base64 form of the envelope
    pub fn to_base64(&self) -> String {
        codec::encode(&self.to_bytes())
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    /// Ciphertext followed by the authentication tag
    pub fn sealed(&self) -> &[u8] {
        &self.sealed
    }
}

/// Encrypts and decrypts envelopes through a [`CryptoProvider`]
///
/// The cipher holds nothing but the provider. Keys are derived per call and
/// dropped (and wiped) before the call returns.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeCipher<P = OsCryptoProvider> {
    provider: P,
}

impl EnvelopeCipher<OsCryptoProvider> {
    /// Cipher backed by the OS random source and RustCrypto primitives
    pub fn new() -> Self {
        Self {
            provider: OsCryptoProvider,
        }
    }
}

impl<P: CryptoProvider> EnvelopeCipher<P> {
    /// Cipher backed by a custom provider
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Derive a key, generating a salt when none is given
    pub fn derive_key(
        &self,
        passphrase: &str,
        salt: Option<&[u8; SALT_LEN]>,
    ) -> EnvelopeResult<KeyMaterial> {
        key_derivation::derive_key(&self.provider, passphrase, salt)
    }

    /// Seal raw bytes into an envelope
    pub fn seal_bytes(&self, plaintext: &[u8], passphrase: &str) -> EnvelopeResult<Envelope> {
        let KeyMaterial { key, salt } = self.derive_key(passphrase, None)?;

        let mut nonce = [0u8; NONCE_LEN];
        self.provider.fill_random(&mut nonce)?;

        let sealed = self.provider.aes_gcm_seal(key.bytes(), &nonce, plaintext)?;
        debug!(
            plaintext_len = plaintext.len(),
            sealed_len = sealed.len(),
            "envelope sealed"
        );

        Ok(Envelope {
            salt,
            nonce,
            sealed,
        })
    }

    /// Open an envelope back into raw bytes
    ///
    /// The returned buffer is wiped when dropped.
    pub fn open_bytes(
        &self,
        envelope: &Envelope,
        passphrase: &str,
    ) -> EnvelopeResult<Zeroizing<Vec<u8>>> {
        let KeyMaterial { key, .. } = self.derive_key(passphrase, Some(&envelope.salt))?;

        let plaintext = self
            .provider
            .aes_gcm_open(key.bytes(), &envelope.nonce, &envelope.sealed)
            .map_err(|e| {
                debug!(sealed_len = envelope.sealed.len(), "envelope failed to open");
                e
            })?;

        Ok(Zeroizing::new(plaintext))
    }

    /// Encrypt text into a base64 envelope
    pub fn encrypt(&self, text: &str, passphrase: &str) -> EnvelopeResult<String> {
        let envelope = self.seal_bytes(text.as_bytes(), passphrase)?;
        Ok(envelope.to_base64())
    }

    /// Decrypt a base64 envelope back into text
    pub fn decrypt(&self, blob: &str, passphrase: &str) -> EnvelopeResult<String> {
        let envelope = Envelope::from_base64(blob)?;
        let plaintext = self.open_bytes(&envelope, passphrase)?;

        std::str::from_utf8(&plaintext)
            .map(str::to_owned)
            .map_err(|e| EnvelopeError::Decoding(format!("Decrypted data is not valid UTF-8: {}", e)))
    }
}

/// Encrypt text with the default provider
pub fn encrypt(text: &str, passphrase: &str) -> EnvelopeResult<String> {
    EnvelopeCipher::new().encrypt(text, passphrase)
}

/// Decrypt a base64 envelope with the default provider
pub fn decrypt(blob: &str, passphrase: &str) -> EnvelopeResult<String> {
    EnvelopeCipher::new().decrypt(blob, passphrase)
}
