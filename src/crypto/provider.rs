//! Cryptographic provider abstraction
//!
//! All primitives the envelope and certificate layers need go through the
//! [`CryptoProvider`] trait. [`OsCryptoProvider`] binds it to the RustCrypto
//! implementations and the operating system CSPRNG; tests can substitute a
//! provider with deterministic randomness to reproduce known vectors.

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use hmac::Hmac;
use rsa::{pkcs8::DecodePublicKey, RsaPublicKey};
use sha2::Sha512;

use crate::config::{KEY_LEN, NONCE_LEN};
use crate::error::{EnvelopeError, EnvelopeResult};

/// Primitive operations supplied by the platform
///
/// Implementations must be stateless with respect to callers: nothing
/// derived from one call may be cached for another.
pub trait CryptoProvider: Send + Sync {
    /// Fill `buf` with cryptographically secure random bytes
    fn fill_random(&self, buf: &mut [u8]) -> EnvelopeResult<()>;

    /// PBKDF2 with HMAC-SHA-512, writing `out.len()` bytes of key material
    fn pbkdf2_sha512(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        out: &mut [u8],
    ) -> EnvelopeResult<()>;

    /// AES-256-GCM encryption with empty associated data; the tag is appended
    fn aes_gcm_seal(
        &self,
        key: &[u8; KEY_LEN],
        nonce: &[u8; NONCE_LEN],
        plaintext: &[u8],
    ) -> EnvelopeResult<Vec<u8>>;

    /// AES-256-GCM decryption with empty associated data
    ///
    /// Must return [`EnvelopeError::AuthenticationFailed`] when the tag does
    /// not verify, whatever the cause.
    fn aes_gcm_open(
        &self,
        key: &[u8; KEY_LEN],
        nonce: &[u8; NONCE_LEN],
        sealed: &[u8],
    ) -> EnvelopeResult<Vec<u8>>;

    /// Parse DER-encoded SubjectPublicKeyInfo as an RSA public key
    fn import_spki_key(&self, der: &[u8]) -> EnvelopeResult<RsaPublicKey>;
}

/// Provider backed by RustCrypto crates and the OS random source
#[derive(Debug, Clone, Copy, Default)]
pub struct OsCryptoProvider;

impl CryptoProvider for OsCryptoProvider {
    fn fill_random(&self, buf: &mut [u8]) -> EnvelopeResult<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| EnvelopeError::Encryption(format!("Random source unavailable: {}", e)))
    }

    fn pbkdf2_sha512(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        out: &mut [u8],
    ) -> EnvelopeResult<()> {
        pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, iterations, out)
            .map_err(|e| EnvelopeError::KeyDerivation(format!("PBKDF2 failed: {}", e)))
    }

    fn aes_gcm_seal(
        &self,
        key: &[u8; KEY_LEN],
        nonce: &[u8; NONCE_LEN],
        plaintext: &[u8],
    ) -> EnvelopeResult<Vec<u8>> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
        cipher
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|e| EnvelopeError::Encryption(format!("Encryption failed: {}", e)))
    }

    fn aes_gcm_open(
        &self,
        key: &[u8; KEY_LEN],
        nonce: &[u8; NONCE_LEN],
        sealed: &[u8],
    ) -> EnvelopeResult<Vec<u8>> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
        cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| EnvelopeError::AuthenticationFailed)
    }

    fn import_spki_key(&self, der: &[u8]) -> EnvelopeResult<RsaPublicKey> {
        RsaPublicKey::from_public_key_der(der)
            .map_err(|e| EnvelopeError::KeyImport(format!("Invalid SPKI public key: {}", e)))
    }
}
