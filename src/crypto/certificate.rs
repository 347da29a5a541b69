//! Verification key import from PEM certificates
//!
//! Accepts a PEM-armored SubjectPublicKeyInfo block holding an RSA key and
//! binds it to RSA-PSS with SHA-256. The resulting handle can only verify.

use std::fmt;

use rsa::{
    pss::{Signature, VerifyingKey},
    signature::Verifier,
    traits::PublicKeyParts,
};
use sha2::Sha256;
use tracing::debug;

use crate::error::{EnvelopeError, EnvelopeResult};

use super::codec;
use super::provider::{CryptoProvider, OsCryptoProvider};

/// Verification-only RSA-PSS/SHA-256 public key
pub struct CertificateKeyHandle {
    key: VerifyingKey<Sha256>,
    bits: usize,
}

impl fmt::Debug for CertificateKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateKeyHandle")
            .field("algorithm", &"RSA-PSS/SHA-256")
            .field("bits", &self.bits)
            .finish()
    }
}

impl CertificateKeyHandle {
    /// Verify a raw signature over `message`
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> EnvelopeResult<()> {
        let signature =
            Signature::try_from(signature).map_err(|_| EnvelopeError::Verification)?;
        self.key
            .verify(message, &signature)
            .map_err(|_| EnvelopeError::Verification)
    }

    /// Verify a signature carried as base64 text
    pub fn verify_base64(&self, message: &[u8], signature: &str) -> EnvelopeResult<()> {
        let signature = codec::decode(signature).map_err(|_| EnvelopeError::Verification)?;
        self.verify(message, &signature)
    }

    /// Modulus size of the imported key
    pub fn key_size_bits(&self) -> usize {
        self.bits
    }
}

/// Remove the BEGIN/END armor lines and all whitespace from a PEM block
///
/// The label between the dashes is not checked. Text without armor is
/// returned with whitespace removed.
pub fn strip_pem_armor(pem: &str) -> String {
    let mut body = pem.trim();

    if let Some(rest) = body.strip_prefix("-----BEGIN") {
        body = rest.split_once("-----").map(|(_, b)| b).unwrap_or("");
    }
    if let Some((before, _)) = body.split_once("-----END") {
        body = before;
    }

    body.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Import a PEM public key through a specific provider
pub fn import_verification_key_with<P: CryptoProvider + ?Sized>(
    provider: &P,
    pem: &str,
) -> EnvelopeResult<CertificateKeyHandle> {
    let body = strip_pem_armor(pem);
    let der = codec::decode(&body)
        .map_err(|e| EnvelopeError::KeyImport(format!("Invalid certificate encoding: {}", e)))?;
    if der.is_empty() {
        return Err(EnvelopeError::KeyImport("Certificate body is empty".to_string()));
    }

    let public_key = provider.import_spki_key(&der)?;
    let bits = public_key.size() * 8;
    debug!(key_bits = bits, "verification key imported");

    Ok(CertificateKeyHandle {
        key: VerifyingKey::new(public_key),
        bits,
    })
}

/// Import a PEM public key as an RSA-PSS/SHA-256 verification handle
pub fn import_verification_key(pem: &str) -> EnvelopeResult<CertificateKeyHandle> {
    import_verification_key_with(&OsCryptoProvider, pem)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLIC_KEY_PEM: &str = "-----BEGIN PUBLIC KEY-----
MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA1yaCJvnfKQz+ks4x/fhl
Suw5HdM9gdordqgdYzwxMZRzXDyGBdafrSacg7CxjFGpJsqi31/gafPdGf3PHhh0
kgntbJrF5vwyWNkIg1ycRdDeDxKn5vrPnefgCJ5PmlPOX1EOwhXf5hqXIcI9Px8J
x6nd+ecbNbhKIMFvmrLV1M9xJ7U9nx7JMH2ybcNYfCp3gpm9dy8n0y5Vzv9erCzX
AVEGp0FDUlQ9arLQaOy2wLZjQHdzntxSP+wDIl0r+kC3LdFSYzAy7iIY7MTmkuJb
j5iQy/F0h7zrCfEGgubf+r+GVo+CtwiP8ONUEHETyjrUqGjkhnbtZ9FV4TMC3O+5
nwIDAQAB
-----END PUBLIC KEY-----
";

    const MESSAGE: &[u8] = b"signed release manifest";

    const SIGNATURE: &str = "n1yVIY3kYA59IlufulW+uaCrdKqGa8KruDWxJI6t6VENosmjCxF6wSS2+Qkl+WZ5oyC3GcoHVqR/cUFfVQ5y3xdoiTRmrwZL5vONGt0FUMoqdoSrIwx1NQtLjNo98nDKIDQ1mRGZr5S2UuGJvpr3EHzbgAjRleGqc0EO42cmZKW0mOq+sj6UVScn1xR8X42ENlz/+PpU4ZxU+DZ/pjHqkxTPRvmkfAmYvA0Gw5ylfMV53ja6yD5WuJfp2EqQs6wGRb6uYailFs5ndpjvadQvXcFE0FzhmBbBtfEyBaylTkNhJHyRzhLtVjb7xcK2vqE/qrEXN8F0DE4ApdL/Klhunw==";

    #[test]
    fn test_strip_armor() {
        let body = strip_pem_armor("-----BEGIN ANYTHING-----\nQUJD\nREVG\n-----END ANYTHING-----\n");
        assert_eq!(body, "QUJDREVG");
    }

    #[test]
    fn test_strip_armor_single_line() {
        let body = strip_pem_armor("-----BEGIN X-----QUJD REVG-----END X-----");
        assert_eq!(body, "QUJDREVG");
    }

    #[test]
    fn test_strip_without_armor() {
        assert_eq!(strip_pem_armor("  QUJD\r\nREVG "), "QUJDREVG");
    }

    #[test]
    fn test_import_well_formed_key() {
        let handle = import_verification_key(PUBLIC_KEY_PEM).unwrap();
        assert_eq!(handle.key_size_bits(), 2048);
    }

    #[test]
    fn test_verify_signature() {
        let handle = import_verification_key(PUBLIC_KEY_PEM).unwrap();
        handle.verify_base64(MESSAGE, SIGNATURE).unwrap();
    }

    #[test]
    fn test_verify_rejects_other_message() {
        let handle = import_verification_key(PUBLIC_KEY_PEM).unwrap();
        let result = handle.verify_base64(b"tampered release manifest", SIGNATURE);
        assert!(matches!(result, Err(EnvelopeError::Verification)));
    }

    #[test]
    fn test_verify_rejects_short_signature() {
        let handle = import_verification_key(PUBLIC_KEY_PEM).unwrap();
        let result = handle.verify(MESSAGE, &[1, 2, 3]);
        assert!(matches!(result, Err(EnvelopeError::Verification)));
    }

    #[test]
    fn test_corrupted_body() {
        let corrupted = PUBLIC_KEY_PEM.replacen("MIIBIjAN", "AAAAAAAA", 1);
        let result = import_verification_key(&corrupted);
        assert!(matches!(result, Err(EnvelopeError::KeyImport(_))));
    }

    #[test]
    fn test_truncated_body() {
        let truncated: String = PUBLIC_KEY_PEM.lines().take(4).collect::<Vec<_>>().join("\n");
        let result = import_verification_key(&truncated);
        assert!(matches!(result, Err(EnvelopeError::KeyImport(_))));
    }

    #[test]
    fn test_empty_body() {
        let result = import_verification_key("-----BEGIN PUBLIC KEY-----\n-----END PUBLIC KEY-----");
        assert!(matches!(result, Err(EnvelopeError::KeyImport(_))));
    }
}
