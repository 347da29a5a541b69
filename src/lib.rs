//! passphrase-envelope - Passphrase-based authenticated encryption
//!
//! This library turns text and a passphrase into a single portable base64
//! blob and back. It also imports RSA public keys from PEM blocks for
//! RSA-PSS signature verification.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Envelope format parameters
//! - `error`: Custom error types
//! - `crypto`: Codec, key derivation, envelopes and certificate import
//! - `tasks`: Async offload and deadlines for callers on a tokio runtime
//!
//! # Wire format
//!
//! ```text
//! Offset   Length   Field
//! 0        16       salt
//! 16       12       nonce
//! 28       N        AES-256-GCM ciphertext with appended tag
//! ```
//!
//! # Example
//!
//! ```rust
//! let blob = passphrase_envelope::encrypt("attack at dawn", "s3cr3t")?;
//! let text = passphrase_envelope::decrypt(&blob, "s3cr3t")?;
//! assert_eq!(text, "attack at dawn");
//! # Ok::<(), passphrase_envelope::EnvelopeError>(())
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod tasks;

pub use config::FormatParams;
pub use crypto::{
    decrypt, derive_key, encrypt, import_verification_key, CertificateKeyHandle, CryptoProvider,
    Envelope, EnvelopeCipher, OsCryptoProvider,
};
pub use error::{EnvelopeError, EnvelopeResult};
