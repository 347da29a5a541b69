//! Configuration module for passphrase envelopes
//!
//! This module provides the format parameters that define the envelope
//! wire layout and key derivation settings.

pub mod format;

pub use format::{FormatParams, PrfHash, KEY_LEN, NONCE_LEN, PBKDF2_ITERATIONS, SALT_LEN, TAG_LEN};
