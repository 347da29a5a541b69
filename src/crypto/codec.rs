//! Base64 text codec for envelopes and certificates
//!
//! Encoding is canonical: standard alphabet, `=` padding, no line breaks.
//! Decoding is lenient: every character outside `A-Z a-z 0-9 + /` is
//! discarded first, so whitespace, newlines and padding never matter.

use base64::{
    alphabet,
    engine::{general_purpose::STANDARD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

pub use base64::DecodeError;

/// Decoder for normalized input: padding already stripped, partial trailing
/// bits tolerated.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

fn is_alphabet(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/'
}

/// Encode bytes as canonical base64
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode base64 text, ignoring any non-alphabet characters
///
/// A single dangling character after the last full group carries fewer
/// than eight bits and is dropped.
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    let mut normalized: String = text.chars().filter(|c| is_alphabet(*c)).collect();
    if normalized.len() % 4 == 1 {
        normalized.pop();
    }
    LENIENT.decode(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes_gcm::aead::{rand_core::RngCore, OsRng};

    #[test]
    fn test_empty() {
        assert_eq!(encode(&[]), "");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_padding() {
        assert_eq!(encode(b"M"), "TQ==");
        assert_eq!(encode(b"Ma"), "TWE=");
        assert_eq!(encode(b"Man"), "TWFu");
    }

    #[test]
    fn test_round_trip_small_and_large() {
        let mut large = vec![0u8; 1000];
        OsRng.fill_bytes(&mut large);

        for bytes in [vec![], vec![0xFF], vec![0x00, 0x10], vec![1, 2, 3], large] {
            let encoded = encode(&bytes);
            assert_eq!(encoded.len() % 4, 0);
            assert_eq!(decode(&encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn test_decode_strips_whitespace() {
        let decoded = decode("SGVs\nbG8s IHdv\r\ncmxk\t").unwrap();
        assert_eq!(decoded, b"Hello, world");
    }

    #[test]
    fn test_reencode_normalizes() {
        let wrapped = "AAECAwQF\nBgcICQoL\nDA0ODxAR\n";
        let canonical = encode(&decode(wrapped).unwrap());
        assert_eq!(canonical, "AAECAwQFBgcICQoLDA0ODxAR");
    }

    #[test]
    fn test_decode_ignores_foreign_characters() {
        assert_eq!(decode("TW-Fu_").unwrap(), b"Man");
        assert_eq!(decode("TQ").unwrap(), b"M");
    }

    #[test]
    fn test_decode_drops_dangling_character() {
        assert_eq!(decode("TWFuT").unwrap(), b"Man");
    }

    #[test]
    fn test_decode_does_not_validate_length() {
        // "short" in base64 decodes to five bytes; the envelope layer rejects it.
        assert_eq!(decode("c2hvcnQ=").unwrap(), b"short");
    }
}
