//! Decoding of the server's VAPID public key
use base64::{
    Engine as _,
    alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
};

use crate::core::PushError;

// Lenient about trailing bits the same way a browser's `atob` is
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Convert base64url text into the raw key bytes expected by
/// `PushManager::subscribe`. The input is padded to a multiple of 4
/// and translated to the standard alphabet before decoding.
pub fn url_base64_to_bytes(input: &str) -> Result<Vec<u8>, PushError> {
    let padding = "=".repeat((4 - input.len() % 4) % 4);
    let standard = format!("{}{}", input, padding)
        .replace('-', "+")
        .replace('_', "/");

    STANDARD_LENIENT
        .decode(standard.as_bytes())
        .map_err(|e| PushError::KeyDecode(e.to_string()))
}
