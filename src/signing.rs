use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{SigningError, VerificationError};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex signature of the request body.
pub const SIGNATURE_HEADER: &str = "X-Gophish-Signature";

/// Compute the signature sent with a webhook body.
///
/// HMAC-SHA256 keyed with `secret` over `payload`, lowercase hex. The same
/// `(secret, payload)` always yields the same string.
pub fn sign(secret: &str, payload: &[u8]) -> Result<String, SigningError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|err| SigningError(err.to_string()))?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a received signature in constant time.
///
/// Malformed hex is treated as a mismatch.
pub fn verify_signature(secret: &str, payload: &[u8], signature_hex: &str) -> bool {
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload);

    mac.verify_slice(&signature).is_ok()
}

/// Find the signature header in a list of headers (case-insensitive).
pub fn find_signature<'a, I>(headers: I, signature_header: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    headers
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(signature_header))
        .map(|(_, value)| value)
}

/// Verify an incoming webhook request in one call.
///
/// Receivers pass the raw request headers and body exactly as received.
pub fn verify_webhook_request<'a, I>(
    headers: I,
    payload: &[u8],
    secret: &str,
) -> Result<(), VerificationError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let signature =
        find_signature(headers, SIGNATURE_HEADER).ok_or(VerificationError::MissingSignature)?;

    if verify_signature(secret, payload, signature) {
        Ok(())
    } else {
        Err(VerificationError::InvalidSignature)
    }
}
