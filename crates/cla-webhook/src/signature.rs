//! Webhook signature verification.
//!
//! GitHub signs each delivery with an HMAC of the raw body keyed by the
//! webhook secret and sends the hex digest as `X-Hub-Signature: sha1=<hex>`
//! and `X-Hub-Signature-256: sha256=<hex>`. The SHA-256 header is checked
//! when present, otherwise the SHA-1 one. The header's hex digest is decoded
//! and compared to the MAC bytes in constant time.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

use crate::error::WebhookError;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-hub-signature";
pub const SIGNATURE_256_HEADER: &str = "x-hub-signature-256";

/// Signature headers of one delivery.
#[derive(Debug, Clone, Copy, Default)]
pub struct Signatures<'a> {
    pub sha1: Option<&'a str>,
    pub sha256: Option<&'a str>,
}

/// Check that `body` was signed with `secret`.
///
/// # Errors
///
/// Returns [`WebhookError::MissingSignature`] when no header was sent,
/// [`WebhookError::InvalidSignatureFormat`] when the header is not
/// `<algorithm>=<hex>`, and [`WebhookError::InvalidSignature`] on mismatch.
pub fn verify(secret: &[u8], body: &[u8], signatures: Signatures<'_>) -> Result<(), WebhookError> {
    if let Some(header) = signatures.sha256 {
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| WebhookError::InvalidSignature)?;
        return verify_hex(mac, body, header, "sha256=");
    }
    if let Some(header) = signatures.sha1 {
        let mac = HmacSha1::new_from_slice(secret).map_err(|_| WebhookError::InvalidSignature)?;
        return verify_hex(mac, body, header, "sha1=");
    }
    Err(WebhookError::MissingSignature)
}

fn verify_hex<M: Mac>(mut mac: M, body: &[u8], header: &str, prefix: &str) -> Result<(), WebhookError> {
    let hex_digest = header
        .trim()
        .strip_prefix(prefix)
        .ok_or_else(|| WebhookError::InvalidSignatureFormat(format!("expected '{prefix}<hex>'")))?;
    let expected = hex::decode(hex_digest)
        .map_err(|error| WebhookError::InvalidSignatureFormat(error.to_string()))?;

    mac.update(body);
    mac.verify_slice(&expected)
        .map_err(|_| WebhookError::InvalidSignature)
}

/// `sha1=<hex>` value GitHub would send for `body`.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidSignature`] if the key is rejected.
pub fn sign_sha1(secret: &[u8], body: &[u8]) -> Result<String, WebhookError> {
    let mut mac = HmacSha1::new_from_slice(secret).map_err(|_| WebhookError::InvalidSignature)?;
    mac.update(body);
    Ok(format!("sha1={}", hex::encode(mac.finalize().into_bytes())))
}

/// `sha256=<hex>` value GitHub would send for `body`.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidSignature`] if the key is rejected.
pub fn sign_sha256(secret: &[u8], body: &[u8]) -> Result<String, WebhookError> {
    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|_| WebhookError::InvalidSignature)?;
    mac.update(body);
    Ok(format!("sha256={}", hex::encode(mac.finalize().into_bytes())))
}
