use crate::core::errors::ExchangeError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Result type for signing operations: form fields to append to the request body
pub type SignatureResult = Result<Vec<(String, String)>, ExchangeError>;

/// Signer trait for request authentication
///
/// Implementations turn a nonce into the authentication fields the exchange
/// expects alongside the caller's own parameters.
pub trait Signer: Send + Sync {
    /// Sign a request carrying `nonce`
    ///
    /// The returned fields must embed the same `nonce` that was signed.
    fn sign_request(&self, nonce: u64) -> SignatureResult;
}

/// Lowercase hex HMAC-SHA256 of `message` keyed with `secret`
pub fn hmac_sha256_hex(secret: &str, message: &str) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;

    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
