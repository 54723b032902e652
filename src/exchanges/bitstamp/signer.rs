use crate::core::config::Credentials;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{hmac_sha256_hex, SignatureResult, Signer};

/// Bitstamp request signature
///
/// HMAC-SHA256 over `nonce + customer_id + api_key` keyed with the secret,
/// rendered as 64 uppercase hex characters.
pub fn sign(nonce: u64, credentials: &Credentials) -> Result<String, ExchangeError> {
    if credentials.secret_key().is_empty() {
        return Err(ExchangeError::AuthError("API secret is missing".to_string()));
    }

    let message = format!(
        "{}{}{}",
        nonce,
        credentials.customer_id(),
        credentials.api_key()
    );

    Ok(hmac_sha256_hex(credentials.secret_key(), &message)?.to_uppercase())
}

pub struct BitstampSigner {
    credentials: Credentials,
}

impl BitstampSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl Signer for BitstampSigner {
    fn sign_request(&self, nonce: u64) -> SignatureResult {
        if !self.credentials.is_complete() {
            return Err(ExchangeError::AuthError(
                "API key, secret and customer id are all required".to_string(),
            ));
        }

        let signature = sign(nonce, &self.credentials)?;

        Ok(vec![
            ("key".to_string(), self.credentials.api_key().to_string()),
            ("signature".to_string(), signature),
            ("nonce".to_string(), nonce.to_string()),
        ])
    }
}
