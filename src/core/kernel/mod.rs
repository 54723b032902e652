/// `stampx` kernel - transport, signing and response normalization
///
/// The kernel contains no endpoint knowledge. It turns a path (and, for private
/// calls, a parameter list) into a classified JSON payload.
///
/// # Components
///
/// ## Transport Layer
/// - `Transport`: GET/POST collaborator returning status and body
/// - `ReqwestTransport`: default implementation on reqwest
/// - `RestClient` / `ExchangeRest`: public and private calling conventions
///
/// ## Authentication
/// - `NonceSource`: wall-clock derived nonces
/// - `Signer`: turns a nonce into authentication form fields
///
/// ## Response Handling
/// - `envelope::parse`: success payload vs transport or domain error
///
/// # Usage
///
/// ```rust,no_run
/// use stampx::core::kernel::*;
/// use stampx::core::config::ExchangeConfig;
/// use stampx::exchanges::bitstamp::signer::BitstampSigner;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExchangeConfig::from_env("BITSTAMP")?;
/// let rest_config = RestClientConfig::new(
///     "https://www.bitstamp.net".to_string(),
///     "bitstamp".to_string(),
/// );
/// let rest = RestClientBuilder::new(rest_config)
///     .with_signer(Arc::new(BitstampSigner::new(config.credentials.clone())))
///     .build()?;
///
/// let ticker = rest.call_public("ticker/btcusd/").await?;
/// let balance = rest.call_private("balance/", &[]).await?;
/// # let _ = (ticker, balance);
/// # Ok(())
/// # }
/// ```
pub mod envelope;
pub mod nonce;
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use nonce::{generate_nonce, ClockNonce, FixedNonce, NonceSource};
pub use rest::{
    encode_form, ExchangeRest, RawResponse, ReqwestTransport, RestClient, RestClientBuilder,
    RestClientConfig, Transport,
};
pub use signer::{hmac_sha256_hex, SignatureResult, Signer};
