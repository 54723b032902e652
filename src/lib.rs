//! # stampx
//!
//! Async client for the Bitstamp v2 REST API.
//!
//! Public market data (ticker, hourly ticker, order book, transactions) works
//! without credentials. Private endpoints (balance, orders, user
//! transactions) are signed with HMAC-SHA256 over a wall-clock nonce, and
//! order amounts and prices are clamped to the precision each endpoint
//! accepts before they are form-encoded.
//!
//! ```rust,no_run
//! use stampx::{build_connector, CurrencyPair, ExchangeConfig, MarketDataSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = build_connector(ExchangeConfig::read_only())?;
//! let tick = connector.get_ticker(&CurrencyPair::new("btcusd")?).await?;
//! println!("last: {}", tick.last);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod exchanges;

pub use crate::core::{
    config::{Credentials, ExchangeConfig},
    errors::{ErrorKind, ExchangeError},
    traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer},
    types::*,
};
pub use exchanges::bitstamp::{build_connector, BitstampBuilder, BitstampConnector};
