pub mod builder;
pub mod connector;
pub mod conversions;
pub mod rest;
pub mod signer;

// Re-export main components
pub use builder::{build_connector, BitstampBuilder, DEFAULT_BASE_URL};
pub use connector::{Account, BitstampConnector, MarketData, Trading};
pub use rest::{
    validate_limit_order, BitstampRest, OrderPrecision, BUY_LIMIT_PRECISION,
    MARKET_AMOUNT_PRECISION, SELL_LIMIT_PRECISION,
};
pub use signer::{sign, BitstampSigner};
