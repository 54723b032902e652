use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypesError {
    #[error("Invalid currency pair: {0}")]
    InvalidCurrencyPair(String),
    #[error("Invalid limit: {0}")]
    InvalidLimit(u32),
}

/// Currencies reported by the balance endpoint
pub const BALANCE_CURRENCIES: [&str; 6] = ["btc", "eur", "usd", "xrp", "ltc", "eth"];

/// Pairs whose trading fee is reported by the balance endpoint
pub const FEE_PAIRS: [&str; 12] = [
    "btcusd", "btceur", "eurusd", "xrpusd", "xrpeur", "xrpbtc", "ltcusd", "ltceur", "ltcbtc",
    "ethusd", "etheur", "ethbtc",
];

/// Largest page the user transactions endpoint serves
pub const MAX_USER_TRANSACTIONS_LIMIT: u32 = 1000;

/// Six-character trading pair code such as `btcusd`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair(String);

impl CurrencyPair {
    /// Validate and lowercase a pair code
    pub fn new(code: impl Into<String>) -> Result<Self, TypesError> {
        let code = code.into();
        if code.len() != 6 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TypesError::InvalidCurrencyPair(code));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First three characters
    pub fn base(&self) -> &str {
        &self.0[..3]
    }

    /// Last three characters
    pub fn quote(&self) -> &str {
        &self.0[3..]
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CurrencyPair {
    type Error = TypesError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.0
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Look-back window for the public transactions endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionWindow {
    Minute,
    #[default]
    Hour,
    Day,
}

impl TransactionWindow {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Path segment used by the order endpoints
    pub const fn as_path(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

/// Pagination for the user transactions endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTransactionsQuery {
    pub offset: u32,
    pub limit: u32,
    pub sort: SortDirection,
}

impl Default for UserTransactionsQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 100,
            sort: SortDirection::Desc,
        }
    }
}

impl UserTransactionsQuery {
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.limit > MAX_USER_TRANSACTIONS_LIMIT {
            return Err(TypesError::InvalidLimit(self.limit));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub high: f64,
    pub last: f64,
    pub timestamp: Option<i64>,
    pub bid: f64,
    pub vwap: f64,
    pub volume: f64,
    pub low: f64,
    pub ask: f64,
    pub open: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyBalance {
    pub balance: f64,
    pub reserved: f64,
    pub available: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Balance {
    /// Keyed by lowercase currency code, one entry per `BALANCE_CURRENCIES`
    pub currencies: BTreeMap<String, CurrencyBalance>,
    /// Fee percentage keyed by pair code, one entry per `FEE_PAIRS`
    pub fees: BTreeMap<String, f64>,
}

impl Balance {
    pub fn currency(&self, code: &str) -> Option<&CurrencyBalance> {
        self.currencies.get(code)
    }

    pub fn fee(&self, pair: &str) -> Option<f64> {
        self.fees.get(pair).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<i64>,
    /// Exchange-formatted timestamp, passed through verbatim
    pub datetime: String,
    /// Order type as the exchange reported it; numeric codes such as `0`
    /// are rendered to their string form `"0"`
    pub kind: String,
    pub price: f64,
    pub amount: f64,
    pub currency_pair: Option<String>,
}

/// The two currency legs of a user transaction and their implied rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionLegs {
    pub base: String,
    pub quote: String,
    pub base_amount: f64,
    pub quote_amount: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub datetime: String,
    pub id: Option<i64>,
    pub kind: String,
    pub fee: Option<f64>,
    pub order_id: Option<i64>,
    pub legs: TransactionLegs,
}

/// Public trade from the transactions endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub date: Option<i64>,
    pub tid: Option<i64>,
    pub price: f64,
    pub amount: f64,
    pub kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    pub price: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub timestamp: Option<i64>,
    pub bids: Vec<OrderBookLevel>,
    pub asks: Vec<OrderBookLevel>,
}
