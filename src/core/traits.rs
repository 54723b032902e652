use crate::core::{
    errors::ExchangeError,
    types::{
        Balance, CurrencyPair, Order, OrderBook, Tick, Trade, Transaction, TransactionWindow,
        UserTransactionsQuery,
    },
};
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataSource {
    /// Last 24 hours ticker
    async fn get_ticker(&self, pair: &CurrencyPair) -> Result<Tick, ExchangeError>;

    /// Last hour ticker
    async fn get_hourly_ticker(&self, pair: &CurrencyPair) -> Result<Tick, ExchangeError>;

    async fn get_order_book(&self, pair: &CurrencyPair) -> Result<OrderBook, ExchangeError>;

    /// Public trades within `window`
    async fn get_transactions(
        &self,
        pair: &CurrencyPair,
        window: TransactionWindow,
    ) -> Result<Vec<Trade>, ExchangeError>;
}

#[async_trait]
pub trait OrderPlacer {
    /// Limit buy; `limit_price` must be above `price`
    async fn buy_limit_order(
        &self,
        pair: &CurrencyPair,
        amount: f64,
        price: f64,
        limit_price: f64,
    ) -> Result<Order, ExchangeError>;

    /// Limit sell; `limit_price` must be below `price`
    async fn sell_limit_order(
        &self,
        pair: &CurrencyPair,
        amount: f64,
        price: f64,
        limit_price: f64,
    ) -> Result<Order, ExchangeError>;

    async fn buy_market_order(
        &self,
        pair: &CurrencyPair,
        amount: f64,
    ) -> Result<Order, ExchangeError>;

    async fn sell_market_order(
        &self,
        pair: &CurrencyPair,
        amount: f64,
    ) -> Result<Order, ExchangeError>;

    async fn cancel_order(&self, id: i64) -> Result<Order, ExchangeError>;
}

#[async_trait]
pub trait AccountInfo {
    async fn get_balance(&self) -> Result<Balance, ExchangeError>;

    /// Open orders across every pair
    async fn get_open_orders_all(&self) -> Result<Vec<Order>, ExchangeError>;

    async fn get_open_orders(&self, pair: &CurrencyPair) -> Result<Vec<Order>, ExchangeError>;

    async fn get_user_transactions(
        &self,
        pair: &CurrencyPair,
        query: UserTransactionsQuery,
    ) -> Result<Vec<Transaction>, ExchangeError>;
}

// Composite trait for callers that need the whole surface
#[async_trait]
pub trait ExchangeConnector: MarketDataSource + OrderPlacer + AccountInfo {}
