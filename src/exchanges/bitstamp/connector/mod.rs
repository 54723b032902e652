use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer};
use crate::core::types::{
    Balance, CurrencyPair, Order, OrderBook, Tick, Trade, Transaction, TransactionWindow,
    UserTransactionsQuery,
};
use async_trait::async_trait;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// Bitstamp connector that composes all sub-trait implementations
pub struct BitstampConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
}

impl<R: RestClient + Clone> BitstampConnector<R> {
    pub fn new(rest: R) -> Self {
        Self {
            market: MarketData::new(&rest),
            trading: Trading::new(&rest),
            account: Account::new(&rest),
        }
    }
}

#[async_trait]
impl<R: RestClient + Clone> MarketDataSource for BitstampConnector<R> {
    async fn get_ticker(&self, pair: &CurrencyPair) -> Result<Tick, ExchangeError> {
        self.market.get_ticker(pair).await
    }

    async fn get_hourly_ticker(&self, pair: &CurrencyPair) -> Result<Tick, ExchangeError> {
        self.market.get_hourly_ticker(pair).await
    }

    async fn get_order_book(&self, pair: &CurrencyPair) -> Result<OrderBook, ExchangeError> {
        self.market.get_order_book(pair).await
    }

    async fn get_transactions(
        &self,
        pair: &CurrencyPair,
        window: TransactionWindow,
    ) -> Result<Vec<Trade>, ExchangeError> {
        self.market.get_transactions(pair, window).await
    }
}

#[async_trait]
impl<R: RestClient + Clone> OrderPlacer for BitstampConnector<R> {
    async fn buy_limit_order(
        &self,
        pair: &CurrencyPair,
        amount: f64,
        price: f64,
        limit_price: f64,
    ) -> Result<Order, ExchangeError> {
        self.trading
            .buy_limit_order(pair, amount, price, limit_price)
            .await
    }

    async fn sell_limit_order(
        &self,
        pair: &CurrencyPair,
        amount: f64,
        price: f64,
        limit_price: f64,
    ) -> Result<Order, ExchangeError> {
        self.trading
            .sell_limit_order(pair, amount, price, limit_price)
            .await
    }

    async fn buy_market_order(
        &self,
        pair: &CurrencyPair,
        amount: f64,
    ) -> Result<Order, ExchangeError> {
        self.trading.buy_market_order(pair, amount).await
    }

    async fn sell_market_order(
        &self,
        pair: &CurrencyPair,
        amount: f64,
    ) -> Result<Order, ExchangeError> {
        self.trading.sell_market_order(pair, amount).await
    }

    async fn cancel_order(&self, id: i64) -> Result<Order, ExchangeError> {
        self.trading.cancel_order(id).await
    }
}

#[async_trait]
impl<R: RestClient + Clone> AccountInfo for BitstampConnector<R> {
    async fn get_balance(&self) -> Result<Balance, ExchangeError> {
        self.account.get_balance().await
    }

    async fn get_open_orders_all(&self) -> Result<Vec<Order>, ExchangeError> {
        self.account.get_open_orders_all().await
    }

    async fn get_open_orders(&self, pair: &CurrencyPair) -> Result<Vec<Order>, ExchangeError> {
        self.account.get_open_orders(pair).await
    }

    async fn get_user_transactions(
        &self,
        pair: &CurrencyPair,
        query: UserTransactionsQuery,
    ) -> Result<Vec<Transaction>, ExchangeError> {
        self.account.get_user_transactions(pair, query).await
    }
}

impl<R: RestClient + Clone> ExchangeConnector for BitstampConnector<R> {}
