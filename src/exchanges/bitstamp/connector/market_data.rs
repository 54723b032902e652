use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::MarketDataSource;
use crate::core::types::{CurrencyPair, OrderBook, Tick, Trade, TransactionWindow};
use crate::exchanges::bitstamp::{conversions, rest::BitstampRest};
use async_trait::async_trait;

/// Public market data, usable without credentials
pub struct MarketData<R: RestClient> {
    rest: BitstampRest<R>,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: BitstampRest::new(rest.clone()),
        }
    }
}

#[async_trait]
impl<R: RestClient + Send + Sync> MarketDataSource for MarketData<R> {
    async fn get_ticker(&self, pair: &CurrencyPair) -> Result<Tick, ExchangeError> {
        let payload = self.rest.get_ticker(pair).await?;
        Ok(conversions::convert_tick(&payload))
    }

    async fn get_hourly_ticker(&self, pair: &CurrencyPair) -> Result<Tick, ExchangeError> {
        let payload = self.rest.get_hourly_ticker(pair).await?;
        Ok(conversions::convert_tick(&payload))
    }

    async fn get_order_book(&self, pair: &CurrencyPair) -> Result<OrderBook, ExchangeError> {
        let payload = self.rest.get_order_book(pair).await?;
        Ok(conversions::convert_order_book(&payload))
    }

    async fn get_transactions(
        &self,
        pair: &CurrencyPair,
        window: TransactionWindow,
    ) -> Result<Vec<Trade>, ExchangeError> {
        let payload = self.rest.get_transactions(pair, window).await?;
        Ok(conversions::convert_trades(&payload))
    }
}
