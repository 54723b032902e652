use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::OrderPlacer;
use crate::core::types::{CurrencyPair, Order, OrderSide};
use crate::exchanges::bitstamp::{conversions, rest::BitstampRest};
use async_trait::async_trait;

/// Bitstamp order placement
pub struct Trading<R: RestClient> {
    rest: BitstampRest<R>,
}

impl<R: RestClient + Clone> Trading<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: BitstampRest::new(rest.clone()),
        }
    }
}

#[async_trait]
impl<R: RestClient + Send + Sync> OrderPlacer for Trading<R> {
    async fn buy_limit_order(
        &self,
        pair: &CurrencyPair,
        amount: f64,
        price: f64,
        limit_price: f64,
    ) -> Result<Order, ExchangeError> {
        let payload = self
            .rest
            .place_limit_order(OrderSide::Buy, pair, amount, price, limit_price)
            .await?;
        Ok(conversions::convert_order(&payload))
    }

    async fn sell_limit_order(
        &self,
        pair: &CurrencyPair,
        amount: f64,
        price: f64,
        limit_price: f64,
    ) -> Result<Order, ExchangeError> {
        let payload = self
            .rest
            .place_limit_order(OrderSide::Sell, pair, amount, price, limit_price)
            .await?;
        Ok(conversions::convert_order(&payload))
    }

    async fn buy_market_order(
        &self,
        pair: &CurrencyPair,
        amount: f64,
    ) -> Result<Order, ExchangeError> {
        let payload = self
            .rest
            .place_market_order(OrderSide::Buy, pair, amount)
            .await?;
        Ok(conversions::convert_order(&payload))
    }

    async fn sell_market_order(
        &self,
        pair: &CurrencyPair,
        amount: f64,
    ) -> Result<Order, ExchangeError> {
        let payload = self
            .rest
            .place_market_order(OrderSide::Sell, pair, amount)
            .await?;
        Ok(conversions::convert_order(&payload))
    }

    async fn cancel_order(&self, id: i64) -> Result<Order, ExchangeError> {
        let payload = self.rest.cancel_order(id).await?;
        Ok(conversions::convert_order(&payload))
    }
}
