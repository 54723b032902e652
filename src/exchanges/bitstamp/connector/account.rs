use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::AccountInfo;
use crate::core::types::{Balance, CurrencyPair, Order, Transaction, UserTransactionsQuery};
use crate::exchanges::bitstamp::{conversions, rest::BitstampRest};
use async_trait::async_trait;

/// Bitstamp account implementation
pub struct Account<R: RestClient> {
    rest: BitstampRest<R>,
}

impl<R: RestClient + Clone> Account<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: BitstampRest::new(rest.clone()),
        }
    }
}

#[async_trait]
impl<R: RestClient + Send + Sync> AccountInfo for Account<R> {
    async fn get_balance(&self) -> Result<Balance, ExchangeError> {
        let payload = self.rest.get_balance().await?;
        Ok(conversions::convert_balance(&payload))
    }

    async fn get_open_orders_all(&self) -> Result<Vec<Order>, ExchangeError> {
        let payload = self.rest.get_open_orders_all().await?;
        Ok(conversions::convert_orders(&payload))
    }

    async fn get_open_orders(&self, pair: &CurrencyPair) -> Result<Vec<Order>, ExchangeError> {
        let payload = self.rest.get_open_orders(pair).await?;
        Ok(conversions::convert_orders(&payload))
    }

    async fn get_user_transactions(
        &self,
        pair: &CurrencyPair,
        query: UserTransactionsQuery,
    ) -> Result<Vec<Transaction>, ExchangeError> {
        let payload = self.rest.get_user_transactions(pair, query).await?;
        Ok(conversions::convert_transactions(&payload, pair))
    }
}
