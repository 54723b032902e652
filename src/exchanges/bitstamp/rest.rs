use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::precision::{clamp, Precision};
use crate::core::types::{CurrencyPair, OrderSide, TransactionWindow, UserTransactionsQuery};
use serde_json::Value;
use tracing::instrument;

/// Wire precision of each order field for one endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPrecision {
    pub amount: Precision,
    pub price: Precision,
    pub limit_price: Precision,
}

// The sell path takes its limit price at five decimals, unlike the buy path.
pub const BUY_LIMIT_PRECISION: OrderPrecision = OrderPrecision {
    amount: Precision::Eight,
    price: Precision::Eight,
    limit_price: Precision::Eight,
};

pub const SELL_LIMIT_PRECISION: OrderPrecision = OrderPrecision {
    amount: Precision::Eight,
    price: Precision::Eight,
    limit_price: Precision::Five,
};

pub const MARKET_AMOUNT_PRECISION: Precision = Precision::Eight;

impl OrderSide {
    pub const fn limit_precision(self) -> OrderPrecision {
        match self {
            Self::Buy => BUY_LIMIT_PRECISION,
            Self::Sell => SELL_LIMIT_PRECISION,
        }
    }
}

/// Reject non-positive or non-finite order quantities
fn ensure_positive(name: &str, value: f64) -> Result<(), ExchangeError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ExchangeError::InvalidParameters(format!(
            "{} must be a positive number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Local sanity check of a limit order before anything is signed
///
/// A buy needs `limit_price > price`, a sell needs `limit_price < price`.
/// Both rules hold for the raw inputs and for the clamped values that go
/// on the wire.
pub fn validate_limit_order(
    side: OrderSide,
    amount: f64,
    price: f64,
    limit_price: f64,
) -> Result<(), ExchangeError> {
    check_limit_order(side, amount, price, limit_price)?;

    let precision = side.limit_precision();
    check_limit_order(
        side,
        clamp(amount, precision.amount).as_f64(),
        clamp(price, precision.price).as_f64(),
        clamp(limit_price, precision.limit_price).as_f64(),
    )
}

fn check_limit_order(
    side: OrderSide,
    amount: f64,
    price: f64,
    limit_price: f64,
) -> Result<(), ExchangeError> {
    ensure_positive("amount", amount)?;
    ensure_positive("price", price)?;
    ensure_positive("limit_price", limit_price)?;

    match side {
        OrderSide::Buy if limit_price <= price => Err(ExchangeError::InvalidParameters(format!(
            "buy limit_price {} must be greater than price {}",
            limit_price, price
        ))),
        OrderSide::Sell if limit_price >= price => {
            Err(ExchangeError::InvalidParameters(format!(
                "sell limit_price {} must be less than price {}",
                limit_price, price
            )))
        }
        _ => Ok(()),
    }
}

/// Form parameters for a limit order, clamped to the side's precision
pub fn limit_order_params(
    side: OrderSide,
    amount: f64,
    price: f64,
    limit_price: f64,
) -> Vec<(&'static str, String)> {
    let precision = side.limit_precision();
    vec![
        ("amount", clamp(amount, precision.amount).to_string()),
        ("price", clamp(price, precision.price).to_string()),
        (
            "limit_price",
            clamp(limit_price, precision.limit_price).to_string(),
        ),
    ]
}

/// Thin endpoint wrapper around `RestClient` for the Bitstamp v2 API
///
/// Returns the success payload untouched; coercion happens in the connector.
#[derive(Debug, Clone)]
pub struct BitstampRest<R: RestClient> {
    client: R,
}

impl<R: RestClient> BitstampRest<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    pub async fn get_ticker(&self, pair: &CurrencyPair) -> Result<Value, ExchangeError> {
        self.client
            .call_public(&format!("ticker/{}/", pair))
            .await
    }

    pub async fn get_hourly_ticker(&self, pair: &CurrencyPair) -> Result<Value, ExchangeError> {
        self.client
            .call_public(&format!("ticker_hour/{}/", pair))
            .await
    }

    pub async fn get_order_book(&self, pair: &CurrencyPair) -> Result<Value, ExchangeError> {
        self.client
            .call_public(&format!("order_book/{}/", pair))
            .await
    }

    pub async fn get_transactions(
        &self,
        pair: &CurrencyPair,
        window: TransactionWindow,
    ) -> Result<Value, ExchangeError> {
        self.client
            .call_public(&format!("transactions/{}/?time={}", pair, window.as_str()))
            .await
    }

    pub async fn get_balance(&self) -> Result<Value, ExchangeError> {
        self.client.call_private("balance/", &[]).await
    }

    pub async fn get_open_orders_all(&self) -> Result<Value, ExchangeError> {
        self.client.call_private("open_orders/all/", &[]).await
    }

    pub async fn get_open_orders(&self, pair: &CurrencyPair) -> Result<Value, ExchangeError> {
        self.client
            .call_private(&format!("open_orders/{}/", pair), &[])
            .await
    }

    /// Place a limit order with its mandatory limit price
    #[instrument(skip(self, pair), fields(pair = %pair))]
    pub async fn place_limit_order(
        &self,
        side: OrderSide,
        pair: &CurrencyPair,
        amount: f64,
        price: f64,
        limit_price: f64,
    ) -> Result<Value, ExchangeError> {
        validate_limit_order(side, amount, price, limit_price)?;

        let params = limit_order_params(side, amount, price, limit_price);
        self.client
            .call_private(&format!("{}/{}/", side.as_path(), pair), &params)
            .await
    }

    #[instrument(skip(self, pair), fields(pair = %pair))]
    pub async fn place_market_order(
        &self,
        side: OrderSide,
        pair: &CurrencyPair,
        amount: f64,
    ) -> Result<Value, ExchangeError> {
        ensure_positive("amount", amount)?;
        let amount = clamp(amount, MARKET_AMOUNT_PRECISION);
        ensure_positive("amount", amount.as_f64())?;

        let params = [("amount", amount.to_string())];
        self.client
            .call_private(&format!("{}/market/{}/", side.as_path(), pair), &params)
            .await
    }

    pub async fn cancel_order(&self, id: i64) -> Result<Value, ExchangeError> {
        let params = [("id", id.to_string())];
        self.client.call_private("cancel_order/", &params).await
    }

    pub async fn get_user_transactions(
        &self,
        pair: &CurrencyPair,
        query: UserTransactionsQuery,
    ) -> Result<Value, ExchangeError> {
        query.validate()?;

        let params = [
            ("offset", query.offset.to_string()),
            ("limit", query.limit.to_string()),
            ("sort", query.sort.as_str().to_string()),
        ];
        self.client
            .call_private(&format!("user_transactions/{}/", pair), &params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;

    #[test]
    fn test_buy_limit_validation() {
        let err = validate_limit_order(OrderSide::Buy, 1.0, 100.0, 99.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(validate_limit_order(OrderSide::Buy, 1.0, 100.0, 100.0).is_err());
        assert!(validate_limit_order(OrderSide::Buy, 1.0, 100.0, 101.0).is_ok());
    }

    #[test]
    fn test_sell_limit_validation() {
        assert!(validate_limit_order(OrderSide::Sell, 1.0, 100.0, 101.0).is_err());
        assert!(validate_limit_order(OrderSide::Sell, 1.0, 100.0, 100.0).is_err());
        assert!(validate_limit_order(OrderSide::Sell, 1.0, 100.0, 99.0).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        assert!(validate_limit_order(OrderSide::Buy, 0.0, 100.0, 101.0).is_err());
        assert!(validate_limit_order(OrderSide::Buy, f64::NAN, 100.0, 101.0).is_err());
    }

    #[test]
    fn test_validation_uses_clamped_values() {
        // limit_price rounds up to 100.00001 at five decimals, above the price
        assert!(validate_limit_order(OrderSide::Sell, 1.0, 100.000006, 100.0000055).is_err());
        assert_eq!(
            limit_order_params(OrderSide::Sell, 1.0, 100.000006, 100.0000055)[2],
            ("limit_price", "100.00001".to_string())
        );

        // limit_price rounds down to the price at eight decimals
        assert!(validate_limit_order(OrderSide::Buy, 1.0, 100.0, 100.000000001).is_err());

        let err = validate_limit_order(OrderSide::Sell, 1.0, 100.0, 1e-7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(validate_limit_order(OrderSide::Buy, 1e-9, 100.0, 101.0).is_err());
    }

    #[test]
    fn test_limit_price_precision_differs_by_side() {
        let buy = limit_order_params(OrderSide::Buy, 0.123_456_789, 100.0, 101.123_456_789);
        assert_eq!(buy[0], ("amount", "0.12345679".to_string()));
        assert_eq!(buy[1], ("price", "100".to_string()));
        assert_eq!(buy[2], ("limit_price", "101.12345679".to_string()));

        let sell = limit_order_params(OrderSide::Sell, 0.5, 100.0, 99.123_456_789);
        assert_eq!(sell[0], ("amount", "0.5".to_string()));
        assert_eq!(sell[2], ("limit_price", "99.12346".to_string()));
    }
}
