//! Coercion of Bitstamp payloads into typed views.
//!
//! Numeric fields arrive as strings. A missing or unparsable float becomes
//! `NaN` and a missing or unparsable integer becomes `None`; nothing here fails.

use crate::core::types::{
    Balance, CurrencyBalance, CurrencyPair, Order, OrderBook, OrderBookLevel, Tick, Trade,
    Transaction, TransactionLegs, BALANCE_CURRENCIES, FEE_PAIRS,
};
use serde_json::Value;

fn value_to_f64(value: &Value) -> f64 {
    match value {
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

fn field_f64(payload: &Value, key: &str) -> f64 {
    payload.get(key).map_or(f64::NAN, value_to_f64)
}

fn field_i64(payload: &Value, key: &str) -> Option<i64> {
    payload.get(key).and_then(value_to_i64)
}

/// Float only when the exchange sent the field at all
fn optional_f64(payload: &Value, key: &str) -> Option<f64> {
    match payload.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value_to_f64(value)),
    }
}

fn field_string(payload: &Value, key: &str) -> String {
    match payload.get(key) {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    }
}

fn as_list(payload: &Value) -> &[Value] {
    payload.as_array().map_or(&[][..], Vec::as_slice)
}

/// Convert a ticker payload
pub fn convert_tick(payload: &Value) -> Tick {
    Tick {
        high: field_f64(payload, "high"),
        last: field_f64(payload, "last"),
        timestamp: field_i64(payload, "timestamp"),
        bid: field_f64(payload, "bid"),
        vwap: field_f64(payload, "vwap"),
        volume: field_f64(payload, "volume"),
        low: field_f64(payload, "low"),
        ask: field_f64(payload, "ask"),
        open: field_f64(payload, "open"),
    }
}

/// Convert a balance payload over the fixed currency and fee-pair sets
pub fn convert_balance(payload: &Value) -> Balance {
    let currencies = BALANCE_CURRENCIES
        .iter()
        .map(|code| {
            (
                (*code).to_string(),
                CurrencyBalance {
                    balance: field_f64(payload, &format!("{}_balance", code)),
                    reserved: field_f64(payload, &format!("{}_reserved", code)),
                    available: field_f64(payload, &format!("{}_available", code)),
                },
            )
        })
        .collect();

    let fees = FEE_PAIRS
        .iter()
        .map(|pair| {
            (
                (*pair).to_string(),
                field_f64(payload, &format!("{}_fee", pair)),
            )
        })
        .collect();

    Balance { currencies, fees }
}

/// Convert a single order (placement, cancellation or open-order entry)
pub fn convert_order(payload: &Value) -> Order {
    Order {
        id: field_i64(payload, "id"),
        datetime: field_string(payload, "datetime"),
        kind: field_string(payload, "type"),
        price: field_f64(payload, "price"),
        amount: field_f64(payload, "amount"),
        currency_pair: payload
            .get("currency_pair")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

pub fn convert_orders(payload: &Value) -> Vec<Order> {
    as_list(payload).iter().map(convert_order).collect()
}

/// Convert one user transaction, deriving the currency legs from `pair`
pub fn convert_transaction(payload: &Value, pair: &CurrencyPair) -> Transaction {
    let base = pair.base();
    let quote = pair.quote();

    Transaction {
        datetime: field_string(payload, "datetime"),
        id: field_i64(payload, "id"),
        kind: field_string(payload, "type"),
        fee: optional_f64(payload, "fee"),
        order_id: field_i64(payload, "order_id"),
        legs: TransactionLegs {
            base: base.to_string(),
            quote: quote.to_string(),
            base_amount: field_f64(payload, base),
            quote_amount: field_f64(payload, quote),
            rate: field_f64(payload, &format!("{}_{}", base, quote)),
        },
    }
}

pub fn convert_transactions(payload: &Value, pair: &CurrencyPair) -> Vec<Transaction> {
    as_list(payload)
        .iter()
        .map(|entry| convert_transaction(entry, pair))
        .collect()
}

/// Convert one public trade
pub fn convert_trade(payload: &Value) -> Trade {
    Trade {
        date: field_i64(payload, "date"),
        tid: field_i64(payload, "tid"),
        price: field_f64(payload, "price"),
        amount: field_f64(payload, "amount"),
        kind: field_string(payload, "type"),
    }
}

pub fn convert_trades(payload: &Value) -> Vec<Trade> {
    as_list(payload).iter().map(convert_trade).collect()
}

fn convert_levels(levels: Option<&Value>) -> Vec<OrderBookLevel> {
    levels
        .map(as_list)
        .unwrap_or_default()
        .iter()
        .map(|level| OrderBookLevel {
            price: level.get(0).map_or(f64::NAN, value_to_f64),
            amount: level.get(1).map_or(f64::NAN, value_to_f64),
        })
        .collect()
}

/// Convert an order book snapshot, levels kept in exchange order
pub fn convert_order_book(payload: &Value) -> OrderBook {
    OrderBook {
        timestamp: field_i64(payload, "timestamp"),
        bids: convert_levels(payload.get("bids")),
        asks: convert_levels(payload.get("asks")),
    }
}
