use stampx::{
    build_connector, AccountInfo, CurrencyPair, ExchangeConfig, MarketDataSource,
    TransactionWindow,
};
use std::env;
use std::time::Duration;
use tokio::time::timeout;

/// Check if live API tests should run (network access, optionally real credentials)
fn should_run_live_tests() -> bool {
    env::var("RUN_LIVE_TESTS").unwrap_or_default() == "true"
}

fn test_timeout() -> Duration {
    Duration::from_secs(
        env::var("TEST_TIMEOUT_SECONDS")
            .unwrap_or_default()
            .parse()
            .unwrap_or(30),
    )
}

#[cfg(test)]
mod live_tests {
    use super::*;

    #[tokio::test]
    async fn test_live_ticker() {
        if !should_run_live_tests() {
            println!("skipping: RUN_LIVE_TESTS is not set");
            return;
        }

        let connector = build_connector(ExchangeConfig::read_only()).unwrap();
        let pair = CurrencyPair::new("btcusd").unwrap();

        match timeout(test_timeout(), connector.get_ticker(&pair)).await {
            Ok(Ok(tick)) => {
                assert!(tick.last > 0.0);
                assert!(tick.timestamp.is_some());
            }
            Ok(Err(e)) => println!("ticker failed: {}", e),
            Err(_) => println!("ticker timed out"),
        }
    }

    #[tokio::test]
    async fn test_live_transactions() {
        if !should_run_live_tests() {
            return;
        }

        let connector = build_connector(ExchangeConfig::read_only()).unwrap();
        let pair = CurrencyPair::new("btcusd").unwrap();

        match timeout(
            test_timeout(),
            connector.get_transactions(&pair, TransactionWindow::Hour),
        )
        .await
        {
            Ok(Ok(trades)) => println!("fetched {} trades", trades.len()),
            Ok(Err(e)) => println!("transactions failed: {}", e),
            Err(_) => println!("transactions timed out"),
        }
    }

    #[tokio::test]
    async fn test_live_balance() {
        if !should_run_live_tests() {
            return;
        }

        let Ok(config) = ExchangeConfig::from_env("BITSTAMP") else {
            println!("skipping: BITSTAMP credentials not set");
            return;
        };

        let connector = build_connector(config).unwrap();
        match timeout(test_timeout(), connector.get_balance()).await {
            Ok(Ok(balance)) => assert!(!balance.currencies.is_empty()),
            Ok(Err(e)) => println!("balance failed: {} ({:?})", e, e.kind()),
            Err(_) => println!("balance timed out"),
        }
    }
}
