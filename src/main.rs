use stampx::core::config::ExchangeConfig;
use stampx::core::traits::{AccountInfo, MarketDataSource};
use stampx::{build_connector, CurrencyPair, TransactionWindow};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Private endpoints need BITSTAMP_API_KEY, BITSTAMP_SECRET_KEY and BITSTAMP_CUSTOMER_ID
    let config = ExchangeConfig::from_env("BITSTAMP").unwrap_or_else(|_| ExchangeConfig::read_only());
    let authenticated = config.has_credentials();
    let bitstamp = build_connector(config)?;

    let pair = CurrencyPair::new("btcusd")?;

    let tick = bitstamp.get_ticker(&pair).await?;
    println!(
        "{} last={} bid={} ask={} volume={}",
        pair, tick.last, tick.bid, tick.ask, tick.volume
    );

    let trades = bitstamp
        .get_transactions(&pair, TransactionWindow::Minute)
        .await?;
    println!("{} trades in the last minute", trades.len());

    if authenticated {
        match bitstamp.get_balance().await {
            Ok(balance) => {
                for (currency, amounts) in &balance.currencies {
                    println!(
                        "{}: balance={} available={}",
                        currency, amounts.balance, amounts.available
                    );
                }
            }
            Err(e) => {
                println!("Error fetching balance: {} ({:?})", e, e.kind());
            }
        }
    }

    Ok(())
}
