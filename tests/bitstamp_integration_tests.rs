use async_trait::async_trait;
use stampx::core::kernel::{ExchangeRest, FixedNonce, RawResponse, Transport};
use stampx::{
    AccountInfo, BitstampBuilder, BitstampConnector, CurrencyPair, ErrorKind, ExchangeError,
    MarketDataSource, OrderPlacer, SortDirection, TransactionWindow, UserTransactionsQuery,
};
use stampx::core::kernel::NonceSource;
use stampx::exchanges::bitstamp::sign;
use stampx::Credentials;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

const NONCE: u64 = 1_700_000_000_123;
const SIGNATURE: &str = "8CF6E8B83E94002D773A9847C2E7B14AECF7D4FA2C83295283D938EF34B90670";

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: &'static str,
    url: String,
    headers: Vec<(&'static str, String)>,
    body: String,
}

impl RecordedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// In-memory transport that replays queued responses and records requests
#[derive(Clone, Default)]
struct RecordingTransport {
    responses: Arc<Mutex<VecDeque<Result<RawResponse, String>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl RecordingTransport {
    fn respond(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(RawResponse {
            status,
            body: body.as_bytes().to_vec(),
        }));
    }

    fn fail(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<RawResponse, ExchangeError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(RawResponse {
                    status: 200,
                    body: b"{}".to_vec(),
                })
            })
            .map_err(ExchangeError::NetworkError)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, ExchangeError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            headers: Vec::new(),
            body: String::new(),
        });
        self.next_response()
    }

    async fn post(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: Vec<u8>,
    ) -> Result<RawResponse, ExchangeError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            headers: headers.to_vec(),
            body: String::from_utf8(body).unwrap(),
        });
        self.next_response()
    }
}

fn authenticated() -> (BitstampConnector<ExchangeRest<RecordingTransport>>, RecordingTransport) {
    let transport = RecordingTransport::default();
    let connector = BitstampBuilder::new()
        .with_base_url("http://mock.local".to_string())
        .with_credentials(
            "test_key".to_string(),
            "test_secret".to_string(),
            "987654".to_string(),
        )
        .with_nonce_source(Arc::new(FixedNonce(NONCE)))
        .build_with_transport(transport.clone());
    (connector, transport)
}

fn anonymous() -> (BitstampConnector<ExchangeRest<RecordingTransport>>, RecordingTransport) {
    let transport = RecordingTransport::default();
    let connector = BitstampBuilder::new()
        .with_base_url("http://mock.local".to_string())
        .build_with_transport(transport.clone());
    (connector, transport)
}

/// Nonce source that hands out increasing values and counts how often it is read
#[derive(Debug)]
struct CountingNonce {
    start: u64,
    calls: AtomicU64,
}

impl CountingNonce {
    fn new(start: u64) -> Self {
        Self {
            start,
            calls: AtomicU64::new(0),
        }
    }

    fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NonceSource for CountingNonce {
    fn next_nonce(&self) -> u64 {
        self.start + self.calls.fetch_add(1, Ordering::SeqCst)
    }
}

fn form_field<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    body.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then_some(value)
    })
}

fn btcusd() -> CurrencyPair {
    CurrencyPair::new("btcusd").unwrap()
}

fn auth_suffix() -> String {
    format!("key=test_key&signature={}&nonce={}", SIGNATURE, NONCE)
}

#[tokio::test]
async fn test_public_ticker() {
    let (connector, transport) = anonymous();
    transport.respond(
        200,
        r#"{"high":"9001.5","last":"9000","timestamp":"1600000000","bid":"8999","ask":"9002","vwap":"9000.1","volume":"10.5","low":"8500","open":"8600"}"#,
    );

    let tick = connector.get_ticker(&btcusd()).await.unwrap();
    assert_eq!(tick.high, 9001.5);
    assert_eq!(tick.timestamp, Some(1_600_000_000));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, "http://mock.local/api/v2/ticker/btcusd/");
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_public_endpoints_paths() {
    let (connector, transport) = anonymous();
    transport.respond(200, r#"{"timestamp":"1","bids":[["1","2"]],"asks":[]}"#);
    transport.respond(200, r#"{"last":"1"}"#);
    transport.respond(200, r#"[{"date":"1","tid":"2","price":"3","amount":"4","type":"0"}]"#);

    let book = connector.get_order_book(&btcusd()).await.unwrap();
    assert_eq!(book.bids.len(), 1);
    connector.get_hourly_ticker(&btcusd()).await.unwrap();
    let trades = connector
        .get_transactions(&btcusd(), TransactionWindow::Day)
        .await
        .unwrap();
    assert_eq!(trades[0].tid, Some(2));

    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            "http://mock.local/api/v2/order_book/btcusd/",
            "http://mock.local/api/v2/ticker_hour/btcusd/",
            "http://mock.local/api/v2/transactions/btcusd/?time=day",
        ]
    );
}

#[tokio::test]
async fn test_private_request_is_signed_and_form_encoded() {
    let (connector, transport) = authenticated();
    transport.respond(200, r#"{"btc_balance":"1.5","btcusd_fee":"0.25"}"#);

    let balance = connector.get_balance().await.unwrap();
    assert_eq!(balance.currency("btc").unwrap().balance, 1.5);
    assert_eq!(balance.fee("btcusd"), Some(0.25));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "http://mock.local/api/v2/balance/");
    assert_eq!(request.body, auth_suffix());
    assert_eq!(
        request.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.header("Content-Length"), Some("107"));
    assert_eq!(request.header("Accept"), Some("application/json"));
}

#[tokio::test]
async fn test_buy_limit_order_validation_happens_before_io() {
    let (connector, transport) = authenticated();

    let err = connector
        .buy_limit_order(&btcusd(), 1.0, 100.0, 99.0)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(transport.requests().is_empty());

    transport.respond(
        200,
        r#"{"id":"42","datetime":"2020-09-13 12:26:40","type":"0","price":"100","amount":"1"}"#,
    );
    let order = connector
        .buy_limit_order(&btcusd(), 1.0, 100.0, 101.0)
        .await
        .unwrap();
    assert_eq!(order.id, Some(42));
    assert_eq!(order.kind, "0");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://mock.local/api/v2/buy/btcusd/");
    assert_eq!(
        requests[0].body,
        format!("amount=1&price=100&limit_price=101&{}", auth_suffix())
    );
}

#[tokio::test]
async fn test_sell_limit_order_clamps_limit_price_to_five_decimals() {
    let (connector, transport) = authenticated();

    let err = connector
        .sell_limit_order(&btcusd(), 1.0, 100.0, 101.0)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    connector
        .sell_limit_order(&btcusd(), 0.123_456_789, 100.123_456_789, 99.123_456_789)
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://mock.local/api/v2/sell/btcusd/");
    assert!(requests[0]
        .body
        .starts_with("amount=0.12345679&price=100.12345679&limit_price=99.12346&"));
}

#[tokio::test]
async fn test_limit_order_rejected_when_clamping_crosses_price() {
    let (connector, transport) = authenticated();

    // 100.0000055 goes out as 100.00001 at five decimals, above the price
    let err = connector
        .sell_limit_order(&btcusd(), 1.0, 100.000006, 100.0000055)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = connector
        .sell_limit_order(&btcusd(), 1.0, 100.0, 1e-7)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = connector.buy_market_order(&btcusd(), 1e-9).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_nonce_read_once_per_private_call() {
    let transport = RecordingTransport::default();
    let nonces = Arc::new(CountingNonce::new(NONCE));
    let connector = BitstampBuilder::new()
        .with_base_url("http://mock.local".to_string())
        .with_credentials(
            "test_key".to_string(),
            "test_secret".to_string(),
            "987654".to_string(),
        )
        .with_nonce_source(nonces.clone())
        .build_with_transport(transport.clone());
    let credentials = Credentials::new(
        "test_key".to_string(),
        "test_secret".to_string(),
        "987654".to_string(),
    );

    connector.get_balance().await.unwrap();
    assert_eq!(nonces.calls(), 1);

    connector.get_open_orders_all().await.unwrap();
    assert_eq!(nonces.calls(), 2);

    // public calls never touch the nonce source
    connector.get_ticker(&btcusd()).await.unwrap();
    assert_eq!(nonces.calls(), 2);

    let requests = transport.requests();
    for (offset, request) in requests.iter().take(2).enumerate() {
        let expected = NONCE + offset as u64;
        let nonce: u64 = form_field(&request.body, "nonce").unwrap().parse().unwrap();
        assert_eq!(nonce, expected);
        assert_eq!(
            form_field(&request.body, "signature"),
            Some(sign(nonce, &credentials).unwrap().as_str())
        );
    }
    assert_eq!(
        form_field(&requests[0].body, "signature"),
        Some(SIGNATURE)
    );
}

#[tokio::test]
async fn test_market_orders_and_cancel() {
    let (connector, transport) = authenticated();

    connector.buy_market_order(&btcusd(), 0.5).await.unwrap();
    connector
        .sell_market_order(&btcusd(), 0.123_456_789)
        .await
        .unwrap();
    transport.respond(200, r#"{"id":7,"amount":"0.5","price":"100","type":0}"#);
    let cancelled = connector.cancel_order(7).await.unwrap();
    assert_eq!(cancelled.id, Some(7));
    assert_eq!(cancelled.kind, "0");
    assert_eq!(cancelled.datetime, "");

    let requests = transport.requests();
    assert_eq!(requests[0].url, "http://mock.local/api/v2/buy/market/btcusd/");
    assert!(requests[0].body.starts_with("amount=0.5&key=test_key"));
    assert_eq!(requests[1].url, "http://mock.local/api/v2/sell/market/btcusd/");
    assert!(requests[1].body.starts_with("amount=0.12345679&"));
    assert_eq!(requests[2].url, "http://mock.local/api/v2/cancel_order/");
    assert!(requests[2].body.starts_with("id=7&"));
}

#[tokio::test]
async fn test_domain_error_is_surfaced_verbatim() {
    let (connector, transport) = authenticated();
    transport.respond(
        200,
        r#"{"status":"error","reason":"Invalid nonce","code":"API0017"}"#,
    );

    let err = connector.get_balance().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(err.code(), Some("API0017"));
    match err {
        ExchangeError::ApiError { reason, .. } => assert_eq!(reason, "Invalid nonce"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_non_200_is_transport_error() {
    let (connector, transport) = anonymous();
    transport.respond(503, r#"{"high":"1"}"#);

    let err = connector.get_ticker(&btcusd()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let (connector, transport) = authenticated();
    transport.fail("connection reset");

    let err = connector.get_open_orders_all().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_missing_credentials_fail_fast_for_private_calls_only() {
    let (connector, transport) = anonymous();

    let err = connector.get_balance().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Credential);
    let err = connector.buy_market_order(&btcusd(), 1.0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Credential);
    assert!(transport.requests().is_empty());

    transport.respond(200, r#"{"last":"1"}"#);
    assert!(connector.get_ticker(&btcusd()).await.is_ok());
}

#[tokio::test]
async fn test_open_orders_for_pair() {
    let (connector, transport) = authenticated();
    transport.respond(
        200,
        r#"[{"id":"1","datetime":"d","type":"1","price":"9000","amount":"0.1"}]"#,
    );

    let orders = connector.get_open_orders(&btcusd()).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].price, 9000.0);
    assert_eq!(
        transport.requests()[0].url,
        "http://mock.local/api/v2/open_orders/btcusd/"
    );
}

#[tokio::test]
async fn test_user_transactions() {
    let (connector, transport) = authenticated();

    let query = UserTransactionsQuery {
        offset: 0,
        limit: 1001,
        sort: SortDirection::Asc,
    };
    let err = connector
        .get_user_transactions(&btcusd(), query)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(transport.requests().is_empty());

    transport.respond(
        200,
        r#"[{"datetime":"2020-09-13 12:26:40","id":1,"type":"2","btc":"0.5","usd":"-50","btc_usd":"100","fee":"0.1","order_id":9},
            {"datetime":"2020-09-13 12:30:00","id":2,"type":"0","btc":"0","usd":"500"}]"#,
    );
    let query = UserTransactionsQuery {
        offset: 10,
        limit: 1000,
        sort: SortDirection::Asc,
    };
    let transactions = connector
        .get_user_transactions(&btcusd(), query)
        .await
        .unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].legs.base_amount, 0.5);
    assert_eq!(transactions[0].legs.quote_amount, -50.0);
    assert_eq!(transactions[0].legs.rate, 100.0);
    assert_eq!(transactions[0].fee, Some(0.1));
    assert_eq!(transactions[0].order_id, Some(9));
    assert_eq!(transactions[1].fee, None);
    assert_eq!(transactions[1].order_id, None);

    let requests = transport.requests();
    assert_eq!(
        requests[0].url,
        "http://mock.local/api/v2/user_transactions/btcusd/"
    );
    assert_eq!(
        requests[0].body,
        format!("offset=10&limit=1000&sort=asc&{}", auth_suffix())
    );
}
