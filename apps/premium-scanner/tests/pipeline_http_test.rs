//! End-to-end scan tests against a mock broker.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use premium_scanner::application::ports::NoticeLevel;
use premium_scanner::infrastructure::broker::http::{Credentials, RetryConfig};
use premium_scanner::{
    BrokerApiAdapter, BrokerHttpConfig, FetchError, InMemoryNoticePublisher, InstrumentName,
    MarginLookupError, OptionSide, PipelineNotice, ScanPremiumUseCase, ScanRequest,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn broker_config(server: &MockServer, retry: RetryConfig) -> BrokerHttpConfig {
    BrokerHttpConfig::new(Credentials::new(TOKEN.to_string()))
        .with_endpoints(
            format!("{}/options", server.uri()),
            format!("{}/margin", server.uri()),
        )
        .with_timeout(Duration::from_secs(5))
        .with_retry(retry)
}

type Scanner = ScanPremiumUseCase<BrokerApiAdapter, BrokerApiAdapter, InMemoryNoticePublisher>;

fn scanner_for(config: &BrokerHttpConfig) -> (Scanner, Arc<InMemoryNoticePublisher>) {
    let broker = Arc::new(BrokerApiAdapter::new(config).unwrap());
    let notices = Arc::new(InMemoryNoticePublisher::new());
    let scan = ScanPremiumUseCase::new(Arc::clone(&broker), broker, Arc::clone(&notices), 75);
    (scan, notices)
}

fn scanner(server: &MockServer, retry: RetryConfig) -> (Scanner, Arc<InMemoryNoticePublisher>) {
    scanner_for(&broker_config(server, retry))
}

fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(5),
        multiplier: 2.0,
    }
}

/// URL on a local port with nothing listening.
fn unreachable_url(endpoint: &str) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/{endpoint}")
}

fn nifty(side: OptionSide) -> ScanRequest {
    ScanRequest::new(
        InstrumentName::new("NIFTY"),
        NaiveDate::from_ymd_opt(2024, 11, 5).unwrap(),
        side,
    )
}

fn bearer() -> String {
    format!("Bearer {TOKEN}")
}

async fn mount_chain(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/options"))
        .and(query_param("symbol", "NIFTY"))
        .and(query_param("expiry", "2024-11-05"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn put_scan_uses_best_bid_and_sell_margin() {
    let server = MockServer::start().await;
    mount_chain(
        &server,
        json!({"options": [
            {"type": "PE", "strike_price": 20000, "bids": [{"price": 18.5}, {"price": 21.0}, {"price": 19.0}], "asks": []}
        ]}),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/margin"))
        .and(query_param("symbol", "NIFTY"))
        .and(query_param("type", "sell"))
        .and(query_param("strike", "20000"))
        .and(query_param("optionType", "PE"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"margin": 15000})))
        .expect(1)
        .mount(&server)
        .await;

    let (scan, notices) = scanner(&server, RetryConfig::disabled());
    let outcome = scan.execute(&nifty(OptionSide::Put)).await;

    let records = outcome.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].quote().instrument_name().as_str(), "NIFTY");
    assert_eq!(records[0].quote().side(), OptionSide::Put);
    assert_eq!(records[0].quote().strike_price(), dec!(20000));
    assert_eq!(records[0].quote().price(), dec!(21.0));
    assert_eq!(records[0].margin_required(), dec!(15000));
    assert_eq!(records[0].premium_earned(), dec!(1575));
    assert_eq!(notices.count_at_least(NoticeLevel::Warning), 0);
}

#[tokio::test]
async fn call_scan_without_asks_never_queries_margin() {
    let server = MockServer::start().await;
    mount_chain(
        &server,
        json!({"options": [
            {"type": "PE", "strike_price": 20000, "bids": [{"price": 18.5}, {"price": 21.0}, {"price": 19.0}], "asks": []}
        ]}),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/margin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"margin": 1})))
        .expect(0)
        .mount(&server)
        .await;

    let (scan, notices) = scanner(&server, RetryConfig::disabled());
    let outcome = scan.execute(&nifty(OptionSide::Call)).await;

    assert!(outcome.is_no_data());
    assert!(matches!(
        notices.notices().last(),
        Some(PipelineNotice::NoData { .. })
    ));
}

#[tokio::test]
async fn failed_margin_lookup_falls_back_to_zero() {
    let server = MockServer::start().await;
    mount_chain(
        &server,
        json!({"options": [
            {"type": "PE", "strike_price": 20000, "bids": [{"price": 21.0}]},
            {"type": "PE", "strike_price": 19500, "bids": [{"price": 9.5}]}
        ]}),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/margin"))
        .and(query_param("strike", "20000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"margin": 15000})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/margin"))
        .and(query_param("strike", "19500"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "calculator down"})))
        .expect(1)
        .mount(&server)
        .await;

    let (scan, notices) = scanner(&server, RetryConfig::disabled());
    let outcome = scan.execute(&nifty(OptionSide::Put)).await;

    let records = outcome.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].quote().strike_price(), dec!(20000));
    assert_eq!(records[0].margin_required(), dec!(15000));
    assert_eq!(records[0].premium_earned(), dec!(1575));
    assert_eq!(records[1].quote().strike_price(), dec!(19500));
    assert_eq!(records[1].margin_required(), Decimal::ZERO);
    assert_eq!(records[1].premium_earned(), dec!(712.5));

    let failures: Vec<_> = notices
        .notices()
        .into_iter()
        .filter_map(|n| match n {
            PipelineNotice::MarginLookupFailed {
                strike_price, error, ..
            } => Some((strike_price, error)),
            _ => None,
        })
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, dec!(19500));
    assert_eq!(
        failures[0].1,
        MarginLookupError::Status {
            status: 500,
            message: "calculator down".into()
        }
    );
}

#[tokio::test]
async fn missing_margin_field_falls_back_to_zero() {
    let server = MockServer::start().await;
    mount_chain(
        &server,
        json!({"options": [{"type": "PE", "strike_price": 20000, "bids": [{"price": 21.0}]}]}),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/margin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let (scan, notices) = scanner(&server, RetryConfig::disabled());
    let outcome = scan.execute(&nifty(OptionSide::Put)).await;

    assert_eq!(outcome.records().len(), 1);
    assert_eq!(outcome.records()[0].margin_required(), Decimal::ZERO);
    assert!(
        notices
            .notices()
            .iter()
            .any(|n| matches!(n, PipelineNotice::MarginMissing { .. }))
    );
}

#[tokio::test]
async fn malformed_chain_body_reports_no_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/options"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/margin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"margin": 1})))
        .expect(0)
        .mount(&server)
        .await;

    let (scan, notices) = scanner(&server, RetryConfig::disabled());
    let outcome = scan.execute(&nifty(OptionSide::Put)).await;

    assert!(outcome.is_no_data());
    assert!(notices.notices().iter().any(|n| matches!(
        n,
        PipelineNotice::ChainFetchFailed {
            error: FetchError::Malformed { .. },
            ..
        }
    )));
}

#[tokio::test]
async fn unauthorized_chain_request_reports_no_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/options"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "invalid token"})))
        .expect(1)
        .mount(&server)
        .await;

    let (scan, notices) = scanner(&server, RetryConfig::default());
    let outcome = scan.execute(&nifty(OptionSide::Put)).await;

    assert!(outcome.is_no_data());
    assert!(notices.notices().iter().any(|n| matches!(
        n,
        PipelineNotice::ChainFetchFailed {
            error: FetchError::Status { status: 401, .. },
            ..
        }
    )));
}

#[tokio::test]
async fn malformed_entries_are_skipped() {
    let server = MockServer::start().await;
    mount_chain(
        &server,
        json!({"options": [
            {"type": "PE", "bids": [{"price": 30.0}]},
            {"type": "XX", "strike_price": 20500, "bids": [{"price": 40.0}]},
            {"type": "PE", "strike_price": 20000, "bids": [{"price": 21.0}]}
        ]}),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/margin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"margin": 15000})))
        .expect(1)
        .mount(&server)
        .await;

    let (scan, notices) = scanner(&server, RetryConfig::disabled());
    let outcome = scan.execute(&nifty(OptionSide::Put)).await;

    assert_eq!(outcome.records().len(), 1);
    assert_eq!(outcome.records()[0].quote().strike_price(), dec!(20000));
    assert!(
        notices
            .notices()
            .iter()
            .any(|n| matches!(n, PipelineNotice::EntriesRejected { count: 1, .. }))
    );
}

#[tokio::test]
async fn transient_server_error_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/options"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"options": [
            {"type": "CE", "strike_price": 20000, "asks": [{"price": 30.25}, {"price": 28.0}]}
        ]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/margin"))
        .and(query_param("optionType", "CE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"margin": 80000})))
        .expect(1)
        .mount(&server)
        .await;

    let (scan, _notices) = scanner(&server, fast_retry(3));
    let outcome = scan.execute(&nifty(OptionSide::Call)).await;

    let records = outcome.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].quote().price(), dec!(30.25));
    assert_eq!(records[0].margin_required(), dec!(80000));
    assert_eq!(records[0].premium_earned(), dec!(2268.75));
}

#[tokio::test]
async fn out_of_range_entry_is_rejected_without_aborting_the_scan() {
    let server = MockServer::start().await;
    mount_chain(
        &server,
        json!({"options": [
            {"type": "PE", "strike_price": 20000, "bids": [{"price": 2e27}]},
            {"type": "PE", "strike_price": 19500, "bids": [{"price": 9.5}]}
        ]}),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/margin"))
        .and(query_param("strike", "19500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"margin": 98000})))
        .expect(1)
        .mount(&server)
        .await;

    let (scan, notices) = scanner(&server, RetryConfig::disabled());
    let outcome = scan.execute(&nifty(OptionSide::Put)).await;

    let records = outcome.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].quote().strike_price(), dec!(19500));
    assert_eq!(records[0].margin_required(), dec!(98000));
    assert_eq!(records[0].premium_earned(), dec!(712.5));
    assert!(
        notices
            .notices()
            .iter()
            .any(|n| matches!(n, PipelineNotice::EntriesRejected { count: 1, .. }))
    );
}

#[tokio::test]
async fn rate_limited_request_is_retried_with_capped_delay() {
    let server = MockServer::start().await;

    // An uncapped Retry-After would stall the test for an hour.
    Mock::given(method("GET"))
        .and(path("/options"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "3600"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"options": [
            {"type": "PE", "strike_price": 20000, "bids": [{"price": 21.0}]}
        ]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/margin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"margin": 15000})))
        .expect(1)
        .mount(&server)
        .await;

    let (scan, _notices) = scanner(&server, fast_retry(3));
    let outcome = tokio::time::timeout(
        Duration::from_secs(10),
        scan.execute(&nifty(OptionSide::Put)),
    )
    .await
    .expect("Retry-After must be capped by max_backoff");

    let records = outcome.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].margin_required(), dec!(15000));
}

#[tokio::test]
async fn exhausted_rate_limit_reports_status_429() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/options"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .expect(1)
        .mount(&server)
        .await;

    let (scan, notices) = scanner(&server, RetryConfig::disabled());
    let outcome = scan.execute(&nifty(OptionSide::Put)).await;

    assert!(outcome.is_no_data());
    let error = notices
        .notices()
        .into_iter()
        .find_map(|n| match n {
            PipelineNotice::ChainFetchFailed { error, .. } => Some(error),
            _ => None,
        })
        .unwrap();
    match error {
        FetchError::Status { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("7s"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_chain_endpoint_exhausts_retries() {
    let config = BrokerHttpConfig::new(Credentials::new(TOKEN.to_string()))
        .with_endpoints(unreachable_url("options"), unreachable_url("margin"))
        .with_timeout(Duration::from_secs(5))
        .with_retry(fast_retry(2));
    let (scan, notices) = scanner_for(&config);

    let outcome = scan.execute(&nifty(OptionSide::Put)).await;

    assert!(outcome.is_no_data());
    let error = notices
        .notices()
        .into_iter()
        .find_map(|n| match n {
            PipelineNotice::ChainFetchFailed { error, .. } => Some(error),
            _ => None,
        })
        .unwrap();
    match error {
        FetchError::ConnectionError { message } => {
            assert!(message.contains("2 attempts"), "{message}");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_margin_endpoint_falls_back_to_zero() {
    let server = MockServer::start().await;
    mount_chain(
        &server,
        json!({"options": [{"type": "PE", "strike_price": 20000, "bids": [{"price": 21.0}]}]}),
    )
    .await;

    let config = BrokerHttpConfig::new(Credentials::new(TOKEN.to_string()))
        .with_endpoints(format!("{}/options", server.uri()), unreachable_url("margin"))
        .with_timeout(Duration::from_secs(5))
        .with_retry(RetryConfig::disabled());
    let (scan, notices) = scanner_for(&config);

    let outcome = scan.execute(&nifty(OptionSide::Put)).await;

    let records = outcome.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].margin_required(), Decimal::ZERO);
    assert_eq!(records[0].premium_earned(), dec!(1575));
    assert!(notices.notices().iter().any(|n| matches!(
        n,
        PipelineNotice::MarginLookupFailed {
            error: MarginLookupError::ConnectionError { .. },
            ..
        }
    )));
}

#[tokio::test]
async fn undecodable_margin_body_falls_back_to_zero() {
    let server = MockServer::start().await;
    mount_chain(
        &server,
        json!({"options": [{"type": "PE", "strike_price": 20000, "bids": [{"price": 21.0}]}]}),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/margin"))
        .respond_with(ResponseTemplate::new(200).set_body_string("margin=15000"))
        .expect(1)
        .mount(&server)
        .await;

    let (scan, notices) = scanner(&server, RetryConfig::disabled());
    let outcome = scan.execute(&nifty(OptionSide::Put)).await;

    let records = outcome.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].margin_required(), Decimal::ZERO);
    assert!(notices.notices().iter().any(|n| matches!(
        n,
        PipelineNotice::MarginLookupFailed {
            error: MarginLookupError::Malformed { .. },
            ..
        }
    )));
}
