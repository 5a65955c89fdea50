//! Premium Scanner Binary
//!
//! Fetches the option chain for one instrument and expiry, prices the
//! selected side per strike and prints the premium/margin table.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin premium-scanner
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `BROKER_API_TOKEN`: Bearer token for the broker API
//!
//! ## Optional
//! - `OPTIONS_API_URL`: Option chain endpoint (default: <https://api.broker.com/options>)
//! - `MARGIN_API_URL`: Margin endpoint (default: <https://api.broker.com/margin>)
//! - `LOT_SIZE`: Contract multiplier (default: 75)
//! - `BROKER_HTTP_TIMEOUT_SECS`: Per-request timeout (default: 30)
//! - `BROKER_MAX_ATTEMPTS`: Attempts per request, 1 disables retry (default: 3)
//! - `BROKER_RETRY_INITIAL_MS`: First retry delay (default: 100)
//! - `BROKER_RETRY_MAX_SECS`: Retry delay cap (default: 10)
//! - `SCAN_INSTRUMENT`: Underlying (default: NIFTY)
//! - `SCAN_EXPIRY`: Expiry as YYYY-MM-DD (default: 2024-11-05)
//! - `SCAN_SIDE`: PE | CE (default: PE)
//! - `SCAN_OUTPUT`: table | json (default: table)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use anyhow::Context;
use premium_scanner::application::use_cases::ScanOutcome;
use premium_scanner::infrastructure::config::OutputFormat;
use premium_scanner::infrastructure::presentation::{NO_DATA_MESSAGE, render_json, render_table};
use premium_scanner::{BrokerApiAdapter, ScanPremiumUseCase, ScannerConfig, TracingNoticePublisher};

/// Concrete type alias for the scan use case.
type ConcreteScanUseCase =
    ScanPremiumUseCase<BrokerApiAdapter, BrokerApiAdapter, TracingNoticePublisher>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    let config = ScannerConfig::from_env().context("failed to load scanner configuration")?;
    log_config(&config);

    let use_case = create_use_case(&config)?;
    let request = config.scan.request();

    let outcome = use_case.execute(&request).await;

    match outcome {
        ScanOutcome::NoData => println!("{NO_DATA_MESSAGE}"),
        ScanOutcome::Enriched(records) => match config.scan.output {
            OutputFormat::Table => println!("{}", render_table(&records)),
            OutputFormat::Json => println!(
                "{}",
                render_json(&records).context("failed to serialize scan results")?
            ),
        },
    }

    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Initialize the tracing subscriber with environment filter.
///
/// Logs go to stderr so stdout carries only the rendered table.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "premium_scanner=info"
                    .parse()
                    .expect("static directive 'premium_scanner=info' is valid"),
            ),
        )
        .init();
}

/// Log the parsed configuration.
fn log_config(config: &ScannerConfig) {
    tracing::info!(
        instrument = %config.scan.instrument_name,
        expiry = %config.scan.expiry_date,
        side = %config.scan.side,
        lot_size = config.lot_size,
        options_url = %config.broker.options_url,
        margin_url = %config.broker.margin_url,
        max_attempts = config.broker.retry.max_attempts,
        "Configuration loaded"
    );
}

/// Wire the broker adapter into the scan use case.
fn create_use_case(config: &ScannerConfig) -> anyhow::Result<ConcreteScanUseCase> {
    let broker = Arc::new(
        BrokerApiAdapter::new(&config.broker).context("failed to initialize broker adapter")?,
    );

    Ok(ScanPremiumUseCase::new(
        Arc::clone(&broker),
        broker,
        Arc::new(TracingNoticePublisher),
        config.lot_size,
    ))
}
