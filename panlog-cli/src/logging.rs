//! Tracing setup. Logs go to stderr; stdout carries only records and reports.

use anyhow::{Context, Result, bail};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use panlog_core::config::GeneralConfig;

/// Install the global subscriber for `log_format` (`json` or `pretty`).
///
/// `RUST_LOG` wins over `log_level`. Call once, before the first event.
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let layer = match config.log_format.as_str() {
        "json" => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        "pretty" => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        other => bail!("unknown log format '{other}', expected 'json' or 'pretty'"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("failed to initialize tracing subscriber")
}
