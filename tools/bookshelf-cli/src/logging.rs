//! Tracing subscriber setup.

use anyhow::Result;
use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber. Logs go to stderr so they never mix with
/// `--json` output on stdout.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = build_env_filter(config, verbose);
    match config.format {
        LogFormat::Compact => init_with_layer(
            filter,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        ),
        LogFormat::Json => init_with_layer(
            filter,
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::io::stderr),
        ),
    }
}

/// `RUST_LOG` wins; otherwise the configured level, raised to `debug` by `--verbose`.
fn build_env_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { config.level.as_str() };
        EnvFilter::new(format!("{},hyper=warn,reqwest=warn,rustls=warn", level))
    })
}

fn init_with_layer<L>(filter: EnvFilter, fmt_layer: L) -> Result<()>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;
    Ok(())
}
