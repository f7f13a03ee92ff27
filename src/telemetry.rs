//! Tracing subscriber setup.
//!
//! Call [`init_telemetry`] once at process start. Filtering comes from
//! `RUST_LOG` with a sane default; production deployments switch to
//! JSON lines for log aggregation.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for emitted log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, for development.
    Pretty,
    /// JSON lines, for log aggregation.
    Json,
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter (`info` plus `debug` for
/// this crate). Returns an error if a subscriber is already set.
pub fn init_telemetry(format: LogFormat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("info,{}=debug", env!("CARGO_PKG_NAME"))));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}
