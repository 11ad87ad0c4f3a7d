//! Tracing subscriber bootstrap for KELOLA binaries.

use anyhow::{anyhow, Context};
use tracing_subscriber::EnvFilter;

use kelola_kernel::settings::{LogFormat, TelemetrySettings};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `telemetry.filter`. Fails if a subscriber is already set.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(settings)?;

    let installed = match settings.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_current_span(true)
            .with_env_filter(filter)
            .try_init(),
    };
    installed.map_err(|error| anyhow!("failed to install tracing subscriber: {error}"))?;

    tracing::debug!(target: "kelola-telemetry", format = ?settings.log_format, "telemetry initialized");
    Ok(())
}

fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {} directive '{}'", EnvFilter::DEFAULT_ENV, directives)),
        _ => EnvFilter::try_new(&settings.filter)
            .with_context(|| format!("invalid telemetry.filter '{}'", settings.filter)),
    }
}
