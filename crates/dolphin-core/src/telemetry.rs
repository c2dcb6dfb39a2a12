//! Diagnostic log for scoring runs. Results go to stdout, so the log is
//! always written to stderr.

use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

const OVERRIDE_VARIABLE: &str = "RUST_LOG";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("DOLPHIN_LOG_LEVEL '{directive}' is not a valid log filter")]
    InvalidLogLevel {
        directive: String,
        #[source]
        source: ParseError,
    },
    #[error("a log subscriber is already installed for this process")]
    AlreadyInstalled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let override_directive = std::env::var(OVERRIDE_VARIABLE).ok();
    let filter = resolve_filter(override_directive.as_deref(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

/// A usable `RUST_LOG` wins; a blank or unparsable one falls back to the
/// configured level, which must itself parse.
fn resolve_filter(
    override_directive: Option<&str>,
    configured: &str,
) -> Result<EnvFilter, TelemetryError> {
    if let Some(directive) = override_directive.filter(|value| !value.trim().is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(directive) {
            return Ok(filter);
        }
    }

    EnvFilter::try_new(configured).map_err(|source| TelemetryError::InvalidLogLevel {
        directive: configured.to_string(),
        source,
    })
}
