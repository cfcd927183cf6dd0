//! Logging infrastructure for schema processing
//!
//! Structured logging uses the `tracing` crate. The library itself only
//! emits spans and events; installing a subscriber is left to binaries
//! (the CLI) or to the WebAssembly entry point.
//!
//! # Usage
//!
//! ```rust,no_run
//! use erdwright::core::logging::init_logging;
//!
//! // Level and format from the environment, falling back to info/compact
//! init_logging(None, None).ok();
//! ```
//!
//! # Environment Variables
//!
//! - `ERDWRIGHT_LOG_LEVEL`: log level or filter directive (trace|debug|info|warn|error|off)
//! - `ERDWRIGHT_LOG_FORMAT`: compact|pretty|json
//! - `RUST_LOG`: standard `tracing-subscriber` filter, used when the above is unset
//!
//! # Filtering Logs
//!
//! ```bash
//! # Parser decisions line by line
//! RUST_LOG="erdwright::plugins::er::parser=trace" erdwright format -i schema.mmd
//!
//! # Constraint naming fallbacks while generating DDL
//! RUST_LOG="warn,erdwright::sql=debug" erdwright ddl -d postgresql -i schema.mmd
//! ```

use std::fmt;
use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self as tracing_fmt, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

#[cfg(target_arch = "wasm32")]
use tracing_wasm::WASMLayerConfig;

/// Environment variable holding the log level
pub const LOG_LEVEL_ENV: &str = "ERDWRIGHT_LOG_LEVEL";

/// Environment variable holding the log format
pub const LOG_FORMAT_ENV: &str = "ERDWRIGHT_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Resolve the effective level directive and format.
///
/// Explicit arguments win, then `ERDWRIGHT_LOG_*`, then `RUST_LOG` for the
/// level, then `info` / compact.
pub fn resolve_settings(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(String, LogFormat), String> {
    let level = level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    let format = match format
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
    {
        Some(name) => LogFormat::from_str(&name)?,
        None => LogFormat::default(),
    };

    Ok((level, format))
}

/// Initialize the global tracing subscriber
///
/// Returns an error for an unknown format name or when a global
/// subscriber is already installed. An unparseable level directive
/// falls back to `info`.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (level, format) =
        resolve_settings(level, format).map_err(|e| format!("Invalid log format: {}", e))?;

    #[cfg(target_arch = "wasm32")]
    {
        // The browser console has a single output format; level filtering
        // happens in the devtools.
        let _ = (level, format);
        tracing_wasm::set_as_global_default_with_config(WASMLayerConfig::default());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let filter = if level == "off" {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"))
        };

        let registry = Registry::default().with(filter);
        match format {
            LogFormat::Compact => registry
                .with(
                    tracing_fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init()?,
            LogFormat::Pretty => registry
                .with(
                    tracing_fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?,
            LogFormat::Json => registry
                .with(
                    tracing_fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_span_events(FmtSpan::CLOSE)
                        .json(),
                )
                .try_init()?,
        }

        Ok(())
    }
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
