//! Diagnostic logging for protoget's own internals.
//!
//! Off unless `PROTOGET_LOG` or `RUST_LOG` holds a filter directive.
//! `PROTOGET_LOG_FORMAT` picks the layout: `text` (default), `tree` for
//! indented spans, or `json`.
//!
//! ```bash
//! PROTOGET_LOG=protoget_types=trace PROTOGET_LOG_FORMAT=tree protoget ./...
//! ```
//!
//! Logs go to stderr; stdout carries only the report.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "PROTOGET_LOG";
pub const LOG_FORMAT_ENV: &str = "PROTOGET_LOG_FORMAT";
const FALLBACK_LOG_ENV: &str = "RUST_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unknown names fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Logging settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directives; `PROTOGET_LOG` wins over `RUST_LOG`.
    pub directives: String,
    pub format: LogFormat,
}

impl LogConfig {
    /// `None` when neither filter variable is set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let directives = lookup(LOG_ENV).or_else(|| lookup(FALLBACK_LOG_ENV))?;
        let format = lookup(LOG_FORMAT_ENV)
            .map(|value| LogFormat::parse(&value))
            .unwrap_or_default();
        Some(Self { directives, format })
    }

    /// Install the global subscriber. Malformed directives are skipped
    /// rather than failing the run.
    pub fn install(&self) {
        let filter = EnvFilter::builder().parse_lossy(&self.directives);
        let registry = Registry::default().with(filter);
        let installed = match self.format {
            LogFormat::Tree => registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_indent_lines(true)
                        .with_deferred_spans(true)
                        .with_targets(true),
                )
                .try_init(),
            LogFormat::Json => registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Text => registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init(),
        };
        if let Err(err) = installed {
            tracing::debug!(%err, "tracing subscriber already installed");
        }
    }
}

/// Install logging when the environment asks for it.
pub fn init_tracing() {
    if let Some(config) = LogConfig::from_env() {
        config.install();
    }
}
