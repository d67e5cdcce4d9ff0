//! Subscriber setup driven by the `[logging]` section of the config file.
//!
//! `level` is an `EnvFilter` directive such as `"info"` or
//! `"info,meridian_transfer=debug"`. `RUST_LOG` wins over it when set, so an
//! operator can raise the coordinators' verbosity without editing the file.

use serde::{Deserialize, Serialize};
use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Output format for structured logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines for development.
    #[default]
    Human,
    /// Newline-delimited JSON for log aggregation.
    Json,
}

/// The `[logging]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Filter in effect: `RUST_LOG` if set, otherwise the configured level.
    /// An unparsable level falls back to `info` rather than silencing logs.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new(default_log_level()))
    }

    fn subscriber(&self, test_writer: bool) -> impl Subscriber + Send + Sync + 'static {
        let layer = match (self.format, test_writer) {
            (LogFormat::Human, false) => fmt::layer().with_target(true).boxed(),
            (LogFormat::Human, true) => fmt::layer().with_target(true).with_test_writer().boxed(),
            (LogFormat::Json, false) => fmt::layer().json().with_target(true).boxed(),
            (LogFormat::Json, true) => fmt::layer().json().with_target(true).with_test_writer().boxed(),
        };
        tracing_subscriber::registry().with(self.env_filter()).with(layer)
    }

    /// Install the global subscriber.
    ///
    /// # Panics
    ///
    /// Panics if a global subscriber has already been set.
    pub fn init(&self) {
        self.subscriber(false).init();
    }

    /// Like [`LoggingConfig::init`], but writes through the test harness and
    /// returns `false` when a subscriber is already installed.
    pub fn try_init(&self) -> bool {
        self.subscriber(true).try_init().is_ok()
    }
}

/// Install the global subscriber for `format` at `level`.
pub fn init_logging(format: LogFormat, level: &str) {
    LoggingConfig {
        format,
        level: level.to_string(),
    }
    .init();
}

/// Non-panicking [`init_logging`] for tests, which call it from many threads.
pub fn try_init_logging(format: LogFormat, level: &str) -> bool {
    LoggingConfig {
        format,
        level: level.to_string(),
    }
    .try_init()
}
