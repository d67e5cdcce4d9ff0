//! Shared utilities for the meridian workspace.

pub mod logging;

pub use logging::{init_logging, try_init_logging, LogFormat, LoggingConfig};
