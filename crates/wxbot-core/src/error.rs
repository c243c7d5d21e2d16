//! Configuration errors for the application shell.

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a data directory for this platform")]
    NoDataDir,

    #[error("failed to prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}
