mod config;
mod error;
mod format;
mod level;
mod log;

pub use config::{ENV_LOG, ENV_LOG_FORMAT, LoggerConfig};
pub use error::LoggerError;
pub use format::LoggerFormat;
pub use level::{DEFAULT_DIRECTIVE, LoggerLevel};

/// Install the global tracing subscriber described by `cfg`.
///
/// Only the first call in a process succeeds; later calls return [`LoggerError::AlreadyInitialized`].
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    log::install(cfg)?;
    tracing::debug!(format = cfg.format.as_str(), filter = %cfg.level, "logger installed");
    Ok(())
}
