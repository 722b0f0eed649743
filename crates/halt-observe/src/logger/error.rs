use thiserror::Error;

/// Reasons the global subscriber could not be configured or installed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggerError {
    /// `HALT_LOG_FORMAT` (or a parsed format string) is not one of `text`, `json`, `journald`.
    #[error("unknown log format {0:?}, expected text, json or journald")]
    InvalidFormat(String),

    #[error("journald output needs Linux and the `journald` feature")]
    JournaldNotSupported,

    /// A global subscriber is already installed; only the first `logger_init` wins.
    #[error("logger already initialized")]
    AlreadyInitialized,

    #[error("logger initialization failed: {0}")]
    InitializationFailed(String),

    /// The filter directive did not parse, e.g. `halt_core=loud`.
    #[error("invalid log filter {0:?}")]
    InvalidLogLevel(String),
}
