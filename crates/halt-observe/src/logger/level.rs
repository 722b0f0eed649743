use std::{fmt, str::FromStr};

use tracing_subscriber::EnvFilter;

use crate::logger::error::LoggerError;

/// Default filter: quiet dependencies, while the halt crates (and the cancellation audit line) log at info.
pub const DEFAULT_DIRECTIVE: &str = "warn,halt_core=info,halt_exec=info,halt_api=info,agentd=info";

/// Validated filter directive, e.g. `"info"` or `"warn,halt_core=debug"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerLevel(String);

impl LoggerLevel {
    pub fn new(directive: impl Into<String>) -> Result<Self, LoggerError> {
        let directive = directive.into();
        EnvFilter::try_new(&directive)
            .map_err(|_| LoggerError::InvalidLogLevel(directive.clone()))?;
        Ok(Self(directive))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn to_filter(&self) -> Result<EnvFilter, LoggerError> {
        EnvFilter::try_new(&self.0).map_err(|_| LoggerError::InvalidLogLevel(self.0.clone()))
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self(DEFAULT_DIRECTIVE.to_string())
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl fmt::Display for LoggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_scoped_directives() {
        assert_eq!(LoggerLevel::new("debug").unwrap().as_str(), "debug");
        assert!("warn,halt_core=trace".parse::<LoggerLevel>().is_ok());
        assert_eq!(LoggerLevel::default().to_string(), DEFAULT_DIRECTIVE);
        assert!(LoggerLevel::new(DEFAULT_DIRECTIVE).is_ok());
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            LoggerLevel::new("halt_core=loud"),
            Err(LoggerError::InvalidLogLevel("halt_core=loud".into()))
        );
    }
}
