use std::io::IsTerminal;

use crate::logger::{error::LoggerError, format::LoggerFormat, level::LoggerLevel};

/// Environment variable holding the filter directive.
pub const ENV_LOG: &str = "HALT_LOG";
/// Environment variable holding the output format.
pub const ENV_LOG_FORMAT: &str = "HALT_LOG_FORMAT";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: LoggerLevel,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: LoggerLevel::default(),
            with_targets: true,
            use_color: std::io::stdout().is_terminal(),
        }
    }
}

impl LoggerConfig {
    /// Defaults overridden by [`ENV_LOG`] and [`ENV_LOG_FORMAT`]; blank values are ignored.
    pub fn from_env() -> Result<Self, LoggerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoggerError> {
        let get = |name: &str| lookup(name).filter(|v: &String| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(v) = get(ENV_LOG) {
            cfg.level = v.parse()?;
        }
        if let Some(v) = get(ENV_LOG_FORMAT) {
            cfg.format = v.parse()?;
        }
        // Colour codes would end up as literal escapes in structured sinks.
        if cfg.format != LoggerFormat::Text {
            cfg.use_color = false;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn unset_vars_keep_defaults() {
        let cfg = LoggerConfig::from_lookup(vars(&[])).unwrap();
        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.level, LoggerLevel::default());
        assert!(cfg.with_targets);
    }

    #[test]
    fn vars_override_level_and_format() {
        let cfg = LoggerConfig::from_lookup(vars(&[
            (ENV_LOG, "debug,halt_exec=trace"),
            (ENV_LOG_FORMAT, "JSON"),
        ]))
        .unwrap();
        assert_eq!(cfg.level.as_str(), "debug,halt_exec=trace");
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert!(!cfg.use_color);
    }

    #[test]
    fn blank_vars_are_ignored() {
        let cfg = LoggerConfig::from_lookup(vars(&[(ENV_LOG, "  "), (ENV_LOG_FORMAT, "")])).unwrap();
        assert_eq!(cfg.format, LoggerFormat::Text);
    }

    #[test]
    fn bad_values_are_reported() {
        assert_eq!(
            LoggerConfig::from_lookup(vars(&[(ENV_LOG_FORMAT, "xml")])).err(),
            Some(LoggerError::InvalidFormat("xml".into()))
        );
        assert_eq!(
            LoggerConfig::from_lookup(vars(&[(ENV_LOG, "halt_core=loud")])).err(),
            Some(LoggerError::InvalidLogLevel("halt_core=loud".into()))
        );
    }
}
