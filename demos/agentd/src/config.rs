use std::net::SocketAddr;

use anyhow::Context;
use halt_observe::LoggerConfig;

/// Agent settings, read from `HALT_*` environment variables.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// `HALT_LISTEN`, default `127.0.0.1:8085`.
    pub listen: SocketAddr,
    /// `HALT_LOG` / `HALT_LOG_FORMAT`.
    pub logger: LoggerConfig,
    /// `HALT_NODE`; falls back to the host name.
    pub node: Option<String>,
    /// `HALT_SLOTS`, slots per node, default 2.
    pub slots: usize,
    /// `HALT_REMOTES`, comma-separated names of simulated remote nodes.
    pub remotes: Vec<String>,
    /// `HALT_SCAN_LIMIT`; unset scans the whole pool.
    pub scan_limit: Option<usize>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 8085)),
            logger: LoggerConfig::default(),
            node: None,
            slots: 2,
            remotes: vec!["worker-1".to_string()],
            scan_limit: None,
        }
    }
}

impl AgentConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut cfg = Self::default();

        if let Some(v) = var("HALT_LISTEN") {
            cfg.listen = v.parse().with_context(|| format!("HALT_LISTEN={v}"))?;
        }
        cfg.logger = LoggerConfig::from_env().context("logger settings")?;
        cfg.node = var("HALT_NODE");
        if let Some(v) = var("HALT_SLOTS") {
            cfg.slots = v.parse().with_context(|| format!("HALT_SLOTS={v}"))?;
        }
        if let Some(v) = var("HALT_REMOTES") {
            cfg.remotes = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(v) = var("HALT_SCAN_LIMIT") {
            cfg.scan_limit = Some(v.parse().with_context(|| format!("HALT_SCAN_LIMIT={v}"))?);
        }
        Ok(cfg)
    }
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
