//! Jobs that run a child process; an interrupt kills the child.

use std::{future::Future, path::PathBuf, pin::Pin, process::Stdio};

use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Child process configuration for one job.
#[derive(Clone, Debug)]
pub struct ProcConfig {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
    /// Report a failure if the exit code is non-zero.
    pub fail_on_non_zero: bool,
}

impl Default for ProcConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
            fail_on_non_zero: true,
        }
    }
}

impl ProcConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// Future driving one child process to completion.
pub type ProcFuture = Pin<Box<dyn Future<Output = Result<(), String>> + Send>>;

/// Build the work closure for [`crate::ExecSlot::dispatch`] / [`crate::Executors::dispatch`].
pub fn process_work(cfg: ProcConfig) -> impl FnOnce(CancellationToken) -> ProcFuture {
    move |ctx: CancellationToken| -> ProcFuture { Box::pin(run(cfg, ctx)) }
}

async fn run(cfg: ProcConfig, ctx: CancellationToken) -> Result<(), String> {
    if cfg.program.trim().is_empty() {
        return Err("program is empty".into());
    }

    let mut cmd = Command::new(&cfg.program);
    cmd.args(&cfg.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);
    if let Some(cwd) = &cfg.cwd {
        cmd.current_dir(cwd);
    }
    for (k, v) in &cfg.env {
        cmd.env(k, v);
    }

    trace!(target: "halt.exec.proc", program = %cfg.program, args = ?cfg.args, "spawn");
    let mut child = cmd.spawn().map_err(|e| format!("spawn: {e}"))?;

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(|e| format!("wait: {e}"))?;
            if !status.success() && cfg.fail_on_non_zero {
                return match status.code() {
                    Some(code) => Err(format!("exit code: {code}")),
                    None => Err("terminated by signal".into()),
                };
            }
            debug!(target: "halt.exec.proc", "exit success");
            Ok(())
        }
        _ = ctx.cancelled() => {
            debug!(target: "halt.exec.proc", "cancelled; killing child");
            let _ = child.kill().await;
            Ok(())
        }
    }
}
