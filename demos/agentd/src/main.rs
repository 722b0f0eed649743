use std::sync::Arc;

use tracing::{info, warn};

use halt_api::{CancellerAdapter, HttpApi};
use halt_core::{CancelConfig, JobCanceller, SlotPool, StaticRegistry};
use halt_exec::{
    Executors, Submission,
    proc::{ProcConfig, process_work},
};
use halt_model::{JobParams, NodeKind};
use halt_observe::logger_init;

mod config;
use config::AgentConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Config + logger
    let cfg = AgentConfig::from_env()?;
    logger_init(&cfg.logger)?;
    info!(listen = %cfg.listen, "logger initialized");

    // 2) Execution slots: one local node, simulated remotes
    let local = match &cfg.node {
        Some(name) => Executors::new(name.clone(), NodeKind::Local, cfg.slots),
        None => Executors::local(cfg.slots),
    };
    let remotes: Vec<Executors> = cfg
        .remotes
        .iter()
        .map(|name| Executors::remote(name.clone(), cfg.slots))
        .collect();

    // 3) Registry + canceller
    let registry = StaticRegistry::new(local.node())?;
    for remote in &remotes {
        registry.add_remote(remote.node())?;
    }
    let canceller = JobCanceller::new(SlotPool::new(Arc::new(registry))).with_config(CancelConfig {
        scan_limit: cfg.scan_limit,
    });
    info!(slots = canceller.pool().len(), "slot pool ready");

    // 4) Demo jobs: long sleeps, one per node
    for exec in std::iter::once(&local).chain(remotes.iter()) {
        let work = process_work(ProcConfig::new("sleep").arg("3600"));
        let params = JobParams::new().with("NODE", exec.name());
        match exec.dispatch(Submission::new().with_params(params), work) {
            Ok(d) => info!(
                node = exec.name(),
                seq = d.job.seq,
                token = %d.job.token.as_ref().map(|t| t.as_str()).unwrap_or("-"),
                "demo job started"
            ),
            Err(e) => warn!(node = exec.name(), error = %e, "demo job not started"),
        }
    }

    // 5) HTTP API
    let handler = Arc::new(CancellerAdapter::new(Arc::new(canceller)));
    let app = HttpApi::new(handler).router();
    let listener = tokio::net::TcpListener::bind(cfg.listen).await?;
    info!(listen = %cfg.listen, "POST /api/v1/jobs/stop with a job token to cancel it");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down...");
        })
        .await?;

    Ok(())
}
