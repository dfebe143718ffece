//! `runwatch wait <job>...` – wait for jobs to finish, one waiter per job.

use anyhow::{bail, Context, Result};
use runwatch_core::config::{PollConfig, WatchConfig};
use runwatch_core::{CurlStatusProvider, JobId, RunWaiter};
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::cli::shutdown;

/// Arguments of `runwatch wait`; CLI flags override the `[poll]` config section.
#[derive(Debug, Clone)]
pub struct WaitArgs {
    pub job_ids: Vec<String>,
    pub delay: Option<f64>,
    pub max_attempts: Option<u32>,
}

impl WaitArgs {
    pub fn poll_config(&self, base: &PollConfig) -> Result<PollConfig> {
        let mut poll = base.clone();
        if let Some(delay) = self.delay {
            poll.initial_delay_secs = Some(delay);
        }
        if let Some(n) = self.max_attempts {
            poll.max_attempts = n;
        }
        poll.validate()?;
        Ok(poll)
    }
}

pub async fn run_wait(cfg: &WatchConfig, args: &WaitArgs) -> Result<()> {
    let poll = args.poll_config(&cfg.poll)?;
    let provider = Arc::new(CurlStatusProvider::from_config(&cfg.api)?);
    let cancel = shutdown::cancel_on_ctrl_c();
    let waiter = RunWaiter::new(provider, &poll).with_cancellation(cancel);

    let mut tasks = JoinSet::new();
    for raw in &args.job_ids {
        let waiter = waiter.clone();
        let id = JobId::from(raw.as_str());
        tasks.spawn(async move {
            let res = waiter.wait(&id).await;
            (id, res)
        });
    }

    let mut failed = 0usize;
    while let Some(joined) = tasks.join_next().await {
        let (id, res) = joined.context("wait task join")?;
        match res {
            Ok(outcome) => {
                println!("{}: {}", id, outcome);
                if !outcome.is_success() {
                    failed += 1;
                }
            }
            Err(e) => {
                println!("{}: error: {:#}", id, anyhow::Error::from(e));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} job(s) did not succeed", failed, args.job_ids.len());
    }
    tracing::info!("all {} job(s) succeeded", args.job_ids.len());
    Ok(())
}
