//! `runwatch check <job>` – one fetch plus the completion check.

use anyhow::{bail, Result};
use runwatch_core::config::WatchConfig;
use runwatch_core::{CurlStatusProvider, JobId, RunWaiter};

pub async fn run_check(cfg: &WatchConfig, job_id: &str) -> Result<()> {
    let provider = CurlStatusProvider::from_config(&cfg.api)?;
    let waiter = RunWaiter::new(provider, &cfg.poll);
    let id = JobId::from(job_id);
    let outcome = waiter.check(&id).await?;
    println!("{}: {}", id, outcome);
    if !outcome.is_success() {
        bail!("job {} did not succeed", id);
    }
    Ok(())
}
