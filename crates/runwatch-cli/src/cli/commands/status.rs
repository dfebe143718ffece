//! `runwatch status <job>` – show the current status of a job.

use anyhow::Result;
use runwatch_core::config::WatchConfig;
use runwatch_core::status::classify;
use runwatch_core::{CurlStatusProvider, JobId, RunStatusProvider};

pub async fn run_status(cfg: &WatchConfig, job_id: &str) -> Result<()> {
    let provider = CurlStatusProvider::from_config(&cfg.api)?;
    let id = JobId::from(job_id);
    let snapshot = provider.fetch(&id).await?;
    let phase = classify(&snapshot);

    let exit = snapshot
        .exit_code
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("{:<20} {:<18} {:<14} {}", "JOB", "STATUS", "PHASE", "EXIT");
    println!("{:<20} {:<18} {:<14} {}", id, snapshot.status, phase, exit);
    Ok(())
}
