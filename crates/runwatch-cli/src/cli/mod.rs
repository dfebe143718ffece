//! CLI for the runwatch job-status watcher.

mod commands;
mod shutdown;

use anyhow::Result;
use clap::{Parser, Subcommand};
use runwatch_core::config;
use std::path::PathBuf;

use commands::{run_check, run_status, run_wait, WaitArgs};

/// Top-level CLI for runwatch.
#[derive(Debug, Parser)]
#[command(name = "runwatch")]
#[command(about = "runwatch: wait for remote jobs to finish, polling with jittered backoff", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/runwatch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log to stderr instead of ~/.local/state/runwatch/runwatch.log.
    #[arg(long, global = true)]
    pub log_stderr: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Wait until each job finishes; exits non-zero unless all succeeded.
    Wait {
        /// Job identifiers to watch concurrently.
        #[arg(required = true, value_name = "JOB_ID")]
        job_ids: Vec<String>,
        /// Base delay in seconds before each poll phase (jittered by +/- 1s).
        /// Without it a random 1-10s delay is used.
        #[arg(long, value_name = "SECS")]
        delay: Option<f64>,
        /// Unsuccessful status checks allowed per phase.
        #[arg(long, value_name = "N")]
        max_attempts: Option<u32>,
    },

    /// Fetch and show the current status of a job.
    Status {
        /// Job identifier.
        job_id: String,
    },

    /// Fetch a job once and check that it completed successfully.
    Check {
        /// Job identifier.
        job_id: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Wait {
                job_ids,
                delay,
                max_attempts,
            } => {
                let args = WaitArgs {
                    job_ids,
                    delay,
                    max_attempts,
                };
                run_wait(&cfg, &args).await?
            }
            CliCommand::Status { job_id } => run_status(&cfg, &job_id).await?,
            CliCommand::Check { job_id } => run_check(&cfg, &job_id).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
