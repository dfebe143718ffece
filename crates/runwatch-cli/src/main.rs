use clap::Parser;
use runwatch_core::logging::{self, LogDestination};

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging before any status checks so each poll is recorded.
    if cli.log_stderr {
        let _ = logging::init(&LogDestination::Stderr);
    } else {
        logging::init_logging();
    }

    if let Err(err) = cli.run().await {
        eprintln!("runwatch error: {:#}", err);
        std::process::exit(1);
    }
}
