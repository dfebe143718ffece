//! Logging init: append to a file under the XDG state dir, or write to stderr.
//!
//! Every status check is logged at `info` or above (see `poll`), so a long wait
//! leaves a readable trail in `~/.local/state/runwatch/runwatch.log`.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,runwatch=debug,runwatch_core=debug";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    File(PathBuf),
    Stderr,
}

/// `~/.local/state/runwatch/runwatch.log`; parent directories are created.
pub fn default_log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("runwatch")?;
    Ok(xdg_dirs.place_state_file("runwatch.log")?)
}

/// Log file handle; each writer is a clone, falling back to stderr if cloning fails.
struct SharedFile(fs::File);

enum FileOrStderr {
    File(fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for SharedFile {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStderr::File)
            .unwrap_or(FileOrStderr::Stderr)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to `dest`. `RUST_LOG` overrides the
/// default filter. Fails if the log file cannot be opened.
pub fn init(dest: &LogDestination) -> Result<()> {
    let writer = match dest {
        LogDestination::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(SharedFile(file))
        }
        LogDestination::Stderr => BoxMakeWriter::new(io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialized: {}", e))?;

    if let LogDestination::File(path) = dest {
        tracing::info!("runwatch logging initialized at {}", path.display());
    }
    Ok(())
}

/// Log to the default file; on failure (e.g. state dir unwritable) fall back to
/// stderr so a watcher still reports progress.
pub fn init_logging() {
    let file = default_log_path().and_then(|path| init(&LogDestination::File(path)));
    if let Err(e) = file {
        let _ = init(&LogDestination::Stderr);
        tracing::warn!("file logging unavailable, using stderr: {:#}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_destination_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("runwatch.log");
        // A global subscriber may already exist in this test binary; the file is
        // still created before installation is attempted.
        let _ = init(&LogDestination::File(path.clone()));
        assert!(path.exists());
    }
}
