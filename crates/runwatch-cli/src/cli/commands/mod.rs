//! CLI command handlers. Each command is in its own file.

mod check;
mod status;
mod wait;

pub use check::run_check;
pub use status::run_status;
pub use wait::{run_wait, WaitArgs};
