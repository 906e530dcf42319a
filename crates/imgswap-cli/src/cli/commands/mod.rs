//! CLI command handlers. Each command is in its own file.

mod known;
mod resolve;

pub use known::run_known;
pub use resolve::run_resolve;
