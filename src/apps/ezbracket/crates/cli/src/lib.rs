//! ezbracket-cli: command-line driver for bracket votes.
//!
//! Builds one `Store`, feeds it actions from a file or stdin and prints the
//! snapshots it produces. All decisions live in `ezbracket-core`.

pub mod cli;
pub mod config;
pub mod driver;

pub use cli::Cli;
pub use config::{BracketConfig, OutputFormat};
