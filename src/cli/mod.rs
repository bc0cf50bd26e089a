//! CLI command implementations

pub mod dump;
pub mod error;

pub use dump::{Cli, Commands, DumpArgs};
pub use error::CliError;
