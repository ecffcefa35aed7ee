//! Output formatting for check results
//!
//! Report lines go to stdout, summaries to stderr.

pub mod cli;

pub use cli::{CliOutput, OutputLevel};
