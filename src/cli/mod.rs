//! Command-line interface for the headline analyzer.

mod commands;
mod helpers;

pub use commands::{is_verbose, run};
