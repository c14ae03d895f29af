//! Command-line front end: argument parsing, file layout and the run report.

pub mod app;
pub mod args;

pub use app::{run, RunReport};
pub use args::{Cli, OutputFormat, RunConfig};
