//! Command-line entry point: wire inputs, platform and event together

mod context;
mod run;

pub use run::{RunOptions, report_failure, run};
