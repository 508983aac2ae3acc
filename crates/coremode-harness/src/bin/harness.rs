//! Entry point. The transcript on stdout is the result: the process exits
//! zero whatever the kernel supports, and diagnostics go to stderr so they
//! never interleave with the narration.

use std::io;

use coremode_harness::Reporter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn main() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut report = Reporter::new(io::stdout());
    coremode_harness::run(&mut report);
}
