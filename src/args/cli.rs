use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::EnvironmentSelector;
use crate::domain::Scenario;

use super::parsers::{parse_duration_arg, parse_env_selector, parse_positive_usize};
use super::types::PositiveUsize;

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "jetter",
    version,
    about = "Run .http scenario files once or as a timed concurrent load test."
)]
pub struct JetterArgs {
    /// Scenario file in .http format
    #[arg(short = 'f', long = "file", env = "JETTER_FILE")]
    pub file: PathBuf,

    /// Environment to load, as <file>:<name>
    #[arg(short = 'e', long = "env", value_parser = parse_env_selector)]
    pub env: Option<EnvironmentSelector>,

    /// Run for this long instead of once (supports ms/s/m/h)
    #[arg(short = 'd', long = "duration", value_parser = parse_duration_arg)]
    pub duration: Option<Duration>,

    /// Number of concurrent workers in timed mode
    #[arg(
        short = 'c',
        long = "concurrency",
        default_value = "1",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "5s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Pause between iterations of one worker (supports ms/s/m/h)
    #[arg(long = "pause", default_value = "10ms", value_parser = parse_duration_arg)]
    pub pause: Duration,

    /// Print the parsed scenario (after environment injection) and exit
    #[arg(long = "dump")]
    pub dump: bool,

    /// Enable debug logging (overridden by JETTER_LOG / RUST_LOG)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Do not print the startup banner
    #[arg(long = "no-banner")]
    pub no_banner: bool,
}

impl JetterArgs {
    /// Execution settings for a parsed collection.
    #[must_use]
    pub fn scenario(&self, collection: crate::domain::Collection) -> Scenario {
        let mut scenario = Scenario::new(
            collection,
            self.concurrency.get(),
            self.duration.unwrap_or(Duration::ZERO),
        );
        scenario.request_timeout = self.request_timeout;
        scenario.pause = self.pause;
        scenario
    }
}
