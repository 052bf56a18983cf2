//! Core library for the `jetter` CLI.
//!
//! `jetter` runs `.http` scenario files: an ordered list of requests plus
//! `@KEY = value` variables. A scenario is parsed into a
//! [`domain::Collection`], optionally merged with an environment file and
//! OAuth2 tokens, then executed once or by concurrent workers for a fixed
//! duration. Per-request timings and status codes are aggregated into a
//! console table.
//!
//! The primary interface is the `jetter` binary; library APIs may evolve with
//! the CLI.
pub mod args;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod executor;
pub mod inject;
pub mod parser;
pub mod report;
pub mod shutdown;
pub mod shutdown_handlers;
pub mod variables;

mod system;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;

#[cfg(test)]
mod test_support;
