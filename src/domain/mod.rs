//! Data model shared by the parser, injector, executor, and reporter.
mod collection;
mod environment;
mod run;

#[cfg(test)]
mod tests;

pub use collection::{Collection, Headers, HttpMethod, Request};
pub use environment::{AuthConfig, Environment, Security};
pub use run::{Execution, Response, RunResult, Scenario};
