use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment format '{value}'. Expected '<file>:<environment>'.")]
    InvalidSelector { value: String },
    #[error("Failed to read environment file '{path}': {source}")]
    ReadEnvironment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid environment content in '{path}': {source}")]
    ParseEnvironment {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("environment not found: {name}")]
    EnvironmentNotFound { name: String },
    #[error("key {key} is not a string")]
    NonStringVariable { key: String },
    #[error("invalid Security section: {source}")]
    InvalidSecurity {
        #[source]
        source: serde_json::Error,
    },
}
