use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid request at line {line}")]
    InvalidRequest { line: usize },
    #[error("invalid header at line {line}")]
    InvalidHeader { line: usize },
    #[error("expected blank line between headers and body at line {line}")]
    MissingHeaderBodySeparator { line: usize },
    #[error("invalid variable definition at line {line}")]
    InvalidVariable { line: usize },
    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read scenario file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Line number the error points at, when it refers to scenario content.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidRequest { line }
            | Self::InvalidHeader { line }
            | Self::MissingHeaderBodySeparator { line }
            | Self::InvalidVariable { line }
            | Self::Read { line, .. } => Some(*line),
            Self::ReadFile { .. } => None,
        }
    }
}
