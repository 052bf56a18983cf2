//! Scenario (`.http`) file parsing.
mod state;


use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::domain::{Collection, Headers, HttpMethod, Request};
use crate::error::ParseError;

pub use state::{Action, ParseState, step};

/// Parses a scenario file from disk.
///
/// # Errors
///
/// Returns an error when the file cannot be read or its content is malformed.
pub fn parse_file(path: &Path) -> Result<Collection, ParseError> {
    let file = File::open(path).map_err(|err| ParseError::ReadFile {
        path: path.to_path_buf(),
        source: err,
    })?;
    parse(BufReader::new(file))
}

/// Parses scenario text held in memory.
///
/// # Errors
///
/// Returns an error carrying the 1-based line number of the first malformed line.
pub fn parse_str(content: &str) -> Result<Collection, ParseError> {
    parse(content.as_bytes())
}

/// Parses scenario text line by line.
///
/// # Errors
///
/// Returns an error carrying the 1-based line number of the first malformed or
/// unreadable line.
pub fn parse<R: BufRead>(reader: R) -> Result<Collection, ParseError> {
    let mut builder = CollectionBuilder::default();
    let mut state = ParseState::Start;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx.saturating_add(1);
        let line = line.map_err(|err| ParseError::Read {
            line: line_no,
            source: err,
        })?;
        let (next, action) = step(state, &line, line_no)?;
        builder.apply(action);
        state = next;
    }

    let collection = builder.finish();
    debug!(
        "Parsed {} request(s) and {} variable(s)",
        collection.requests.len(),
        collection.variables.len()
    );
    Ok(collection)
}

#[derive(Default)]
struct PendingRequest {
    name: String,
    target: Option<(HttpMethod, String)>,
    headers: Headers,
    body: String,
}

#[derive(Default)]
struct CollectionBuilder {
    requests: Vec<Request>,
    variables: BTreeMap<String, String>,
    pending: PendingRequest,
}

impl CollectionBuilder {
    fn apply(&mut self, action: Action<'_>) {
        match action {
            Action::Skip => {}
            Action::Variable { key, value } => {
                self.variables.insert(key.to_owned(), value.to_owned());
            }
            Action::StartRequest { name } => {
                self.flush();
                self.pending.name = match name {
                    Some(name) => name.to_owned(),
                    None => Request::default_name(self.requests.len().saturating_add(1)),
                };
            }
            Action::RequestLine { method, url } => {
                self.pending.target = Some((method, url.to_owned()));
            }
            Action::Header { name, value } => {
                self.pending.headers.insert(name, value);
            }
            Action::BodyLine(line) => {
                self.pending.body.push_str(line);
                self.pending.body.push('\n');
            }
        }
    }

    /// Moves the pending request into the collection if it has a method and url.
    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if let Some((method, url)) = pending.target
            && !url.is_empty()
        {
            self.requests.push(Request {
                name: pending.name,
                method,
                url,
                headers: pending.headers,
                body: pending.body,
            });
        }
    }

    fn finish(mut self) -> Collection {
        self.flush();
        Collection {
            requests: self.requests,
            variables: self.variables,
        }
    }
}
