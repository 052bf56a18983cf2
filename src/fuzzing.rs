//! Entry points for the fuzz targets under `fuzz/`.
use std::collections::BTreeMap;
use std::time::Duration;

use crate::args::parsers::parse_duration_arg;
use crate::config::environment_from_entries;
use crate::domain::Environment;
use crate::error::{AppError, AppResult};
use crate::variables::{evaluate, function_registry};

/// Parses a duration argument (e.g. `10s`, `500ms`).
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_arg_input(input: &str) -> AppResult<Duration> {
    parse_duration_arg(input)
}

/// Evaluates `input` as the value of a single scenario variable.
///
/// # Errors
///
/// Returns an error when a function placeholder cannot be resolved.
pub fn evaluate_variable_input(input: &str) -> AppResult<String> {
    let raw = BTreeMap::from([("FUZZ".to_owned(), input.to_owned())]);
    let mut values = evaluate(&raw, function_registry())?;
    Ok(values.remove("FUZZ").unwrap_or_default())
}

/// Decodes one environment object from JSON.
///
/// # Errors
///
/// Returns an error when the JSON or the environment layout is invalid.
pub fn environment_from_json_input(input: &str) -> AppResult<Environment> {
    let entries = serde_json::from_str(input).map_err(AppError::from)?;
    Ok(environment_from_entries(entries)?)
}
