//! Resolution of `{{$namespace.function(arg)}}` placeholders in variable values.
mod random;
mod registry;
mod scan;


use std::collections::BTreeMap;

use crate::error::ResolveError;

pub use registry::{FunctionRegistry, RegistryError, VariableFunction, function_registry};
pub use scan::{FunctionCall, find_calls};

/// Evaluates every raw variable value against `registry`.
///
/// Only function-call placeholders are replaced. A plain `{{OTHER}}` reference
/// inside a value is left untouched; variables never see each other's values.
///
/// # Errors
///
/// Returns the first failure, naming the variable that caused it.
pub fn evaluate(
    raw: &BTreeMap<String, String>,
    registry: &FunctionRegistry,
) -> Result<BTreeMap<String, String>, ResolveError> {
    raw.iter()
        .map(|(key, value)| {
            replace_functions(value, key, registry).map(|resolved| (key.clone(), resolved))
        })
        .collect()
}

/// Replaces function placeholders in `input` left to right, keeping literal text.
///
/// # Errors
///
/// Returns an error when a namespace or function is not registered, or when the
/// function itself fails.
pub fn replace_functions(
    input: &str,
    variable: &str,
    registry: &FunctionRegistry,
) -> Result<String, ResolveError> {
    let calls = find_calls(input);
    if calls.is_empty() {
        return Ok(input.to_owned());
    }

    let mut output = String::with_capacity(input.len());
    let mut last = 0usize;
    for call in calls {
        output.push_str(input.get(last..call.start).unwrap_or_default());
        let function = registry.resolve(variable, call.namespace, call.function)?;
        let value = function(call.argument).map_err(|err| ResolveError::Function {
            variable: variable.to_owned(),
            source: err,
        })?;
        output.push_str(&value);
        last = call.end;
    }
    output.push_str(input.get(last..).unwrap_or_default());

    Ok(output)
}
