use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::{Environment, Security};
use crate::error::ConfigError;

/// Top-level key holding auth definitions; every other key is a plain variable.
const SECURITY_KEY: &str = "Security";

/// `<filepath>:<environmentName>` as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentSelector {
    pub path: PathBuf,
    pub name: String,
}

impl std::str::FromStr for EnvironmentSelector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(path), Some(name), None) if !path.is_empty() && !name.is_empty() => Ok(Self {
                path: PathBuf::from(path),
                name: name.to_owned(),
            }),
            _ => Err(ConfigError::InvalidSelector {
                value: s.to_owned(),
            }),
        }
    }
}

/// Loads the environment named by a `<file>:<name>` selector.
///
/// # Errors
///
/// Returns an error when the selector is malformed, the file cannot be read or
/// parsed, or the environment does not exist.
pub fn load_environment(selector: &str) -> Result<Environment, ConfigError> {
    let selector: EnvironmentSelector = selector.parse()?;
    load_environment_file(&selector.path, &selector.name)
}

/// Loads environment `name` from the JSON file at `path`.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed, or the environment
/// does not exist or contains non-string variables.
pub fn load_environment_file(path: &Path, name: &str) -> Result<Environment, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|err| ConfigError::ReadEnvironment {
        path: path.to_path_buf(),
        source: err,
    })?;
    let mut environments: BTreeMap<String, BTreeMap<String, Value>> =
        serde_json::from_str(&content).map_err(|err| ConfigError::ParseEnvironment {
            path: path.to_path_buf(),
            source: err,
        })?;
    let entries = environments
        .remove(name)
        .ok_or_else(|| ConfigError::EnvironmentNotFound {
            name: name.to_owned(),
        })?;
    environment_from_entries(entries)
}

/// Splits one environment object into auth settings and string variables.
///
/// # Errors
///
/// Returns an error when `Security` is malformed or a variable is not a string.
pub fn environment_from_entries(
    entries: BTreeMap<String, Value>,
) -> Result<Environment, ConfigError> {
    let mut environment = Environment::default();
    for (key, value) in entries {
        if key == SECURITY_KEY {
            environment.security = serde_json::from_value::<Security>(value)
                .map_err(|err| ConfigError::InvalidSecurity { source: err })?;
            continue;
        }
        match value {
            Value::String(text) => {
                environment.variables.insert(key, text);
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
                return Err(ConfigError::NonStringVariable { key });
            }
        }
    }
    Ok(environment)
}
