use std::collections::BTreeMap;
use std::fmt;

use crate::error::ResolveError;
use crate::variables;

use super::Environment;

/// Request methods accepted on a scenario request line. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == token)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// Request headers in declaration order.
///
/// Names are kept exactly as declared (case-sensitive, trimmed). Setting a name
/// that already exists replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut String)> {
        self.0
            .iter_mut()
            .map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// One HTTP request template declared in a scenario file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: String,
}

impl Request {
    #[must_use]
    pub fn default_name(position: usize) -> String {
        format!("Request #{}", position)
    }

    fn write_block(&self, out: &mut String) {
        out.push_str("### ");
        out.push_str(&self.name);
        out.push('\n');
        out.push_str(self.method.as_str());
        out.push(' ');
        out.push_str(&self.url);
        out.push('\n');
        for (name, value) in self.headers.iter() {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        if !self.body.is_empty() {
            out.push('\n');
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
        }
    }
}

/// A parsed scenario: ordered request templates plus the raw variable table.
///
/// Variable values are stored unevaluated; function placeholders are resolved
/// per iteration by [`Collection::evaluate_variables`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    pub requests: Vec<Request>,
    pub variables: BTreeMap<String, String>,
}

impl Collection {
    /// Resolves every function placeholder in the variable table.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending variable when a placeholder uses an
    /// unknown namespace or function, or when the function rejects its argument.
    pub fn evaluate_variables(&self) -> Result<BTreeMap<String, String>, ResolveError> {
        variables::evaluate(&self.variables, variables::function_registry())
    }

    /// Adds environment variables that the collection does not already declare.
    pub fn merge_environment_variables(&mut self, env: &Environment) {
        for (key, value) in &env.variables {
            self.variables
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    /// Serializes the collection back into scenario file syntax.
    ///
    /// Variables that cannot be written as an `@KEY = value` line (typically
    /// merged from an environment) are left out and counted in a comment, so
    /// the output always parses again.
    #[must_use]
    pub fn to_scenario_text(&self) -> String {
        let mut out = String::new();
        let mut omitted = 0usize;
        for (key, value) in &self.variables {
            if !is_declarable(key, value) {
                omitted = omitted.saturating_add(1);
                continue;
            }
            out.push('@');
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(value);
            out.push('\n');
        }
        if omitted > 0 {
            out.push_str("# ");
            out.push_str(&omitted.to_string());
            out.push_str(" variable(s) omitted: not expressible as @KEY = value\n");
        }
        for request in &self.requests {
            if !out.is_empty() {
                out.push('\n');
            }
            request.write_block(&mut out);
        }
        out
    }
}

/// Whether `@key = value` parses back to exactly this pair.
fn is_declarable(key: &str, value: &str) -> bool {
    const RESERVED: [char; 3] = ['=', '\n', '\r'];
    !key.is_empty()
        && key.trim() == key
        && !key.starts_with('@')
        && value.trim() == value
        && !key.contains(RESERVED)
        && !value.contains(RESERVED)
}
