use std::collections::BTreeMap;

use reqwest::Client;
use tracing::error;

use crate::domain::{Collection, Execution, Request};

use super::request::execute_request;

/// Runs one iteration: evaluates variables afresh, then sends every request
/// in collection order.
pub async fn execute_scenario(client: &Client, collection: &Collection) -> Execution {
    let values = match collection.evaluate_variables() {
        Ok(values) => values,
        Err(err) => {
            error!("Failed to evaluate variables: {}", err);
            return Execution::failed();
        }
    };

    let mut responses = Vec::with_capacity(collection.requests.len());
    for (index, template) in collection.requests.iter().enumerate() {
        let request = substitute_request(template, &values);
        responses.push(execute_request(client, index, &request).await);
    }
    Execution::from_responses(responses)
}

/// Copies `template` with `{{key}}` placeholders replaced in the URL, body,
/// and header values.
#[must_use]
pub fn substitute_request(template: &Request, values: &BTreeMap<String, String>) -> Request {
    let mut request = template.clone();
    request.url = substitute_variables(&request.url, values);
    request.body = substitute_variables(&request.body, values);
    for (_, value) in request.headers.iter_mut() {
        *value = substitute_variables(value, values);
    }
    request
}

/// Plain text replacement of `{{key}}` for every key, in key order.
#[must_use]
pub fn substitute_variables(input: &str, values: &BTreeMap<String, String>) -> String {
    if !input.contains("{{") {
        return input.to_owned();
    }
    let mut result = input.to_owned();
    for (key, value) in values {
        let placeholder = format!("{{{{{}}}}}", key);
        if result.contains(&placeholder) {
            result = result.replace(&placeholder, value);
        }
    }
    result
}
