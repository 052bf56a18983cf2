use std::collections::BTreeMap;
use std::time::Duration;

use super::*;
use crate::error::HttpError;

fn response(index: usize, status: u16) -> Response {
    Response {
        index,
        name: Request::default_name(index.saturating_add(1)),
        status,
        duration: Duration::from_millis(5),
        error: None,
    }
}

#[test]
fn headers_keep_declaration_order() -> Result<(), String> {
    let mut headers = Headers::new();
    headers.insert("X-B", "1");
    headers.insert("X-A", "2");
    headers.insert("Content-Type", "text/plain");
    headers.insert("X-B", "3");

    let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
    if names != ["X-B", "X-A", "Content-Type"] {
        return Err(format!("Unexpected order: {:?}", names));
    }
    if headers.get("X-B") != Some("3") || headers.len() != 3 {
        return Err(format!("Unexpected headers: {:?}", headers));
    }
    if headers.get("x-b").is_some() {
        return Err("Header lookup must be case-sensitive".to_owned());
    }
    Ok(())
}

#[test]
fn method_tokens_are_case_sensitive() -> Result<(), String> {
    for method in HttpMethod::ALL {
        if HttpMethod::from_token(method.as_str()) != Some(method) {
            return Err(format!("Round trip failed for {}", method));
        }
    }
    if HttpMethod::from_token("get").is_some() || HttpMethod::from_token("TRACE").is_some() {
        return Err("Unexpected method accepted".to_owned());
    }
    Ok(())
}

#[test]
fn collection_variables_win_over_environment() -> Result<(), String> {
    let mut collection = Collection {
        requests: Vec::new(),
        variables: BTreeMap::from([("HOST".to_owned(), "http://scenario".to_owned())]),
    };
    let env = Environment {
        variables: BTreeMap::from([
            ("HOST".to_owned(), "http://env".to_owned()),
            ("TOKEN".to_owned(), "abc".to_owned()),
        ]),
        security: Security::default(),
    };
    collection.merge_environment_variables(&env);

    if collection.variables.get("HOST").map(String::as_str) != Some("http://scenario") {
        return Err(format!("Collection value overwritten: {:?}", collection.variables));
    }
    if collection.variables.get("TOKEN").map(String::as_str) != Some("abc") {
        return Err(format!("Environment value missing: {:?}", collection.variables));
    }
    Ok(())
}

#[test]
fn empty_environment_leaves_variables_alone() -> Result<(), String> {
    let mut collection = Collection {
        requests: Vec::new(),
        variables: BTreeMap::from([("A".to_owned(), "1".to_owned())]),
    };
    collection.merge_environment_variables(&Environment::default());
    if collection.variables.len() != 1 {
        return Err(format!("Unexpected variables: {:?}", collection.variables));
    }
    Ok(())
}

#[test]
fn evaluates_function_variables() -> Result<(), String> {
    let collection = Collection {
        requests: Vec::new(),
        variables: BTreeMap::from([
            ("ID".to_owned(), "{{$random.hexadecimal(6)}}".to_owned()),
            ("NAME".to_owned(), "plain".to_owned()),
        ]),
    };
    let values = collection
        .evaluate_variables()
        .map_err(|err| err.to_string())?;
    let id = values.get("ID").ok_or("Missing ID")?;
    if id.len() != 6 || values.get("NAME").map(String::as_str) != Some("plain") {
        return Err(format!("Unexpected values: {:?}", values));
    }
    Ok(())
}

#[test]
fn failures_include_error_statuses() -> Result<(), String> {
    let ok = Execution::from_responses(vec![response(0, 200), response(1, 302)]);
    if ok.any_error {
        return Err("2xx/3xx must not be failures".to_owned());
    }
    let client_error = Execution::from_responses(vec![response(0, 200), response(1, 404)]);
    if !client_error.any_error {
        return Err("4xx must be a failure".to_owned());
    }
    let mut transport = response(0, 0);
    transport.error = Some(HttpError::InvalidHeader {
        name: "X Broken".to_owned(),
    });
    if !Execution::from_responses(vec![transport]).any_error {
        return Err("Transport errors must be failures".to_owned());
    }
    Ok(())
}

#[test]
fn run_result_tracks_any_error() -> Result<(), String> {
    let clean: RunResult = vec![Execution::from_responses(vec![response(0, 200)])]
        .into_iter()
        .collect();
    if clean.any_error || clean.executions.len() != 1 {
        return Err(format!("Unexpected result: {:?}", clean));
    }

    let mut mixed = clean;
    mixed.push(Execution::failed());
    mixed.push(Execution::from_responses(vec![response(0, 200)]));
    if !mixed.any_error || mixed.executions.len() != 3 {
        return Err(format!("Unexpected result: {:?}", mixed));
    }
    Ok(())
}

#[test]
fn scenario_runs_at_least_one_worker() -> Result<(), String> {
    let scenario = Scenario::new(Collection::default(), 0, Duration::ZERO);
    if scenario.workers() != 1 {
        return Err(format!("Expected 1 worker, got {}", scenario.workers()));
    }
    let scenario = Scenario::new(Collection::default(), 4, Duration::from_secs(1));
    if scenario.workers() != 4 || scenario.pause != Duration::from_millis(10) {
        return Err(format!("Unexpected scenario: {:?}", scenario));
    }
    Ok(())
}

#[test]
fn scenario_text_parses_after_environment_merge() -> Result<(), String> {
    let mut collection = Collection {
        requests: vec![Request {
            name: "Ping".to_owned(),
            method: HttpMethod::Get,
            url: "{{HOST}}/ping".to_owned(),
            headers: Headers::new(),
            body: String::new(),
        }],
        variables: BTreeMap::from([("HOST".to_owned(), "http://localhost".to_owned())]),
    };
    let env = Environment {
        variables: BTreeMap::from([
            ("QUERY".to_owned(), "a=b".to_owned()),
            ("MULTI".to_owned(), "one\ntwo".to_owned()),
            ("PLAIN".to_owned(), "kept".to_owned()),
        ]),
        ..Environment::default()
    };
    collection.merge_environment_variables(&env);

    let text = collection.to_scenario_text();
    let reparsed = crate::parser::parse_str(&text).map_err(|err| format!("{}: {}", err, text))?;

    let expected = BTreeMap::from([
        ("HOST".to_owned(), "http://localhost".to_owned()),
        ("PLAIN".to_owned(), "kept".to_owned()),
    ]);
    if reparsed.variables != expected || reparsed.requests != collection.requests {
        return Err(format!("Unexpected reparse of:\n{}\n{:?}", text, reparsed));
    }
    if !text.contains("# 2 variable(s) omitted") {
        return Err(format!("Missing omission note:\n{}", text));
    }
    Ok(())
}
