use std::collections::BTreeMap;
use std::time::Duration;

use super::*;
use crate::domain::{Execution, Response, RunResult};
use crate::error::HttpError;

fn response(index: usize, name: &str, status: u16, millis: u64) -> Response {
    Response {
        index,
        name: name.to_owned(),
        status,
        duration: Duration::from_millis(millis),
        error: None,
    }
}

fn single_execution(responses: Vec<Response>) -> RunResult {
    std::iter::once(Execution::from_responses(responses)).collect()
}

fn rendered(metrics: &[Metrics], color: bool) -> Result<String, String> {
    let mut out = Vec::new();
    render_table(metrics, &mut out, color).map_err(|err| err.to_string())?;
    String::from_utf8(out).map_err(|err| err.to_string())
}

#[test]
fn aggregates_single_response() -> Result<(), String> {
    let metrics = aggregate(&single_execution(vec![response(0, "GET /users", 200, 50)]));
    let expected = Metrics {
        index: 0,
        name: "GET /users".to_owned(),
        total: 1,
        failed: 0,
        fastest: Duration::from_millis(50),
        slowest: Duration::from_millis(50),
        average: Duration::from_millis(50),
        status_codes: BTreeMap::from([(200, 1)]),
    };
    if metrics != [expected] {
        return Err(format!("Unexpected metrics: {:?}", metrics));
    }
    Ok(())
}

#[test]
fn aggregates_mixed_outcomes() -> Result<(), String> {
    let mut server_error = response(1, "POST /login", 500, 120);
    server_error.error = Some(HttpError::InvalidHeader {
        name: "X Broken".to_owned(),
    });
    let metrics = aggregate(&single_execution(vec![
        response(1, "POST /login", 200, 40),
        server_error,
        response(1, "POST /login", 404, 80),
    ]));

    let [login] = metrics.as_slice() else {
        return Err(format!("Expected one entry, got {:?}", metrics));
    };
    if login.total != 3 || login.failed != 2 {
        return Err(format!("Unexpected counts: {:?}", login));
    }
    if login.fastest != Duration::from_millis(40)
        || login.slowest != Duration::from_millis(120)
        || login.average != Duration::from_millis(80)
    {
        return Err(format!("Unexpected durations: {:?}", login));
    }
    if login.status_codes != BTreeMap::from([(200, 1), (404, 1), (500, 1)]) {
        return Err(format!("Unexpected codes: {:?}", login.status_codes));
    }
    Ok(())
}

#[test]
fn groups_by_index_across_executions() -> Result<(), String> {
    let result: RunResult = vec![
        Execution::from_responses(vec![
            response(0, "GET /ping", 200, 10),
            response(1, "GET /health", 503, 200),
        ]),
        Execution::failed(),
        Execution::from_responses(vec![
            response(0, "GET /ping", 200, 30),
            response(1, "GET /health", 200, 100),
        ]),
    ]
    .into_iter()
    .collect();

    let metrics = aggregate(&result);
    let summary: Vec<(usize, &str, usize, usize)> = metrics
        .iter()
        .map(|entry| (entry.index, entry.name.as_str(), entry.total, entry.failed))
        .collect();
    if summary != [(0, "GET /ping", 2, 0), (1, "GET /health", 2, 1)] {
        return Err(format!("Unexpected grouping: {:?}", summary));
    }
    if metrics.first().map(|entry| entry.average) != Some(Duration::from_millis(20)) {
        return Err(format!("Unexpected average: {:?}", metrics.first()));
    }
    Ok(())
}

#[test]
fn transport_failures_have_no_status_code() -> Result<(), String> {
    let mut failed = response(0, "GET /down", 0, 3);
    failed.error = Some(HttpError::InvalidHeader {
        name: "X Broken".to_owned(),
    });
    let metrics = aggregate(&single_execution(vec![failed]));
    match metrics.as_slice() {
        [entry] if entry.failed == 1 && entry.status_codes.is_empty() => Ok(()),
        other => Err(format!("Unexpected metrics: {:?}", other)),
    }
}

#[test]
fn empty_result_has_no_metrics() -> Result<(), String> {
    let metrics = aggregate(&RunResult::default());
    if !metrics.is_empty() {
        return Err(format!("Unexpected metrics: {:?}", metrics));
    }
    Ok(())
}

#[test]
fn rounds_to_nearest_millisecond() -> Result<(), String> {
    let cases = [
        (Duration::from_micros(40_499), 40),
        (Duration::from_micros(40_500), 41),
        (Duration::from_micros(400), 0),
        (Duration::ZERO, 0),
    ];
    for (input, expected) in cases {
        let rounded = round_to_millis(input);
        if rounded != Duration::from_millis(expected) {
            return Err(format!("{:?} rounded to {:?}", input, rounded));
        }
    }
    Ok(())
}

#[test]
fn formats_durations() -> Result<(), String> {
    let cases = [
        (Duration::ZERO, "0ms"),
        (Duration::from_millis(40), "40ms"),
        (Duration::from_millis(1500), "1.5s"),
        (Duration::from_millis(2000), "2s"),
        (Duration::from_millis(2050), "2.05s"),
    ];
    for (input, expected) in cases {
        let formatted = format_duration(input);
        if formatted != expected {
            return Err(format!("{:?} formatted as {}", input, formatted));
        }
    }
    Ok(())
}

#[test]
fn renders_plain_table() -> Result<(), String> {
    let metrics = aggregate(&single_execution(vec![
        response(0, "GET /users", 200, 40),
        response(0, "GET /users", 404, 80),
    ]));
    let table = rendered(&metrics, false)?;

    for expected in [
        "Name",
        "Status Codes",
        "GET /users",
        "⬆ 40ms",
        "⬇ 80ms",
        "1 × 200   1 × 404",
    ] {
        if !table.contains(expected) {
            return Err(format!("Missing '{}' in:\n{}", expected, table));
        }
    }
    if table.contains('\u{1b}') {
        return Err("Plain output must not contain escape codes".to_owned());
    }
    let widths: Vec<usize> = table
        .lines()
        .filter(|line| line.starts_with('─'))
        .map(|line| line.chars().count())
        .collect();
    if widths.len() != 3 || widths.windows(2).any(|pair| pair.first() != pair.last()) {
        return Err(format!("Borders are not aligned:\n{}", table));
    }
    Ok(())
}

#[test]
fn colored_table_uses_escape_codes() -> Result<(), String> {
    let metrics = aggregate(&single_execution(vec![response(0, "GET /", 500, 10)]));
    let table = rendered(&metrics, true)?;
    if !table.contains('\u{1b}') || !table.contains("1 × 500") {
        return Err(format!("Expected colored output:\n{}", table));
    }
    Ok(())
}

#[test]
fn empty_table_still_renders_headers() -> Result<(), String> {
    let table = rendered(&[], false)?;
    if !table.contains("Failed") || !table.contains("no responses recorded") {
        return Err(format!("Unexpected output:\n{}", table));
    }
    Ok(())
}
