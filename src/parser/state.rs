use crate::domain::HttpMethod;
use crate::error::ParseError;

/// Where the parser is within the scenario text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Before the first `###` marker; only `@KEY = value` lines matter here.
    Start,
    RequestLineExpected,
    HeadersExpected,
    /// Directly after the blank line that ends the headers.
    BodyExpected,
    BodyContent,
    IgnoredBodyContent,
    ScriptBlock,
}

/// What a single line contributes to the collection being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'line> {
    Skip,
    Variable { key: &'line str, value: &'line str },
    StartRequest { name: Option<&'line str> },
    RequestLine { method: HttpMethod, url: &'line str },
    Header { name: &'line str, value: &'line str },
    BodyLine(&'line str),
}

/// Computes the next state and the action for one raw input line.
///
/// # Errors
///
/// Returns an error for a malformed variable, request, or header line.
pub fn step(
    state: ParseState,
    raw: &str,
    line_no: usize,
) -> Result<(ParseState, Action<'_>), ParseError> {
    let line = raw.trim();

    if let Some(rest) = line.strip_prefix("###") {
        let name = rest.trim_start_matches('#').trim();
        let name = (!name.is_empty()).then_some(name);
        return Ok((ParseState::RequestLineExpected, Action::StartRequest { name }));
    }

    match state {
        ParseState::Start => {
            if line.starts_with('@') {
                return variable_line(line, line_no).map(|action| (ParseState::Start, action));
            }
            Ok((ParseState::Start, Action::Skip))
        }
        ParseState::RequestLineExpected => {
            request_line(line, line_no).map(|action| (ParseState::HeadersExpected, action))
        }
        ParseState::HeadersExpected => {
            if line.is_empty() {
                return Ok((ParseState::BodyExpected, Action::Skip));
            }
            if line.starts_with('#') {
                return Ok((ParseState::HeadersExpected, Action::Skip));
            }
            header_line(line, line_no).map(|action| (ParseState::HeadersExpected, action))
        }
        ParseState::BodyExpected | ParseState::BodyContent | ParseState::IgnoredBodyContent => {
            if is_script_block_start(line) {
                return Ok((ParseState::ScriptBlock, Action::Skip));
            }
            if line.is_empty() || line.starts_with('>') || line.starts_with('<') {
                return Ok((ParseState::IgnoredBodyContent, Action::Skip));
            }
            Ok((ParseState::BodyContent, Action::BodyLine(raw.trim_end())))
        }
        ParseState::ScriptBlock => {
            if line.ends_with("%}") {
                return Ok((ParseState::IgnoredBodyContent, Action::Skip));
            }
            Ok((ParseState::ScriptBlock, Action::Skip))
        }
    }
}

fn variable_line(line: &str, line_no: usize) -> Result<Action<'_>, ParseError> {
    let mut parts = line.split('=');
    let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::InvalidVariable { line: line_no });
    };
    let key = key.trim().trim_start_matches('@').trim();
    if key.is_empty() {
        return Err(ParseError::InvalidVariable { line: line_no });
    }
    Ok(Action::Variable {
        key,
        value: value.trim(),
    })
}

fn request_line(line: &str, line_no: usize) -> Result<Action<'_>, ParseError> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(url), None, None) if url.starts_with("http") => Ok(Action::RequestLine {
            method: HttpMethod::Get,
            url,
        }),
        (Some(method), Some(url), None) => HttpMethod::from_token(method)
            .map(|method| Action::RequestLine { method, url })
            .ok_or(ParseError::InvalidRequest { line: line_no }),
        _ => Err(ParseError::InvalidRequest { line: line_no }),
    }
}

fn header_line(line: &str, line_no: usize) -> Result<Action<'_>, ParseError> {
    let (name, value) = line
        .split_once(':')
        .ok_or(ParseError::MissingHeaderBodySeparator { line: line_no })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ParseError::InvalidHeader { line: line_no });
    }
    Ok(Action::Header {
        name,
        value: value.trim(),
    })
}

fn is_script_block_start(line: &str) -> bool {
    line.starts_with("> {%") && !line.ends_with("%}")
}
