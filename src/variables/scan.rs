/// A `{{$namespace.function(argument)}}` occurrence inside a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionCall<'src> {
    /// Byte offset of the opening `{{`.
    pub start: usize,
    /// Byte offset just past the closing `}}`.
    pub end: usize,
    pub namespace: &'src str,
    pub function: &'src str,
    /// Raw text between the parentheses, not parsed further.
    pub argument: &'src str,
}

/// Finds all non-overlapping function placeholders, in order of appearance.
///
/// Whitespace is allowed right after `{{` and right before `}}`. The argument
/// ends at the first `)` that is followed by the closing braces.
#[must_use]
pub fn find_calls(input: &str) -> Vec<FunctionCall<'_>> {
    let mut calls = Vec::new();
    let mut search_from = 0usize;

    while let Some(offset) = input.get(search_from..).and_then(|rest| rest.find("{{")) {
        let start = search_from.saturating_add(offset);
        match match_call_at(input, start) {
            Some(call) => {
                search_from = call.end;
                calls.push(call);
            }
            None => search_from = start.saturating_add(1),
        }
    }

    calls
}

fn match_call_at(input: &str, start: usize) -> Option<FunctionCall<'_>> {
    let after_open = input.get(start..)?.strip_prefix("{{")?;
    let after_dollar = after_open.trim_start().strip_prefix('$')?;

    let (namespace, after_namespace) = take_identifier(after_dollar)?;
    let after_dot = after_namespace.strip_prefix('.')?;
    let (function, after_function) = take_identifier(after_dot)?;
    let args = after_function.strip_prefix('(')?;

    let mut cursor = 0usize;
    loop {
        let close = cursor.saturating_add(args.get(cursor..)?.find(')')?);
        let argument = args.get(..close)?;
        let tail = args.get(close.saturating_add(1)..)?;
        if argument.contains('\n') {
            return None;
        }
        let trimmed = tail.trim_start_matches(|ch: char| ch.is_whitespace() && ch != '\n');
        if let Some(rest) = trimmed.strip_prefix("}}") {
            let end = input.len().saturating_sub(rest.len());
            return Some(FunctionCall {
                start,
                end,
                namespace,
                function,
                argument,
            });
        }
        cursor = close.saturating_add(1);
    }
}

fn take_identifier(input: &str) -> Option<(&str, &str)> {
    let len = input
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
        .unwrap_or(input.len());
    if len == 0 {
        return None;
    }
    Some(input.split_at(len))
}
