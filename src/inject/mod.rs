//! Environment merging and OAuth2 token injection.
mod oauth2;


use std::collections::BTreeMap;

use crate::domain::{Collection, Environment};
use crate::error::InjectError;
use crate::variables::find_calls;

pub use oauth2::{OAuth2TokenProvider, TokenProvider, TokenResponse};

const AUTHORIZATION_HEADER: &str = "Authorization";
const AUTH_PLACEHOLDER_PREFIX: &str = "{{$auth.token(";
const AUTH_NAMESPACE: &str = "auth";
const AUTH_FUNCTION: &str = "token";

/// Merges `env` into `collection` and replaces `{{$auth.token("<id>")}}`
/// placeholders in `Authorization` headers with fetched access tokens.
///
/// Each auth id is fetched at most once per call.
///
/// # Errors
///
/// Returns an error when a referenced auth id is missing from the environment,
/// a placeholder is malformed, or the token provider fails.
pub async fn inject(
    collection: &mut Collection,
    env: &Environment,
    provider: &dyn TokenProvider,
) -> Result<(), InjectError> {
    collection.merge_environment_variables(env);

    let mut tokens: BTreeMap<String, String> = BTreeMap::new();
    for request in &mut collection.requests {
        for (name, value) in request.headers.iter_mut() {
            if name != AUTHORIZATION_HEADER || !value.contains(AUTH_PLACEHOLDER_PREFIX) {
                continue;
            }
            let rewritten = replace_auth_placeholders(value, env, provider, &mut tokens).await?;
            tracing::debug!("Injected token into '{}'", request.name);
            *value = rewritten;
        }
    }
    Ok(())
}

async fn replace_auth_placeholders(
    value: &str,
    env: &Environment,
    provider: &dyn TokenProvider,
    tokens: &mut BTreeMap<String, String>,
) -> Result<String, InjectError> {
    let calls: Vec<_> = find_calls(value)
        .into_iter()
        .filter(|call| call.namespace == AUTH_NAMESPACE && call.function == AUTH_FUNCTION)
        .collect();
    if calls.is_empty() {
        return Err(malformed(value));
    }

    let mut out = String::with_capacity(value.len());
    let mut cursor = 0;
    for call in calls {
        let auth_id = quoted_argument(call.argument).ok_or_else(|| malformed(value))?;
        let token = match tokens.get(auth_id) {
            Some(token) => token.clone(),
            None => {
                let auth = env.security.auth.get(auth_id).ok_or_else(|| {
                    InjectError::AuthNotFound {
                        auth_id: auth_id.to_owned(),
                    }
                })?;
                let token =
                    provider
                        .fetch_token(auth)
                        .await
                        .map_err(|err| InjectError::Token {
                            auth_id: auth_id.to_owned(),
                            source: Box::new(err),
                        })?;
                tokens.insert(auth_id.to_owned(), token.clone());
                token
            }
        };
        out.push_str(value.get(cursor..call.start).unwrap_or_default());
        out.push_str(&token);
        cursor = call.end;
    }
    out.push_str(value.get(cursor..).unwrap_or_default());
    Ok(out)
}

fn quoted_argument(argument: &str) -> Option<&str> {
    let inner = argument.trim().strip_prefix('"')?.strip_suffix('"')?;
    if inner.is_empty() || inner.contains('"') {
        return None;
    }
    Some(inner)
}

fn malformed(value: &str) -> InjectError {
    InjectError::MalformedAuthPlaceholder {
        value: value.to_owned(),
    }
}
