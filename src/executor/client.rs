use std::time::Duration;

use reqwest::Client;

use crate::error::HttpError;

/// Default `User-Agent` for scenario and token requests.
pub const DEFAULT_USER_AGENT: &str = concat!("jetter/", env!("CARGO_PKG_VERSION"));

/// Builds the client shared by all workers of one submit.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialised.
pub fn build_client(request_timeout: Duration) -> Result<Client, HttpError> {
    Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .timeout(request_timeout)
        .build()
        .map_err(|err| HttpError::BuildClientFailed { source: err })
}
