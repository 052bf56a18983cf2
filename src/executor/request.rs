use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::{HeaderName, HeaderValue};
use tokio::time::Instant;
use tracing::debug;

use crate::domain::{Request, Response};
use crate::error::HttpError;

/// Sends one request and records its status and elapsed time.
///
/// Failures are recorded on the response rather than returned.
pub async fn execute_request(client: &Client, index: usize, request: &Request) -> Response {
    let mut response = Response {
        index,
        name: request.name.clone(),
        status: 0,
        duration: Duration::ZERO,
        error: None,
    };

    let built = match build_request(client, request) {
        Ok(built) => built,
        Err(err) => {
            debug!("Skipping '{}': {}", request.name, err);
            response.error = Some(err);
            return response;
        }
    };

    let start = Instant::now();
    match client.execute(built).await {
        Ok(reply) => {
            response.duration = start.elapsed();
            response.status = reply.status().as_u16();
            if let Err(err) = drain_response_body(reply).await {
                response.error = Some(classify(err));
            }
        }
        Err(err) => {
            response.duration = start.elapsed();
            debug!("Request '{}' failed: {}", request.name, err);
            response.error = Some(classify(err));
        }
    }
    response
}

fn build_request(client: &Client, request: &Request) -> Result<reqwest::Request, HttpError> {
    let url = reqwest::Url::parse(&request.url).map_err(|err| HttpError::InvalidUrl {
        url: request.url.clone(),
        source: err,
    })?;

    let mut builder = client.request(request.method.into(), url);
    for (name, value) in request.headers.iter() {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_err| {
            HttpError::InvalidHeader {
                name: name.to_owned(),
            }
        })?;
        let value = HeaderValue::from_str(value).map_err(|_err| HttpError::InvalidHeader {
            name: name.as_str().to_owned(),
        })?;
        builder = builder.header(name, value);
    }
    if !request.body.is_empty() {
        builder = builder.body(request.body.clone());
    }
    builder
        .build()
        .map_err(|err| HttpError::BuildRequestFailed { source: err })
}

fn classify(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout { source: err }
    } else {
        HttpError::RequestFailed { source: err }
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
