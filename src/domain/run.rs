use std::sync::Arc;
use std::time::Duration;

use crate::error::HttpError;

use super::Collection;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
/// Default pause between iterations of one timed worker.
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(10);

/// Execution parameters submitted to the executor.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub collection: Arc<Collection>,
    pub concurrency: usize,
    /// Zero runs a single iteration; anything else runs timed workers.
    pub duration: Duration,
    pub request_timeout: Duration,
    pub pause: Duration,
}

impl Scenario {
    #[must_use]
    pub fn new(collection: Collection, concurrency: usize, duration: Duration) -> Self {
        Self {
            collection: Arc::new(collection),
            concurrency,
            duration,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            pause: DEFAULT_PAUSE,
        }
    }

    #[must_use]
    pub const fn workers(&self) -> usize {
        if self.concurrency == 0 {
            1
        } else {
            self.concurrency
        }
    }
}

/// Outcome of one request inside one execution.
#[derive(Debug)]
pub struct Response {
    pub index: usize,
    pub name: String,
    /// Zero when no HTTP response was received.
    pub status: u16,
    pub duration: Duration,
    pub error: Option<HttpError>,
}

impl Response {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.error.is_some() || self.status >= 400
    }
}

/// One full pass over a collection's requests, in collection order.
#[derive(Debug, Default)]
pub struct Execution {
    pub responses: Vec<Response>,
    pub any_error: bool,
}

impl Execution {
    #[must_use]
    pub fn from_responses(responses: Vec<Response>) -> Self {
        let any_error = responses.iter().any(Response::is_failure);
        Self {
            responses,
            any_error,
        }
    }

    /// An iteration that could not produce any responses.
    #[must_use]
    pub const fn failed() -> Self {
        Self {
            responses: Vec::new(),
            any_error: true,
        }
    }
}

/// Everything a single submit produced.
#[derive(Debug, Default)]
pub struct RunResult {
    pub executions: Vec<Execution>,
    pub any_error: bool,
}

impl RunResult {
    pub fn push(&mut self, execution: Execution) {
        self.any_error |= execution.any_error;
        self.executions.push(execution);
    }
}

impl FromIterator<Execution> for RunResult {
    fn from_iter<I: IntoIterator<Item = Execution>>(iter: I) -> Self {
        let mut result = RunResult::default();
        for execution in iter {
            result.push(execution);
        }
        result
    }
}
