//! Scenario execution: single-shot or timed concurrent workers.
mod client;
mod request;
mod scenario;
mod worker;


pub use client::build_client;
pub use request::execute_request;
pub use scenario::{execute_scenario, substitute_request, substitute_variables};

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::{Execution, RunResult, Scenario};
use crate::error::{AppError, AppResult, ValidationError};
use crate::shutdown::ShutdownSender;

use worker::{WorkerContext, run_worker};

/// Buffered executions between workers and the collector.
const RESULTS_CHANNEL_CAPACITY: usize = 1000;

/// Runs `scenario` and collects every execution.
///
/// A zero duration runs exactly one iteration. Otherwise `scenario.workers()`
/// workers loop until the duration elapses or `shutdown_tx` fires.
///
/// # Errors
///
/// Returns an error when the variable table cannot be evaluated, the HTTP
/// client cannot be built, or a worker task panics. Per-request failures are
/// recorded in the result instead.
pub async fn submit(scenario: &Scenario, shutdown_tx: &ShutdownSender) -> AppResult<RunResult> {
    scenario.collection.evaluate_variables()?;
    let client = build_client(scenario.request_timeout)?;

    if scenario.duration.is_zero() {
        debug!("Running single iteration");
        let execution = execute_scenario(&client, &scenario.collection).await;
        return Ok(std::iter::once(execution).collect());
    }

    let deadline = Instant::now()
        .checked_add(scenario.duration)
        .ok_or_else(|| AppError::validation(ValidationError::DurationOverflow))?;
    let workers = scenario.workers();
    info!("Running {} worker(s) for {:?}", workers, scenario.duration);

    let (results_tx, mut results_rx) = mpsc::channel::<Execution>(RESULTS_CHANNEL_CAPACITY);
    let mut handles = Vec::with_capacity(workers);
    for worker_id in 0..workers {
        let context = WorkerContext {
            worker_id,
            client: client.clone(),
            collection: Arc::clone(&scenario.collection),
            results_tx: results_tx.clone(),
            shutdown_rx: shutdown_tx.subscribe(),
            deadline,
            pause: scenario.pause,
        };
        handles.push(tokio::spawn(run_worker(context)));
    }
    drop(results_tx);

    let mut result = RunResult::default();
    while let Some(execution) = results_rx.recv().await {
        result.push(execution);
    }
    for handle in handles {
        handle.await?;
    }

    debug!(
        "Collected {} execution(s), any_error={}",
        result.executions.len(),
        result.any_error
    );
    Ok(result)
}
