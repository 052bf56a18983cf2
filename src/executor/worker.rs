use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{Instant, sleep_until};
use tracing::debug;

use crate::domain::{Collection, Execution};
use crate::shutdown::ShutdownReceiver;

use super::scenario::execute_scenario;

pub(super) struct WorkerContext {
    pub(super) worker_id: usize,
    pub(super) client: Client,
    pub(super) collection: Arc<Collection>,
    pub(super) results_tx: mpsc::Sender<Execution>,
    pub(super) shutdown_rx: ShutdownReceiver,
    pub(super) deadline: Instant,
    pub(super) pause: Duration,
}

/// Loops iterations until the deadline passes or shutdown is signalled.
///
/// Both are checked only before starting an iteration; a running iteration
/// always completes. The pause between iterations never extends past the deadline.
pub(super) async fn run_worker(mut context: WorkerContext) {
    let mut iterations: u64 = 0;
    loop {
        if Instant::now() >= context.deadline || shutdown_requested(&mut context.shutdown_rx) {
            break;
        }

        let execution = execute_scenario(&context.client, &context.collection).await;
        iterations = iterations.saturating_add(1);
        if context.results_tx.send(execution).await.is_err() {
            break;
        }

        let resume_at = Instant::now()
            .checked_add(context.pause)
            .map_or(context.deadline, |resume_at| resume_at.min(context.deadline));
        tokio::select! {
            () = sleep_until(resume_at) => {}
            Ok(()) = context.shutdown_rx.recv() => break,
        }
    }
    debug!(
        "Worker {} finished after {} iteration(s)",
        context.worker_id, iterations
    );
}

fn shutdown_requested(shutdown_rx: &mut ShutdownReceiver) -> bool {
    match shutdown_rx.try_recv() {
        Ok(()) | Err(broadcast::error::TryRecvError::Lagged(_)) => true,
        Err(broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed) => {
            false
        }
    }
}
