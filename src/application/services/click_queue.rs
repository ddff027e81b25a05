//! Bounded hand-off from redirects to click recording.

use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, warn};

use super::click_recorder::ClickRecorder;
use crate::domain::RequestContext;

/// One click waiting to be recorded.
#[derive(Debug, Clone)]
pub struct ClickJob {
    pub link_id: i64,
    pub ctx: RequestContext,
}

/// Producer side of the click queue. Cheap to clone.
///
/// Enqueueing never waits: when the buffer is full the click is dropped and
/// counted under `click_record_failures_total{stage="queue_full"}`.
#[derive(Clone)]
pub struct ClickQueue {
    sender: mpsc::Sender<ClickJob>,
}

impl ClickQueue {
    /// Creates a queue holding at most `capacity` pending clicks.
    ///
    /// The receiver goes to [`run_click_worker`].
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<ClickJob>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Hands a click to the worker. Returns `false` if it was dropped.
    pub fn enqueue(&self, link_id: i64, ctx: RequestContext) -> bool {
        match self.sender.try_send(ClickJob { link_id, ctx }) {
            Ok(()) => true,
            Err(TrySendError::Full(job)) => {
                metrics::counter!("click_record_failures_total", "stage" => "queue_full")
                    .increment(1);
                warn!(link_id = job.link_id, stage = "queue_full", "Click queue full, dropping click");
                false
            }
            Err(TrySendError::Closed(job)) => {
                metrics::counter!("click_record_failures_total", "stage" => "queue_closed")
                    .increment(1);
                error!(link_id = job.link_id, stage = "queue_closed", "Click worker is gone, dropping click");
                false
            }
        }
    }
}

/// Drains the click queue with at most `concurrency` recordings in flight.
///
/// Returns once every [`ClickQueue`] handle is dropped and the recordings
/// already started have finished.
pub async fn run_click_worker(
    mut receiver: mpsc::Receiver<ClickJob>,
    recorder: Arc<ClickRecorder>,
    concurrency: usize,
) {
    let concurrency = concurrency.max(1);
    let permits = Arc::new(Semaphore::new(concurrency));

    while let Some(job) = receiver.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let recorder = recorder.clone();
        tokio::spawn(async move {
            recorder.record(job.link_id, &job.ctx).await;
            drop(permit);
        });
    }

    // All permits back means no recording is still running.
    let _ = permits.acquire_many(concurrency as u32).await;
    debug!("Click queue closed, worker stopped");
}
