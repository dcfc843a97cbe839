//! Delayed estimate job
//!
//! Runs the estimator on a tokio task after an artificial delay and sends
//! the result back over a channel, tagged with the job id the state manager
//! handed out. A job can be cancelled through a oneshot channel; the state
//! manager also drops results for ids it is no longer waiting on.
//!
//! Dropping an [`EstimateJob`] drops its cancel sender, which stops the task.

use crate::estimator;
use crate::models::{Estimate, MovieRecord};
use crate::{CinemaError, Result};
use rand::{rngs::SmallRng, SeedableRng};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Message sent when a job finishes
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateReady {
    pub job_id: u64,
    pub estimate: Estimate,
}

/// How a job ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Estimate computed and handed to the channel
    Delivered,
    /// Cancel signal arrived before the delay elapsed
    Cancelled,
    /// Receiver was gone when the estimate was ready
    Dropped,
}

/// Handle to a running estimate job
#[derive(Debug)]
pub struct EstimateJob {
    job_id: u64,
    cancel_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<JobOutcome>,
}

impl EstimateJob {
    /// Spawn a job that waits `delay`, estimates `record` with an RNG seeded
    /// from `seed`, and sends the result on `tx`.
    pub fn spawn(
        job_id: u64,
        record: MovieRecord,
        delay: Duration,
        seed: u64,
        tx: mpsc::Sender<EstimateReady>,
    ) -> Self {
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = &mut cancel_rx => {
                    debug!(job_id, "estimate job cancelled");
                    return JobOutcome::Cancelled;
                }
            }

            let mut rng = SmallRng::seed_from_u64(seed);
            let estimate = estimator::estimate(&record, &mut rng);

            match tx.send(EstimateReady { job_id, estimate }).await {
                Ok(()) => JobOutcome::Delivered,
                Err(_) => {
                    warn!(job_id, "estimate receiver dropped");
                    JobOutcome::Dropped
                }
            }
        });

        Self {
            job_id,
            cancel_tx: Some(cancel_tx),
            handle,
        }
    }

    /// Id this job reports with
    pub fn job_id(&self) -> u64 {
        self.job_id
    }

    /// Ask the job to stop. Has no effect once it has finished.
    pub fn cancel(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(());
        }
    }

    /// Wait for the task and report how it ended
    pub async fn join(self) -> Result<JobOutcome> {
        let job_id = self.job_id;
        self.handle
            .await
            .map_err(|e| CinemaError::TaskError(format!("Estimate job {} failed: {}", job_id, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordField;

    fn record() -> MovieRecord {
        MovieRecord::new()
            .with(RecordField::Genre, "Action Thriller")
            .with(RecordField::Score, "8.5")
            .with(RecordField::Budget, "100000000")
    }

    #[tokio::test]
    async fn test_job_delivers_after_delay() {
        let (tx, mut rx) = mpsc::channel(4);
        let job = EstimateJob::spawn(3, record(), Duration::from_millis(20), 1, tx);
        assert_eq!(job.job_id(), 3);

        let ready = rx.recv().await.expect("estimate should arrive");
        assert_eq!(ready.job_id, 3);
        assert!(ready.estimate.gross >= estimator::MIN_GROSS);
        assert_eq!(job.join().await.unwrap(), JobOutcome::Delivered);
    }

    #[tokio::test]
    async fn test_cancelled_job_never_sends() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut job = EstimateJob::spawn(1, record(), Duration::from_secs(30), 1, tx);
        job.cancel();

        assert_eq!(job.join().await.unwrap(), JobOutcome::Cancelled);
        // Sender was moved into the task, so the channel is now closed and empty
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_same_seed_same_estimate() {
        let (tx, mut rx) = mpsc::channel(4);
        let a = EstimateJob::spawn(1, record(), Duration::from_millis(1), 99, tx.clone());
        let b = EstimateJob::spawn(2, record(), Duration::from_millis(1), 99, tx);

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.estimate.gross, second.estimate.gross);

        a.join().await.unwrap();
        b.join().await.unwrap();
    }
}
