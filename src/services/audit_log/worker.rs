//! Audit log drain loop

use super::queue::AuditLogQueue;
use super::types::{AuditLogEntry, DrainReport};
use crate::config::LogDrainConfig;
use crate::services::shutdown::ShutdownSignal;
use crate::storage::AuditLogSink;
use crate::utils::error::AuthzError;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Drain loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainState {
    /// Queue empty, polling
    Idle,
    /// Writing batches
    Draining,
    /// Waiting after a failed write
    Backoff(Duration),
}

enum WriteOutcome {
    Written(usize),
    TimedOut,
    Failed(AuthzError),
}

/// Flushes the audit log queue to durable storage
pub struct LogDrainWorker {
    queue: AuditLogQueue,
    sink: Arc<dyn AuditLogSink>,
    config: LogDrainConfig,
    report: DrainReport,
}

impl LogDrainWorker {
    pub fn new(queue: AuditLogQueue, sink: Arc<dyn AuditLogSink>, config: LogDrainConfig) -> Self {
        Self {
            queue,
            sink,
            config,
            report: DrainReport::default(),
        }
    }

    /// Spawn the loop on the current runtime
    pub fn spawn(self, shutdown: ShutdownSignal) -> JoinHandle<DrainReport> {
        tokio::spawn(self.run(shutdown))
    }

    /// Run until shutdown, then drain what is left within the grace period
    pub async fn run(mut self, shutdown: ShutdownSignal) -> DrainReport {
        info!(
            batch_size = self.config.batch_size,
            "Audit log drain loop started"
        );
        let mut backoff = self.config.min_backoff();
        let mut state = DrainState::Idle;

        while !shutdown.is_triggered() {
            state = match state {
                DrainState::Idle => {
                    if !self.queue.is_empty() {
                        DrainState::Draining
                    } else {
                        tokio::select! {
                            _ = shutdown.wait() => break,
                            _ = tokio::time::sleep(self.config.poll_interval()) => DrainState::Idle,
                        }
                    }
                }
                DrainState::Draining => {
                    let batch = self.queue.pop_batch(self.config.batch_size);
                    if batch.is_empty() {
                        DrainState::Idle
                    } else {
                        match self.write_batch(&batch, &shutdown).await {
                            Some(WriteOutcome::Written(count)) => {
                                debug!(count, "Audit log batch written");
                                self.report.written += count;
                                backoff = self.config.min_backoff();
                                DrainState::Draining
                            }
                            Some(WriteOutcome::TimedOut) => {
                                warn!(
                                    count = batch.len(),
                                    timeout = ?self.config.write_timeout(),
                                    "Audit log write timed out, re-enqueueing batch"
                                );
                                self.report.timed_out_batches += 1;
                                self.queue.requeue(batch);
                                DrainState::Draining
                            }
                            Some(WriteOutcome::Failed(e)) => {
                                self.report.failed_batches += 1;
                                self.queue.requeue(batch);
                                backoff = next_backoff(backoff, self.config.max_backoff());
                                warn!(
                                    error = %e,
                                    backoff = ?backoff,
                                    "Audit log write failed, re-enqueued batch"
                                );
                                DrainState::Backoff(backoff)
                            }
                            None => {
                                info!(
                                    count = batch.len(),
                                    "Shutdown during audit log write, re-enqueueing batch"
                                );
                                self.queue.requeue(batch);
                                break;
                            }
                        }
                    }
                }
                DrainState::Backoff(delay) => {
                    tokio::select! {
                        _ = shutdown.wait() => break,
                        _ = tokio::time::sleep(delay) => DrainState::Draining,
                    }
                }
            };
        }

        self.final_drain().await;
        self.report.remaining = self.queue.len();
        info!(
            written = self.report.written,
            remaining = self.report.remaining,
            "Audit log drain loop stopped"
        );
        self.report
    }

    /// `None` when shutdown interrupted the write
    async fn write_batch(
        &self,
        batch: &[AuditLogEntry],
        shutdown: &ShutdownSignal,
    ) -> Option<WriteOutcome> {
        let timeout = self.config.write_timeout();
        let write = tokio::time::timeout(timeout, self.sink.bulk_insert(batch, timeout));

        tokio::select! {
            biased;
            _ = shutdown.wait() => None,
            result = write => Some(classify(result)),
        }
    }

    /// Best-effort flush bounded by the shutdown grace period. Failures are
    /// logged and the remaining entries stay queued.
    async fn final_drain(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        let deadline = Instant::now() + self.config.shutdown_grace();
        info!(
            pending = self.queue.len(),
            grace = ?self.config.shutdown_grace(),
            "Final audit log drain"
        );

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!(
                    pending = self.queue.len(),
                    "Shutdown grace elapsed before audit log queue was drained"
                );
                break;
            }

            let batch = self.queue.pop_batch(self.config.batch_size);
            if batch.is_empty() {
                break;
            }

            let timeout = remaining.min(self.config.write_timeout());
            let result = tokio::time::timeout(timeout, self.sink.bulk_insert(&batch, timeout)).await;
            match classify(result) {
                WriteOutcome::Written(count) => self.report.written += count,
                WriteOutcome::TimedOut => {
                    warn!(count = batch.len(), "Final audit log write timed out");
                    self.queue.requeue(batch);
                    break;
                }
                WriteOutcome::Failed(e) => {
                    warn!(error = %e, count = batch.len(), "Final audit log write failed");
                    self.queue.requeue(batch);
                    break;
                }
            }
        }
    }
}

/// Double the delay after a failed write, capped at `max`
pub(crate) fn next_backoff(current: Duration, max: Duration) -> Duration {
    current.saturating_mul(2).min(max)
}

fn classify(
    result: std::result::Result<crate::utils::error::Result<usize>, tokio::time::error::Elapsed>,
) -> WriteOutcome {
    match result {
        Ok(Ok(count)) => WriteOutcome::Written(count),
        Ok(Err(AuthzError::Timeout(_))) | Err(_) => WriteOutcome::TimedOut,
        Ok(Err(e)) => WriteOutcome::Failed(e),
    }
}
