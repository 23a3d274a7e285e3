use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tempdrop_storage::{BlobStore, RecordError, RecordStore, UploadBatch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Sweep period used when none is configured
pub const DEFAULT_SWEEP_PERIOD: Duration = Duration::from_secs(3600);

/// Counts for one sweep cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Expired batches found
    pub scanned: usize,
    /// Batches whose blobs and record were removed
    pub purged: usize,
    /// Batches left in place for the next cycle
    pub failed: usize,
}

/// Background purge of expired batches
pub struct ExpirySweeper {
    records: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
    period: Duration,
}

impl ExpirySweeper {
    pub fn new(records: Arc<dyn RecordStore>, blobs: Arc<dyn BlobStore>, period: Duration) -> Self {
        Self {
            records,
            blobs,
            period,
        }
    }

    /// Spawn the sweep loop. The first cycle runs immediately; the loop
    /// exits once `shutdown` is cancelled.
    ///
    /// A cycle that overruns the period is followed straight away by the
    /// next one, without catching up on missed ticks.
    pub fn start(self: Arc<Self>, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        info!("Expiry sweeper stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        if let Err(e) = self.sweep_once().await {
                            error!(error = %e, "Expiry sweep failed");
                        }
                    }
                }
            }
        })
    }

    /// One cycle against the current time
    pub async fn sweep_once(&self) -> Result<SweepReport, RecordError> {
        self.sweep_at(Utc::now()).await
    }

    /// One cycle treating `as_of` as the current time.
    ///
    /// Only the initial scan can fail the cycle; a fault while purging one
    /// batch is logged and the remaining batches are still processed.
    pub async fn sweep_at(&self, as_of: DateTime<Utc>) -> Result<SweepReport, RecordError> {
        let expired = self.records.find_expired(as_of).await?;
        let mut report = SweepReport {
            scanned: expired.len(),
            ..SweepReport::default()
        };

        for batch in &expired {
            if self.purge(batch).await {
                report.purged += 1;
            } else {
                report.failed += 1;
            }
        }

        info!(
            as_of = %as_of,
            scanned = report.scanned,
            purged = report.purged,
            failed = report.failed,
            "Expiry sweep completed"
        );
        Ok(report)
    }

    /// Remove all blobs, then the record. The record is kept when any blob
    /// could not be removed so the next cycle can retry.
    async fn purge(&self, batch: &UploadBatch) -> bool {
        debug!(
            batch_id = %batch.id,
            expires_at = %batch.expires_at,
            "Purging expired batch"
        );

        let mut blobs_removed = true;
        for file in &batch.files {
            if let Err(e) = self.blobs.delete(&file.storage_path).await {
                error!(
                    batch_id = %batch.id,
                    stored_name = ?file.stored_name,
                    error = %e,
                    "Failed to delete expired blob"
                );
                blobs_removed = false;
            }
        }
        if !blobs_removed {
            return false;
        }

        match self.records.delete_by_id(batch.id).await {
            Ok(()) => true,
            Err(e) => {
                error!(batch_id = %batch.id, error = %e, "Failed to delete expired record");
                false
            }
        }
    }
}
