//! Upward relay of readings from a sergeant to its commander.
//!
//! Paced by the sergeant's report job: every `interval` seconds the cached
//! readings are taken, filtered and posted to the commander one by one.
//! Without a report job nothing is relayed and the cache is left alone.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::courier::Courier;

use super::Sergeant;

/// How long to wait before looking again when no report job is set.
const IDLE_WAIT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelaySummary {
    pub relayed: usize,
    pub filtered: usize,
    pub failed: usize,
}

pub struct Reporter {
    sergeant: Arc<Sergeant>,
    courier: Arc<dyn Courier>,
    superior: String,
}

impl Reporter {
    pub fn new(
        sergeant: Arc<Sergeant>,
        courier: Arc<dyn Courier>,
        superior: impl Into<String>,
    ) -> Self {
        Self {
            sergeant,
            courier,
            superior: superior.into(),
        }
    }

    /// Relay everything cached right now. Readings that fail to relay are
    /// dropped.
    pub async fn flush(&self) -> RelaySummary {
        let mut summary = RelaySummary::default();
        let Some(job) = self.sergeant.report() else {
            return summary;
        };

        for record in self.sergeant.intake().drain() {
            if !job.admits(&record.sensor) {
                summary.filtered += 1;
                continue;
            }
            match self
                .courier
                .relay(&self.superior, self.sergeant.id(), &record.report())
                .await
            {
                Ok(()) => summary.relayed += 1,
                Err(e) => {
                    tracing::warn!(
                        child_id = %record.child_id,
                        sensor = %record.sensor,
                        error = %e,
                        "relay failed"
                    );
                    summary.failed += 1;
                }
            }
        }

        if summary != RelaySummary::default() {
            tracing::debug!(
                relayed = summary.relayed,
                filtered = summary.filtered,
                failed = summary.failed,
                "relay round finished"
            );
        }
        summary
    }

    /// One scheduled round. A panic inside the round is logged and the
    /// round's readings are lost; `None` marks such a round.
    pub async fn round(&self) -> Option<RelaySummary> {
        match AssertUnwindSafe(self.flush()).catch_unwind().await {
            Ok(summary) => Some(summary),
            Err(_) => {
                tracing::error!(superior = %self.superior, "relay round panicked");
                None
            }
        }
    }

    /// Run relay rounds forever on a background task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!(superior = %self.superior, "relay started");
            loop {
                let wait = self
                    .sergeant
                    .report()
                    .map(|job| Duration::from_secs(job.interval.get()))
                    .unwrap_or(IDLE_WAIT);
                tokio::time::sleep(wait).await;
                self.round().await;
            }
        })
    }
}
