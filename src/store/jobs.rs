use std::sync::RwLock;

use crate::models::{OneOrMany, ReportJob};

/// A node's job configuration: one report job and one command list.
///
/// `C` is the command type: [`crate::models::CommandJob`] on nodes with
/// children, [`crate::models::Order`] on a private. Both halves are last
/// write wins; nothing older than the current value is kept.
pub struct JobConfigStore<C> {
    report: RwLock<Option<ReportJob>>,
    commands: RwLock<Vec<C>>,
}

impl<C: Clone> JobConfigStore<C> {
    pub fn new() -> Self {
        Self {
            report: RwLock::new(None),
            commands: RwLock::new(Vec::new()),
        }
    }

    /// Replace the report job. Returns the stored value.
    pub fn put_report(&self, job: ReportJob) -> ReportJob {
        let mut report = self.report.write().expect("report job lock poisoned");
        *report = Some(job.clone());
        tracing::info!(
            interval = job.interval.get(),
            filters = job.filter.len(),
            "report job replaced"
        );
        job
    }

    /// The last stored report job, or `None` before the first write.
    pub fn report(&self) -> Option<ReportJob> {
        self.report
            .read()
            .expect("report job lock poisoned")
            .clone()
    }

    /// Replace the whole command list. A single object is stored as a
    /// one-element list. Returns the stored list.
    pub fn put_commands(&self, input: OneOrMany<C>) -> Vec<C> {
        self.replace_commands(input.into_vec())
    }

    pub fn replace_commands(&self, jobs: Vec<C>) -> Vec<C> {
        let mut commands = self.commands.write().expect("command jobs lock poisoned");
        *commands = jobs.clone();
        tracing::info!(count = jobs.len(), "command jobs replaced");
        jobs
    }

    /// The last stored command list; empty before the first write.
    pub fn commands(&self) -> Vec<C> {
        self.commands
            .read()
            .expect("command jobs lock poisoned")
            .clone()
    }
}

impl<C: Clone> Default for JobConfigStore<C> {
    fn default() -> Self {
        Self::new()
    }
}
