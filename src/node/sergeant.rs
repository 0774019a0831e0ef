use std::sync::Arc;

use crate::config::NodeConfig;
use crate::courier::Courier;
use crate::intake::WorkIntake;
use crate::models::{
    ChildKind, ChildRecord, CommandJob, OneOrMany, ReportJob, SergeantInfo, WorkRecord,
};
use crate::propagate::JobPropagator;
use crate::store::JobConfigStore;

use super::Squad;

/// Mid-tier node: a squad of privates plus the jobs handed down to them.
pub struct Sergeant {
    info: SergeantInfo,
    soldiers: Squad,
    intake: Arc<WorkIntake>,
    jobs: JobConfigStore<CommandJob>,
    propagator: JobPropagator,
}

impl Sergeant {
    pub fn new(config: &NodeConfig, courier: Arc<dyn Courier>) -> Self {
        let intake = Arc::new(WorkIntake::default());
        Self {
            info: SergeantInfo {
                id: config.id.clone(),
                name: config.name.clone(),
                addr: config.addr.clone(),
                port: config.port,
            },
            soldiers: Squad::new(ChildKind::Private, Arc::clone(&intake)),
            intake,
            jobs: JobConfigStore::new(),
            propagator: JobPropagator::new(courier, config.delivery_timeout),
        }
    }

    pub fn info(&self) -> SergeantInfo {
        self.info.clone()
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    /// What this sergeant announces when joining the commander.
    pub fn record(&self) -> ChildRecord {
        ChildRecord {
            id: self.info.id.clone(),
            name: self.info.name.clone(),
            addr: self.info.addr.clone(),
            port: self.info.port,
            sensors: Vec::new(),
        }
    }

    pub fn soldiers(&self) -> &Squad {
        &self.soldiers
    }

    pub fn intake(&self) -> &WorkIntake {
        &self.intake
    }

    /// Store the report job, then hand it to every private.
    pub async fn put_report(&self, job: ReportJob) -> ReportJob {
        let stored = self.jobs.put_report(job);
        let round = self
            .propagator
            .distribute_report(self.soldiers.registry(), &stored)
            .await;
        tracing::info!(
            delivered = round.delivered.len(),
            failed = round.failed.len(),
            "report job propagated"
        );
        stored
    }

    pub fn report(&self) -> Option<ReportJob> {
        self.jobs.report()
    }

    /// Replace the command jobs, then hand each private the orders aimed
    /// at it.
    pub async fn put_commands(&self, input: OneOrMany<CommandJob>) -> Vec<CommandJob> {
        let stored = self.jobs.put_commands(input);
        let round = self
            .propagator
            .distribute_commands(self.soldiers.registry(), &stored)
            .await;
        tracing::info!(
            delivered = round.delivered.len(),
            failed = round.failed.len(),
            "command jobs propagated"
        );
        stored
    }

    pub fn commands(&self) -> Vec<CommandJob> {
        self.jobs.commands()
    }

    pub fn recent_work(&self) -> Vec<WorkRecord> {
        self.intake.recent()
    }
}
