use std::sync::Arc;

use crate::config::NodeConfig;
use crate::courier::Courier;
use crate::intake::WorkIntake;
use crate::models::{ChildKind, CommandJob, CommanderInfo, OneOrMany, ReportJob, WorkRecord};
use crate::propagate::JobPropagator;
use crate::store::JobConfigStore;

use super::Squad;

/// Root node. Sergeants join as subordinates, privates may join directly
/// as soldiers; jobs propagate to both squads.
pub struct Commander {
    id: String,
    name: String,
    endpoint: String,
    addr: String,
    port: u16,
    campaigns: Vec<String>,
    subordinates: Squad,
    soldiers: Squad,
    intake: Arc<WorkIntake>,
    jobs: JobConfigStore<CommandJob>,
    propagator: JobPropagator,
}

impl Commander {
    pub fn new(config: &NodeConfig, courier: Arc<dyn Courier>) -> Self {
        let intake = Arc::new(WorkIntake::default());
        Self {
            id: config.id.clone(),
            name: config.name.clone(),
            endpoint: config.endpoint(),
            addr: config.addr.clone(),
            port: config.port,
            campaigns: config.campaigns.clone(),
            subordinates: Squad::new(ChildKind::Sergeant, Arc::clone(&intake)),
            soldiers: Squad::new(ChildKind::Private, Arc::clone(&intake)),
            intake,
            jobs: JobConfigStore::new(),
            propagator: JobPropagator::new(courier, config.delivery_timeout),
        }
    }

    pub fn info(&self) -> CommanderInfo {
        CommanderInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            endpoint: self.endpoint.clone(),
            addr: self.addr.clone(),
            port: self.port,
            campaigns: self.campaigns.clone(),
            subordinates: self.subordinates.list(),
        }
    }

    pub fn campaigns(&self) -> Vec<String> {
        self.campaigns.clone()
    }

    pub fn subordinates(&self) -> &Squad {
        &self.subordinates
    }

    pub fn soldiers(&self) -> &Squad {
        &self.soldiers
    }

    /// Store the report job, then hand it to sergeants and soldiers alike.
    pub async fn put_report(&self, job: ReportJob) -> ReportJob {
        let stored = self.jobs.put_report(job);
        let (sergeants, soldiers) = tokio::join!(
            self.propagator
                .distribute_report(self.subordinates.registry(), &stored),
            self.propagator
                .distribute_report(self.soldiers.registry(), &stored),
        );
        let round = sergeants.merge(soldiers);
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

    /// Replace the command jobs, then propagate them. Sergeants re-fan the
    /// jobs to their own privates.
    pub async fn put_commands(&self, input: OneOrMany<CommandJob>) -> Vec<CommandJob> {
        let stored = self.jobs.put_commands(input);
        let (sergeants, soldiers) = tokio::join!(
            self.propagator
                .distribute_commands(self.subordinates.registry(), &stored),
            self.propagator
                .distribute_commands(self.soldiers.registry(), &stored),
        );
        let round = sergeants.merge(soldiers);
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
