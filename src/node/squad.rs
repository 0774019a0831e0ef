use std::sync::Arc;

use crate::error::TroopError;
use crate::intake::WorkIntake;
use crate::models::{ChildKind, ChildRecord, WorkRecord, WorkReport};
use crate::store::ChildRegistry;

/// The children of one kind under a parent, plus the intake their readings
/// go to. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Squad {
    registry: Arc<ChildRegistry>,
    intake: Arc<WorkIntake>,
}

impl Squad {
    pub fn new(kind: ChildKind, intake: Arc<WorkIntake>) -> Self {
        Self {
            registry: Arc::new(ChildRegistry::new(kind)),
            intake,
        }
    }

    pub fn kind(&self) -> ChildKind {
        self.registry.kind()
    }

    pub fn registry(&self) -> &ChildRegistry {
        &self.registry
    }

    pub fn join(&self, record: ChildRecord) -> Result<ChildRecord, TroopError> {
        self.registry.join(record)
    }

    pub fn list(&self) -> Vec<String> {
        self.registry.list()
    }

    pub fn get(&self, id: &str) -> Result<ChildRecord, TroopError> {
        self.registry.get(id)
    }

    pub fn remove(&self, id: &str) -> Result<ChildRecord, TroopError> {
        self.registry.remove(id)
    }

    pub fn submit_work(&self, id: &str, work: WorkReport) -> Result<WorkRecord, TroopError> {
        self.intake.submit(&self.registry, id, work)
    }
}
