use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::TroopError;
use crate::models::{ChildKind, ChildRecord};

/// Keyed store of the children that joined one parent.
///
/// Records are kept in join order so listings are reproducible. A re-join
/// keeps the original position and replaces the record.
pub struct ChildRegistry {
    kind: ChildKind,
    inner: RwLock<Roster>,
}

#[derive(Default)]
struct Roster {
    order: Vec<String>,
    records: HashMap<String, ChildRecord>,
}

impl ChildRegistry {
    pub fn new(kind: ChildKind) -> Self {
        Self {
            kind,
            inner: RwLock::new(Roster::default()),
        }
    }

    pub fn kind(&self) -> ChildKind {
        self.kind
    }

    /// Register `record`, replacing any record with the same id.
    /// Returns the stored record.
    pub fn join(&self, record: ChildRecord) -> Result<ChildRecord, TroopError> {
        if record.id.trim().is_empty() {
            return Err(TroopError::MissingId);
        }

        let mut roster = self.inner.write().expect("registry lock poisoned");
        let previous = roster.records.insert(record.id.clone(), record.clone());
        if previous.is_none() {
            roster.order.push(record.id.clone());
            tracing::info!(
                kind = self.kind.as_str(),
                child_id = %record.id,
                name = %record.name,
                "child joined"
            );
        } else {
            tracing::info!(
                kind = self.kind.as_str(),
                child_id = %record.id,
                "child re-joined, record replaced"
            );
        }
        Ok(record)
    }

    /// Ids of every registered child, in join order.
    pub fn list(&self) -> Vec<String> {
        let roster = self.inner.read().expect("registry lock poisoned");
        roster.order.clone()
    }

    /// Full records of every registered child, in join order.
    pub fn records(&self) -> Vec<ChildRecord> {
        let roster = self.inner.read().expect("registry lock poisoned");
        roster
            .order
            .iter()
            .filter_map(|id| roster.records.get(id).cloned())
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<ChildRecord, TroopError> {
        let roster = self.inner.read().expect("registry lock poisoned");
        roster
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| TroopError::unknown_child(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        let roster = self.inner.read().expect("registry lock poisoned");
        roster.records.contains_key(id)
    }

    /// Remove a child. This is the only way a record leaves the registry.
    pub fn remove(&self, id: &str) -> Result<ChildRecord, TroopError> {
        let mut roster = self.inner.write().expect("registry lock poisoned");
        let removed = roster
            .records
            .remove(id)
            .ok_or_else(|| TroopError::unknown_child(id))?;
        roster.order.retain(|existing| existing != id);
        tracing::info!(kind = self.kind.as_str(), child_id = %id, "child removed");
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        let roster = self.inner.read().expect("registry lock poisoned");
        roster.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
