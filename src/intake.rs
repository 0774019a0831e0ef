//! Acceptance of readings submitted by registered children.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::Utc;

use crate::error::TroopError;
use crate::models::{WorkRecord, WorkReport};
use crate::store::ChildRegistry;

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Accepts readings from registered children and keeps the most recent
/// ones, oldest dropped first once `capacity` is reached.
pub struct WorkIntake {
    cache: Mutex<VecDeque<WorkRecord>>,
    capacity: usize,
}

impl WorkIntake {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY))),
            capacity,
        }
    }

    /// Accept a reading from `child_id`, which must be registered in
    /// `registry`.
    pub fn submit(
        &self,
        registry: &ChildRegistry,
        child_id: &str,
        work: WorkReport,
    ) -> Result<WorkRecord, TroopError> {
        if !registry.contains(child_id) {
            return Err(TroopError::unknown_child(child_id));
        }

        let record = WorkRecord {
            child_id: child_id.to_string(),
            sensor: work.sensor,
            value: work.value,
            received_at: Utc::now(),
        };
        tracing::debug!(
            child_id = %child_id,
            sensor = %record.sensor,
            value = record.value,
            "work accepted"
        );

        if self.capacity > 0 {
            let mut cache = self.cache.lock().expect("work cache lock poisoned");
            while cache.len() >= self.capacity {
                cache.pop_front();
            }
            cache.push_back(record.clone());
        }
        Ok(record)
    }

    /// Cached readings, oldest first.
    pub fn recent(&self) -> Vec<WorkRecord> {
        let cache = self.cache.lock().expect("work cache lock poisoned");
        cache.iter().cloned().collect()
    }

    /// Take every cached reading, leaving the cache empty.
    pub fn drain(&self) -> Vec<WorkRecord> {
        let mut cache = self.cache.lock().expect("work cache lock poisoned");
        cache.drain(..).collect()
    }
}

impl Default for WorkIntake {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChildKind, ChildRecord};

    fn registry_with(id: &str) -> ChildRegistry {
        let registry = ChildRegistry::new(ChildKind::Private);
        registry
            .join(ChildRecord {
                id: id.to_string(),
                name: "pvt".to_string(),
                addr: "127.0.0.1".to_string(),
                port: 50000,
                sensors: vec!["random".to_string()],
            })
            .unwrap();
        registry
    }

    fn reading(value: f64) -> WorkReport {
        WorkReport {
            sensor: "random".to_string(),
            value,
        }
    }

    #[test]
    fn unknown_child_is_refused() {
        let intake = WorkIntake::default();
        let registry = registry_with("known");

        let result = intake.submit(&registry, "stranger", reading(0.5));
        assert!(matches!(result, Err(TroopError::UnknownChild { .. })));
        assert!(intake.recent().is_empty());
    }

    #[test]
    fn out_of_range_values_are_accepted() {
        let intake = WorkIntake::default();
        let registry = registry_with("known");

        let record = intake.submit(&registry, "known", reading(-1e9)).unwrap();
        assert_eq!(record.value, -1e9);
        assert_eq!(record.child_id, "known");
    }

    #[test]
    fn cache_keeps_only_the_newest_readings() {
        let intake = WorkIntake::new(2);
        let registry = registry_with("known");
        for v in [1.0, 2.0, 3.0] {
            intake.submit(&registry, "known", reading(v)).unwrap();
        }

        let values: Vec<f64> = intake.recent().iter().map(|r| r.value).collect();
        assert_eq!(values, vec![2.0, 3.0]);

        assert_eq!(intake.drain().len(), 2);
        assert!(intake.recent().is_empty());
    }
}
