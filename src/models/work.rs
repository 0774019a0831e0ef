use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single reading submitted by a child. Values are not range-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkReport {
    pub sensor: String,
    pub value: f64,
}

/// A reading accepted by a parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkRecord {
    pub child_id: String,
    pub sensor: String,
    pub value: f64,
    pub received_at: DateTime<Utc>,
}

impl WorkRecord {
    pub fn report(&self) -> WorkReport {
        WorkReport {
            sensor: self.sensor.clone(),
            value: self.value,
        }
    }
}
