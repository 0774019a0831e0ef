use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

/// Periodic-reporting configuration. A node holds at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportJob {
    /// Seconds between reports.
    pub interval: NonZeroU64,
    pub encoding: Encoding,
    /// Sensors to include in a report. An empty filter includes every sensor.
    #[serde(default)]
    pub filter: Vec<ReportFilter>,
}

impl ReportJob {
    /// Whether readings of `sensor` pass this job's filter.
    pub fn admits(&self, sensor: &str) -> bool {
        self.filter.is_empty() || self.filter.iter().any(|f| f.include == sensor)
    }
}

/// How reported readings are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// One `{sensor, value}` object per reading.
    Flat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    pub include: String,
}

/// A polling order: sample `sensor` every `interval` seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub sensor: String,
    pub interval: NonZeroU64,
}

/// An order addressed to every child or to one child by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandJob {
    pub target: Target,
    pub order: Order,
}

/// Who a [`CommandJob`] is meant for. Serialized as `"all"` or the child id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Target {
    All,
    Child(String),
}

impl Target {
    pub fn matches(&self, child_id: &str) -> bool {
        match self {
            Target::All => true,
            Target::Child(id) => id == child_id,
        }
    }
}

impl From<String> for Target {
    fn from(s: String) -> Self {
        if s == "all" {
            Target::All
        } else {
            Target::Child(s)
        }
    }
}

impl From<Target> for String {
    fn from(t: Target) -> Self {
        match t {
            Target::All => "all".to_string(),
            Target::Child(id) => id,
        }
    }
}

/// A request field that may carry a single object or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Canonical list form. A bare object becomes a one-element list; a
    /// list keeps its order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        OneOrMany::Many(items)
    }
}
