use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A child registered with its parent.
///
/// The id is unique within one parent's registry. Joining again with the
/// same id replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRecord {
    pub id: String,
    pub name: String,
    pub addr: String,
    pub port: u16,
    /// Names of the sensor capabilities the child owns. May be empty
    /// (sergeants own no sensors themselves).
    #[serde(default)]
    pub sensors: Vec<String>,
}

impl ChildRecord {
    /// Base URL of the child's HTTP surface.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.addr, self.port)
    }
}

/// Which tier a registry's children belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildKind {
    Private,
    Sergeant,
}

impl ChildKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChildKind::Private => "private",
            ChildKind::Sergeant => "sergeant",
        }
    }

    /// Time allowed for one delivery to a child of this kind, given the
    /// per-child `base` timeout. A sergeant answers only after its own
    /// fan-out, which may itself take up to `base`, so it gets twice that.
    pub fn delivery_budget(&self, base: Duration) -> Duration {
        match self {
            ChildKind::Private => base,
            ChildKind::Sergeant => base.saturating_mul(2),
        }
    }

    /// Key under which a parent lists children of this kind.
    pub fn list_key(&self) -> &'static str {
        match self {
            ChildKind::Private => "pvt_list",
            ChildKind::Sergeant => "sgt_list",
        }
    }
}
