use serde::{Deserialize, Serialize};

/// Identity of a private: the sensors it can sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateInfo {
    pub id: String,
    pub name: String,
    pub addr: String,
    pub port: u16,
    pub sensors: Vec<String>,
}

/// Identity of a sergeant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SergeantInfo {
    pub id: String,
    pub name: String,
    pub addr: String,
    pub port: u16,
}

/// Identity of the commander, including the ids of its sergeants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommanderInfo {
    pub id: String,
    pub name: String,
    pub endpoint: String,
    pub addr: String,
    pub port: u16,
    /// Grouping labels. Nothing is owned through a campaign.
    pub campaigns: Vec<String>,
    /// Ids of registered sergeants.
    pub subordinates: Vec<String>,
}
