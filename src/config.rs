//! Node configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default time a single delivery to one child may take.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_millis(3000);

/// Tier a node plays in the troop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Private,
    Sergeant,
    Commander,
}

impl Role {
    pub fn default_name(&self) -> &'static str {
        match self {
            Role::Private => "pvt-http",
            Role::Sergeant => "sgt-http",
            Role::Commander => "com-http",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Role::Private => 50000,
            Role::Sergeant => 51000,
            Role::Commander => 52000,
        }
    }
}

/// Identity and wiring of one node.
#[derive(Clone, Debug)]
pub struct NodeConfig {
    pub role: Role,
    pub id: String,
    pub name: String,
    /// Address the node is reachable at (and binds to).
    pub addr: String,
    pub port: u16,
    /// Base URL of the superior, e.g. `http://10.0.0.2:51000`.
    pub superior: Option<String>,
    /// Per-child bound on a single delivery.
    pub delivery_timeout: Duration,
    /// Campaign labels (commander only).
    pub campaigns: Vec<String>,
}

impl NodeConfig {
    /// Defaults for `role`, with a fresh id.
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            id: uuid::Uuid::new_v4().to_string(),
            name: role.default_name().to_string(),
            addr: "127.0.0.1".to_string(),
            port: role.default_port(),
            superior: None,
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
            campaigns: Vec::new(),
        }
    }

    /// Defaults for `role`, overridden by environment variables:
    /// `TROOPS_ID`, `TROOPS_NAME`, `TROOPS_ADDR`, `TROOPS_PORT`,
    /// `TROOPS_SUPERIOR`, `TROOPS_DELIVERY_TIMEOUT_MS`.
    pub fn from_env(role: Role) -> Self {
        let mut config = Self::for_role(role);

        if let Ok(id) = std::env::var("TROOPS_ID") {
            config.id = id;
        }
        if let Ok(name) = std::env::var("TROOPS_NAME") {
            config.name = name;
        }
        if let Ok(addr) = std::env::var("TROOPS_ADDR") {
            config.addr = addr;
        }
        if let Some(port) = std::env::var("TROOPS_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
        {
            config.port = port;
        }
        config.superior = std::env::var("TROOPS_SUPERIOR").ok();
        if let Some(ms) = std::env::var("TROOPS_DELIVERY_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.delivery_timeout = Duration::from_millis(ms);
        }

        config
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_superior(mut self, superior: impl Into<String>) -> Self {
        self.superior = Some(superior.into());
        self
    }

    pub fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    /// Where clients reach this node's own surface.
    pub fn endpoint(&self) -> String {
        match self.role {
            Role::Private => format!("http://{}:{}/private", self.addr, self.port),
            Role::Sergeant => format!("http://{}:{}", self.addr, self.port),
            Role::Commander => format!("http://{}:{}/commander", self.addr, self.port),
        }
    }
}
