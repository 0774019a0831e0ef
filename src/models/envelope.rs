//! Response bodies shared by every tier.

use serde::{Deserialize, Serialize};

use super::{ChildRecord, CommandJob, Order, ReportJob, WorkRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failed,
}

/// A value that may not have been set yet. Unset values serialize as `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrEmpty<T> {
    Set(T),
    Empty {},
}

impl<T> From<Option<T>> for OrEmpty<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => OrEmpty::Set(v),
            None => OrEmpty::Empty {},
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub result: Outcome,
}

impl Ack {
    pub fn success() -> Self {
        Self {
            result: Outcome::Success,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Failure {
    pub result: Outcome,
    pub msg: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse<T> {
    pub result: Outcome,
    pub info: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedResponse {
    pub result: Outcome,
    pub accepted: ChildRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovedResponse {
    pub result: Outcome,
    pub removed: ChildRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportJobResponse {
    pub result: Outcome,
    pub report_job: OrEmpty<ReportJob>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandJobsResponse {
    pub result: Outcome,
    pub command_jobs: Vec<CommandJob>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub result: Outcome,
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkCacheResponse {
    pub result: Outcome,
    pub works: Vec<WorkRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignsResponse {
    pub result: Outcome,
    pub campaigns: Vec<String>,
}

// ============================================================
// Request bodies
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutReportJob {
    pub report_job: ReportJob,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutCommandJobs {
    pub command_jobs: super::OneOrMany<CommandJob>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutOrders {
    pub orders: super::OneOrMany<Order>,
}
