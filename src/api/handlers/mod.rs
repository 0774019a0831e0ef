//! Route handlers.
//!
//! The squad handlers below are shared: a sergeant's privates, a
//! commander's sergeants and a commander's soldiers all go through them,
//! so the registry and intake contract is the same at every tier.

pub mod commander;
pub mod private;
pub mod sergeant;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};

use super::middleware::JsonBody;
use crate::error::TroopError;
use crate::models::*;
use crate::node::Squad;

// ============================================================
// Squads
// ============================================================

pub async fn join_child(
    State(squad): State<Squad>,
    JsonBody(record): JsonBody<ChildRecord>,
) -> Result<Json<AcceptedResponse>, TroopError> {
    let accepted = squad.join(record)?;
    Ok(Json(AcceptedResponse {
        result: Outcome::Success,
        accepted,
    }))
}

/// Ids of the squad's children, under `pvt_list` or `sgt_list`.
pub async fn list_children(State(squad): State<Squad>) -> Json<Value> {
    let mut body = Map::new();
    body.insert("result".to_string(), Value::from("success"));
    body.insert(
        squad.kind().list_key().to_string(),
        Value::from(squad.list()),
    );
    Json(Value::Object(body))
}

/// The child's record, echoed as it was joined.
pub async fn child_info(
    State(squad): State<Squad>,
    Path(id): Path<String>,
) -> Result<Json<ChildRecord>, TroopError> {
    squad.get(&id).map(Json)
}

pub async fn submit_work(
    State(squad): State<Squad>,
    Path(id): Path<String>,
    JsonBody(work): JsonBody<WorkReport>,
) -> Result<Json<Ack>, TroopError> {
    squad.submit_work(&id, work)?;
    Ok(Json(Ack::success()))
}

pub async fn remove_child(
    State(squad): State<Squad>,
    Path(id): Path<String>,
) -> Result<Json<RemovedResponse>, TroopError> {
    let removed = squad.remove(&id)?;
    Ok(Json(RemovedResponse {
        result: Outcome::Success,
        removed,
    }))
}

// ============================================================
// Job envelopes
// ============================================================

fn report_job_response(job: Option<ReportJob>) -> Json<ReportJobResponse> {
    Json(ReportJobResponse {
        result: Outcome::Success,
        report_job: job.into(),
    })
}

fn command_jobs_response(jobs: Vec<CommandJob>) -> Json<CommandJobsResponse> {
    Json(CommandJobsResponse {
        result: Outcome::Success,
        command_jobs: jobs,
    })
}

fn work_cache_response(works: Vec<WorkRecord>) -> Json<WorkCacheResponse> {
    Json(WorkCacheResponse {
        result: Outcome::Success,
        works,
    })
}
