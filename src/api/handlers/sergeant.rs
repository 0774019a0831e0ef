use std::sync::Arc;

use axum::{extract::State, Json};

use super::{command_jobs_response, report_job_response, work_cache_response};
use crate::api::middleware::JsonBody;
use crate::error::TroopError;
use crate::models::*;
use crate::node::Sergeant;

pub async fn info(State(sergeant): State<Arc<Sergeant>>) -> Json<InfoResponse<SergeantInfo>> {
    Json(InfoResponse {
        result: Outcome::Success,
        info: sergeant.info(),
    })
}

pub async fn get_report(State(sergeant): State<Arc<Sergeant>>) -> Json<ReportJobResponse> {
    report_job_response(sergeant.report())
}

/// Store the report job and pass it on to every private. Delivery failures
/// are logged only; the write succeeds regardless.
pub async fn put_report(
    State(sergeant): State<Arc<Sergeant>>,
    JsonBody(input): JsonBody<PutReportJob>,
) -> Result<Json<ReportJobResponse>, TroopError> {
    let stored = sergeant.put_report(input.report_job).await;
    Ok(report_job_response(Some(stored)))
}

pub async fn get_commands(State(sergeant): State<Arc<Sergeant>>) -> Json<CommandJobsResponse> {
    command_jobs_response(sergeant.commands())
}

pub async fn put_commands(
    State(sergeant): State<Arc<Sergeant>>,
    JsonBody(input): JsonBody<PutCommandJobs>,
) -> Result<Json<CommandJobsResponse>, TroopError> {
    let stored = sergeant.put_commands(input.command_jobs).await;
    Ok(command_jobs_response(stored))
}

pub async fn work_cache(State(sergeant): State<Arc<Sergeant>>) -> Json<WorkCacheResponse> {
    work_cache_response(sergeant.recent_work())
}
