use std::sync::Arc;

use axum::{extract::State, Json};

use super::{command_jobs_response, report_job_response, work_cache_response};
use crate::api::middleware::JsonBody;
use crate::error::TroopError;
use crate::models::*;
use crate::node::Commander;

pub async fn info(State(commander): State<Arc<Commander>>) -> Json<InfoResponse<CommanderInfo>> {
    Json(InfoResponse {
        result: Outcome::Success,
        info: commander.info(),
    })
}

pub async fn campaigns(State(commander): State<Arc<Commander>>) -> Json<CampaignsResponse> {
    Json(CampaignsResponse {
        result: Outcome::Success,
        campaigns: commander.campaigns(),
    })
}

pub async fn get_report(State(commander): State<Arc<Commander>>) -> Json<ReportJobResponse> {
    report_job_response(commander.report())
}

pub async fn put_report(
    State(commander): State<Arc<Commander>>,
    JsonBody(input): JsonBody<PutReportJob>,
) -> Result<Json<ReportJobResponse>, TroopError> {
    let stored = commander.put_report(input.report_job).await;
    Ok(report_job_response(Some(stored)))
}

pub async fn get_commands(State(commander): State<Arc<Commander>>) -> Json<CommandJobsResponse> {
    command_jobs_response(commander.commands())
}

pub async fn put_commands(
    State(commander): State<Arc<Commander>>,
    JsonBody(input): JsonBody<PutCommandJobs>,
) -> Result<Json<CommandJobsResponse>, TroopError> {
    let stored = commander.put_commands(input.command_jobs).await;
    Ok(command_jobs_response(stored))
}

pub async fn work_cache(State(commander): State<Arc<Commander>>) -> Json<WorkCacheResponse> {
    work_cache_response(commander.recent_work())
}
