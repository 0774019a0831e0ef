use std::sync::Arc;

use axum::{extract::State, Json};

use super::report_job_response;
use crate::api::middleware::JsonBody;
use crate::error::TroopError;
use crate::models::*;
use crate::node::Private;

pub async fn info(State(private): State<Arc<Private>>) -> Json<InfoResponse<PrivateInfo>> {
    Json(InfoResponse {
        result: Outcome::Success,
        info: private.info(),
    })
}

pub async fn get_orders(State(private): State<Arc<Private>>) -> Json<OrdersResponse> {
    Json(OrdersResponse {
        result: Outcome::Success,
        orders: private.orders(),
    })
}

/// Replace the orders. `orders` may be one object or a list; the response
/// always carries the accepted list.
pub async fn put_orders(
    State(private): State<Arc<Private>>,
    JsonBody(input): JsonBody<PutOrders>,
) -> Result<Json<OrdersResponse>, TroopError> {
    let orders = private.put_orders(input.orders);
    Ok(Json(OrdersResponse {
        result: Outcome::Success,
        orders,
    }))
}

pub async fn get_report(State(private): State<Arc<Private>>) -> Json<ReportJobResponse> {
    report_job_response(private.report())
}

pub async fn put_report(
    State(private): State<Arc<Private>>,
    JsonBody(input): JsonBody<PutReportJob>,
) -> Result<Json<ReportJobResponse>, TroopError> {
    Ok(report_job_response(Some(private.put_report(input.report_job))))
}
