//! Outbound HTTP: delivering jobs down the tree and readings up it.
//!
//! The [`Courier`] trait is the seam between the propagation logic and the
//! network. [`HttpCourier`] talks to real nodes; tests substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    ChildKind, ChildRecord, CommandJob, Order, PutCommandJobs, PutOrders, PutReportJob, ReportJob,
    WorkReport,
};

/// Delivery errors. These are logged by the caller and never reach the
/// client whose write triggered the delivery.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// What a parent sends to one child in a propagation round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Report(ReportJob),
    /// Orders for a private, which runs them itself.
    Orders(Vec<Order>),
    /// Command jobs for a sergeant, which re-distributes them.
    Commands(Vec<CommandJob>),
}

impl Dispatch {
    pub fn label(&self) -> &'static str {
        match self {
            Dispatch::Report(_) => "report",
            Dispatch::Orders(_) => "orders",
            Dispatch::Commands(_) => "commands",
        }
    }
}

/// Where a node registers itself with its superior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enlistment {
    PrivateToSergeant,
    PrivateToCommander,
    SergeantToCommander,
}

impl Enlistment {
    pub fn path(&self) -> &'static str {
        match self {
            Enlistment::PrivateToSergeant => "/pvt/join",
            Enlistment::PrivateToCommander => "/commander/soldiers",
            Enlistment::SergeantToCommander => "/commander/subordinates",
        }
    }
}

#[async_trait]
pub trait Courier: Send + Sync {
    /// Deliver `dispatch` to `child`, a child of the given kind.
    async fn deliver(
        &self,
        kind: ChildKind,
        child: &ChildRecord,
        dispatch: &Dispatch,
    ) -> Result<(), DeliveryError>;

    /// Forward one reading, authored by `author_id`, to the commander at
    /// `superior` (a base URL).
    async fn relay(
        &self,
        superior: &str,
        author_id: &str,
        work: &WorkReport,
    ) -> Result<(), DeliveryError>;
}

/// [`Courier`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpCourier {
    client: Client,
    timeout: Duration,
}

impl HttpCourier {
    /// Create a courier whose requests give up after `timeout`. Deliveries
    /// to a sergeant get [`ChildKind::delivery_budget`] instead.
    pub fn new(timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder().connect_timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    /// Register `record` with the superior at `superior` (a base URL).
    pub async fn join(
        &self,
        superior: &str,
        enlistment: Enlistment,
        record: &ChildRecord,
    ) -> Result<(), DeliveryError> {
        let url = format!("{}{}", superior.trim_end_matches('/'), enlistment.path());
        self.send(Method::POST, &url, record, self.timeout).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<(), DeliveryError> {
        let response = self
            .client
            .request(method, url)
            .timeout(timeout)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Treat any non-success status as a rejection.
    async fn handle_response(response: reqwest::Response) -> Result<(), DeliveryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Courier for HttpCourier {
    async fn deliver(
        &self,
        kind: ChildKind,
        child: &ChildRecord,
        dispatch: &Dispatch,
    ) -> Result<(), DeliveryError> {
        let base = child.base_url();
        let budget = kind.delivery_budget(self.timeout);
        match (kind, dispatch) {
            (ChildKind::Private, Dispatch::Report(job)) => {
                let url = format!("{}/private/job/report", base);
                let body = PutReportJob {
                    report_job: job.clone(),
                };
                self.send(Method::PUT, &url, &body, budget).await
            }
            (ChildKind::Sergeant, Dispatch::Report(job)) => {
                let url = format!("{}/sgt/job/report", base);
                let body = PutReportJob {
                    report_job: job.clone(),
                };
                self.send(Method::PUT, &url, &body, budget).await
            }
            (ChildKind::Private, Dispatch::Orders(orders)) => {
                let url = format!("{}/private/order", base);
                let body = PutOrders {
                    orders: orders.clone().into(),
                };
                self.send(Method::PUT, &url, &body, budget).await
            }
            (ChildKind::Sergeant, Dispatch::Commands(jobs)) => {
                let url = format!("{}/sgt/job/command", base);
                let body = PutCommandJobs {
                    command_jobs: jobs.clone().into(),
                };
                self.send(Method::PUT, &url, &body, budget).await
            }
            (kind, dispatch) => Err(DeliveryError::Rejected {
                status: StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
                body: format!("a {} cannot take {}", kind.as_str(), dispatch.label()),
            }),
        }
    }

    async fn relay(
        &self,
        superior: &str,
        author_id: &str,
        work: &WorkReport,
    ) -> Result<(), DeliveryError> {
        let url = format!(
            "{}/commander/subordinates/{}/work",
            superior.trim_end_matches('/'),
            author_id
        );
        self.send(Method::POST, &url, work, self.timeout).await
    }
}
