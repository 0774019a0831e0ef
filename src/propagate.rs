//! Best-effort fan-out of stored jobs to registered children.
//!
//! A propagation round snapshots the registry, builds one [`Dispatch`] per
//! selected child and sends them all concurrently, each under its own
//! timeout. Failures are logged and counted in the returned
//! [`DeliveryRound`]; they never fail the write that started the round.
//! A child that joins while a round is in flight may or may not be part of
//! it.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::courier::{Courier, DeliveryError, Dispatch};
use crate::models::{ChildKind, ChildRecord, CommandJob, ReportJob, Target};
use crate::store::ChildRegistry;

/// Outcome of one propagation round, by child id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryRound {
    pub delivered: Vec<String>,
    pub failed: Vec<String>,
}

impl DeliveryRound {
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }

    pub fn merge(mut self, other: DeliveryRound) -> Self {
        self.delivered.extend(other.delivered);
        self.failed.extend(other.failed);
        self
    }
}

pub struct JobPropagator {
    courier: Arc<dyn Courier>,
    timeout: Duration,
}

impl JobPropagator {
    pub fn new(courier: Arc<dyn Courier>, timeout: Duration) -> Self {
        Self { courier, timeout }
    }

    /// Children a job aimed at `target` is delivered to: everyone for
    /// `all`, otherwise the one child with that id if it is registered.
    pub fn delivery_set(registry: &ChildRegistry, target: &Target) -> Vec<ChildRecord> {
        match target {
            Target::All => registry.records(),
            Target::Child(id) => registry.get(id).into_iter().collect(),
        }
    }

    /// Send the report job to every child.
    pub async fn distribute_report(
        &self,
        registry: &ChildRegistry,
        job: &ReportJob,
    ) -> DeliveryRound {
        let deliveries = Self::delivery_set(registry, &Target::All)
            .into_iter()
            .map(|child| (child, Dispatch::Report(job.clone())))
            .collect();
        self.fan_out(registry.kind(), deliveries).await
    }

    /// Send each child the command jobs aimed at it.
    ///
    /// Every registered child gets a single dispatch holding every job that
    /// applies to it, since its own store replaces the whole list on each
    /// write. A child no job applies to gets an empty list, which clears
    /// whatever it was running before.
    pub async fn distribute_commands(
        &self,
        registry: &ChildRegistry,
        jobs: &[CommandJob],
    ) -> DeliveryRound {
        let kind = registry.kind();
        let deliveries = registry
            .records()
            .into_iter()
            .map(|child| {
                let applicable: Vec<&CommandJob> = jobs
                    .iter()
                    .filter(|job| job.target.matches(&child.id))
                    .collect();
                let dispatch = command_dispatch(kind, &applicable);
                (child, dispatch)
            })
            .collect();
        self.fan_out(kind, deliveries).await
    }

    async fn fan_out(
        &self,
        kind: ChildKind,
        deliveries: Vec<(ChildRecord, Dispatch)>,
    ) -> DeliveryRound {
        let budget = kind.delivery_budget(self.timeout);
        let attempts = deliveries.into_iter().map(|(child, dispatch)| async move {
            let result = match tokio::time::timeout(
                budget,
                self.courier.deliver(kind, &child, &dispatch),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(DeliveryError::Timeout(budget)),
            };
            (child, dispatch, result)
        });

        let mut round = DeliveryRound::default();
        for (child, dispatch, result) in join_all(attempts).await {
            match result {
                Ok(()) => {
                    tracing::debug!(
                        child_id = %child.id,
                        kind = kind.as_str(),
                        dispatch = dispatch.label(),
                        "delivered"
                    );
                    round.delivered.push(child.id);
                }
                Err(e) => {
                    tracing::warn!(
                        child_id = %child.id,
                        kind = kind.as_str(),
                        dispatch = dispatch.label(),
                        error = %e,
                        "delivery failed"
                    );
                    round.failed.push(child.id);
                }
            }
        }
        round
    }
}

/// Build the dispatch for one child. Privates get bare orders; sergeants
/// get the jobs themselves, with jobs addressed to the sergeant by id
/// widened to all of its own children.
fn command_dispatch(kind: ChildKind, jobs: &[&CommandJob]) -> Dispatch {
    match kind {
        ChildKind::Private => Dispatch::Orders(jobs.iter().map(|job| job.order.clone()).collect()),
        ChildKind::Sergeant => Dispatch::Commands(
            jobs.iter()
                .map(|job| CommandJob {
                    target: Target::All,
                    order: job.order.clone(),
                })
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Encoding, Order, WorkReport};
    use async_trait::async_trait;
    use std::num::NonZeroU64;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<(String, Dispatch)>>,
        unreachable: Vec<String>,
        stalled: Vec<String>,
        lagging: Vec<String>,
    }

    #[async_trait]
    impl Courier for Recorder {
        async fn deliver(
            &self,
            _kind: ChildKind,
            child: &ChildRecord,
            dispatch: &Dispatch,
        ) -> Result<(), DeliveryError> {
            if self.stalled.contains(&child.id) {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            if self.lagging.contains(&child.id) {
                tokio::time::sleep(Duration::from_millis(150)).await;
            }
            if self.unreachable.contains(&child.id) {
                return Err(DeliveryError::Rejected {
                    status: 503,
                    body: "down".to_string(),
                });
            }
            self.sent
                .lock()
                .unwrap()
                .push((child.id.clone(), dispatch.clone()));
            Ok(())
        }

        async fn relay(
            &self,
            _superior: &str,
            _author_id: &str,
            _work: &WorkReport,
        ) -> Result<(), DeliveryError> {
            Ok(())
        }
    }

    fn registry(kind: ChildKind, ids: &[&str]) -> ChildRegistry {
        let registry = ChildRegistry::new(kind);
        for id in ids {
            registry
                .join(ChildRecord {
                    id: id.to_string(),
                    name: "child".to_string(),
                    addr: "127.0.0.1".to_string(),
                    port: 1,
                    sensors: vec![],
                })
                .unwrap();
        }
        registry
    }

    fn job(target: &str, sensor: &str) -> CommandJob {
        CommandJob {
            target: Target::from(target.to_string()),
            order: Order {
                sensor: sensor.to_string(),
                interval: NonZeroU64::new(2).unwrap(),
            },
        }
    }

    fn sent_to(recorder: &Recorder, id: &str) -> Option<Dispatch> {
        recorder
            .sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(child, _)| child == id)
            .map(|(_, dispatch)| dispatch.clone())
    }

    #[tokio::test]
    async fn targeted_job_reaches_only_its_child() {
        let recorder = Arc::new(Recorder::default());
        let propagator = JobPropagator::new(recorder.clone(), Duration::from_secs(1));
        let registry = registry(ChildKind::Private, &["a", "b"]);

        let round = propagator
            .distribute_commands(&registry, &[job("b", "zero")])
            .await;

        assert_eq!(round.delivered, vec!["a", "b"]);
        assert_eq!(sent_to(&recorder, "a"), Some(Dispatch::Orders(vec![])));
        assert_eq!(
            sent_to(&recorder, "b"),
            Some(Dispatch::Orders(vec![job("b", "zero").order]))
        );
    }

    #[tokio::test]
    async fn retargeting_and_clearing_reach_every_child() {
        let recorder = Arc::new(Recorder::default());
        let propagator = JobPropagator::new(recorder.clone(), Duration::from_secs(1));
        let registry = registry(ChildKind::Private, &["a", "b"]);

        propagator
            .distribute_commands(&registry, &[job("all", "random")])
            .await;
        propagator
            .distribute_commands(&registry, &[job("b", "random")])
            .await;
        assert_eq!(sent_to(&recorder, "a"), Some(Dispatch::Orders(vec![])));
        assert_eq!(
            sent_to(&recorder, "b"),
            Some(Dispatch::Orders(vec![job("b", "random").order]))
        );

        let round = propagator.distribute_commands(&registry, &[]).await;

        assert_eq!(round.delivered, vec!["a", "b"]);
        assert_eq!(sent_to(&recorder, "a"), Some(Dispatch::Orders(vec![])));
        assert_eq!(sent_to(&recorder, "b"), Some(Dispatch::Orders(vec![])));
    }

    #[tokio::test]
    async fn clearing_reaches_sergeants_as_an_empty_job_list() {
        let recorder = Arc::new(Recorder::default());
        let propagator = JobPropagator::new(recorder.clone(), Duration::from_secs(1));
        let registry = registry(ChildKind::Sergeant, &["sgt"]);

        propagator.distribute_commands(&registry, &[]).await;

        assert_eq!(sent_to(&recorder, "sgt"), Some(Dispatch::Commands(vec![])));
    }

    #[tokio::test]
    async fn each_child_gets_all_jobs_that_apply_in_one_dispatch() {
        let recorder = Arc::new(Recorder::default());
        let propagator = JobPropagator::new(recorder.clone(), Duration::from_secs(1));
        let registry = registry(ChildKind::Private, &["a", "b"]);

        propagator
            .distribute_commands(&registry, &[job("all", "random"), job("a", "zero")])
            .await;

        let sent = recorder.sent.lock().unwrap();
        let to_a = sent.iter().find(|(id, _)| id == "a").unwrap();
        let to_b = sent.iter().find(|(id, _)| id == "b").unwrap();
        assert_eq!(
            to_a.1,
            Dispatch::Orders(vec![job("all", "random").order, job("a", "zero").order])
        );
        assert_eq!(to_b.1, Dispatch::Orders(vec![job("all", "random").order]));
    }

    #[tokio::test]
    async fn unregistered_target_is_not_an_error() {
        let recorder = Arc::new(Recorder::default());
        let propagator = JobPropagator::new(recorder.clone(), Duration::from_secs(1));
        let registry = registry(ChildKind::Private, &["a"]);

        let round = propagator
            .distribute_commands(&registry, &[job("ghost", "random")])
            .await;

        assert!(round.failed.is_empty());
        assert_eq!(round.attempted(), 1);
        assert_eq!(sent_to(&recorder, "a"), Some(Dispatch::Orders(vec![])));
    }

    #[tokio::test]
    async fn sergeants_receive_jobs_widened_to_all() {
        let recorder = Arc::new(Recorder::default());
        let propagator = JobPropagator::new(recorder.clone(), Duration::from_secs(1));
        let registry = registry(ChildKind::Sergeant, &["sgt"]);

        propagator
            .distribute_commands(&registry, &[job("sgt", "random")])
            .await;

        let sent = recorder.sent.lock().unwrap();
        assert_eq!(sent[0].1, Dispatch::Commands(vec![job("all", "random")]));
    }

    #[tokio::test]
    async fn failing_and_stalled_children_do_not_stop_the_rest() {
        let recorder = Arc::new(Recorder {
            unreachable: vec!["down".to_string()],
            stalled: vec!["slow".to_string()],
            ..Default::default()
        });
        let propagator = JobPropagator::new(recorder.clone(), Duration::from_millis(50));
        let registry = registry(ChildKind::Private, &["down", "slow", "ok"]);
        let report = ReportJob {
            interval: NonZeroU64::new(5).unwrap(),
            encoding: Encoding::Flat,
            filter: vec![],
        };

        let round = propagator.distribute_report(&registry, &report).await;

        assert_eq!(round.delivered, vec!["ok"]);
        assert_eq!(round.failed, vec!["down", "slow"]);
    }

    #[tokio::test]
    async fn sergeants_get_longer_than_privates_to_answer() {
        let recorder = Arc::new(Recorder {
            lagging: vec!["sgt".to_string(), "pvt".to_string()],
            ..Default::default()
        });
        let propagator = JobPropagator::new(recorder.clone(), Duration::from_millis(100));
        let sergeants = registry(ChildKind::Sergeant, &["sgt"]);
        let privates = registry(ChildKind::Private, &["pvt"]);
        let jobs = [job("all", "random")];

        let (to_sergeants, to_privates) = tokio::join!(
            propagator.distribute_commands(&sergeants, &jobs),
            propagator.distribute_commands(&privates, &jobs),
        );

        assert_eq!(to_sergeants.delivered, vec!["sgt"]);
        assert_eq!(to_privates.failed, vec!["pvt"]);
    }
}
