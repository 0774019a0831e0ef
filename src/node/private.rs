use crate::config::NodeConfig;
use crate::models::{ChildRecord, OneOrMany, Order, PrivateInfo, ReportJob};
use crate::store::JobConfigStore;

/// Leaf node. Owns named sensor capabilities and the orders telling it
/// how often to sample them.
pub struct Private {
    info: PrivateInfo,
    jobs: JobConfigStore<Order>,
}

impl Private {
    pub fn new(config: &NodeConfig, sensors: Vec<String>) -> Self {
        Self {
            info: PrivateInfo {
                id: config.id.clone(),
                name: config.name.clone(),
                addr: config.addr.clone(),
                port: config.port,
                sensors,
            },
            jobs: JobConfigStore::new(),
        }
    }

    pub fn info(&self) -> PrivateInfo {
        self.info.clone()
    }

    /// What this private announces when joining a superior.
    pub fn record(&self) -> ChildRecord {
        ChildRecord {
            id: self.info.id.clone(),
            name: self.info.name.clone(),
            addr: self.info.addr.clone(),
            port: self.info.port,
            sensors: self.info.sensors.clone(),
        }
    }

    /// Replace the current orders. Orders for sensors this private does not
    /// own are dropped; the accepted ones are returned in input order.
    pub fn put_orders(&self, input: OneOrMany<Order>) -> Vec<Order> {
        let (accepted, dropped): (Vec<Order>, Vec<Order>) = input
            .into_vec()
            .into_iter()
            .partition(|order| self.info.sensors.contains(&order.sensor));
        for order in &dropped {
            tracing::warn!(sensor = %order.sensor, "order for an unknown sensor dropped");
        }
        self.jobs.replace_commands(accepted)
    }

    pub fn orders(&self) -> Vec<Order> {
        self.jobs.commands()
    }

    pub fn put_report(&self, job: ReportJob) -> ReportJob {
        self.jobs.put_report(job)
    }

    pub fn report(&self) -> Option<ReportJob> {
        self.jobs.report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Role;
    use std::num::NonZeroU64;

    fn order(sensor: &str, interval: u64) -> Order {
        Order {
            sensor: sensor.to_string(),
            interval: NonZeroU64::new(interval).unwrap(),
        }
    }

    fn private() -> Private {
        Private::new(
            &NodeConfig::for_role(Role::Private),
            vec!["random".to_string(), "zero".to_string()],
        )
    }

    #[test]
    fn orders_for_foreign_sensors_are_dropped() {
        let pvt = private();
        let accepted = pvt.put_orders(OneOrMany::Many(vec![
            order("random", 2),
            order("thermo", 1),
            order("zero", 5),
        ]));

        assert_eq!(accepted, vec![order("random", 2), order("zero", 5)]);
        assert_eq!(pvt.orders(), accepted);
    }

    #[test]
    fn new_orders_replace_old_ones() {
        let pvt = private();
        pvt.put_orders(OneOrMany::Many(vec![order("random", 2), order("zero", 5)]));
        pvt.put_orders(OneOrMany::One(order("zero", 1)));

        assert_eq!(pvt.orders(), vec![order("zero", 1)]);
    }
}
