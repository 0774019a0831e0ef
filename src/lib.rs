//! Command-and-telemetry network for sensor troops.
//!
//! Privates own sensors, sergeants aggregate privates, and a commander sits
//! at the root. Every tier with children runs the same engine: a child
//! [`store::ChildRegistry`], a [`store::JobConfigStore`], a
//! [`propagate::JobPropagator`] fanning jobs out, and a
//! [`intake::WorkIntake`] accepting readings. [`node`] composes them per
//! role and [`api`] binds them to HTTP.

pub mod api;
pub mod config;
pub mod courier;
pub mod error;
pub mod intake;
pub mod models;
pub mod node;
pub mod propagate;
pub mod store;
