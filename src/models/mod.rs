//! Domain models for the sensing troop.
//!
//! # Core Concepts
//!
//! ## Identity
//!
//! - [`ChildRecord`]: What a child announces when it joins its parent
//!   (id, name, address, port and sensor capabilities).
//! - [`PrivateInfo`], [`SergeantInfo`], [`CommanderInfo`]: What a node says
//!   about itself.
//!
//! ## Jobs
//!
//! - [`ReportJob`]: Singleton periodic-reporting configuration (last write wins).
//! - [`CommandJob`]: A targeted [`Order`]; stored and replaced as a whole list.
//! - [`OneOrMany`]: Request shape accepting one object or a list, normalized
//!   to a list before it reaches a store.
//!
//! ## Telemetry
//!
//! - [`WorkReport`]: A single sensor reading submitted by a child.
//! - [`WorkRecord`]: An accepted reading, stamped with its author and time.

mod child;
mod envelope;
mod info;
mod job;
mod work;

pub use child::*;
pub use envelope::*;
pub use info::*;
pub use job::*;
pub use work::*;
