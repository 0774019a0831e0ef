//! In-memory state owned by one node.
//!
//! Each store guards itself with its own lock. No operation spans two
//! stores, and nothing is persisted: state lives and dies with the process.

mod jobs;
mod registry;

pub use jobs::JobConfigStore;
pub use registry::ChildRegistry;
