//! Role façades composing the shared engine.
//!
//! - [`Private`]: owns sensors, stores its orders and report job. No children.
//! - [`Sergeant`]: one [`Squad`] of privates; stores jobs and propagates them.
//! - [`Commander`]: a squad of sergeants ("subordinates") and a squad of
//!   privates ("soldiers"); jobs propagate to both.
//!
//! Parents own their children's records; children never point back at a
//! parent beyond the superior URL they were configured with.

mod commander;
mod private;
mod reporter;
mod sergeant;
mod squad;

pub use commander::Commander;
pub use private::Private;
pub use reporter::{RelaySummary, Reporter};
pub use sergeant::Sergeant;
pub use squad::Squad;
