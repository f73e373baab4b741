//! Promotion engine
//!
//! Pure decision pieces:
//! - [`BranchMapping`] - which branch a push promotes into
//! - [`GateLabel`] - which PRs may be merged automatically
//! - [`AutoMergePolicy`] - which events may merge
//!
//! Effectful pieces, all going through [`PlatformService`](crate::platform::PlatformService):
//! - [`reconcile`] - find or create the promotion PR
//! - [`attempt_merge`] - merge and classify the result
//! - [`Dispatcher`] - route an event through the above, producing a [`RunReport`]

mod dispatch;
mod gate;
mod merge;
mod reconcile;
mod report;
mod target;
mod trigger;

pub use dispatch::Dispatcher;
pub use gate::{DEFAULT_GATE_LABEL, GateLabel};
pub use merge::{MergeFailureSeverity, MergeOutcome, attempt_merge};
pub use reconcile::{Reconciliation, promotion_title, reconcile};
pub use report::{Action, RunReport, SkipReason, TerminalState};
pub use target::{BranchMapping, BranchRule};
pub use trigger::AutoMergePolicy;
