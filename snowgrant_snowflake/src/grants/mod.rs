//! Role grant state and reconciliation.
//!
//! Desired grants come from a declarative record, observed grants from
//! `SHOW GRANTS OF ROLE`. [`GrantPlan`] holds the difference between the
//! two, and applying it converges the warehouse on the desired state.

mod ops;
mod reader;
mod reconcile;
mod set;
mod target;

pub use ops::GrantOperations;
pub use reader::{read_grants, ObservedGrantSet};
pub use reconcile::{reconcile, GrantAction, GrantOp, GrantPlan};
pub use set::{DesiredGrantSet, GrantSet, GranteeSet};
pub use target::{GrantTarget, GranteeKind};
