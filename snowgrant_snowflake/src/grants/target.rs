use std::fmt::Display;

use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::consts;

/// What kind of principal receives a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GranteeKind {
    Role,
    User,
}

impl GranteeKind {
    /// Classify a `granted_to` value. Matching ignores case.
    pub fn from_granted_to(granted_to: &str) -> Option<Self> {
        if granted_to.eq_ignore_ascii_case(consts::ROLE) {
            Some(GranteeKind::Role)
        } else if granted_to.eq_ignore_ascii_case(consts::USER) {
            Some(GranteeKind::User)
        } else {
            None
        }
    }
}

impl Display for GranteeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GranteeKind::Role => write!(f, "{}", consts::ROLE),
            GranteeKind::User => write!(f, "{}", consts::USER),
        }
    }
}

/// A role or user that a role can be granted to.
///
/// Identity is the (kind, name) pair. Names are compared exactly.
#[derive(new, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GrantTarget {
    pub kind: GranteeKind,
    pub name: String,
}
