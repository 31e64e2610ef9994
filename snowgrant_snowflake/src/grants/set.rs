use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::GranteeKind;

/// A set of grantee names.
///
/// Built from a sequence with duplicates dropped. Iteration is sorted so
/// the statements generated from a set come out in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GranteeSet(BTreeSet<String>);

impl GranteeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect names into a set, dropping duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Names in `self` but not in `other`.
    pub fn difference(&self, other: &GranteeSet) -> GranteeSet {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    /// Names in either set.
    pub fn union(&self, other: &GranteeSet) -> GranteeSet {
        Self(self.0.union(&other.0).cloned().collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn insert<S: Into<String>>(&mut self, name: S) -> bool {
        self.0.insert(name.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sorted names, for writing back into a record.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for GranteeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}

/// Grantee names for a single role, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantSet {
    pub roles: GranteeSet,
    pub users: GranteeSet,
}

/// The grants a declarative record asks for.
pub type DesiredGrantSet = GrantSet;

impl GrantSet {
    pub fn new(roles: GranteeSet, users: GranteeSet) -> Self {
        Self { roles, users }
    }

    /// The names for one kind of grantee.
    pub fn of_kind(&self, kind: GranteeKind) -> &GranteeSet {
        match kind {
            GranteeKind::Role => &self.roles,
            GranteeKind::User => &self.users,
        }
    }

    pub(crate) fn of_kind_mut(&mut self, kind: GranteeKind) -> &mut GranteeSet {
        match kind {
            GranteeKind::Role => &mut self.roles,
            GranteeKind::User => &mut self.users,
        }
    }

    /// True when there are no grantees of either kind.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty() && self.users.is_empty()
    }
}
