use anyhow::Context;
use snowgrant_core::logging::debug;

use crate::{
    entry_types::GrantOf, error::GrantError, executor::Executor, statements::RoleGrantBuilder,
};

use super::{GrantSet, GranteeKind};

/// The grants of a role as the warehouse reports them, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedGrantSet(Vec<GrantOf>);

impl ObservedGrantSet {
    pub fn new(grants: Vec<GrantOf>) -> Self {
        Self(grants)
    }

    pub fn grants(&self) -> &[GrantOf] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split the grantees by kind.
    ///
    /// Fails on the first row granted to something other than a role or
    /// user, without returning anything partially classified.
    pub fn partition(&self) -> Result<GrantSet, GrantError> {
        let mut res = GrantSet::default();
        for grant in &self.0 {
            let kind = GranteeKind::from_granted_to(&grant.granted_to).ok_or_else(|| {
                GrantError::UnknownGrantType {
                    granted_to: grant.granted_to.to_owned(),
                }
            })?;
            res.of_kind_mut(kind).insert(grant.grantee_name.to_owned());
        }
        Ok(res)
    }
}

/// Fetch the current grants of `role_name`.
///
/// Grantee names come back with their quotes stripped. A role without
/// grants yields an empty set.
pub async fn read_grants<E>(executor: &E, role_name: &str) -> Result<ObservedGrantSet, GrantError>
where
    E: Executor + ?Sized,
{
    let query_error = |source: anyhow::Error| GrantError::Query {
        role: role_name.to_owned(),
        source,
    };

    let rows = executor
        .query(&RoleGrantBuilder::new(role_name).show_grants_of())
        .await
        .map_err(query_error)?;

    let grants = rows
        .into_iter()
        .map(|row| {
            serde_json::to_value(row)
                .and_then(serde_json::from_value::<GrantOf>)
                .context("failed to decode grant row")
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(query_error)?;

    debug!("read {} grants of role {}", grants.len(), role_name);
    Ok(ObservedGrantSet(grants))
}
