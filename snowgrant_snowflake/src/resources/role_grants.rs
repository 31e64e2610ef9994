//! The `role_grants` resource: which roles and users hold a role.
//!
//! The record's id is the granted role's name. Create and update push the
//! desired grantees into Snowflake, then read the live state back so the
//! stored record always reflects the warehouse.

use std::path::Path;

use serde::{Deserialize, Serialize};
use snowgrant_core::{
    config::read_yaml_file,
    log_runtime,
    logging::{debug, info},
};

use crate::{
    error::GrantError,
    executor::Executor,
    grants::{read_grants, reconcile, DesiredGrantSet, GrantPlan, GrantSet, GranteeSet, ObservedGrantSet},
};

/// Desired state for one role's grants, as written by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleGrantsRecord {
    /// The role being granted.
    pub role_name: String,
    /// Roles the role is granted to.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Users the role is granted to.
    #[serde(default)]
    pub users: Vec<String>,
}

impl RoleGrantsRecord {
    pub fn new(role_name: String, roles: Vec<String>, users: Vec<String>) -> Self {
        Self {
            role_name,
            roles,
            users,
        }
    }

    /// Decode a record from an untyped json value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, GrantError> {
        serde_json::from_value(value).map_err(|e| GrantError::InvalidRecord(e.to_string()))
    }

    /// Decode a record from a yaml document.
    pub fn from_yaml(yaml: &str) -> Result<Self, GrantError> {
        yaml_peg::serde::from_str::<Self>(yaml)
            .map_err(|e| GrantError::InvalidRecord(e.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| GrantError::InvalidRecord("empty document".to_owned()))
    }

    /// The grantees as sets. Duplicates in the record collapse.
    pub fn desired(&self) -> DesiredGrantSet {
        GrantSet::new(
            GranteeSet::from_names(self.roles.iter().cloned()),
            GranteeSet::from_names(self.users.iter().cloned()),
        )
    }
}

/// Read every role grants record from a yaml file.
pub fn read_role_grants_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<RoleGrantsRecord>> {
    read_yaml_file(path)
}

/// The role's grants as observed in Snowflake.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrantsState {
    pub id: String,
    pub role_name: String,
    /// Sorted role grantees.
    pub roles: Vec<String>,
    /// Sorted user grantees.
    pub users: Vec<String>,
}

impl RoleGrantsState {
    fn new(role_name: &str, grants: &GrantSet) -> Self {
        Self {
            id: role_name.to_owned(),
            role_name: role_name.to_owned(),
            roles: grants.roles.to_vec(),
            users: grants.users.to_vec(),
        }
    }

    /// The record that would produce this state.
    pub fn to_record(&self) -> RoleGrantsRecord {
        RoleGrantsRecord::new(
            self.role_name.to_owned(),
            self.roles.to_owned(),
            self.users.to_owned(),
        )
    }
}

/// Lifecycle handlers for role grants.
pub struct RoleGrantsResource<'a, E: ?Sized> {
    executor: &'a E,
}

impl<'a, E: Executor + ?Sized> RoleGrantsResource<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// Grant the role to every listed role and user.
    ///
    /// A record without any grantees is rejected before anything runs.
    pub async fn create(&self, record: &RoleGrantsRecord) -> Result<RoleGrantsState, GrantError> {
        let desired = record.desired();
        if desired.is_empty() {
            return Err(GrantError::NoGranteesSpecified {
                role: record.role_name.to_owned(),
            });
        }

        let plan = GrantPlan::build(&desired, &ObservedGrantSet::default())?;
        debug!("creating role grants of {}: {:?}", record.role_name, plan.ops());
        plan.apply(self.executor, &record.role_name).await?;
        info!("granted {} to {} grantees", record.role_name, plan.len());

        self.read(&record.role_name).await
    }

    /// Read the live grants of `role_name`.
    pub async fn read(&self, role_name: &str) -> Result<RoleGrantsState, GrantError> {
        let observed = read_grants(self.executor, role_name).await?;
        let grants = observed.partition()?;
        Ok(RoleGrantsState::new(role_name, &grants))
    }

    /// Reconcile the live grants with the record.
    ///
    /// Unlike create, an empty record is allowed and revokes everything.
    pub async fn update(&self, record: &RoleGrantsRecord) -> Result<RoleGrantsState, GrantError> {
        let role_name = &record.role_name;
        let plan = log_runtime!(format!("reconciling role grants of {role_name}"), {
            let observed = read_grants(self.executor, role_name).await?;
            reconcile(self.executor, role_name, &record.desired(), &observed).await?
        });
        if plan.is_empty() {
            debug!("role grants of {} already up to date", role_name);
        } else {
            info!("applied {} changes to role grants of {}", plan.len(), role_name);
        }

        self.read(role_name).await
    }

    /// Revoke every grant listed in the record.
    ///
    /// Grants made outside the record are left alone.
    pub async fn delete(&self, record: &RoleGrantsRecord) -> Result<(), GrantError> {
        let plan = GrantPlan::revoke_all(&record.desired());
        plan.apply(self.executor, &record.role_name).await?;
        info!("revoked {} from {} grantees", record.role_name, plan.len());
        Ok(())
    }

    /// Import existing grants. The id is the role name.
    pub async fn import(&self, id: &str) -> Result<RoleGrantsState, GrantError> {
        self.read(id).await
    }

    /// Update every record in turn, stopping at the first failure.
    pub async fn apply_all(
        &self,
        records: &[RoleGrantsRecord],
    ) -> Result<Vec<RoleGrantsState>, GrantError> {
        let mut res = Vec::with_capacity(records.len());
        for record in records {
            res.push(self.update(record).await?);
        }
        Ok(res)
    }
}
