use snowgrant_core::logging::debug;

use crate::error::GrantError;

use super::{DesiredGrantSet, GrantOperations, GrantTarget, GranteeKind, GranteeSet, ObservedGrantSet};

/// Grantee kinds in the order they are applied.
const KIND_ORDER: [GranteeKind; 2] = [GranteeKind::Role, GranteeKind::User];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrantAction {
    Grant,
    Revoke,
}

/// One statement's worth of change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrantOp {
    pub action: GrantAction,
    pub target: GrantTarget,
}

impl GrantOp {
    pub fn grant(kind: GranteeKind, name: &str) -> Self {
        Self {
            action: GrantAction::Grant,
            target: GrantTarget::new(kind, name.to_owned()),
        }
    }

    pub fn revoke(kind: GranteeKind, name: &str) -> Self {
        Self {
            action: GrantAction::Revoke,
            target: GrantTarget::new(kind, name.to_owned()),
        }
    }

    async fn apply<O>(&self, ops: &O, role: &str) -> Result<(), GrantError>
    where
        O: GrantOperations + ?Sized,
    {
        let name = &self.target.name;
        match (self.action, self.target.kind) {
            (GrantAction::Grant, GranteeKind::Role) => ops.grant_role_to_role(role, name).await,
            (GrantAction::Grant, GranteeKind::User) => ops.grant_role_to_user(role, name).await,
            (GrantAction::Revoke, GranteeKind::Role) => ops.revoke_role_from_role(role, name).await,
            (GrantAction::Revoke, GranteeKind::User) => ops.revoke_role_from_user(role, name).await,
        }
    }
}

/// Desired and observed grantees of a single kind.
struct CategoryPlan<'a> {
    kind: GranteeKind,
    desired: &'a GranteeSet,
    observed: &'a GranteeSet,
}

/// The ordered statements that move observed grants to desired grants.
///
/// Roles come before users, and within each kind every revoke comes
/// before any grant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantPlan {
    ops: Vec<GrantOp>,
}

impl GrantPlan {
    /// Diff desired grants against observed ones.
    ///
    /// Fails with [`GrantError::UnknownGrantType`] before computing
    /// anything if an observed grant isn't to a role or user.
    pub fn build(desired: &DesiredGrantSet, observed: &ObservedGrantSet) -> Result<Self, GrantError> {
        let current = observed.partition()?;
        let table = KIND_ORDER.map(|kind| CategoryPlan {
            kind,
            desired: desired.of_kind(kind),
            observed: current.of_kind(kind),
        });

        let mut ops = vec![];
        for category in &table {
            let to_revoke = category.observed.difference(category.desired);
            let to_grant = category.desired.difference(category.observed);
            ops.extend(to_revoke.iter().map(|name| GrantOp::revoke(category.kind, name)));
            ops.extend(to_grant.iter().map(|name| GrantOp::grant(category.kind, name)));
        }
        Ok(Self { ops })
    }

    /// Revoke every grantee in `grants`.
    pub fn revoke_all(grants: &DesiredGrantSet) -> Self {
        let ops = KIND_ORDER
            .iter()
            .flat_map(|&kind| grants.of_kind(kind).iter().map(move |name| GrantOp::revoke(kind, name)))
            .collect();
        Self { ops }
    }

    pub fn ops(&self) -> &[GrantOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Names of one kind that this plan grants.
    pub fn to_grant(&self, kind: GranteeKind) -> GranteeSet {
        self.names(GrantAction::Grant, kind)
    }

    /// Names of one kind that this plan revokes.
    pub fn to_revoke(&self, kind: GranteeKind) -> GranteeSet {
        self.names(GrantAction::Revoke, kind)
    }

    fn names(&self, action: GrantAction, kind: GranteeKind) -> GranteeSet {
        self.ops
            .iter()
            .filter(|op| op.action == action && op.target.kind == kind)
            .map(|op| op.target.name.as_str())
            .collect()
    }

    /// Run the plan one statement at a time.
    ///
    /// Stops at the first failure. Statements that already ran are not
    /// undone.
    pub async fn apply<O>(&self, ops: &O, role: &str) -> Result<(), GrantError>
    where
        O: GrantOperations + ?Sized,
    {
        for op in &self.ops {
            op.apply(ops, role).await?;
        }
        Ok(())
    }
}

/// Converge the grants of `role` on `desired`, given what was observed.
///
/// Returns the plan that was applied. The caller is responsible for
/// re-reading the grants afterwards.
pub async fn reconcile<O>(
    ops: &O,
    role: &str,
    desired: &DesiredGrantSet,
    observed: &ObservedGrantSet,
) -> Result<GrantPlan, GrantError>
where
    O: GrantOperations + ?Sized,
{
    let plan = GrantPlan::build(desired, observed)?;
    debug!("reconciling role {}: {:?}", role, plan.ops());
    plan.apply(ops, role).await?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use crate::entry_types::GrantOf;

    use super::*;

    fn desired(roles: &[&str], users: &[&str]) -> DesiredGrantSet {
        DesiredGrantSet::new(
            GranteeSet::from_names(roles.iter().copied()),
            GranteeSet::from_names(users.iter().copied()),
        )
    }

    fn observed(roles: &[&str], users: &[&str]) -> ObservedGrantSet {
        let role_rows = roles
            .iter()
            .map(|r| GrantOf::new("R".to_owned(), "ROLE".to_owned(), r.to_string()));
        let user_rows = users
            .iter()
            .map(|u| GrantOf::new("R".to_owned(), "USER".to_owned(), u.to_string()));
        ObservedGrantSet::new(role_rows.chain(user_rows).collect())
    }

    #[test]
    fn new_user_is_granted() {
        let plan = GrantPlan::build(&desired(&[], &["alice"]), &observed(&[], &[])).unwrap();
        assert_eq!(plan.ops(), &[GrantOp::grant(GranteeKind::User, "alice")]);
    }

    #[test]
    fn extra_role_is_revoked() {
        let plan =
            GrantPlan::build(&desired(&["admin"], &[]), &observed(&["admin", "ops"], &[])).unwrap();
        assert_eq!(plan.ops(), &[GrantOp::revoke(GranteeKind::Role, "ops")]);
    }

    #[test]
    fn revokes_precede_grants_and_roles_precede_users() {
        let plan = GrantPlan::build(
            &desired(&["b"], &["y"]),
            &observed(&["a"], &["x"]),
        )
        .unwrap();
        assert_eq!(
            plan.ops(),
            &[
                GrantOp::revoke(GranteeKind::Role, "a"),
                GrantOp::grant(GranteeKind::Role, "b"),
                GrantOp::revoke(GranteeKind::User, "x"),
                GrantOp::grant(GranteeKind::User, "y"),
            ]
        );
    }

    #[test]
    fn same_name_in_both_kinds_is_independent() {
        let plan = GrantPlan::build(&desired(&["ops"], &[]), &observed(&[], &["ops"])).unwrap();
        assert_eq!(plan.to_grant(GranteeKind::Role), GranteeSet::from_names(["ops"]));
        assert_eq!(plan.to_revoke(GranteeKind::User), GranteeSet::from_names(["ops"]));
    }

    #[test]
    fn names_are_case_sensitive() {
        let plan = GrantPlan::build(&desired(&[], &["Alice"]), &observed(&[], &["alice"])).unwrap();
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn plan_is_set_difference() {
        let cases = [
            (desired(&["a", "b"], &["u"]), observed(&["b", "c"], &["u", "v"])),
            (desired(&[], &[]), observed(&["a"], &["u"])),
            (desired(&["a"], &["u", "w"]), observed(&[], &[])),
            (desired(&["a", "a"], &[]), observed(&["a", "a"], &[])),
        ];
        for (d, o) in cases {
            let plan = GrantPlan::build(&d, &o).unwrap();
            let current = o.partition().unwrap();
            for kind in KIND_ORDER {
                let to_grant = plan.to_grant(kind);
                let to_revoke = plan.to_revoke(kind);
                assert_eq!(to_grant, d.of_kind(kind).difference(current.of_kind(kind)));
                assert_eq!(to_revoke, current.of_kind(kind).difference(d.of_kind(kind)));
                assert!(to_grant.iter().all(|name| !to_revoke.contains(name)));
            }
        }
    }

    #[test]
    fn unknown_type_fails_before_planning() {
        let mut rows = observed(&["a"], &[]).grants().to_vec();
        rows.push(GrantOf::new("R".to_owned(), "DATABASE".to_owned(), "db".to_owned()));
        let o = ObservedGrantSet::new(rows);
        assert!(matches!(
            GrantPlan::build(&desired(&["a"], &[]), &o),
            Err(GrantError::UnknownGrantType { .. })
        ));
    }

    #[test]
    fn revoke_all_covers_both_kinds() {
        let plan = GrantPlan::revoke_all(&desired(&["a"], &["u"]));
        assert_eq!(
            plan.ops(),
            &[
                GrantOp::revoke(GranteeKind::Role, "a"),
                GrantOp::revoke(GranteeKind::User, "u"),
            ]
        );
    }
}
