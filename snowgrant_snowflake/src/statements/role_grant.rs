use crate::grants::{GrantTarget, GranteeKind};

/// Builds statements that grant a role to other roles and users.
#[derive(Debug, Clone)]
pub struct RoleGrantBuilder {
    role: String,
}

/// A role grant aimed at a single role or user.
#[derive(Debug, Clone)]
pub struct RoleGrantStatement {
    role: String,
    target: GrantTarget,
}

impl RoleGrantBuilder {
    /// Start building grants of `role`.
    pub fn new<S: Into<String>>(role: S) -> Self {
        Self { role: role.into() }
    }

    /// `SHOW GRANTS OF ROLE "role"`, listing who holds the role.
    pub fn show_grants_of(&self) -> String {
        format!(r#"SHOW GRANTS OF ROLE "{}""#, self.role)
    }

    /// Aim the grant at another role.
    pub fn role<S: Into<String>>(&self, target: S) -> RoleGrantStatement {
        self.target(GrantTarget::new(GranteeKind::Role, target.into()))
    }

    /// Aim the grant at a user.
    pub fn user<S: Into<String>>(&self, target: S) -> RoleGrantStatement {
        self.target(GrantTarget::new(GranteeKind::User, target.into()))
    }

    /// Aim the grant at an arbitrary target.
    pub fn target(&self, target: GrantTarget) -> RoleGrantStatement {
        RoleGrantStatement {
            role: self.role.to_owned(),
            target,
        }
    }
}

impl RoleGrantStatement {
    /// `GRANT ROLE "role" TO {ROLE|USER} "target"`
    pub fn grant(&self) -> String {
        format!(
            r#"GRANT ROLE "{}" TO {} "{}""#,
            self.role, self.target.kind, self.target.name
        )
    }

    /// `REVOKE ROLE "role" FROM {ROLE|USER} "target"`
    pub fn revoke(&self) -> String {
        format!(
            r#"REVOKE ROLE "{}" FROM {} "{}""#,
            self.role, self.target.kind, self.target.name
        )
    }
}
