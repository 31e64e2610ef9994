use async_trait::async_trait;
use snowgrant_core::logging::debug;

use crate::{error::GrantError, executor::Executor, statements::RoleGrantBuilder};

/// The four statements reconciliation needs.
///
/// Each takes the granted role and an unquoted target name. Any
/// [`Executor`] provides them by rendering a statement with
/// [`RoleGrantBuilder`] and executing it.
#[async_trait]
pub trait GrantOperations: Send + Sync {
    async fn grant_role_to_role(&self, role: &str, target: &str) -> Result<(), GrantError>;
    async fn grant_role_to_user(&self, role: &str, target: &str) -> Result<(), GrantError>;
    async fn revoke_role_from_role(&self, role: &str, target: &str) -> Result<(), GrantError>;
    async fn revoke_role_from_user(&self, role: &str, target: &str) -> Result<(), GrantError>;
}

async fn run<E: Executor + ?Sized>(executor: &E, statement: String) -> Result<(), GrantError> {
    debug!("executing {}", statement);
    if let Err(source) = executor.execute(&statement).await {
        return Err(GrantError::Statement { statement, source });
    }
    Ok(())
}

#[async_trait]
impl<E: Executor + ?Sized> GrantOperations for E {
    async fn grant_role_to_role(&self, role: &str, target: &str) -> Result<(), GrantError> {
        run(self, RoleGrantBuilder::new(role).role(target).grant()).await
    }

    async fn grant_role_to_user(&self, role: &str, target: &str) -> Result<(), GrantError> {
        run(self, RoleGrantBuilder::new(role).user(target).grant()).await
    }

    async fn revoke_role_from_role(&self, role: &str, target: &str) -> Result<(), GrantError> {
        run(self, RoleGrantBuilder::new(role).role(target).revoke()).await
    }

    async fn revoke_role_from_user(&self, role: &str, target: &str) -> Result<(), GrantError> {
        run(self, RoleGrantBuilder::new(role).user(target).revoke()).await
    }
}
