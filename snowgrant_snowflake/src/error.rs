use thiserror::Error;

/// Errors from reading and reconciling role grants.
///
/// Nothing is retried or rolled back: statements applied before a failure
/// stay applied, and the next reconciliation starts from whatever state
/// the warehouse is in.
#[derive(Debug, Error)]
pub enum GrantError {
    /// A role grants resource was created without any grantees.
    #[error("no users or roles specified for role grants of `{role}`")]
    NoGranteesSpecified { role: String },
    /// The observed grants couldn't be fetched or decoded.
    #[error("failed to read grants of role `{role}`")]
    Query {
        role: String,
        #[source]
        source: anyhow::Error,
    },
    /// An observed grant was made to something other than a role or user.
    #[error("role granted_to unrecognized type ({granted_to})")]
    UnknownGrantType { granted_to: String },
    /// A grant or revoke statement failed.
    #[error("failed to execute `{statement}`")]
    Statement {
        statement: String,
        #[source]
        source: anyhow::Error,
    },
    /// A declarative record couldn't be decoded.
    #[error("invalid role grants record: {0}")]
    InvalidRecord(String),
}
