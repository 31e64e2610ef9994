use derive_new::new;
use serde::{Deserialize, Serialize};

use super::{null_as_empty, strip_quotes_and_deserialize};

/// Snowflake entry for a grant of a role, as returned by
/// `SHOW GRANTS OF ROLE`.
#[derive(new, Clone, Default, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct GrantOf {
    /// The role that was granted.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub role: String,
    /// `ROLE` or `USER`. Anything else is unexpected.
    #[serde(deserialize_with = "null_as_empty")]
    pub granted_to: String,
    /// The role or user that received the grant, without quotes.
    #[serde(deserialize_with = "strip_quotes_and_deserialize")]
    pub grantee_name: String,
}
