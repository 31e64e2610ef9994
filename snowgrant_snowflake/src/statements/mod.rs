//! SQL statement builders.
//!
//! Builders are pure: they only render text. Identifiers are wrapped in
//! double quotes as-is, with no escaping, so callers must not pass names
//! containing a double quote.

mod network_policy;
mod role_grant;

pub use network_policy::{IpListKind, NetworkPolicyBuilder};
pub use role_grant::{RoleGrantBuilder, RoleGrantStatement};

/// Escape a value for use inside a single-quoted SQL string literal.
pub(crate) fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
