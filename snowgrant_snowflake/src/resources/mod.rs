//! Declarative resources backed by Snowflake.

mod role_grants;

pub use role_grants::{read_role_grants_file, RoleGrantsRecord, RoleGrantsResource, RoleGrantsState};
