//! Snowflake role grants
//!
//! Everything needed to keep a role's grants in Snowflake in line with a
//! declarative record.
//!
//! ```no_run
//! use snowgrant_snowflake::{
//!     RoleGrantsRecord, RoleGrantsResource, SnowflakeCredentials, SnowflakeRestClient,
//!     SnowflakeRestConfig,
//! };
//!
//! # async fn run(credentials: SnowflakeCredentials) -> anyhow::Result<()> {
//! let client = SnowflakeRestClient::new(credentials, SnowflakeRestConfig::default())?;
//! let record = RoleGrantsRecord::new("ANALYST".to_owned(), vec![], vec!["alice".to_owned()]);
//! let state = RoleGrantsResource::new(&client).update(&record).await?;
//! assert_eq!(state.users, vec!["alice".to_owned()]);
//! # Ok(())
//! # }
//! ```

mod consts;
mod creds;
mod entry_types;
mod error;
mod executor;
pub mod grants;
mod resources;
mod rest;
pub mod statements;

pub use creds::SnowflakeCredentials;
pub use entry_types::{strip_quotes, GrantOf};
pub use error::GrantError;
pub use executor::{Executor, Row};
pub use resources::{read_role_grants_file, RoleGrantsRecord, RoleGrantsResource, RoleGrantsState};
pub use rest::{SnowflakeRestClient, SnowflakeRestConfig};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use snowgrant_core::config::{fetch_connector_credentials, ConnectorNamespace};
use snowgrant_core::project;

/// Build a REST client from the connector's entry in a connectors.yaml file.
pub fn client_from_config(
    path: PathBuf,
    connector: &ConnectorNamespace,
) -> Result<SnowflakeRestClient> {
    let map = fetch_connector_credentials(path, connector)?;
    let credentials = SnowflakeCredentials::from_map(&map)
        .with_context(|| format!("invalid credentials for connector `{connector}`"))?;
    SnowflakeRestClient::new(credentials, SnowflakeRestConfig::default())
}

/// Build a REST client from the connector's entry in connectors.yaml,
/// using the default file location.
pub fn client_from_default_config(connector: &ConnectorNamespace) -> Result<SnowflakeRestClient> {
    let path = project::connectors_cfg_path().context("couldn't find your home directory")?;
    client_from_config(path, connector)
}

/// Read a role grants file and converge every record in it.
pub async fn apply_role_grants_file<E, P>(executor: &E, path: P) -> Result<Vec<RoleGrantsState>>
where
    E: Executor + ?Sized,
    P: AsRef<Path>,
{
    let records = read_role_grants_file(&path)
        .with_context(|| format!("reading role grants from {}", path.as_ref().display()))?;
    Ok(RoleGrantsResource::new(executor).apply_all(&records).await?)
}
