//! Configuration files
//!
//! Credentials live in a `connectors.yaml` file, keyed by connector
//! namespace. Declarative records (such as role grants) are plain yaml
//! documents deserialized into the connector's own types.
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::{collections::HashMap, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use yaml_peg::serde as yaml;

/// The user-defined namespace corresponding to the connector.
#[derive(Clone, Deserialize, Debug, Hash, PartialEq, Eq, Default, PartialOrd, Ord, Serialize)]
pub struct ConnectorNamespace(pub String);

impl Display for ConnectorNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Alias for HashMap to hold credentials information.
pub type CredentialsMap = HashMap<String, String>;

/// Fetch the credentials from the connectors config.
pub fn fetch_credentials(path: PathBuf) -> Result<HashMap<String, CredentialsMap>> {
    debug!("Trying to read credentials from {:?}", path);
    let credentials_raw = fs::read_to_string(&path)
        .with_context(|| format!("Reading credentials file {}", path.display()))?;
    let mut config = yaml::from_str::<HashMap<String, CredentialsMap>>(&credentials_raw)
        .context("Deserializing credentials")?;

    config
        .pop()
        .ok_or_else(|| anyhow!["failed to generate credentials"])
}

/// Fetch the credentials for a single connector.
pub fn fetch_connector_credentials(
    path: PathBuf,
    connector: &ConnectorNamespace,
) -> Result<CredentialsMap> {
    let mut all = fetch_credentials(path)?;
    all.remove(&connector.0)
        .ok_or_else(|| anyhow!["no credentials found for connector `{connector}`"])
}

/// Read the first yaml document in the file at `path`.
pub fn read_yaml_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Reading file {}", path.as_ref().display()))?;
    let mut docs = yaml::from_str::<T>(&raw).context("Deserializing yaml")?;
    if docs.is_empty() {
        return Err(anyhow!["{} is empty", path.as_ref().display()]);
    }
    Ok(docs.swap_remove(0))
}
