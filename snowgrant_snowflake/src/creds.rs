use std::collections::HashSet;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use snowgrant_core::config::CredentialsMap;

/// Credentials for authenticating to Snowflake.
///
/// The user sets these up by pasting their key-pair details
/// into their connectors.yaml file.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct SnowflakeCredentials {
    pub account: String,
    pub role: String,
    pub user: String,
    pub warehouse: String,
    pub private_key: String,
    pub public_key_fp: String,
    /// Overrides the account URL. Mostly useful for testing.
    pub url: Option<String>,
}

impl SnowflakeCredentials {
    /// Build credentials from a connector's entry in connectors.yaml.
    ///
    /// Every missing required field is reported at once.
    pub fn from_map(credentials: &CredentialsMap) -> Result<Self> {
        let mut conn = SnowflakeCredentials::default();
        let mut required_fields: HashSet<_> = vec![
            "account",
            "role",
            "user",
            "warehouse",
            "private_key",
            "public_key_fp",
            // "url" // URL not required – defaults to typical account URL.
        ]
        .into_iter()
        .collect();

        for (k, v) in credentials.iter() {
            match k.as_ref() {
                "account" => conn.account = v.to_string(),
                "role" => conn.role = v.to_string(),
                "user" => conn.user = v.to_string(),
                "warehouse" => conn.warehouse = v.to_string(),
                "private_key" => conn.private_key = v.to_string(),
                "public_key_fp" => conn.public_key_fp = v.to_string(),
                "url" => conn.url = Some(v.to_string()),
                _ => (),
            }

            required_fields.remove::<str>(k);
        }

        if !required_fields.is_empty() {
            let mut missing: Vec<_> = required_fields.into_iter().collect();
            missing.sort_unstable();
            Err(anyhow![
                "Snowflake config missing required fields: {:#?}",
                missing
            ])
        } else {
            Ok(conn)
        }
    }

    /// Perform simple field validation to catch bad input.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.account.is_empty()
            || self.role.is_empty()
            || self.user.is_empty()
            || self.warehouse.is_empty()
            || self.private_key.is_empty()
            || self.public_key_fp.is_empty()
        {
            return Err(anyhow!(
                "Credentials are missing. Please make sure your connectors.yaml file is correct. Credentials received: {:#?}", self
            ));
        }
        Ok(())
    }
}
