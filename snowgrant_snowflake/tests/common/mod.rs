//! A fake warehouse that keeps role grants in memory and understands the
//! statements the grant code issues.

use std::collections::BTreeSet;
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use snowgrant_snowflake::{Executor, Row};

#[derive(Default)]
pub struct FakeWarehouse {
    /// (role, granted_to, grantee)
    grants: Mutex<BTreeSet<(String, String, String)>>,
    /// Everything executed or queried, in order.
    pub log: Mutex<Vec<String>>,
    /// Statements containing this text fail.
    pub fail_on: Option<String>,
    /// Extra raw rows returned by every `SHOW GRANTS OF ROLE`.
    pub extra_rows: Vec<Row>,
    /// Wrap grantee names in quotes when listing them.
    pub quote_names: bool,
}

fn unquote(s: &str) -> Result<String> {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .map(str::to_owned)
        .ok_or_else(|| anyhow!("expected a quoted identifier, got {s}"))
}

impl FakeWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grants(grants: &[(&str, &str, &str)]) -> Self {
        let fake = Self::new();
        fake.grants.lock().unwrap().extend(
            grants
                .iter()
                .map(|(r, t, g)| (r.to_string(), t.to_string(), g.to_string())),
        );
        fake
    }

    /// Grantees of `role`, as (granted_to, grantee) pairs.
    pub fn grants_of(&self, role: &str) -> Vec<(String, String)> {
        self.grants
            .lock()
            .unwrap()
            .iter()
            .filter(|(r, _, _)| r == role)
            .map(|(_, t, g)| (t.to_owned(), g.to_owned()))
            .collect()
    }

    /// Executed statements, without queries.
    pub fn statements(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|s| !s.starts_with("SHOW"))
            .cloned()
            .collect()
    }

    pub fn clear_log(&self) {
        self.log.lock().unwrap().clear();
    }
}

#[async_trait]
impl Executor for FakeWarehouse {
    async fn execute(&self, sql: &str) -> Result<()> {
        self.log.lock().unwrap().push(sql.to_owned());
        if let Some(fail_on) = &self.fail_on {
            if sql.contains(fail_on.as_str()) {
                bail!("injected failure");
            }
        }
        // GRANT ROLE "r" TO KIND "g" / REVOKE ROLE "r" FROM KIND "g"
        let parts: Vec<&str> = sql.split(' ').collect();
        let [verb, "ROLE", role, _, kind, grantee] = parts[..] else {
            bail!("unsupported statement {sql}");
        };
        let grant = (unquote(role)?, kind.to_owned(), unquote(grantee)?);
        let mut grants = self.grants.lock().unwrap();
        match verb {
            "GRANT" => {
                grants.insert(grant);
            }
            "REVOKE" => {
                grants.remove(&grant);
            }
            _ => bail!("unsupported statement {sql}"),
        }
        Ok(())
    }

    async fn query(&self, sql: &str) -> Result<Vec<Row>> {
        self.log.lock().unwrap().push(sql.to_owned());
        let role = sql
            .strip_prefix("SHOW GRANTS OF ROLE ")
            .ok_or_else(|| anyhow!("unsupported query {sql}"))
            .and_then(unquote)?;
        let mut rows: Vec<Row> = self
            .grants_of(&role)
            .into_iter()
            .map(|(granted_to, grantee)| {
                let grantee = if self.quote_names {
                    format!("\"{grantee}\"")
                } else {
                    grantee
                };
                Row::from([
                    ("created_on".to_owned(), Some("2022-10-01".to_owned())),
                    ("role".to_owned(), Some(role.to_owned())),
                    ("granted_to".to_owned(), Some(granted_to)),
                    ("grantee_name".to_owned(), Some(grantee)),
                    ("granted_by".to_owned(), None),
                ])
            })
            .collect();
        rows.extend(self.extra_rows.iter().cloned());
        Ok(rows)
    }
}
