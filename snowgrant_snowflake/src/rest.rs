//! Rest API interface for Snowflake
//!

use crate::{
    consts,
    creds::SnowflakeCredentials,
    executor::{Executor, Row},
};

use std::collections::HashMap;
use std::iter::zip;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use jsonwebtoken::{encode, get_current_timestamp, Algorithm, EncodingKey, Header};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use snowgrant_core::logging::debug;

/// Claims for use with the `jsonwebtoken` crate when
/// creating a new JWT.
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    /// Required (validate_exp defaults to true in validation). Expiration time (as UTC timestamp)
    exp: usize,
    /// Optional. Issued at (as UTC timestamp)
    iat: usize,
    /// Optional. Issuer
    iss: String,
    /// Optional. Subject (whom token refers to)
    sub: String,
}

#[derive(Deserialize, Debug)]
struct SnowflakeField {
    #[serde(default)]
    name: String,
}

/// Options for the REST client.
#[derive(Default, Debug, Clone)]
pub struct SnowflakeRestConfig {
    /// Send requests without a key-pair JWT. Only useful against
    /// mock servers.
    pub skip_jwt: bool,
}

/// Wrapper struct for http functionality
pub struct SnowflakeRestClient {
    /// The credentials used to authenticate into Snowflake.
    credentials: SnowflakeCredentials,
    config: SnowflakeRestConfig,
    http_client: reqwest::Client,
}

impl SnowflakeRestClient {
    /// Validate the credentials and build a client.
    pub fn new(credentials: SnowflakeCredentials, config: SnowflakeRestConfig) -> Result<Self> {
        credentials.validate()?;
        Ok(Self {
            credentials,
            config,
            http_client: reqwest::Client::new(),
        })
    }

    /// Run a statement and return the raw response body.
    async fn query_text(&self, sql: &str) -> Result<String> {
        let request = self
            .get_request(sql)
            .context("failed to get request for query")?;
        let response = send_and_wait(request, sql).await?;
        response.text().await.context("couldn't get body text")
    }

    /// Fetch one extra partition of a statement's result set.
    async fn partition_text(&self, handle: &str, partition: usize) -> Result<String> {
        let request = self.authorize(
            self.http_client
                .get(format!("{}/{handle}", self.get_url()))
                .query(&[("partition", partition)]),
        )?;
        let response = request
            .send()
            .await
            .context("couldn't send request")?
            .error_for_status()?;
        debug!("fetched partition {} of {}", partition, handle);
        response.text().await.context("couldn't get body text")
    }

    /// If the URL is explicitly defined, that's used first.
    /// Otherwise, the standard account configuration
    /// is used
    fn get_url(&self) -> String {
        self.credentials.url.to_owned().unwrap_or_else(|| {
            format![
                "https://{}.snowflakecomputing.com/api/v2/statements",
                self.credentials.account
            ]
        })
    }

    fn get_request(&self, sql: &str) -> Result<RequestBuilder> {
        let body = self.get_body(sql);

        let request = self
            .http_client
            .post(self.get_url())
            .json(&body)
            .header(consts::CONTENT_TYPE_HEADER, "application/json");
        self.authorize(request)
    }

    /// Add the headers every request carries, including the JWT unless
    /// it is disabled.
    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let mut request = request
            .header(consts::ACCEPT_HEADER, "application/json")
            .header(consts::USER_AGENT_HEADER, "snowgrant");
        if !self.config.skip_jwt {
            let token = self.get_jwt()?;
            request = request
                .header(consts::AUTH_HEADER, format!["Bearer {}", token])
                .header(consts::SNOWFLAKE_AUTH_HEADER, "KEYPAIR_JWT");
        }
        Ok(request)
    }

    fn get_body<'a>(&'a self, sql: &'a str) -> HashMap<&'a str, &'a str> {
        let mut body = HashMap::new();
        body.insert("statement", sql);
        body.insert("warehouse", &self.credentials.warehouse);
        body.insert("role", &self.credentials.role);
        body
    }

    fn get_jwt(&self) -> Result<String> {
        let qualified_username = format![
            "{}.{}",
            self.credentials.account.to_uppercase(),
            self.credentials.user.to_uppercase()
        ];

        // Generate jwt
        let claims = JwtClaims {
            exp: (get_current_timestamp() + 3600) as usize,
            iat: get_current_timestamp() as usize,
            iss: format!["{}.{}", qualified_username, self.credentials.public_key_fp],
            sub: qualified_username,
        };

        encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &EncodingKey::from_rsa_pem(
                self.credentials
                    .private_key
                    .replace(' ', "")
                    .replace("ENDPRIVATEKEY", "END PRIVATE KEY")
                    .replace("BEGINPRIVATEKEY", "BEGIN PRIVATE KEY")
                    .as_bytes(),
            )
            .context("invalid private key")?,
        )
        .map_err(anyhow::Error::from)
    }
}

#[async_trait]
impl Executor for SnowflakeRestClient {
    /// Execute a query, dropping the result.
    ///
    /// `execute` should only be used for
    /// SQL statements that don't expect results,
    /// such as those that are used to update
    /// state in Snowflake.
    async fn execute(&self, sql: &str) -> Result<()> {
        let request = self.get_request(sql)?;
        send_and_wait(request, sql).await?;
        debug!("executed {:?}", sql);
        Ok(())
    }

    /// Run a query and collect every partition of its result.
    async fn query(&self, sql: &str) -> Result<Vec<Row>> {
        let body = self.query_text(sql).await?;
        let Some(first) = parse_result_set(&body)
            .with_context(|| format!("failed to read results of {sql:?}"))?
        else {
            return Ok(vec![]);
        };

        let mut data = first.data;
        if first.partitions > 1 {
            let handle = first
                .handle
                .as_deref()
                .context("partitioned result without a statement handle")?;
            for partition in 1..first.partitions {
                let body = self.partition_text(handle, partition).await?;
                data.extend(parse_partition(&body).with_context(|| {
                    format!("failed to read partition {partition} of {sql:?}")
                })?);
            }
        }
        Ok(zip_rows(&first.fields, data))
    }
}

/// Send a statement and fail unless it has finished.
///
/// The SQL API answers 202 while a statement is still running.
async fn send_and_wait(request: RequestBuilder, sql: &str) -> Result<Response> {
    let response = request
        .send()
        .await
        .context("couldn't send request")?
        .error_for_status()?;
    debug!("status for query {:?}: {:?}", sql, response.status());
    if response.status() == StatusCode::ACCEPTED {
        bail!("statement {:?} is still running", sql);
    }
    Ok(response)
}

#[derive(Deserialize, Debug)]
struct ResultSetMetaData {
    #[serde(rename = "rowType")]
    row_type: Vec<SnowflakeField>,
    #[serde(rename = "partitionInfo", default)]
    partition_info: Vec<JsonValue>,
}

#[derive(Deserialize, Debug)]
struct StatementResponse {
    #[serde(rename = "resultSetMetaData")]
    result_set_meta_data: Option<ResultSetMetaData>,
    #[serde(rename = "statementHandle")]
    statement_handle: Option<String>,
    #[serde(default)]
    data: Vec<Vec<Option<String>>>,
}

/// The first response of a query: column names, the first partition's
/// data, and how many partitions there are in total.
#[derive(Debug)]
pub(crate) struct ResultSet {
    fields: Vec<String>,
    data: Vec<Vec<Option<String>>>,
    handle: Option<String>,
    partitions: usize,
}

/// Parse the first response of a query. An empty body has no result set.
pub(crate) fn parse_result_set(body: &str) -> Result<Option<ResultSet>> {
    if body.is_empty() {
        return Ok(None);
    }
    let response: StatementResponse =
        serde_json::from_str(body).context("failed to deserialize")?;
    let meta = response
        .result_set_meta_data
        .context("response has no resultSetMetaData")?;
    Ok(Some(ResultSet {
        fields: meta.row_type.into_iter().map(|f| f.name).collect(),
        data: response.data,
        handle: response.statement_handle,
        partitions: meta.partition_info.len().max(1),
    }))
}

/// Parse a follow-up partition, which only carries `data`.
fn parse_partition(body: &str) -> Result<Vec<Vec<Option<String>>>> {
    let response: StatementResponse =
        serde_json::from_str(body).context("failed to deserialize")?;
    Ok(response.data)
}

fn zip_rows(fields: &[String], data: Vec<Vec<Option<String>>>) -> Vec<Row> {
    data.into_iter()
        // Zip field - i
        .map(|i| zip(fields.iter().cloned(), i).collect())
        .collect()
}
