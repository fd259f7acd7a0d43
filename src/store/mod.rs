//! HTTP client for the managed record store.
//!
//! The store is an opaque collaborator: rows are reached through REST
//! endpoints with equality/range/disjunctive filters, ordering, and upsert
//! with an explicit conflict target. All requests carry the project API
//! key plus the session bearer token; row scoping by `user_id` is applied
//! by the record layer on every query.
//!
//! Reads retry on transient failures with bounded backoff. Mutations are
//! single-shot: last write wins, no concurrency tokens, no auto-retry.

pub mod query;
pub mod session;

pub use query::{Order, QueryBuilder};
pub use session::Session;

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct StoreClient {
    pub(crate) base_url: Url,
    pub(crate) api_key: String,
    pub(crate) http: reqwest::Client,
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 250,
            max_backoff_ms: 2_000,
        }
    }
}

fn retry_delay(attempt: u32, policy: &RetryPolicy) -> Duration {
    let exponent = 2u64.saturating_pow(attempt.saturating_sub(1));
    let base = policy
        .initial_backoff_ms
        .saturating_mul(exponent)
        .min(policy.max_backoff_ms);
    Duration::from_millis(base)
}

/// Send a read request, retrying transport errors and throttling/server
/// statuses up to the policy's attempt budget.
pub(crate) async fn send_with_retry(
    request: reqwest::RequestBuilder,
    policy: &RetryPolicy,
) -> Result<reqwest::Response, StoreError> {
    let attempts = policy.max_attempts.max(1);
    for attempt in 1..=attempts {
        let Some(cloned) = request.try_clone() else {
            return request.send().await.map_err(StoreError::Http);
        };

        match cloned.send().await {
            Ok(response) => {
                let status = response.status();
                let throttled = status == reqwest::StatusCode::TOO_MANY_REQUESTS
                    || status == reqwest::StatusCode::REQUEST_TIMEOUT
                    || status.is_server_error();
                if throttled && attempt < attempts {
                    let delay = retry_delay(attempt, policy);
                    log::warn!(
                        "store retry {}/{} after status {} (sleep {:?})",
                        attempt,
                        attempts,
                        status,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                return Ok(response);
            }
            Err(err) => {
                if (err.is_timeout() || err.is_connect()) && attempt < attempts {
                    let delay = retry_delay(attempt, policy);
                    log::warn!(
                        "store retry {}/{} after transport error: {} (sleep {:?})",
                        attempt,
                        attempts,
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                return Err(StoreError::Http(err));
            }
        }
    }

    Err(StoreError::RequestFailed {
        status: 0,
        message: "request exhausted retries".to_string(),
    })
}

/// Map non-success statuses to `StoreError`. Auth failures get their own
/// variant so the session layer can prompt a re-sign-in.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(StoreError::AuthExpired);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(StoreError::RequestFailed {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

impl StoreClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        // A trailing slash keeps Url::join from eating the last path segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Ok(Self {
            base_url: Url::parse(&normalized)?,
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        Self::new(&config.store_url, &config.api_key)
    }

    /// Start a read query against a table.
    pub fn table(&self, name: &str) -> QueryBuilder<'_> {
        QueryBuilder::new(self, name)
    }

    pub(crate) fn rest_url(
        &self,
        table: &str,
        pairs: &[(String, String)],
    ) -> Result<Url, StoreError> {
        let mut url = self.base_url.join(&format!("rest/v1/{table}"))?;
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    fn authed(&self, request: reqwest::RequestBuilder, session: &Session) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.api_key.clone())
            .bearer_auth(&session.access_token)
    }

    async fn returned_row<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let mut rows: Vec<T> = response.json().await?;
        match rows.len() {
            1 => Ok(rows.remove(0)),
            n => Err(StoreError::Cardinality(n)),
        }
    }

    /// Insert one row; the store assigns id and timestamps.
    pub async fn insert<T: DeserializeOwned>(
        &self,
        table: &str,
        row: serde_json::Value,
        session: &Session,
    ) -> Result<T, StoreError> {
        let url = self.rest_url(table, &[])?;
        let request = self
            .authed(self.http.post(url), session)
            .header("Prefer", "return=representation")
            .json(&row);
        let response = check_status(request.send().await?).await?;
        Self::returned_row(response).await
    }

    pub(crate) fn upsert_url(&self, table: &str, on_conflict: &str) -> Result<Url, StoreError> {
        self.rest_url(
            table,
            &[("on_conflict".to_string(), on_conflict.to_string())],
        )
    }

    /// Insert-or-replace with an explicit conflict target, e.g.
    /// `"user_id,date"` for the per-day-unique entities. The store performs
    /// the resolution atomically; this client does not.
    pub async fn upsert<T: DeserializeOwned>(
        &self,
        table: &str,
        row: serde_json::Value,
        on_conflict: &str,
        session: &Session,
    ) -> Result<T, StoreError> {
        let url = self.upsert_url(table, on_conflict)?;
        let request = self
            .authed(self.http.post(url), session)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&row);
        let response = check_status(request.send().await?).await?;
        Self::returned_row(response).await
    }

    /// Full-record or partial update of one row by id.
    pub async fn update<T: DeserializeOwned>(
        &self,
        table: &str,
        id: Uuid,
        patch: serde_json::Value,
        session: &Session,
    ) -> Result<T, StoreError> {
        let pairs = vec![("id".to_string(), format!("eq.{id}"))];
        let url = self.rest_url(table, &pairs)?;
        let request = self
            .authed(self.http.patch(url), session)
            .header("Prefer", "return=representation")
            .json(&patch);
        let response = check_status(request.send().await?).await?;
        Self::returned_row(response).await
    }

    /// Delete one row by id. Callers confirm with the user first.
    pub async fn delete(&self, table: &str, id: Uuid, session: &Session) -> Result<(), StoreError> {
        let pairs = vec![("id".to_string(), format!("eq.{id}"))];
        let url = self.rest_url(table, &pairs)?;
        let request = self.authed(self.http.delete(url), session);
        check_status(request.send().await?).await?;
        Ok(())
    }

    /// Invoke a server-side function, e.g. the overtime balance aggregate.
    pub async fn rpc<T: DeserializeOwned>(
        &self,
        name: &str,
        args: serde_json::Value,
        session: &Session,
    ) -> Result<T, StoreError> {
        let url = self.base_url.join(&format!("rest/v1/rpc/{name}"))?;
        let request = self.authed(self.http.post(url), session).json(&args);
        let response = check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }
}

// ============================================================================
// Tests
// ============================================================================
