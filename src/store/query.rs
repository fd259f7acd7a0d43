//! Read-query builder: filters, ordering and fetch cardinalities.
//!
//! Filters compose in call order into the store's `column=op.value` query
//! parameters. The pair list is deterministic so it can be asserted on
//! without a network.

use serde::de::DeserializeOwned;

use super::{check_status, send_with_retry, RetryPolicy, Session, StoreClient};
use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

pub struct QueryBuilder<'a> {
    client: &'a StoreClient,
    table: String,
    select: String,
    filters: Vec<(String, String)>,
    or_filter: Option<String>,
    orders: Vec<(String, Order)>,
    limit: Option<u32>,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) fn new(client: &'a StoreClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            select: "*".to_string(),
            filters: Vec::new(),
            or_filter: None,
            orders: Vec::new(),
            limit: None,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = columns.to_string();
        self
    }

    pub fn eq(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.filters.push((column.to_string(), format!("eq.{value}")));
        self
    }

    pub fn gte(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.filters.push((column.to_string(), format!("gte.{value}")));
        self
    }

    pub fn lte(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.filters.push((column.to_string(), format!("lte.{value}")));
        self
    }

    /// Array-contains filter, e.g. tag membership on a text[] column.
    pub fn contains(mut self, column: &str, value: &str) -> Self {
        self.filters
            .push((column.to_string(), format!("cs.{{{value}}}")));
        self
    }

    /// Raw disjunctive filter in the store's `or` syntax, e.g.
    /// `"start_date.lte.X,due_date.gte.Y"`.
    pub fn or(mut self, expression: &str) -> Self {
        self.or_filter = Some(format!("({expression})"));
        self
    }

    /// Order by a column; calls accumulate into a composite ordering.
    pub fn order(mut self, column: &str, direction: Order) -> Self {
        self.orders.push((column.to_string(), direction));
        self
    }

    pub fn limit(mut self, count: u32) -> Self {
        self.limit = Some(count);
        self
    }

    /// The query parameters this builder will send, in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.select.clone())];
        pairs.extend(self.filters.iter().cloned());
        if let Some(or) = &self.or_filter {
            pairs.push(("or".to_string(), or.clone()));
        }
        if !self.orders.is_empty() {
            let joined = self
                .orders
                .iter()
                .map(|(column, direction)| format!("{column}.{}", direction.as_str()))
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("order".to_string(), joined));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }

    /// Fetch all matching rows.
    pub async fn fetch<T: DeserializeOwned>(self, session: &Session) -> Result<Vec<T>, StoreError> {
        let url = self.client.rest_url(&self.table, &self.query_pairs())?;
        let request = self
            .client
            .http
            .get(url)
            .header("apikey", self.client.api_key.clone())
            .bearer_auth(&session.access_token);
        let response = send_with_retry(request, &RetryPolicy::default()).await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Expect exactly one row.
    pub async fn single<T: DeserializeOwned>(self, session: &Session) -> Result<T, StoreError> {
        let mut rows: Vec<T> = self.fetch(session).await?;
        match rows.len() {
            1 => Ok(rows.remove(0)),
            n => Err(StoreError::Cardinality(n)),
        }
    }

    /// Expect zero or one row.
    pub async fn maybe_single<T: DeserializeOwned>(
        self,
        session: &Session,
    ) -> Result<Option<T>, StoreError> {
        let mut rows: Vec<T> = self.fetch(session).await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(Some(rows.remove(0))),
            n => Err(StoreError::Cardinality(n)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
