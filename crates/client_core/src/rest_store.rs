//! `CollectionStore` over HTTP using the PostgREST query dialect
//! (`col=eq.value`, `order=col.desc`) spoken by the hosted backend.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use shared::error::RemoteErrorBody;
use tracing::debug;
use url::Url;

use crate::{
    error::{StoreError, StoreResult},
    store::{CollectionStore, Filter, SelectQuery},
};

const REST_PREFIX: &str = "rest/v1/";

pub struct RestCollectionStore {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl RestCollectionStore {
    pub fn new(store_url: &str, api_key: Option<String>) -> StoreResult<Self> {
        let trimmed = store_url.trim();
        let mut base_url = Url::parse(trimmed)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http: Client::new(),
            base_url,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> StoreResult<Url> {
        Ok(self.base_url.join(REST_PREFIX)?.join(table)?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }
}

fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|filter| (filter.column.clone(), format!("eq.{}", filter.value)))
        .collect()
}

async fn ensure_success(response: Response, operation: &str) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<RemoteErrorBody>(&body) {
        Ok(remote) => remote.summary(),
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("empty response body")
            .to_string(),
        Err(_) => body,
    };
    Err(StoreError::new(format!("{operation} returned {status}: {detail}")))
}

#[async_trait]
impl CollectionStore for RestCollectionStore {
    async fn select(&self, table: &str, query: &SelectQuery) -> StoreResult<Vec<Value>> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        if let Some(order) = &query.order {
            params.push((
                "order".to_string(),
                format!("{}.{}", order.column, order.direction.as_str()),
            ));
        }
        params.extend(filter_params(&query.filters));

        debug!(table, "store select");
        let response = self
            .authorize(self.http.get(self.table_url(table)?))
            .query(&params)
            .send()
            .await?;
        let rows: Vec<Value> = ensure_success(response, "select").await?.json().await?;
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> StoreResult<()> {
        debug!(table, rows = rows.len(), "store insert");
        let response = self
            .authorize(self.http.post(self.table_url(table)?))
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await?;
        ensure_success(response, "insert").await?;
        Ok(())
    }

    async fn update(&self, table: &str, filter: &Filter, patch: Value) -> StoreResult<()> {
        debug!(table, column = %filter.column, value = %filter.value, "store update");
        let response = self
            .authorize(self.http.patch(self.table_url(table)?))
            .header("Prefer", "return=representation")
            .query(&filter_params(std::slice::from_ref(filter)))
            .json(&patch)
            .send()
            .await?;
        let updated: Vec<Value> = ensure_success(response, "update").await?.json().await?;
        if updated.is_empty() {
            return Err(StoreError::new(format!(
                "update matched no rows in '{table}' where {} = {}",
                filter.column, filter.value
            )));
        }
        Ok(())
    }

    async fn delete(&self, table: &str, filter: &Filter) -> StoreResult<()> {
        debug!(table, column = %filter.column, value = %filter.value, "store delete");
        let response = self
            .authorize(self.http.delete(self.table_url(table)?))
            .header("Prefer", "return=minimal")
            .query(&filter_params(std::slice::from_ref(filter)))
            .send()
            .await?;
        ensure_success(response, "delete").await?;
        Ok(())
    }
}
