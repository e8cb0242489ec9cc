//! REST client for the strategy store admin API

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};

use super::messages::{ApiEnvelope, StatusUpdateRequest};
use crate::common::errors::{ConsoleError, Result};
use crate::common::traits::StrategyStore;
use crate::common::types::{ExecutedOrder, ListFilter, Page, StrategyStats};
use crate::config::types::StoreConfig;
use crate::strategy::partial::PartialStrategy;
use crate::strategy::types::{Strategy, StrategyStatus, StrategyUpdate};

/// REST client for the strategy store
#[derive(Debug, Clone)]
pub struct RestStrategyStore {
    /// HTTP client
    client: Client,
    /// Base URL of the admin API (e.g. `http://localhost:4000/api/admin`)
    base_url: String,
    /// Bearer token attached to every request when present
    auth_token: Option<String>,
}

impl RestStrategyStore {
    /// Create a new store client (unauthenticated)
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a new store client with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConsoleError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        })
    }

    /// Attach a bearer token for authenticated requests
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Build a client from configuration
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let store = Self::with_timeout(
            &config.base_url,
            Duration::from_secs(config.request_timeout_seconds),
        )?;
        Ok(match &config.auth_token {
            Some(token) => store.with_auth_token(token.clone()),
            None => store,
        })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map a non-success status to the error taxonomy. `not_found` supplies
    /// the identifier to report on a 404.
    async fn ensure_success(
        response: reqwest::Response,
        not_found: Option<&str>,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ConsoleError::Authentication(
                "bearer token missing or rejected by the store".to_string(),
            ));
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = not_found {
                return Err(ConsoleError::StrategyNotFound(id.to_string()));
            }
        }
        let body = response.text().await.unwrap_or_default();
        Err(ConsoleError::InvalidResponse(format!(
            "Store returned status {}: {}",
            status, body
        )))
    }

    /// Fetch and decode a list envelope, repairing each record
    async fn fetch_page(&self, url: &str, filter: &ListFilter) -> Result<Page<Strategy>> {
        debug!("Fetching strategies from: {}", url);
        let response = self
            .request(Method::GET, url)
            .query(&filter.query_pairs())
            .send()
            .await?;
        let response = Self::ensure_success(response, None).await?;

        let envelope: ApiEnvelope<Vec<PartialStrategy>> = response.json().await?;
        let pagination = envelope.pagination.clone();
        let records = envelope.into_data("list strategies")?;

        let items = records
            .into_iter()
            .map(PartialStrategy::into_strategy)
            .collect::<Result<Vec<_>>>()?;

        let total = items.len() as u64;
        Ok(match pagination {
            Some(p) => Page {
                items,
                page: p.page,
                pages: p.pages,
                total: p.total,
            },
            None => Page {
                items,
                page: filter.page,
                pages: 1,
                total,
            },
        })
    }
}

#[async_trait]
impl StrategyStore for RestStrategyStore {
    #[instrument(skip(self))]
    async fn list_strategies(&self, filter: &ListFilter) -> Result<Page<Strategy>> {
        let url = format!("{}/strategies", self.base_url);
        self.fetch_page(&url, filter).await
    }

    #[instrument(skip(self))]
    async fn list_user_strategies(
        &self,
        user_id: &str,
        filter: &ListFilter,
    ) -> Result<Page<Strategy>> {
        let url = format!("{}/users/{}/strategies", self.base_url, user_id);
        self.fetch_page(&url, filter).await
    }

    #[instrument(skip(self))]
    async fn strategy_stats(&self) -> Result<StrategyStats> {
        let url = format!("{}/strategies/stats", self.base_url);
        debug!("Fetching strategy stats from: {}", url);

        let response = self.request(Method::GET, &url).send().await?;
        let response = Self::ensure_success(response, None).await?;

        let envelope: ApiEnvelope<StrategyStats> = response.json().await?;
        envelope.into_data("strategy stats")
    }

    #[instrument(skip(self))]
    async fn strategy_orders(&self, strategy_id: &str) -> Result<Vec<ExecutedOrder>> {
        let url = format!("{}/strategies/{}/orders", self.base_url, strategy_id);
        debug!("Fetching executed orders from: {}", url);

        let response = self.request(Method::GET, &url).send().await?;
        let response = Self::ensure_success(response, Some(strategy_id)).await?;

        let envelope: ApiEnvelope<Vec<ExecutedOrder>> = response.json().await?;
        envelope.into_data("strategy orders")
    }

    #[instrument(skip(self, update))]
    async fn update_strategy(
        &self,
        strategy_id: &str,
        update: &StrategyUpdate,
    ) -> Result<Strategy> {
        let url = format!("{}/strategies/{}", self.base_url, strategy_id);
        debug!("Submitting strategy update to: {}", url);

        let response = self.request(Method::PUT, &url).json(update).send().await?;
        let response = Self::ensure_success(response, Some(strategy_id)).await?;

        // the store may transform the payload, so the repaired response body
        // is authoritative
        let envelope: ApiEnvelope<PartialStrategy> = response.json().await?;
        envelope.into_data("update strategy")?.into_strategy()
    }

    #[instrument(skip(self))]
    async fn update_status(&self, strategy_id: &str, status: StrategyStatus) -> Result<()> {
        let url = format!("{}/strategies/{}/status", self.base_url, strategy_id);
        debug!("Submitting status change to: {} ({})", url, status);

        let response = self
            .request(Method::PUT, &url)
            .json(&StatusUpdateRequest { status })
            .send()
            .await?;
        let response = Self::ensure_success(response, Some(strategy_id)).await?;

        let envelope: ApiEnvelope<serde_json::Value> = response.json().await?;
        envelope.ensure_success("update status")
    }

    #[instrument(skip(self))]
    async fn delete_strategy(&self, strategy_id: &str) -> Result<()> {
        let url = format!("{}/strategies/{}", self.base_url, strategy_id);
        debug!("Deleting strategy at: {}", url);

        let response = self.request(Method::DELETE, &url).send().await?;
        let response = Self::ensure_success(response, Some(strategy_id)).await?;

        let envelope: ApiEnvelope<serde_json::Value> = response.json().await?;
        envelope.ensure_success("delete strategy")
    }
}
