//! Unified types shared by the store client and the console controllers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::strategy::types::{OrderType, StrategyStatus};

/// Filters for a paginated strategy listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    pub page: u32,
    pub limit: u32,
    /// Status tab; `None` lists all statuses
    pub status: Option<StrategyStatus>,
    /// Free-text search over strategy names
    pub search: Option<String>,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: None,
            search: None,
        }
    }
}

impl ListFilter {
    /// Query pairs in the order the store expects them
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(search) = &self.search {
            if !search.is_empty() {
                pairs.push(("search", search.clone()));
            }
        }
        pairs
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Aggregate counters for the strategy dashboard cards
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StrategyStats {
    #[serde(rename = "totalStrategies", default)]
    pub total_strategies: u64,
    #[serde(rename = "activeStrategies", default)]
    pub active_strategies: u64,
    #[serde(rename = "pausedStrategies", default)]
    pub paused_strategies: u64,
    #[serde(rename = "totalUsers", default)]
    pub total_users: u64,
    #[serde(rename = "timeBasedStrategies", default)]
    pub time_based_strategies: u64,
    #[serde(rename = "indicatorBasedStrategies", default)]
    pub indicator_based_strategies: u64,
}

/// One executed order from a strategy's history. Read-only, display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutedOrder {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "tradingSymbol", default)]
    pub trading_symbol: String,
    #[serde(rename = "transactionType")]
    pub transaction_type: OrderType,
    #[serde(default)]
    pub quantity: u32,
    /// Store-side vocabulary (COMPLETE, PENDING, REJECTED, ...); kept as a
    /// string since the console only displays it
    #[serde(rename = "orderStatus", default)]
    pub order_status: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}
