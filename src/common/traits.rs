//! Trait seam between the console and the remote strategy store

use async_trait::async_trait;

use crate::common::errors::Result;
use crate::common::types::{ExecutedOrder, ListFilter, Page, StrategyStats};
use crate::strategy::types::{Strategy, StrategyStatus, StrategyUpdate};

/// The remote strategy store.
///
/// Implemented over REST by [`crate::store::rest::RestStrategyStore`]; tests
/// substitute in-memory fakes. The store coordinates nothing: concurrent
/// writers are possible and the last write wins.
#[async_trait]
pub trait StrategyStore: Send + Sync {
    /// Paginated listing with status/search filters
    async fn list_strategies(&self, filter: &ListFilter) -> Result<Page<Strategy>>;

    /// Paginated listing scoped to one user's strategies
    async fn list_user_strategies(
        &self,
        user_id: &str,
        filter: &ListFilter,
    ) -> Result<Page<Strategy>>;

    /// Aggregate counters for the dashboard cards
    async fn strategy_stats(&self) -> Result<StrategyStats>;

    /// Executed-order history for one strategy
    async fn strategy_orders(&self, strategy_id: &str) -> Result<Vec<ExecutedOrder>>;

    /// Full update of one strategy, keyed by its immutable id. Returns the
    /// aggregate as the store persisted it (it may transform the payload).
    async fn update_strategy(&self, strategy_id: &str, update: &StrategyUpdate)
        -> Result<Strategy>;

    /// Single-field status change, independent of the full save path
    async fn update_status(&self, strategy_id: &str, status: StrategyStatus) -> Result<()>;

    /// Delete one strategy
    async fn delete_strategy(&self, strategy_id: &str) -> Result<()>;
}
