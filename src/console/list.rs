//! Strategy list controller
//!
//! Owns the fetched page, the active filters and the list-loading flag
//! (distinct from the editor's save flag). Status changes and deletion are
//! fire-and-forget single calls against the store: on success they trigger
//! exactly one list refresh; on failure no local state changes.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::common::errors::Result;
use crate::common::traits::StrategyStore;
use crate::common::types::ListFilter;
use crate::editor::session::EditorSession;
use crate::strategy::types::{Strategy, StrategyStatus, StrategyUpdate};

/// Controller for the paginated strategy listing
pub struct StrategyList {
    store: Arc<dyn StrategyStore>,
    filter: ListFilter,
    /// When set, listing is scoped to this user's strategies
    user_filter: Option<String>,
    items: Vec<Strategy>,
    page: u32,
    pages: u32,
    total: u64,
    loading: bool,
}

impl StrategyList {
    pub fn new(store: Arc<dyn StrategyStore>) -> Self {
        Self {
            store,
            filter: ListFilter::default(),
            user_filter: None,
            items: Vec::new(),
            page: 1,
            pages: 1,
            total: 0,
            loading: false,
        }
    }

    pub fn items(&self) -> &[Strategy] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// List fetch in progress (render a loading row, not a save spinner)
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Select a status tab; `None` is the "all" tab. Resets to page 1.
    pub fn set_status_tab(&mut self, status: Option<StrategyStatus>) {
        self.filter.status = status;
        self.filter.page = 1;
    }

    /// Free-text search over names. Resets to page 1.
    pub fn set_search(&mut self, search: Option<String>) {
        self.filter.search = search;
        self.filter.page = 1;
    }

    /// Scope the listing to one user. Resets to page 1.
    pub fn set_user_filter(&mut self, user_id: Option<String>) {
        self.user_filter = user_id;
        self.filter.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.filter.page = page.max(1);
    }

    /// Rows per page. Resets to page 1.
    pub fn set_page_size(&mut self, limit: u32) {
        self.filter.limit = limit.max(1);
        self.filter.page = 1;
    }

    // ========================================================================
    // Fetch and refresh
    // ========================================================================

    /// Re-fetch the current page with the current filters
    pub async fn refresh(&mut self) -> Result<()> {
        self.loading = true;
        let result = match &self.user_filter {
            Some(user_id) => self.store.list_user_strategies(user_id, &self.filter).await,
            None => self.store.list_strategies(&self.filter).await,
        };
        self.loading = false;

        let page = result?;
        debug!(
            count = page.items.len(),
            page = page.page,
            "strategy list refreshed"
        );
        self.items = page.items;
        self.page = page.page;
        self.pages = page.pages;
        self.total = page.total;
        Ok(())
    }

    /// Open an editor session on one listed strategy. Each call produces an
    /// independent session; nothing is shared between open dialogs.
    pub fn open_editor(&self, strategy_id: &str) -> Option<EditorSession> {
        self.items
            .iter()
            .find(|s| s.id == strategy_id)
            .cloned()
            .map(EditorSession::open)
    }

    /// Optimistically merge a saved payload into the listed row. Callers
    /// follow up with [`StrategyList::refresh`] to reconcile any server-side
    /// transformation.
    pub fn apply_update(&mut self, strategy_id: &str, update: &StrategyUpdate) {
        let Some(row) = self.items.iter_mut().find(|s| s.id == strategy_id) else {
            warn!(strategy_id, "optimistic merge target not in the current page");
            return;
        };
        row.name = update.name.clone();
        row.strategy_type = update.strategy_type;
        row.status = update.status;
        row.chart_type = update.chart_type;
        row.interval = update.interval;
        row.use_combined_chart = update.use_combined_chart;
        row.square_off_time = update.square_off_time.clone();
        row.instruments = update.instruments.clone();
        row.trading_days = update.trading_days.clone();
        row.order_legs = update.order_legs.clone();
        row.long_entry_conditions = update.entry_conditions.long.clone();
        row.short_entry_conditions = update.entry_conditions.short.clone();
        row.exit_conditions = update.entry_conditions.exit.clone();
    }

    // ========================================================================
    // Fire-and-forget actions
    // ========================================================================

    /// Pause an active strategy
    pub async fn pause(&mut self, strategy_id: &str) -> Result<()> {
        self.change_status(strategy_id, StrategyStatus::Paused).await
    }

    /// Re-activate a paused strategy
    pub async fn activate(&mut self, strategy_id: &str) -> Result<()> {
        self.change_status(strategy_id, StrategyStatus::Active).await
    }

    /// Stop a strategy
    pub async fn stop(&mut self, strategy_id: &str) -> Result<()> {
        self.change_status(strategy_id, StrategyStatus::Stopped).await
    }

    /// Request a status change and refresh on success. No transition table
    /// is enforced: any status may be requested from any current status.
    pub async fn change_status(&mut self, strategy_id: &str, status: StrategyStatus) -> Result<()> {
        self.store.update_status(strategy_id, status).await?;
        self.refresh().await
    }

    /// Delete a strategy and refresh on success
    pub async fn delete(&mut self, strategy_id: &str) -> Result<()> {
        self.store.delete_strategy(strategy_id).await?;
        self.refresh().await
    }
}
