//! StrategyConsole Library
//!
//! The headless core of a trading-strategy administration console: the typed
//! strategy data model, editor sessions with save reconciliation, a list
//! controller, and a REST client for the remote strategy store.

pub mod common;
pub mod config;
pub mod console;
pub mod editor;
pub mod store;
pub mod strategy;

// Re-export commonly used types
pub use common::errors::{ConsoleError, Result};
pub use common::traits::StrategyStore;
pub use common::types::{ExecutedOrder, ListFilter, Page, StrategyStats};
pub use config::types::AppConfig;
pub use console::list::StrategyList;
pub use editor::array::ArrayEditor;
pub use editor::session::{
    ConditionField, ConditionKind, EditorSession, FieldError, LegDraft, LegUpdate, RiskLeg,
    RiskUpdate, SaveOutcome,
};
pub use store::rest::RestStrategyStore;
pub use strategy::partial::{filter_conditions, PartialCondition, PartialLeg, PartialStrategy};
pub use strategy::types::{
    ChartInterval, ChartType, Condition, CreatedBy, EntryConditions, ExpiryType, InstrumentRef,
    OptionType, OrderLeg, OrderType, RiskKind, RiskRule, RiskTrigger, Strategy, StrategyStatus,
    StrategyType, StrategyUpdate, StrikeType,
};
