//! Strategy domain model
//!
//! The strategy aggregate as persisted by the remote store, its fixed
//! vocabularies, and the defaulting rules that repair partially-populated
//! records on load.
//!
//! # Components
//!
//! - [`types`]: the fully-populated aggregate and its value objects
//! - [`partial`]: wire shapes with optional fields plus defaulting/filtering

pub mod partial;
pub mod types;

pub use partial::{filter_conditions, PartialCondition, PartialLeg, PartialRisk, PartialStrategy};
pub use types::{
    is_known_comparator, is_known_indicator, ChartInterval, ChartType, Condition, CreatedBy,
    EntryConditions, ExpiryType, InstrumentInfo, InstrumentRef, OptionType, OrderLeg, OrderType,
    RiskKind, RiskRule, RiskTrigger, Strategy, StrategyStatus, StrategyType, StrategyUpdate,
    StrikeType, AVAILABLE_INSTRUMENTS, COMPARATORS, INDICATORS, TRADING_DAYS,
};
