//! The strategy aggregate and its value objects
//!
//! Every enum here round-trips to the exact wire string the store persists,
//! including the awkward ones ("CP >=", "Williams %R" lives in the indicator
//! vocabulary as a plain string).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Indicator vocabulary for condition rules. The first entry is the default
/// for a newly added condition.
pub const INDICATORS: &[&str] = &[
    "SMA",
    "EMA",
    "RSI",
    "MACD",
    "Bollinger Bands",
    "Stochastic",
    "ADX",
    "Williams %R",
];

/// Comparator vocabulary for condition rules. The first entry is the default
/// for a newly added condition.
pub const COMPARATORS: &[&str] = &[">", "<", ">=", "<=", "=", "Cross Above", "Cross Below"];

/// Whether `indicator` is in the selector vocabulary
pub fn is_known_indicator(indicator: &str) -> bool {
    INDICATORS.contains(&indicator)
}

/// Whether `comparator` is in the selector vocabulary
pub fn is_known_comparator(comparator: &str) -> bool {
    COMPARATORS.contains(&comparator)
}

/// Instruments the console offers for selection
pub const AVAILABLE_INSTRUMENTS: &[&str] = &[
    "NIFTY50", "BANKNIFTY", "SENSEX", "RELIANCE", "TCS", "HDFCBANK", "INFY",
];

/// Weekdays a time-based strategy may trade on
pub const TRADING_DAYS: &[&str] = &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Order side for a leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Buy => write!(f, "BUY"),
            OrderType::Sell => write!(f, "SELL"),
        }
    }
}

/// Option contract type (call or put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    Ce,
    Pe,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionType::Ce => write!(f, "CE"),
            OptionType::Pe => write!(f, "PE"),
        }
    }
}

/// Contract expiry cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryType {
    Weekly,
    Monthly,
}

/// Strike-selection rule for a leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrikeType {
    #[serde(rename = "ATM")]
    Atm,
    #[serde(rename = "ATMPER")]
    AtmPercent,
    #[serde(rename = "ITM")]
    Itm,
    #[serde(rename = "OTM")]
    Otm,
    /// Closest premium
    #[serde(rename = "CP")]
    Cp,
    /// Closest premium at or above the bound
    #[serde(rename = "CP >=")]
    CpGte,
    /// Closest premium at or below the bound
    #[serde(rename = "CP <=")]
    CpLte,
}

/// Unit a stop-loss/target value is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskKind {
    Points,
    Percent,
}

/// Price series a stop-loss/target triggers against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTrigger {
    Price,
    Premium,
}

/// A stop-loss or target rule attached to a leg
///
/// Downstream consumers assume every leg carries a fully-populated rule, so
/// partially-persisted rules are repaired by defaulting rather than left
/// optional (see [`crate::strategy::partial`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRule {
    #[serde(rename = "type")]
    pub kind: RiskKind,
    pub value: Decimal,
    pub trigger: RiskTrigger,
}

impl RiskRule {
    pub fn new(kind: RiskKind, value: Decimal, trigger: RiskTrigger) -> Self {
        Self {
            kind,
            value,
            trigger,
        }
    }
}

/// One option order definition within a strategy
///
/// `Default` is the short-options-selling template the editor uses for a
/// newly added leg, so a fresh leg is immediately valid without user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLeg {
    #[serde(rename = "orderType")]
    pub order_type: OrderType,
    #[serde(rename = "optionType")]
    pub option_type: OptionType,
    #[serde(rename = "expiryType")]
    pub expiry_type: ExpiryType,
    #[serde(rename = "strikeType")]
    pub strike_type: StrikeType,
    /// Free-form parameter for the strike rule (offset, premium bound, ...)
    #[serde(rename = "strikeValue")]
    pub strike_value: String,
    pub quantity: u32,
    #[serde(rename = "stopLoss")]
    pub stop_loss: RiskRule,
    pub target: RiskRule,
}

impl Default for OrderLeg {
    fn default() -> Self {
        Self {
            order_type: OrderType::Sell,
            option_type: OptionType::Pe,
            expiry_type: ExpiryType::Weekly,
            strike_type: StrikeType::Otm,
            strike_value: "150".to_string(),
            quantity: 50,
            stop_loss: RiskRule::new(RiskKind::Points, Decimal::from(1500), RiskTrigger::Price),
            target: RiskRule::new(RiskKind::Points, Decimal::from(800), RiskTrigger::Price),
        }
    }
}

/// One indicator-comparator-threshold rule
///
/// Indicator and comparator come from fixed vocabularies but are persisted as
/// plain strings by the store; [`Condition::is_complete`] is the invariant the
/// defensive load filter enforces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub indicator: String,
    pub comparator: String,
    /// String-encoded numeric threshold. May be freely edited, including to
    /// empty, while a session is open; only persisted when non-empty.
    pub value: String,
}

impl Condition {
    pub fn new(
        indicator: impl Into<String>,
        comparator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            indicator: indicator.into(),
            comparator: comparator.into(),
            value: value.into(),
        }
    }

    /// All three fields non-empty after trimming
    pub fn is_complete(&self) -> bool {
        !self.indicator.trim().is_empty()
            && !self.comparator.trim().is_empty()
            && !self.value.trim().is_empty()
    }
}

impl Default for Condition {
    fn default() -> Self {
        Self::new(INDICATORS[0], COMPARATORS[0], "0")
    }
}

/// Strategy classification, deciding which optional sections are meaningful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// Executes on a schedule; uses trading days and square-off time
    TimeBased,
    /// Executes on conditions; uses the three condition arrays
    IndicatorBased,
}

impl std::fmt::Display for StrategyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyType::TimeBased => write!(f, "time_based"),
            StrategyType::IndicatorBased => write!(f, "indicator_based"),
        }
    }
}

/// Flat strategy status. Not a strict state machine: the store accepts any
/// requested status from any current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyStatus {
    Active,
    Paused,
    Stopped,
    Draft,
    Completed,
    Backtested,
}

impl std::fmt::Display for StrategyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StrategyStatus::Active => "active",
            StrategyStatus::Paused => "paused",
            StrategyStatus::Stopped => "stopped",
            StrategyStatus::Draft => "draft",
            StrategyStatus::Completed => "completed",
            StrategyStatus::Backtested => "backtested",
        };
        write!(f, "{}", s)
    }
}

/// Chart rendering preference (presentation metadata, not trading logic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartType {
    Candlestick,
    Line,
    Bar,
}

/// Chart candle interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartInterval {
    #[serde(rename = "1m")]
    Min1,
    #[serde(rename = "5m")]
    Min5,
    #[serde(rename = "15m")]
    Min15,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "1d")]
    Day1,
}

/// Structured instrument reference as some store records carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// An instrument reference: either a bare symbol or a structured record
///
/// The store is inconsistent about which shape it persists, so both are
/// accepted on the wire; [`InstrumentRef::display_symbol`] is the one place
/// that resolves the ambiguity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstrumentRef {
    Symbol(String),
    Reference(InstrumentInfo),
}

impl InstrumentRef {
    pub fn symbol(symbol: impl Into<String>) -> Self {
        InstrumentRef::Symbol(symbol.into())
    }

    /// Symbol to display, preferring `symbol` over `name` for structured refs
    pub fn display_symbol(&self) -> &str {
        match self {
            InstrumentRef::Symbol(s) => s,
            InstrumentRef::Reference(info) => info
                .symbol
                .as_deref()
                .or(info.name.as_deref())
                .unwrap_or(""),
        }
    }
}

/// The user who created a strategy. Read-only: set at creation, never edited
/// by the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBy {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// The full persisted configuration of one trading strategy
///
/// Always complete: records fetched from the store are repaired via
/// [`crate::strategy::partial::PartialStrategy`] before they become this
/// type, so no consumer needs to guard against missing nested data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    /// Server-assigned identity, immutable once created
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub strategy_type: StrategyType,
    pub status: StrategyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<CreatedBy>,
    #[serde(default)]
    pub instruments: Vec<InstrumentRef>,
    #[serde(default)]
    pub order_legs: Vec<OrderLeg>,
    /// Meaningful only for time-based strategies
    #[serde(default)]
    pub trading_days: Vec<String>,
    /// "HH:MM", meaningful only for time-based strategies
    pub square_off_time: String,
    /// Meaningful only for indicator-based strategies
    #[serde(rename = "longEntryConditions", default)]
    pub long_entry_conditions: Vec<Condition>,
    #[serde(rename = "shortEntryConditions", default)]
    pub short_entry_conditions: Vec<Condition>,
    #[serde(rename = "exitConditions", default)]
    pub exit_conditions: Vec<Condition>,
    #[serde(rename = "chartType")]
    pub chart_type: ChartType,
    pub interval: ChartInterval,
    #[serde(rename = "useCombinedChart", default)]
    pub use_combined_chart: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The three condition arrays, reconciled into one object on save
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryConditions {
    #[serde(default)]
    pub long: Vec<Condition>,
    #[serde(default)]
    pub short: Vec<Condition>,
    #[serde(default)]
    pub exit: Vec<Condition>,
}

/// The full update payload submitted on save
///
/// Assembled by the editor session from its working state; submitted as one
/// `PUT` keyed by the aggregate's immutable id. Last write wins; the store
/// keeps no version token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyUpdate {
    pub name: String,
    #[serde(rename = "type")]
    pub strategy_type: StrategyType,
    pub status: StrategyStatus,
    #[serde(rename = "chartType")]
    pub chart_type: ChartType,
    pub interval: ChartInterval,
    #[serde(rename = "useCombinedChart")]
    pub use_combined_chart: bool,
    pub square_off_time: String,
    pub instruments: Vec<InstrumentRef>,
    pub trading_days: Vec<String>,
    pub order_legs: Vec<OrderLeg>,
    pub entry_conditions: EntryConditions,
}
