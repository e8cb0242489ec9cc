//! Partially-populated wire shapes and the defaulting rules that repair them
//!
//! The store returns records in whatever shape they were persisted, which
//! over time has included legs without a stop-loss and conditions without a
//! threshold. The console must render any persisted shape without crashing,
//! so every fetched record passes through these types: each field is
//! `Option`al on the wire and repaired field by field into the complete
//! domain type. Defaulting is idempotent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{
    ChartInterval, ChartType, Condition, CreatedBy, ExpiryType, InstrumentRef, OptionType,
    OrderLeg, OrderType, RiskKind, RiskRule, RiskTrigger, Strategy, StrategyStatus, StrategyType,
    StrikeType,
};
use crate::common::errors::{ConsoleError, Result};

/// A stop-loss/target rule as the store may return it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialRisk {
    #[serde(rename = "type", default)]
    pub kind: Option<RiskKind>,
    #[serde(default)]
    pub value: Option<Decimal>,
    #[serde(default)]
    pub trigger: Option<RiskTrigger>,
}

impl PartialRisk {
    /// Repair against a template rule, field by field. A zero value counts as
    /// missing, matching how the records were coerced when written.
    pub fn or_defaults(&self, template: &RiskRule) -> RiskRule {
        RiskRule {
            kind: self.kind.unwrap_or(template.kind),
            value: self
                .value
                .filter(|v| !v.is_zero())
                .unwrap_or(template.value),
            trigger: self.trigger.unwrap_or(template.trigger),
        }
    }
}

impl From<&RiskRule> for PartialRisk {
    fn from(rule: &RiskRule) -> Self {
        Self {
            kind: Some(rule.kind),
            value: Some(rule.value),
            trigger: Some(rule.trigger),
        }
    }
}

/// An order leg as the store may return it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialLeg {
    #[serde(rename = "orderType", default)]
    pub order_type: Option<OrderType>,
    #[serde(rename = "optionType", default)]
    pub option_type: Option<OptionType>,
    #[serde(rename = "expiryType", default)]
    pub expiry_type: Option<ExpiryType>,
    #[serde(rename = "strikeType", default)]
    pub strike_type: Option<StrikeType>,
    #[serde(rename = "strikeValue", default)]
    pub strike_value: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(rename = "stopLoss", default)]
    pub stop_loss: Option<PartialRisk>,
    #[serde(default)]
    pub target: Option<PartialRisk>,
}

impl PartialLeg {
    /// Repair into a complete leg using the new-leg template for anything
    /// missing. Empty strike values and zero quantities count as missing.
    pub fn or_defaults(&self) -> OrderLeg {
        let template = OrderLeg::default();
        OrderLeg {
            order_type: self.order_type.unwrap_or(template.order_type),
            option_type: self.option_type.unwrap_or(template.option_type),
            expiry_type: self.expiry_type.unwrap_or(template.expiry_type),
            strike_type: self.strike_type.unwrap_or(template.strike_type),
            strike_value: self
                .strike_value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .unwrap_or(template.strike_value),
            quantity: self.quantity.filter(|q| *q > 0).unwrap_or(template.quantity),
            stop_loss: self
                .stop_loss
                .as_ref()
                .map(|r| r.or_defaults(&template.stop_loss))
                .unwrap_or(template.stop_loss),
            target: self
                .target
                .as_ref()
                .map(|r| r.or_defaults(&template.target))
                .unwrap_or(template.target),
        }
    }
}

impl From<&OrderLeg> for PartialLeg {
    fn from(leg: &OrderLeg) -> Self {
        Self {
            order_type: Some(leg.order_type),
            option_type: Some(leg.option_type),
            expiry_type: Some(leg.expiry_type),
            strike_type: Some(leg.strike_type),
            strike_value: Some(leg.strike_value.clone()),
            quantity: Some(leg.quantity),
            stop_loss: Some(PartialRisk::from(&leg.stop_loss)),
            target: Some(PartialRisk::from(&leg.target)),
        }
    }
}

/// A condition as the store may return it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialCondition {
    #[serde(default)]
    pub indicator: Option<String>,
    #[serde(default)]
    pub comparator: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl PartialCondition {
    /// Fill missing fields with the condition defaults. Explicit empty
    /// strings are kept as-is here; the filter below drops them.
    pub fn or_defaults(&self) -> Condition {
        let template = Condition::default();
        Condition {
            indicator: self.indicator.clone().unwrap_or(template.indicator),
            comparator: self.comparator.clone().unwrap_or(template.comparator),
            value: self.value.clone().unwrap_or(template.value),
        }
    }
}

impl From<&Condition> for PartialCondition {
    fn from(c: &Condition) -> Self {
        Self {
            indicator: Some(c.indicator.clone()),
            comparator: Some(c.comparator.clone()),
            value: Some(c.value.clone()),
        }
    }
}

/// Default every condition, then drop any still missing a non-empty field.
///
/// Defensive filter, not a primary validation path: a condition can only be
/// dropped when the source record carries an explicit empty-string or
/// whitespace override that defaulting cannot repair.
pub fn filter_conditions(conditions: &[PartialCondition]) -> Vec<Condition> {
    conditions
        .iter()
        .map(PartialCondition::or_defaults)
        .filter(Condition::is_complete)
        .collect()
}

/// A strategy aggregate as the store returns it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialStrategy {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub strategy_type: Option<StrategyType>,
    #[serde(default)]
    pub status: Option<StrategyStatus>,
    #[serde(default)]
    pub created_by: Option<CreatedBy>,
    #[serde(default)]
    pub instruments: Vec<InstrumentRef>,
    #[serde(default)]
    pub order_legs: Vec<PartialLeg>,
    #[serde(default)]
    pub trading_days: Vec<String>,
    #[serde(default)]
    pub square_off_time: Option<String>,
    #[serde(rename = "longEntryConditions", default)]
    pub long_entry_conditions: Vec<PartialCondition>,
    #[serde(rename = "shortEntryConditions", default)]
    pub short_entry_conditions: Vec<PartialCondition>,
    #[serde(rename = "exitConditions", default)]
    pub exit_conditions: Vec<PartialCondition>,
    #[serde(rename = "chartType", default)]
    pub chart_type: Option<ChartType>,
    #[serde(default)]
    pub interval: Option<ChartInterval>,
    #[serde(rename = "useCombinedChart", default)]
    pub use_combined_chart: Option<bool>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl PartialStrategy {
    /// Repair into a complete aggregate.
    ///
    /// The only fatal shape is a record with no identity; everything else is
    /// recovered via defaulting so the console can always render it.
    pub fn into_strategy(self) -> Result<Strategy> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                ConsoleError::InvalidResponse("strategy record is missing its _id".to_string())
            })?;

        Ok(Strategy {
            id,
            name: self.name.unwrap_or_default(),
            strategy_type: self.strategy_type.unwrap_or(StrategyType::TimeBased),
            status: self.status.unwrap_or(StrategyStatus::Active),
            created_by: self.created_by,
            instruments: self.instruments,
            order_legs: self.order_legs.iter().map(PartialLeg::or_defaults).collect(),
            trading_days: self.trading_days,
            square_off_time: self
                .square_off_time
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "15:15".to_string()),
            long_entry_conditions: filter_conditions(&self.long_entry_conditions),
            short_entry_conditions: filter_conditions(&self.short_entry_conditions),
            exit_conditions: filter_conditions(&self.exit_conditions),
            chart_type: self.chart_type.unwrap_or(ChartType::Candlestick),
            interval: self.interval.unwrap_or(ChartInterval::Min5),
            use_combined_chart: self.use_combined_chart.unwrap_or(false),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
