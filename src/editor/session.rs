//! The editor session: an isolated working copy of one strategy aggregate
//!
//! Opening a session deep-clones the source aggregate into independent
//! working state. User mutations touch only the working state; the source is
//! retained untouched so cancelling needs no rollback. `save` reconciles the
//! working state into one update payload and submits it to the store.
//!
//! The save path is split sans-io into [`EditorSession::begin_save`] /
//! [`EditorSession::finish_save`] so the in-flight guard and the
//! closed-session rules are testable without a network; the async
//! [`EditorSession::save`] composes the two around a store call.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use tracing::debug;

use crate::common::errors::{ConsoleError, Result};
use crate::common::traits::StrategyStore;
use crate::editor::array::ArrayEditor;
use crate::strategy::types::{
    ChartInterval, ChartType, Condition, EntryConditions, ExpiryType, InstrumentRef, OptionType,
    OrderLeg, OrderType, RiskKind, RiskRule, RiskTrigger, Strategy, StrategyStatus, StrategyType,
    StrategyUpdate, StrikeType,
};

/// Which of the three condition arrays an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    LongEntry,
    ShortEntry,
    Exit,
}

/// Which field of a condition an update targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionField {
    Indicator,
    Comparator,
    Value,
}

/// A single-field update to an order leg
#[derive(Debug, Clone, PartialEq)]
pub enum LegUpdate {
    OrderType(OrderType),
    OptionType(OptionType),
    ExpiryType(ExpiryType),
    StrikeType(StrikeType),
    StrikeValue(String),
    /// `None` marks unparseable input; it is rejected by pre-submit
    /// validation, never sent to the store
    Quantity(Option<u32>),
}

impl LegUpdate {
    /// Coerce raw text input into a quantity update. Parse failures are
    /// carried as `None` so validation can surface a field-level message.
    pub fn quantity_input(raw: &str) -> Self {
        LegUpdate::Quantity(raw.trim().parse().ok().filter(|q| *q > 0))
    }
}

/// Which nested risk rule of a leg an update targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLeg {
    StopLoss,
    Target,
}

/// A single-field update to a nested stop-loss/target rule. The sibling
/// fields are preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskUpdate {
    Kind(RiskKind),
    Value(Decimal),
    Trigger(RiskTrigger),
}

/// An order leg while it is being edited
///
/// Identical to [`OrderLeg`] except that the quantity may be temporarily
/// invalid (unparseable input); a draft with an invalid quantity fails
/// validation and never reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub struct LegDraft {
    pub order_type: OrderType,
    pub option_type: OptionType,
    pub expiry_type: ExpiryType,
    pub strike_type: StrikeType,
    pub strike_value: String,
    pub quantity: Option<u32>,
    pub stop_loss: RiskRule,
    pub target: RiskRule,
}

impl From<&OrderLeg> for LegDraft {
    fn from(leg: &OrderLeg) -> Self {
        Self {
            order_type: leg.order_type,
            option_type: leg.option_type,
            expiry_type: leg.expiry_type,
            strike_type: leg.strike_type,
            strike_value: leg.strike_value.clone(),
            quantity: Some(leg.quantity),
            stop_loss: leg.stop_loss.clone(),
            target: leg.target.clone(),
        }
    }
}

impl Default for LegDraft {
    fn default() -> Self {
        LegDraft::from(&OrderLeg::default())
    }
}

impl LegDraft {
    /// Complete leg, if the quantity is valid
    fn complete(&self) -> Option<OrderLeg> {
        let quantity = self.quantity.filter(|q| *q > 0)?;
        Some(OrderLeg {
            order_type: self.order_type,
            option_type: self.option_type,
            expiry_type: self.expiry_type,
            strike_type: self.strike_type,
            strike_value: self.strike_value.clone(),
            quantity,
            stop_loss: self.stop_loss.clone(),
            target: self.target.clone(),
        })
    }

    fn apply(&mut self, update: LegUpdate) {
        match update {
            LegUpdate::OrderType(v) => self.order_type = v,
            LegUpdate::OptionType(v) => self.option_type = v,
            LegUpdate::ExpiryType(v) => self.expiry_type = v,
            LegUpdate::StrikeType(v) => self.strike_type = v,
            LegUpdate::StrikeValue(v) => self.strike_value = v,
            LegUpdate::Quantity(v) => self.quantity = v,
        }
    }
}

/// A field-level validation failure, surfaced next to the offending control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Outcome of a completed save
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The store accepted the payload and the session committed it
    Committed(Strategy),
    /// The store accepted the payload but the session was closed while the
    /// request was in flight; the result is dropped, nothing is resurrected
    DiscardedAfterClose,
}

/// In-memory working copy of one strategy aggregate during editing
#[derive(Debug, Clone)]
pub struct EditorSession {
    /// The untouched source aggregate, kept for the cancel/revert path
    source: Strategy,
    name: String,
    strategy_type: StrategyType,
    status: StrategyStatus,
    chart_type: ChartType,
    interval: ChartInterval,
    use_combined_chart: bool,
    square_off_time: String,
    /// Instrument selection set (membership only; order follows selection)
    instruments: Vec<String>,
    trading_days: Vec<String>,
    legs: ArrayEditor<LegDraft>,
    long_entry: ArrayEditor<Condition>,
    short_entry: ArrayEditor<Condition>,
    exit: ArrayEditor<Condition>,
    saving: bool,
    closed: bool,
}

impl EditorSession {
    /// Open a session on a strategy aggregate.
    ///
    /// The working state is an independent deep clone: condition arrays are
    /// re-filtered to complete entries and legs become drafts, while the
    /// source aggregate is stored untouched.
    pub fn open(source: Strategy) -> Self {
        let instruments = source
            .instruments
            .iter()
            .map(|i| i.display_symbol().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let legs = source.order_legs.iter().map(LegDraft::from).collect();
        let keep_complete = |conditions: &[Condition]| -> Vec<Condition> {
            conditions
                .iter()
                .filter(|c| c.is_complete())
                .cloned()
                .collect()
        };

        Self {
            name: source.name.clone(),
            strategy_type: source.strategy_type,
            status: source.status,
            chart_type: source.chart_type,
            interval: source.interval,
            use_combined_chart: source.use_combined_chart,
            square_off_time: source.square_off_time.clone(),
            instruments,
            trading_days: source.trading_days.clone(),
            legs: ArrayEditor::new("order_legs", legs),
            long_entry: ArrayEditor::new(
                "longEntryConditions",
                keep_complete(&source.long_entry_conditions),
            ),
            short_entry: ArrayEditor::new(
                "shortEntryConditions",
                keep_complete(&source.short_entry_conditions),
            ),
            exit: ArrayEditor::new("exitConditions", keep_complete(&source.exit_conditions)),
            saving: false,
            closed: false,
            source,
        }
    }

    /// The untouched source aggregate
    pub fn source(&self) -> &Strategy {
        &self.source
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // ========================================================================
    // Scalar fields
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn strategy_type(&self) -> StrategyType {
        self.strategy_type
    }

    pub fn set_strategy_type(&mut self, strategy_type: StrategyType) {
        self.strategy_type = strategy_type;
    }

    pub fn set_status(&mut self, status: StrategyStatus) {
        self.status = status;
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) {
        self.chart_type = chart_type;
    }

    pub fn set_interval(&mut self, interval: ChartInterval) {
        self.interval = interval;
    }

    pub fn set_use_combined_chart(&mut self, enabled: bool) {
        self.use_combined_chart = enabled;
    }

    pub fn set_square_off_time(&mut self, time: impl Into<String>) {
        self.square_off_time = time.into();
    }

    // ========================================================================
    // Selection sets
    // ========================================================================

    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    /// Toggle membership of an instrument symbol
    pub fn toggle_instrument(&mut self, symbol: &str) {
        if let Some(pos) = self.instruments.iter().position(|s| s == symbol) {
            self.instruments.remove(pos);
        } else {
            self.instruments.push(symbol.to_string());
        }
    }

    pub fn trading_days(&self) -> &[String] {
        &self.trading_days
    }

    /// Toggle membership of a trading day
    pub fn toggle_trading_day(&mut self, day: &str) {
        if let Some(pos) = self.trading_days.iter().position(|d| d == day) {
            self.trading_days.remove(pos);
        } else {
            self.trading_days.push(day.to_string());
        }
    }

    // ========================================================================
    // Order legs
    // ========================================================================

    pub fn legs(&self) -> &[LegDraft] {
        self.legs.items()
    }

    /// Append a leg from the default template. The new leg is immediately
    /// valid without user input.
    pub fn add_leg(&mut self) {
        self.legs.push(LegDraft::default());
    }

    pub fn remove_leg(&mut self, index: usize) -> Result<()> {
        self.legs.remove(index).map(|_| ())
    }

    /// Replace one top-level field of the leg at `index`
    pub fn update_leg(&mut self, index: usize, update: LegUpdate) -> Result<()> {
        self.legs.update(index, |leg| leg.apply(update))
    }

    /// Replace one field inside a leg's stop-loss or target, preserving the
    /// sibling fields
    pub fn update_risk(&mut self, index: usize, which: RiskLeg, update: RiskUpdate) -> Result<()> {
        self.legs.update(index, |leg| {
            let rule = match which {
                RiskLeg::StopLoss => &mut leg.stop_loss,
                RiskLeg::Target => &mut leg.target,
            };
            match update {
                RiskUpdate::Kind(v) => rule.kind = v,
                RiskUpdate::Value(v) => rule.value = v,
                RiskUpdate::Trigger(v) => rule.trigger = v,
            }
        })
    }

    // ========================================================================
    // Conditions
    // ========================================================================

    pub fn conditions(&self, kind: ConditionKind) -> &[Condition] {
        self.conditions_ref(kind).items()
    }

    /// Append a condition with the vocabulary defaults
    pub fn add_condition(&mut self, kind: ConditionKind) {
        self.conditions_mut(kind).push(Condition::default());
    }

    pub fn remove_condition(&mut self, kind: ConditionKind, index: usize) -> Result<()> {
        self.conditions_mut(kind).remove(index).map(|_| ())
    }

    /// Mutate one field of the condition at `index`.
    ///
    /// Empty or whitespace updates to the indicator or comparator are
    /// silently ignored, retaining the existing value: a vocabulary-backed
    /// selector must never be cleared to an invalid empty state. The
    /// threshold value has no such guard and may be any string while the
    /// session is open.
    pub fn update_condition(
        &mut self,
        kind: ConditionKind,
        index: usize,
        field: ConditionField,
        value: &str,
    ) -> Result<()> {
        if matches!(field, ConditionField::Indicator | ConditionField::Comparator)
            && value.trim().is_empty()
        {
            return Ok(());
        }
        self.conditions_mut(kind).update(index, |c| match field {
            ConditionField::Indicator => c.indicator = value.to_string(),
            ConditionField::Comparator => c.comparator = value.to_string(),
            ConditionField::Value => c.value = value.to_string(),
        })
    }

    fn conditions_ref(&self, kind: ConditionKind) -> &ArrayEditor<Condition> {
        match kind {
            ConditionKind::LongEntry => &self.long_entry,
            ConditionKind::ShortEntry => &self.short_entry,
            ConditionKind::Exit => &self.exit,
        }
    }

    fn conditions_mut(&mut self, kind: ConditionKind) -> &mut ArrayEditor<Condition> {
        match kind {
            ConditionKind::LongEntry => &mut self.long_entry,
            ConditionKind::ShortEntry => &mut self.short_entry,
            ConditionKind::Exit => &mut self.exit,
        }
    }

    // ========================================================================
    // Validation and save reconciliation
    // ========================================================================

    /// Pre-submit validation pass. The save path refuses to submit while any
    /// field error remains.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError {
                field: "name".to_string(),
                message: "strategy name must not be empty".to_string(),
            });
        }

        for (i, leg) in self.legs.items().iter().enumerate() {
            if leg.quantity.filter(|q| *q > 0).is_none() {
                errors.push(FieldError {
                    field: format!("order_legs[{}].quantity", i),
                    message: "quantity must be a positive integer".to_string(),
                });
            }
        }

        if self.strategy_type == StrategyType::TimeBased
            && NaiveTime::parse_from_str(&self.square_off_time, "%H:%M").is_err()
        {
            errors.push(FieldError {
                field: "square_off_time".to_string(),
                message: format!("'{}' is not a valid HH:MM time", self.square_off_time),
            });
        }

        errors
    }

    /// Reconcile the working state into one update payload.
    ///
    /// Fails with the first field error if validation does not pass; an
    /// invalid payload is never sent to the store.
    pub fn build_payload(&self) -> Result<StrategyUpdate> {
        if let Some(err) = self.validate().into_iter().next() {
            return Err(ConsoleError::Validation {
                field: err.field,
                message: err.message,
            });
        }

        // validate() guarantees every draft completes
        let order_legs = self
            .legs
            .items()
            .iter()
            .filter_map(LegDraft::complete)
            .collect();

        Ok(StrategyUpdate {
            name: self.name.clone(),
            strategy_type: self.strategy_type,
            status: self.status,
            chart_type: self.chart_type,
            interval: self.interval,
            use_combined_chart: self.use_combined_chart,
            square_off_time: self.square_off_time.clone(),
            instruments: self
                .instruments
                .iter()
                .map(|s| InstrumentRef::symbol(s.clone()))
                .collect(),
            trading_days: self.trading_days.clone(),
            order_legs,
            entry_conditions: EntryConditions {
                long: self.long_entry.items().to_vec(),
                short: self.short_entry.items().to_vec(),
                exit: self.exit.items().to_vec(),
            },
        })
    }

    /// Start a save: validate, build the payload and mark the session as
    /// having a request in flight. A second save while one is outstanding
    /// fails fast with [`ConsoleError::SaveInFlight`].
    pub fn begin_save(&mut self) -> Result<StrategyUpdate> {
        if self.closed {
            return Err(ConsoleError::SessionClosed);
        }
        if self.saving {
            return Err(ConsoleError::SaveInFlight(self.source.id.clone()));
        }
        let payload = self.build_payload()?;
        self.saving = true;
        Ok(payload)
    }

    /// Complete a save with the store's response.
    ///
    /// On success the working state is committed as the new source. On
    /// failure the working state is preserved so the user can retry. If the
    /// session was closed while the request was in flight, both arms are
    /// dropped: nothing commits and no error surfaces from a dialog that no
    /// longer exists.
    pub fn finish_save(&mut self, outcome: Result<Strategy>) -> Result<SaveOutcome> {
        self.saving = false;
        if self.closed {
            debug!(
                strategy_id = %self.source.id,
                ok = outcome.is_ok(),
                "save completed after close; dropping result"
            );
            return Ok(SaveOutcome::DiscardedAfterClose);
        }
        let updated = outcome?;
        self.source = updated.clone();
        Ok(SaveOutcome::Committed(updated))
    }

    /// Submit the reconciled payload to the store
    pub async fn save(&mut self, store: &dyn StrategyStore) -> Result<SaveOutcome> {
        let payload = self.begin_save()?;
        let id = self.source.id.clone();
        let result = store.update_strategy(&id, &payload).await;
        self.finish_save(result)
    }

    /// Close without saving. The working state is discarded with the
    /// session; the source aggregate was never touched, so there is nothing
    /// to roll back. A save response arriving after this is dropped.
    pub fn cancel(&mut self) {
        self.closed = true;
    }
}
