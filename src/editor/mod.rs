//! Editor sessions for strategy records
//!
//! One [`session::EditorSession`] per open edit dialog, never a singleton:
//! each session owns an independent working copy of its strategy, so two
//! dialogs open on different (or the same) aggregate never share state.
//!
//! # Data flow
//!
//! ```text
//! Strategy Store ──open──▶ EditorSession (working copy)
//!                              │  user mutations, in memory only
//!                              ▼
//!                      build_payload() ──save──▶ Strategy Store
//!                              │
//!                              └─ cancel/close: working copy dropped,
//!                                 source aggregate untouched
//! ```

pub mod array;
pub mod session;

pub use array::ArrayEditor;
pub use session::{
    ConditionField, ConditionKind, EditorSession, FieldError, LegDraft, LegUpdate, RiskLeg,
    RiskUpdate, SaveOutcome,
};
