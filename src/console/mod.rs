//! Console controllers
//!
//! Headless counterparts of the management surfaces: they own fetched state,
//! loading flags, and the fire-and-forget actions, leaving rendering to the
//! embedding application.

pub mod list;

pub use list::StrategyList;
