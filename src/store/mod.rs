//! Remote strategy store client
//!
//! The store is a REST collaborator the console does not own. All requests
//! carry a bearer credential when one is configured; the store keeps no
//! version token, so concurrent writers overwrite each other (last write
//! wins).

pub mod messages;
pub mod rest;

pub use rest::RestStrategyStore;
