//! rota-state — embedded roster store for rota.
//!
//! Backed by [redb](https://docs.rs/redb), holds an organization's
//! volunteers, roles, event occurrences, and assignments.
//!
//! # Architecture
//!
//! All domain types are JSON-serialized into redb's `&[u8]` value columns.
//! Composite keys (`{org}:{id}`, `{org}:{date}:{occurrence_id}`) enable
//! prefix scans per organization and date-ordered iteration of a month's
//! occurrences.
//!
//! A run's output is written through [`RosterStore::insert_assignments`],
//! which commits every record in a single write transaction: either the
//! whole batch lands or none of it does.

pub mod error;
pub mod store;
pub mod tables;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use store::RosterStore;
pub use types::*;
