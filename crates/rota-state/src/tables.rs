//! redb table definitions for the rota roster store.
//!
//! Each table uses `&str` keys and `&[u8]` values (JSON-serialized domain
//! types). Keys are prefixed with the organization so one database can hold
//! several organizations' rosters.

use redb::TableDefinition;

/// Volunteers keyed by `{org}:{volunteer_id}`.
pub const VOLUNTEERS: TableDefinition<&str, &[u8]> = TableDefinition::new("volunteers");

/// Roles keyed by `{org}:{role_id}`.
pub const ROLES: TableDefinition<&str, &[u8]> = TableDefinition::new("roles");

/// Event occurrences keyed by `{org}:{date}:{occurrence_id}`. The zero-padded
/// ISO date makes a prefix scan yield date-ascending order.
pub const OCCURRENCES: TableDefinition<&str, &[u8]> = TableDefinition::new("occurrences");

/// Assignments keyed by `{org}:{occurrence_id}:{assignment_id}`.
pub const ASSIGNMENTS: TableDefinition<&str, &[u8]> = TableDefinition::new("assignments");
