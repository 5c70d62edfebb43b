//! rota-runner — orchestrates one assignment run end to end.
//!
//! Bulk-loads a period's occurrences, their existing assignments, and the
//! organization's volunteer pool from the store, hands everything to the
//! pure planner in `rota-engine`, then persists the planned batch through a
//! single atomic write. No external state is read or written between load
//! and persist, so a run cancelled before persistence is equivalent to not
//! having run.
//!
//! Concurrent runs over the same organization and period are not safe (both
//! would seed fairness state from the same snapshot); callers must serialize
//! runs per organization.

pub mod error;
pub mod runner;

pub use error::{RunnerError, RunnerResult};
pub use runner::{AssignmentRunner, RunSummary};
