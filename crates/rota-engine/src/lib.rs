//! rota-engine — the automatic assignment engine.
//!
//! Fills unmet role slots across a month's event occurrences with eligible
//! volunteers, balancing workload fairness, stated gender preference, and
//! individual availability. Greedy and explainable: no backtracking, no
//! optimality guarantee, safe to re-run.
//!
//! # Architecture
//!
//! ```text
//! plan_period (date-ascending over occurrences)
//!   └── fill_slot (one headcount unit at a time)
//!       ├── eligible_volunteers (hard constraints)
//!       └── score (soft ranking; random tie-break via injected Rng)
//! ```
//!
//! The engine is pure: it reads pre-loaded data, mutates only its own
//! running state ([`scorer::RunningCounts`] and per-occurrence assigned-id
//! sets), and returns the batch of new assignments for the caller to
//! persist. "No eligible candidate" is a reportable outcome, never an error.

pub mod eligibility;
pub mod filler;
pub mod planner;
pub mod scorer;

pub use eligibility::eligible_volunteers;
pub use filler::{SlotFill, UnitOutcome, fill_slot};
pub use planner::{LoadedOccurrence, RunPlan, plan_period};
pub use scorer::{RunningCounts, score};
