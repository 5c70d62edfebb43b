//! AssignmentRunner — load, plan, persist, summarize.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use rota_engine::{LoadedOccurrence, plan_period};
use rota_state::{Period, RosterStore};

use crate::error::{RunnerError, RunnerResult};

/// Summary returned from one assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// New assignments created (and persisted) by this run.
    pub created: u32,
    /// Headcount units that could not be filled.
    pub skipped: u32,
    pub total_occurrences: u32,
    pub total_volunteers: u32,
}

/// Orchestrates assignment runs against a roster store.
pub struct AssignmentRunner {
    store: RosterStore,
}

impl AssignmentRunner {
    pub fn new(store: RosterStore) -> Self {
        Self { store }
    }

    /// Run the assignment engine for one organization and period.
    ///
    /// An organization with no volunteers and no occurrences at all is
    /// rejected as unknown before any engine work; an org whose month is
    /// simply empty reports a zero summary instead.
    pub fn run<R: Rng>(
        &self,
        org: &str,
        period: Period,
        rng: &mut R,
    ) -> RunnerResult<RunSummary> {
        let occurrences = self.store.list_occurrences_in_period(org, period)?;
        let pool = self.store.list_volunteers(org)?;
        if occurrences.is_empty() && pool.is_empty() {
            return Err(RunnerError::OrganizationNotFound(org.to_string()));
        }
        let roles = self.store.list_roles(org)?;

        let loaded = occurrences
            .into_iter()
            .map(|occurrence| {
                let existing = self
                    .store
                    .list_assignments_for_occurrence(org, &occurrence.id)?;
                Ok(LoadedOccurrence {
                    occurrence,
                    existing,
                })
            })
            .collect::<RunnerResult<Vec<_>>>()?;

        let total_occurrences = loaded.len() as u32;
        let total_volunteers = pool.len() as u32;
        debug!(org, %period, total_occurrences, total_volunteers, "run inputs loaded");

        let plan = plan_period(loaded, &pool, &roles, rng);

        // Single atomic batch: a failure here persists nothing and the run
        // can simply be retried.
        self.store.insert_assignments(org, &plan.new_assignments)?;

        info!(
            org,
            %period,
            created = plan.created,
            skipped = plan.skipped,
            "assignment run complete"
        );
        Ok(RunSummary {
            created: plan.created,
            skipped: plan.skipped,
            total_occurrences,
            total_volunteers,
        })
    }
}
