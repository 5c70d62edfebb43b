//! Period planning — drives the slot filler across a month's occurrences.
//!
//! Occurrences are processed strictly date-ascending so fairness scarcity
//! evolves in calendar order. Only private running state is mutated; the
//! loaded occurrences, pool, and roles are read-only. The plan only adds
//! assignments — slots already at headcount are left untouched, which makes
//! an immediate re-run a no-op.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use rota_state::{
    Assignment, EventOccurrence, GenderPreference, Role, Volunteer, VolunteerId,
};

use crate::filler::fill_slot;
use crate::scorer::RunningCounts;

/// One occurrence plus its pre-existing assignments, as loaded for a run.
#[derive(Debug, Clone)]
pub struct LoadedOccurrence {
    pub occurrence: EventOccurrence,
    pub existing: Vec<Assignment>,
}

/// Output of planning one period: the new assignments and unit tallies.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunPlan {
    pub new_assignments: Vec<Assignment>,
    pub created: u32,
    pub skipped: u32,
}

/// Plan assignments for every unmet slot unit in the period's occurrences.
///
/// Running counts are seeded from the pre-existing assignments so fairness
/// reflects reality, not zero. Within an occurrence, slots are processed in
/// template order and share one assigned-volunteer set, so a volunteer never
/// holds two roles in the same occurrence.
pub fn plan_period<R: Rng>(
    mut occurrences: Vec<LoadedOccurrence>,
    pool: &[Volunteer],
    roles: &[Role],
    rng: &mut R,
) -> RunPlan {
    occurrences.sort_by(|a, b| a.occurrence.date.cmp(&b.occurrence.date));

    let roles_by_id: HashMap<&str, &Role> = roles.iter().map(|r| (r.id.as_str(), r)).collect();
    let mut counts = RunningCounts::seed(pool, occurrences.iter().flat_map(|o| &o.existing));
    let mut plan = RunPlan::default();

    for loaded in &occurrences {
        let occurrence = &loaded.occurrence;
        if occurrence.slots.is_empty() {
            debug!(occurrence = %occurrence.id, "no slot definitions, skipping");
            continue;
        }

        let mut assigned: HashSet<VolunteerId> = loaded
            .existing
            .iter()
            .map(|a| a.volunteer_id.clone())
            .collect();
        // Units added to this occurrence during this run, per role, so
        // duplicate slots for one role share the headcount bookkeeping.
        let mut added_this_run: HashMap<&str, u32> = HashMap::new();

        for slot in &occurrence.slots {
            let existing_for_role = loaded
                .existing
                .iter()
                .filter(|a| a.role_id == slot.role_id)
                .count() as u32;
            let filled = existing_for_role
                + added_this_run.get(slot.role_id.as_str()).copied().unwrap_or(0);
            if filled >= slot.required {
                debug!(
                    occurrence = %occurrence.id,
                    role = %slot.role_id,
                    "slot already at headcount"
                );
                continue;
            }
            let remaining_needed = slot.required - filled;

            // A slot may reference a role with no stored record; score it
            // as preference-free rather than failing the slot.
            let fallback;
            let role = match roles_by_id.get(slot.role_id.as_str()) {
                Some(role) => *role,
                None => {
                    fallback = Role {
                        id: slot.role_id.clone(),
                        name: slot.role_id.clone(),
                        gender_preference: GenderPreference::None,
                    };
                    &fallback
                }
            };

            let fill = fill_slot(
                slot,
                role,
                occurrence,
                remaining_needed,
                pool,
                &mut counts,
                &mut assigned,
                rng,
            );

            *added_this_run.entry(slot.role_id.as_str()).or_insert(0) +=
                fill.assignments.len() as u32;
            plan.created += fill.assignments.len() as u32;
            plan.skipped += fill.skipped;
            plan.new_assignments.extend(fill.assignments);
        }
    }

    plan
}
