//! Slot filling — commits one headcount unit at a time.
//!
//! Each unit is attempted independently: score the eligible candidates,
//! pick the maximum (ties broken uniformly at random via the injected RNG),
//! commit. A unit with no eligible candidate is skipped, not an error, and
//! later units still run so the final tally reflects exactly how many units
//! were unfillable.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use tracing::debug;

use rota_state::{
    Assignment, AssignmentStatus, EventOccurrence, Role, RoleSlot, Volunteer, VolunteerId,
};

use crate::eligibility::eligible_volunteers;
use crate::scorer::{RunningCounts, score};

/// Outcome of attempting to fill a single headcount unit.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitOutcome {
    /// A volunteer was selected and committed.
    Filled(Assignment),
    /// No eligible candidate remained; the unit stays open.
    Skipped,
}

/// Result of filling one slot's remaining headcount.
#[derive(Debug, Clone, Default)]
pub struct SlotFill {
    pub assignments: Vec<Assignment>,
    pub skipped: u32,
}

/// Fill up to `remaining_needed` units of `slot` at `occurrence`.
///
/// `remaining_needed` is fixed by the caller before the loop; each iteration
/// fills exactly one more unit. Committed selections update `counts` and
/// `assigned` immediately, so subsequent units (and subsequent slots of the
/// same occurrence) see them.
#[allow(clippy::too_many_arguments)]
pub fn fill_slot<R: Rng>(
    slot: &RoleSlot,
    role: &Role,
    occurrence: &EventOccurrence,
    remaining_needed: u32,
    pool: &[Volunteer],
    counts: &mut RunningCounts,
    assigned: &mut HashSet<VolunteerId>,
    rng: &mut R,
) -> SlotFill {
    let mut fill = SlotFill::default();
    for _ in 0..remaining_needed {
        match fill_unit(slot, role, occurrence, pool, counts, assigned, rng) {
            UnitOutcome::Filled(assignment) => fill.assignments.push(assignment),
            UnitOutcome::Skipped => fill.skipped += 1,
        }
    }
    fill
}

/// Attempt to fill one unit of `slot`.
fn fill_unit<R: Rng>(
    slot: &RoleSlot,
    role: &Role,
    occurrence: &EventOccurrence,
    pool: &[Volunteer],
    counts: &mut RunningCounts,
    assigned: &mut HashSet<VolunteerId>,
    rng: &mut R,
) -> UnitOutcome {
    let candidates = eligible_volunteers(pool, slot, occurrence, assigned);
    if candidates.is_empty() {
        debug!(
            occurrence = %occurrence.id,
            role = %slot.role_id,
            "no eligible candidate, unit skipped"
        );
        return UnitOutcome::Skipped;
    }

    let weekday = occurrence.weekday();
    let scored: Vec<(i64, &Volunteer)> = candidates
        .into_iter()
        .map(|v| (score(v, role, weekday, counts), v))
        .collect();
    // Candidates are non-empty here.
    let top = scored.iter().map(|(s, _)| *s).max().unwrap_or(0);
    let finalists: Vec<&Volunteer> = scored
        .iter()
        .filter(|(s, _)| *s == top)
        .map(|(_, v)| *v)
        .collect();
    let selected = finalists[rng.gen_range(0..finalists.len())];

    assigned.insert(selected.id.clone());
    counts.increment(&selected.id);
    debug!(
        occurrence = %occurrence.id,
        role = %slot.role_id,
        volunteer = %selected.id,
        score = top,
        tied = finalists.len(),
        "unit filled"
    );

    UnitOutcome::Filled(Assignment {
        id: uuid::Uuid::new_v4().to_string(),
        occurrence_id: occurrence.id.clone(),
        volunteer_id: selected.id.clone(),
        role_id: slot.role_id.clone(),
        status: AssignmentStatus::Assigned,
        created_at: epoch_secs(),
    })
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
