//! Hard eligibility constraints for a role slot.
//!
//! Eligibility is pass/fail: a volunteer failing any condition is excluded
//! from the slot outright. Soft preferences (fairness, gender, weekday) are
//! the scorer's concern.

use std::collections::HashSet;

use rota_state::{EventOccurrence, RoleSlot, Volunteer, VolunteerId};

/// Return the subset of `pool` assignable to `slot` at `occurrence`.
///
/// A volunteer is eligible iff all of the following hold:
/// 1. their eligible-role set contains the slot's role,
/// 2. they are not already assigned in this occurrence (any role),
/// 3. their monthly availability is not explicitly `false`,
/// 4. the occurrence date is not among their unavailable dates,
/// 5. the occurrence weekday is not among their unavailable weekdays.
///
/// No ordering guarantee on the result; the scorer imposes order.
pub fn eligible_volunteers<'a>(
    pool: &'a [Volunteer],
    slot: &RoleSlot,
    occurrence: &EventOccurrence,
    assigned: &HashSet<VolunteerId>,
) -> Vec<&'a Volunteer> {
    let weekday = occurrence.weekday();
    pool.iter()
        .filter(|v| v.eligible_roles.contains(&slot.role_id))
        .filter(|v| !assigned.contains(&v.id))
        .filter(|v| v.available_this_month != Some(false))
        .filter(|v| !v.unavailable_dates.contains(&occurrence.date))
        .filter(|v| !v.unavailable_weekdays.contains(&weekday))
        .collect()
}
