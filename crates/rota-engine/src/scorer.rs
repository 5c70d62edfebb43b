//! Candidate scoring for slot selection.
//!
//! Evaluates an eligible candidate with an additive integer score:
//! - **Gender**: the role's declared preference matches the volunteer's gender
//! - **Fairness**: gap between the pool's highest running count and the
//!   candidate's own, so under-assigned volunteers rank first
//! - **Weekday preference**: the occurrence falls on a day the volunteer
//!   prefers
//!
//! The fairness gap is read from the live [`RunningCounts`] at every
//! selection, so later slots in a run see updated scarcity.

use std::collections::HashMap;

use rota_state::{Assignment, Gender, GenderPreference, Role, Volunteer, VolunteerId};

/// Score awarded when a volunteer's gender matches the role's preference.
pub const GENDER_MATCH_SCORE: i64 = 10;

/// Weight applied to the fairness gap (pool max count − own count).
pub const FAIRNESS_WEIGHT: i64 = 5;

/// Score awarded when the occurrence falls on a preferred weekday.
pub const PREFERRED_WEEKDAY_SCORE: i64 = 3;

/// Per-volunteer running assignment tally for one run.
///
/// Seeded from the period's pre-existing assignments and incremented in
/// memory as the run commits selections; never persisted, never shared
/// between runs.
#[derive(Debug, Clone, Default)]
pub struct RunningCounts {
    counts: HashMap<VolunteerId, u32>,
}

impl RunningCounts {
    /// Seed counts from pre-existing assignments. Every pool member starts
    /// present (at zero) so the pool-wide maximum is well defined;
    /// assignments referencing volunteers outside the pool are ignored.
    pub fn seed<'a>(
        pool: &[Volunteer],
        existing: impl IntoIterator<Item = &'a Assignment>,
    ) -> Self {
        let mut counts: HashMap<VolunteerId, u32> =
            pool.iter().map(|v| (v.id.clone(), 0)).collect();
        for assignment in existing {
            if let Some(count) = counts.get_mut(&assignment.volunteer_id) {
                *count += 1;
            }
        }
        Self { counts }
    }

    /// Current running count for a volunteer.
    pub fn get(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Record one committed selection.
    pub fn increment(&mut self, id: &str) {
        *self.counts.entry(id.to_string()).or_insert(0) += 1;
    }

    /// Highest running count across the pool, floored at 1 so an all-zero
    /// pool still produces a nonzero fairness gap instead of a degenerate
    /// all-equal tie.
    pub fn max_count(&self) -> u32 {
        self.counts.values().copied().max().unwrap_or(0).max(1)
    }

    /// Fairness gap for a volunteer, never negative.
    pub fn gap(&self, id: &str) -> u32 {
        self.max_count().saturating_sub(self.get(id))
    }
}

/// Composite desirability score for assigning `volunteer` to `role` on
/// `weekday` (0 = Sunday). Pure function of its inputs.
pub fn score(volunteer: &Volunteer, role: &Role, weekday: u8, counts: &RunningCounts) -> i64 {
    let gender = match (role.gender_preference, volunteer.gender) {
        (GenderPreference::Male, Gender::Male)
        | (GenderPreference::Female, Gender::Female) => GENDER_MATCH_SCORE,
        _ => 0,
    };

    let fairness = i64::from(counts.gap(&volunteer.id)) * FAIRNESS_WEIGHT;

    let preference = if volunteer.preferred_weekdays.contains(&weekday) {
        PREFERRED_WEEKDAY_SCORE
    } else {
        0
    };

    gender + fairness + preference
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn make_volunteer(id: &str, gender: Gender) -> Volunteer {
        Volunteer {
            id: id.to_string(),
            name: id.to_string(),
            gender,
            eligible_roles: HashSet::from(["reader".to_string()]),
            available_this_month: None,
            unavailable_weekdays: HashSet::new(),
            unavailable_dates: HashSet::new(),
            preferred_weekdays: HashSet::new(),
        }
    }

    fn make_role(preference: GenderPreference) -> Role {
        Role {
            id: "reader".to_string(),
            name: "Reader".to_string(),
            gender_preference: preference,
        }
    }

    fn make_assignment(volunteer_id: &str) -> Assignment {
        Assignment {
            id: format!("a-{volunteer_id}"),
            occurrence_id: "occ-1".to_string(),
            volunteer_id: volunteer_id.to_string(),
            role_id: "reader".to_string(),
            status: Default::default(),
            created_at: 0,
        }
    }

    #[test]
    fn gender_match_awards_bonus() {
        let counts = RunningCounts::default();
        let male = make_volunteer("v1", Gender::Male);
        let female = make_volunteer("v2", Gender::Female);

        let role = make_role(GenderPreference::Male);
        let base = score(&female, &role, 0, &counts);
        assert_eq!(score(&male, &role, 0, &counts) - base, GENDER_MATCH_SCORE);
    }

    #[test]
    fn unspecified_gender_is_neutral_not_excluded() {
        let counts = RunningCounts::default();
        let unspecified = make_volunteer("v1", Gender::Unspecified);
        let female = make_volunteer("v2", Gender::Female);

        let role = make_role(GenderPreference::Female);
        let none_role = make_role(GenderPreference::None);

        // Same score as under a role with no preference at all.
        assert_eq!(
            score(&unspecified, &role, 0, &counts),
            score(&unspecified, &none_role, 0, &counts)
        );
        // But the matching volunteer outranks them.
        assert!(score(&female, &role, 0, &counts) > score(&unspecified, &role, 0, &counts));
    }

    #[test]
    fn fairness_rewards_under_assigned() {
        let pool = vec![
            make_volunteer("busy", Gender::Unspecified),
            make_volunteer("idle", Gender::Unspecified),
        ];
        let existing = vec![make_assignment("busy"), make_assignment("busy")];
        let counts = RunningCounts::seed(&pool, &existing);
        let role = make_role(GenderPreference::None);

        let busy = score(&pool[0], &role, 0, &counts);
        let idle = score(&pool[1], &role, 0, &counts);
        assert_eq!(idle - busy, 2 * FAIRNESS_WEIGHT);
    }

    #[test]
    fn all_zero_counts_use_one_as_max() {
        let pool = vec![make_volunteer("v1", Gender::Unspecified)];
        let counts = RunningCounts::seed(&pool, &[]);

        assert_eq!(counts.max_count(), 1);
        assert_eq!(counts.gap("v1"), 1);
        // Score is still fairness-positive, not zero.
        let role = make_role(GenderPreference::None);
        assert_eq!(score(&pool[0], &role, 0, &counts), FAIRNESS_WEIGHT);
    }

    #[test]
    fn max_tracks_live_increments() {
        let pool = vec![
            make_volunteer("v1", Gender::Unspecified),
            make_volunteer("v2", Gender::Unspecified),
        ];
        let mut counts = RunningCounts::seed(&pool, &[]);
        assert_eq!(counts.max_count(), 1);

        counts.increment("v1");
        counts.increment("v1");
        counts.increment("v1");
        assert_eq!(counts.max_count(), 3);
        assert_eq!(counts.gap("v2"), 3);
        assert_eq!(counts.gap("v1"), 0);
    }

    #[test]
    fn preferred_weekday_awards_bonus() {
        let counts = RunningCounts::default();
        let mut v = make_volunteer("v1", Gender::Unspecified);
        v.preferred_weekdays.insert(0); // Sundays.
        let role = make_role(GenderPreference::None);

        let sunday = score(&v, &role, 0, &counts);
        let monday = score(&v, &role, 1, &counts);
        assert_eq!(sunday - monday, PREFERRED_WEEKDAY_SCORE);
    }

    #[test]
    fn seed_ignores_assignments_outside_pool() {
        let pool = vec![make_volunteer("v1", Gender::Unspecified)];
        let existing = vec![make_assignment("former-member")];
        let counts = RunningCounts::seed(&pool, &existing);

        assert_eq!(counts.get("former-member"), 0);
        assert_eq!(counts.max_count(), 1);
    }
}
