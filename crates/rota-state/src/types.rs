//! Domain types for the rota roster store.
//!
//! These types represent one organization's roster data: volunteers with
//! their availability constraints, roles with gender preferences, event
//! occurrences with their role slots, and assignments. All types are
//! serializable to/from JSON for storage in redb tables.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for a volunteer (organization-scoped).
pub type VolunteerId = String;

/// Unique identifier for a role.
pub type RoleId = String;

/// Unique identifier for an event occurrence.
pub type OccurrenceId = String;

// ── Volunteer ──────────────────────────────────────────────────────

/// A volunteer's stated gender, used only for soft role preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

/// A volunteer eligible to serve in one or more roles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Volunteer {
    pub id: VolunteerId,
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    /// Roles this volunteer may be assigned to.
    pub eligible_roles: HashSet<RoleId>,
    /// Tri-state monthly availability. An explicit `Some(false)` excludes
    /// the volunteer from an entire run; `None` and `Some(true)` do not.
    #[serde(default)]
    pub available_this_month: Option<bool>,
    /// Weekdays (0 = Sunday .. 6 = Saturday) the volunteer cannot serve on.
    #[serde(default)]
    pub unavailable_weekdays: HashSet<u8>,
    /// Specific calendar dates the volunteer cannot serve on.
    #[serde(default)]
    pub unavailable_dates: HashSet<NaiveDate>,
    /// Weekdays the volunteer prefers to serve on.
    #[serde(default)]
    pub preferred_weekdays: HashSet<u8>,
}

impl Volunteer {
    pub fn table_key(&self, org: &str) -> String {
        format!("{org}:{}", self.id)
    }
}

// ── Role ───────────────────────────────────────────────────────────

/// Soft gender preference declared on a role. Never a hard exclusion:
/// it only contributes to a candidate's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenderPreference {
    #[default]
    None,
    Male,
    Female,
}

/// A role volunteers fill at an event (reader, acolyte, sacristan, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub gender_preference: GenderPreference,
}

impl Role {
    pub fn table_key(&self, org: &str) -> String {
        format!("{org}:{}", self.id)
    }
}

// ── Occurrence ─────────────────────────────────────────────────────

/// A (role, required headcount) requirement attached to an occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleSlot {
    pub role_id: RoleId,
    /// Required headcount for this slot (≥ 1).
    pub required: u32,
}

/// One concrete scheduled instance of an event on a specific date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventOccurrence {
    pub id: OccurrenceId,
    pub date: NaiveDate,
    /// Slot requirements, in template order.
    pub slots: Vec<RoleSlot>,
}

impl EventOccurrence {
    /// Weekday of the occurrence date, 0 = Sunday .. 6 = Saturday.
    pub fn weekday(&self) -> u8 {
        self.date.weekday().num_days_from_sunday() as u8
    }

    pub fn table_key(&self, org: &str) -> String {
        format!("{org}:{}:{}", self.date, self.id)
    }
}

// ── Assignment ─────────────────────────────────────────────────────

/// Lifecycle status of an assignment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    Assigned,
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentStatus::Assigned => write!(f, "assigned"),
        }
    }
}

/// Links one occurrence, one volunteer, and one role.
///
/// Invariants maintained by the engine: at most one assignment per
/// (occurrence, volunteer) pair, and per (occurrence, role) the assignment
/// count never exceeds that slot's required headcount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: String,
    pub occurrence_id: OccurrenceId,
    pub volunteer_id: VolunteerId,
    pub role_id: RoleId,
    #[serde(default)]
    pub status: AssignmentStatus,
    /// Unix timestamp (seconds) when this record was created.
    pub created_at: u64,
}

impl Assignment {
    pub fn table_key(&self, org: &str) -> String {
        format!("{org}:{}:{}", self.occurrence_id, self.id)
    }
}

// ── Period ─────────────────────────────────────────────────────────

/// Error produced when a period string is not `YYYY-MM` with a valid month.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid period '{0}', expected YYYY-MM")]
pub struct PeriodParseError(pub String);

/// A year-month window an assignment run operates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Construct a period; `month` must be in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the period.
    pub fn first_day(&self) -> NaiveDate {
        // Month is validated at construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Last calendar day of the period: first of the next month minus one.
    pub fn last_day(&self) -> NaiveDate {
        let (y, m) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or_default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PeriodParseError(s.to_string());
        let (y, m) = s.split_once('-').ok_or_else(err)?;
        let year: i32 = y.parse().map_err(|_| err())?;
        let month: u32 = m.parse().map_err(|_| err())?;
        Period::new(year, month).ok_or_else(err)
    }
}

// ── Import dataset ─────────────────────────────────────────────────

/// One organization's full roster data, as consumed by `rota import`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgDataset {
    pub organization: String,
    pub volunteers: Vec<Volunteer>,
    pub roles: Vec<Role>,
    pub occurrences: Vec<EventOccurrence>,
    /// Pre-existing assignments (e.g. manual ones), if any.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_parses_and_formats() {
        let p: Period = "2025-09".parse().unwrap();
        assert_eq!(p.year(), 2025);
        assert_eq!(p.month(), 9);
        assert_eq!(p.to_string(), "2025-09");
    }

    #[test]
    fn period_rejects_malformed_input() {
        assert!("2025".parse::<Period>().is_err());
        assert!("2025-13".parse::<Period>().is_err());
        assert!("2025-00".parse::<Period>().is_err());
        assert!("20xx-09".parse::<Period>().is_err());
    }

    #[test]
    fn period_month_boundaries() {
        let p: Period = "2025-09".parse().unwrap();
        assert_eq!(p.first_day(), NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(p.last_day(), NaiveDate::from_ymd_opt(2025, 9, 30).unwrap());

        let dec: Period = "2025-12".parse().unwrap();
        assert_eq!(dec.last_day(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

        let feb: Period = "2024-02".parse().unwrap();
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn period_contains_only_its_month() {
        let p: Period = "2025-09".parse().unwrap();
        assert!(p.contains(NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()));
        assert!(!p.contains(NaiveDate::from_ymd_opt(2025, 8, 31).unwrap()));
        assert!(!p.contains(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()));
    }

    #[test]
    fn occurrence_weekday_counts_from_sunday() {
        let occ = EventOccurrence {
            id: "occ-1".to_string(),
            // 2025-09-07 is a Sunday.
            date: NaiveDate::from_ymd_opt(2025, 9, 7).unwrap(),
            slots: Vec::new(),
        };
        assert_eq!(occ.weekday(), 0);

        let sat = EventOccurrence {
            id: "occ-2".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 6).unwrap(),
            slots: Vec::new(),
        };
        assert_eq!(sat.weekday(), 6);
    }

    #[test]
    fn occurrence_table_key_sorts_by_date() {
        let early = EventOccurrence {
            id: "z".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 2).unwrap(),
            slots: Vec::new(),
        };
        let late = EventOccurrence {
            id: "a".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
            slots: Vec::new(),
        };
        assert!(early.table_key("parish") < late.table_key("parish"));
    }
}
