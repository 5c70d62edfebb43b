//! End-to-end: import a JSON dataset, run a period, inspect the roster.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

use rota_runner::AssignmentRunner;
use rota_state::{OrgDataset, Period, RosterStore};

const DATASET: &str = r#"{
  "organization": "st-marys",
  "volunteers": [
    {
      "id": "m1",
      "name": "Bela",
      "gender": "male",
      "eligible_roles": ["acolyte"]
    },
    {
      "id": "f1",
      "name": "Carmen",
      "gender": "female",
      "eligible_roles": ["acolyte"]
    },
    {
      "id": "x1",
      "name": "Elena",
      "eligible_roles": ["reader"],
      "available_this_month": false
    }
  ],
  "roles": [
    { "id": "reader", "name": "Reader" },
    { "id": "acolyte", "name": "Acolyte", "gender_preference": "male" }
  ],
  "occurrences": [
    {
      "id": "sun-1",
      "date": "2025-09-07",
      "slots": [
        { "role_id": "acolyte", "required": 1 },
        { "role_id": "reader", "required": 1 }
      ]
    },
    {
      "id": "sun-2",
      "date": "2025-09-14",
      "slots": [
        { "role_id": "acolyte", "required": 1 }
      ]
    }
  ]
}"#;

fn imported_store() -> RosterStore {
    let store = RosterStore::open_in_memory().unwrap();
    let dataset: OrgDataset = serde_json::from_str(DATASET).unwrap();
    store.import_dataset(&dataset).unwrap();
    store
}

fn period() -> Period {
    "2025-09".parse().unwrap()
}

#[test]
fn import_then_assign_fills_the_month() {
    let store = imported_store();
    let runner = AssignmentRunner::new(store.clone());
    let mut rng = StdRng::seed_from_u64(42);

    let summary = runner.run("st-marys", period(), &mut rng).unwrap();

    // Both acolyte units fill; the reader unit has no available candidate.
    assert_eq!(summary.created, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.total_occurrences, 2);
    assert_eq!(summary.total_volunteers, 3);
}

#[test]
fn gender_preference_decides_between_equally_loaded_candidates() {
    // The acolyte role prefers male volunteers; with running counts equal at
    // each selection point the gender bonus outweighs a fairness gap of one,
    // so m1 wins both Sundays regardless of seed.
    for seed in 0..8 {
        let store = imported_store();
        let runner = AssignmentRunner::new(store.clone());
        let mut rng = StdRng::seed_from_u64(seed);
        runner.run("st-marys", period(), &mut rng).unwrap();

        for occ in ["sun-1", "sun-2"] {
            let assignments = store
                .list_assignments_for_occurrence("st-marys", occ)
                .unwrap();
            let acolytes: Vec<&str> = assignments
                .iter()
                .filter(|a| a.role_id == "acolyte")
                .map(|a| a.volunteer_id.as_str())
                .collect();
            assert_eq!(acolytes, vec!["m1"], "seed {seed}, {occ}");
        }
    }
}

#[test]
fn excluded_volunteer_is_never_assigned() {
    let store = imported_store();
    let runner = AssignmentRunner::new(store.clone());
    let mut rng = StdRng::seed_from_u64(42);
    runner.run("st-marys", period(), &mut rng).unwrap();

    for occ in ["sun-1", "sun-2"] {
        let assigned: HashSet<String> = store
            .list_assignments_for_occurrence("st-marys", occ)
            .unwrap()
            .into_iter()
            .map(|a| a.volunteer_id)
            .collect();
        assert!(!assigned.contains("x1"), "unavailable volunteer assigned in {occ}");
    }
}

#[test]
fn rerun_only_retargets_still_unmet_units() {
    let store = imported_store();
    let runner = AssignmentRunner::new(store.clone());
    let mut rng = StdRng::seed_from_u64(42);

    runner.run("st-marys", period(), &mut rng).unwrap();
    let second = runner.run("st-marys", period(), &mut rng).unwrap();

    // Filled slots stay untouched; the permanently unfillable reader unit is
    // reported as skipped again, not an error.
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, 1);
}
