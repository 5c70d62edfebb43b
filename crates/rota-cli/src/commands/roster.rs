use std::collections::HashMap;

use rota_state::{Period, RosterStore};

pub fn roster(store: &RosterStore, org: &str, period: &str) -> anyhow::Result<()> {
    let period: Period = period.parse()?;
    let occurrences = store.list_occurrences_in_period(org, period)?;
    if occurrences.is_empty() {
        println!("No occurrences for {org} in {period}");
        return Ok(());
    }

    let volunteer_names: HashMap<String, String> = store
        .list_volunteers(org)?
        .into_iter()
        .map(|v| (v.id, v.name))
        .collect();
    let role_names: HashMap<String, String> = store
        .list_roles(org)?
        .into_iter()
        .map(|r| (r.id, r.name))
        .collect();

    for occurrence in occurrences {
        println!("{}  {}", occurrence.date, occurrence.id);
        let mut assignments = store.list_assignments_for_occurrence(org, &occurrence.id)?;
        if assignments.is_empty() {
            println!("  (unassigned)");
            continue;
        }
        assignments.sort_by(|a, b| a.role_id.cmp(&b.role_id));
        for assignment in assignments {
            let role = role_names
                .get(&assignment.role_id)
                .unwrap_or(&assignment.role_id);
            let name = volunteer_names
                .get(&assignment.volunteer_id)
                .unwrap_or(&assignment.volunteer_id);
            println!("  {role:<16} {name}");
        }
    }
    Ok(())
}
