use std::path::Path;

use anyhow::Context;
use rota_state::{OrgDataset, RosterStore};

pub fn import(store: &RosterStore, file: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let dataset: OrgDataset = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", file.display()))?;

    store.import_dataset(&dataset)?;

    println!("✓ Imported dataset for '{}'", dataset.organization);
    println!("  Volunteers: {}", dataset.volunteers.len());
    println!("  Roles: {}", dataset.roles.len());
    println!("  Occurrences: {}", dataset.occurrences.len());
    if !dataset.assignments.is_empty() {
        println!("  Assignments: {}", dataset.assignments.len());
    }
    Ok(())
}
