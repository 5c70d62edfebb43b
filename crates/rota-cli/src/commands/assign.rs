use rand::SeedableRng;
use rand::rngs::StdRng;

use rota_runner::AssignmentRunner;
use rota_state::{Period, RosterStore};

pub fn assign(
    store: &RosterStore,
    org: &str,
    period: &str,
    seed: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let period: Period = period.parse()?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let runner = AssignmentRunner::new(store.clone());
    let summary = runner.run(org, period, &mut rng)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("✓ Assignment run for {org} {period}");
        println!("  Created: {}", summary.created);
        println!("  Skipped: {}", summary.skipped);
        println!("  Occurrences: {}", summary.total_occurrences);
        println!("  Volunteers: {}", summary.total_volunteers);
    }
    Ok(())
}
