use tally_beyond::{CachedSource, CharacterSource, PipelineError, run_party};
use tally_core::{Roster, TallyConfig};

use super::Context;

pub async fn run(ctx: &Context, offline: bool, plain_money: bool) -> Result<(), String> {
    let roster = ctx.load_roster()?;
    let config = ctx.config_with(plain_money);

    if offline {
        let source = CachedSource::new(ctx.store());
        execute(&source, &roster, &config).await
    } else {
        let client = ctx.client()?;
        execute(&client, &roster, &config).await
    }
}

async fn execute<S: CharacterSource>(
    source: &S,
    roster: &Roster,
    config: &TallyConfig,
) -> Result<(), String> {
    match run_party(source, roster, config).await {
        Ok(party) => {
            println!("  Summarized {} players", roster.len());
            println!(
                "  Party: {:.2} gp, {} equipment, {} inventory, {} spells, {} languages",
                party.money,
                party.equipment.len(),
                party.inventory.len(),
                party.spells.len(),
                party.languages.len()
            );
            Ok(())
        }
        Err(PipelineError::PlayersFailed { failures, total }) => {
            for failure in &failures {
                eprintln!("  {}: {failure}", failure.player().unwrap_or("?"));
            }
            Err(format!(
                "{} of {total} players failed; party not aggregated",
                failures.len()
            ))
        }
        Err(e) => Err(e.to_string()),
    }
}
