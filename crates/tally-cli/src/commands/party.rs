use tally_core::aggregate_stored;

use super::Context;

pub fn run(ctx: &Context, plain_money: bool) -> Result<(), String> {
    let roster = ctx.load_roster()?;
    let config = ctx.config_with(plain_money);
    let store = ctx.store();

    let party = aggregate_stored(&store, &roster, &config.ignored_items, config.money_rule)
        .map_err(|e| e.to_string())?;

    println!("  Aggregated {} players into {}", roster.len(), store.party_path().display());
    println!();
    println!(
        "  {:.2} gp, {} equipment, {} inventory, {} spells, {} languages",
        party.money,
        party.equipment.len(),
        party.inventory.len(),
        party.spells.len(),
        party.languages.len()
    );
    Ok(())
}
