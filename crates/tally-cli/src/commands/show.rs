use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tally_core::{PartySummary, PlayerSummary};

use super::Context;

pub fn run(ctx: &Context, player: Option<&str>) -> Result<(), String> {
    let store = ctx.store();
    match player {
        Some(name) => {
            ctx.load_roster()?.character_id(name).map_err(|e| e.to_string())?;
            let summary = store.read_summary(name).map_err(|e| e.to_string())?;
            show_player(&summary);
        }
        None => {
            let party = store.read_party().map_err(|e| e.to_string())?;
            show_party(&party);
        }
    }
    Ok(())
}

fn show_player(summary: &PlayerSummary) {
    println!("  {} [{}]", summary.name.bold(), summary.classes.join(", ").dimmed());
    println!();

    if let Some(ref background) = summary.background {
        println!("  background: {background}");
    }
    let hp = &summary.hit_points;
    println!("  hit points: {}/{} (+{} temp)", hp.current, hp.base, hp.temp);
    if let Some(ref stress) = summary.stress {
        println!("  stress:     {}", stress.yellow());
    }
    println!("  money:      {:.2} gp", summary.money);

    if !summary.stats.is_empty() {
        let stats: Vec<String> = summary
            .stats
            .iter()
            .map(|(ability, score)| format!("{ability} {score}"))
            .collect();
        println!("  stats:      {}", stats.join(", "));
    }
    if !summary.languages.is_empty() {
        println!("  languages:  {}", summary.languages.join(", "));
    }
    println!();

    print_columns(&summary.equipment, &summary.inventory);

    if !summary.spells.is_empty() {
        println!();
        println!("  {}", "Spells".bold());
        for spell in &summary.spells {
            println!("    {spell}");
        }
    }
}

fn show_party(party: &PartySummary) {
    println!("  {}", "Party".bold());
    println!();
    for classes in &party.classes {
        println!("    {}", classes.join(", "));
    }
    println!();
    println!("  money:     {:.2} gp", party.money);
    if !party.languages.is_empty() {
        println!("  languages: {}", party.languages.join(", "));
    }
    println!();

    print_columns(&party.equipment, &party.inventory);

    if !party.spells.is_empty() {
        println!();
        println!("  {} ({})", "Spells".bold(), party.spells.len());
        println!("    {}", party.spells.join(", "));
    }
}

/// Equipment and inventory side by side.
fn print_columns(equipment: &[String], inventory: &[String]) {
    if equipment.is_empty() && inventory.is_empty() {
        println!("  No items.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Equipment", "Inventory"]);

    let rows = equipment.len().max(inventory.len());
    for i in 0..rows {
        let left = equipment.get(i).map_or("", String::as_str);
        let right = inventory.get(i).map_or("", String::as_str);
        table.add_row(vec![left, right]);
    }

    println!("{table}");
}
