use tally_beyond::{CachedSource, summarize_players};

use super::Context;

pub async fn run(ctx: &Context, players: &[String], offline: bool) -> Result<(), String> {
    let roster = ctx.load_roster()?;
    let selected = roster.select(players).map_err(|e| e.to_string())?;
    let store = ctx.store();
    let ignored = &ctx.config.ignored_items;

    let outcomes = if offline {
        let source = CachedSource::new(store.clone());
        summarize_players(&source, &store, &selected, ignored).await
    } else {
        let client = ctx.client()?;
        summarize_players(&client, &store, &selected, ignored).await
    };

    super::report(&outcomes)?;
    println!();
    println!(
        "  Wrote {} summaries to {}",
        outcomes.len(),
        store.root().join("summary").display()
    );
    Ok(())
}
