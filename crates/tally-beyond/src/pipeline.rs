//! The two pipeline stages and the barrier between them.

use futures::future::join_all;
use tally_core::summary::summarize;
use tally_core::{
    CharacterDocument, IgnoredItems, PartySummary, PlayerSummary, Roster, SummaryStore,
    TallyConfig, aggregate_stored,
};

use crate::error::{FetchError, PipelineError};
use crate::source::CharacterSource;

/// Load, summarize, and persist one player.
///
/// A live document is snapshotted before it is decoded. The summary file is
/// only touched once the whole summary has been built.
pub async fn summarize_player<S: CharacterSource>(
    source: &S,
    store: &SummaryStore,
    player: &str,
    character_id: u64,
    ignored: &IgnoredItems,
) -> Result<PlayerSummary, FetchError> {
    let raw = source.load(player, character_id).await?;
    if source.is_live() {
        store.write_raw(player, &raw)?;
    }
    let document = CharacterDocument::from_value(player, raw)?;
    let summary = summarize(&document, ignored);
    store.write_summary(player, &summary)?;
    Ok(summary)
}

/// Summarize several players concurrently.
///
/// Resolves once every player has finished, successfully or not. Results are
/// in the order the players were given.
pub async fn summarize_players<S: CharacterSource>(
    source: &S,
    store: &SummaryStore,
    players: &[(String, u64)],
    ignored: &IgnoredItems,
) -> Vec<(String, Result<PlayerSummary, FetchError>)> {
    let tasks = players.iter().map(|(player, id)| async move {
        let result = summarize_player(source, store, player, *id, ignored).await;
        if let Err(e) = &result {
            tracing::warn!(player = %player, error = %e, "failed to summarize player");
        }
        (player.clone(), result)
    });
    join_all(tasks).await
}

/// Summarize the whole roster, then aggregate the party.
///
/// The party file is written only when every player succeeded.
pub async fn run_party<S: CharacterSource>(
    source: &S,
    roster: &Roster,
    config: &TallyConfig,
) -> Result<PartySummary, PipelineError> {
    let store = SummaryStore::new(&config.data_dir);
    let players = roster.select(&[])?;
    let total = players.len();

    let outcomes = summarize_players(source, &store, &players, &config.ignored_items).await;
    let failures: Vec<FetchError> = outcomes
        .into_iter()
        .filter_map(|(_, result)| result.err())
        .collect();
    if !failures.is_empty() {
        return Err(PipelineError::PlayersFailed { failures, total });
    }

    let party = aggregate_stored(&store, roster, &config.ignored_items, config.money_rule)?;
    Ok(party)
}
