//! Party-level aggregation.
//!
//! Folds the summaries of a roster into one [`PartySummary`]: items are
//! counted and collapsed into `"<name> xN"` lines, spells and languages are
//! unioned, and money is summed under the configured [`MoneyRule`].

use serde::{Deserialize, Serialize};

use crate::config::{IgnoredItems, MoneyRule, Roster};
use crate::error::TallyResult;
use crate::store::SummaryStore;
use crate::summary::PlayerSummary;

/// A distinct item name and how many times it occurs across the party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Item name.
    pub name: String,
    /// Number of occurrences.
    pub count: usize,
}

impl Bucket {
    /// `"<name> x<count>"` for repeated items, the bare name otherwise.
    pub fn render(&self) -> String {
        if self.count > 1 {
            format!("{} x{}", self.name, self.count)
        } else {
            self.name.clone()
        }
    }
}

/// The aggregate view of the whole party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartySummary {
    /// Each player's class lines, in roster order.
    pub classes: Vec<Vec<String>>,
    /// Party wealth in gold pieces.
    pub money: f64,
    /// Collapsed equipped items.
    pub equipment: Vec<String>,
    /// Collapsed carried items.
    pub inventory: Vec<String>,
    /// Every distinct spell known in the party.
    pub spells: Vec<String>,
    /// Every distinct language spoken in the party.
    pub languages: Vec<String>,
}

/// Sort names and group equal ones into counted buckets.
///
/// Buckets come out in sorted order. Equal names are adjacent after the
/// sort, so a single pass gives the same buckets as scanning the
/// accumulated buckets for every name.
pub fn count_buckets<I, S>(names: I) -> Vec<Bucket>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
    names.sort();

    let mut buckets: Vec<Bucket> = Vec::new();
    for name in names {
        match buckets.last_mut() {
            Some(last) if last.name == name => last.count += 1,
            _ => buckets.push(Bucket { name, count: 1 }),
        }
    }
    buckets
}

/// Count, drop ignored names, and render.
pub fn collapse_items<I, S>(names: I, ignored: &IgnoredItems) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    count_buckets(names)
        .into_iter()
        .filter(|bucket| !ignored.contains(&bucket.name))
        .map(|bucket| bucket.render())
        .collect()
}

/// Sorted, exact-match distinct union of names.
pub fn union_sorted<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
    names.sort();
    names.dedup();
    names
}

/// Sum per-player money under a rule, starting from zero.
pub fn accumulate_money<I>(amounts: I, rule: MoneyRule) -> f64
where
    I: IntoIterator<Item = f64>,
{
    amounts.into_iter().fold(0.0, |acc, next| match rule {
        MoneyRule::Truncating => (acc * 1000.0).floor() / 1000.0 + next,
        MoneyRule::Plain => acc + next,
    })
}

/// Aggregate a roster's summaries, given in roster order.
pub fn aggregate(
    players: &[PlayerSummary],
    ignored: &IgnoredItems,
    rule: MoneyRule,
) -> PartySummary {
    PartySummary {
        classes: players.iter().map(|p| p.classes.clone()).collect(),
        money: accumulate_money(players.iter().map(|p| p.money), rule),
        equipment: collapse_items(players.iter().flat_map(|p| p.equipment.iter().cloned()), ignored),
        inventory: collapse_items(players.iter().flat_map(|p| p.inventory.iter().cloned()), ignored),
        spells: union_sorted(players.iter().flat_map(|p| p.spells.iter().cloned())),
        languages: union_sorted(players.iter().flat_map(|p| p.languages.iter().cloned())),
    }
}

/// Read every rostered summary from the store, aggregate, and write `party.json`.
///
/// Fails on the first roster player without a readable summary; nothing is
/// written in that case.
pub fn aggregate_stored(
    store: &SummaryStore,
    roster: &Roster,
    ignored: &IgnoredItems,
    rule: MoneyRule,
) -> TallyResult<PartySummary> {
    let players = store.read_roster_summaries(roster)?;
    let party = aggregate(&players, ignored, rule);
    store.write_party(&party)?;
    tracing::info!(
        players = players.len(),
        equipment = party.equipment.len(),
        inventory = party.inventory.len(),
        money = party.money,
        "aggregated party"
    );
    Ok(party)
}
