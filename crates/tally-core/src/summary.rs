//! Per-player summary extraction.
//!
//! [`summarize`] reduces a [`CharacterDocument`] to the handful of lists and
//! numbers the table actually looks at. The result is written whole; there
//! is no merging with a previous summary.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ability::StatBlock;
use crate::config::IgnoredItems;
use crate::document::{CharacterDocument, Currencies};
use crate::inventory::{partition_belongings, stress_marker};

/// Rendered in place of a null display name.
pub const MISSING_TEXT: &str = "null";

/// Modifier type that grants a language.
const LANGUAGE_MODIFIER: &str = "language";

/// Hit point state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    /// Maximum hit points before modifiers.
    pub base: i64,
    /// Base minus damage taken.
    pub current: i64,
    /// Temporary hit points.
    pub temp: i64,
}

/// The normalized view of one player's character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    /// Character name.
    pub name: String,
    /// `"Level <n> <class>"`, with `" | <subclass>"` when one is chosen.
    pub classes: Vec<String>,
    /// Base ability scores.
    pub stats: StatBlock,
    /// Equipped stress marker, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress: Option<String>,
    /// Hit points.
    pub hit_points: HitPoints,
    /// Personality traits with nulls removed and whitespace trimmed.
    #[serde(default)]
    pub traits: IndexMap<String, String>,
    /// Bonus ability scores.
    #[serde(default)]
    pub bonus_stats: StatBlock,
    /// Ability score overrides.
    #[serde(default)]
    pub override_stats: StatBlock,
    /// Background name.
    #[serde(default)]
    pub background: Option<String>,
    /// Feat names, sorted.
    #[serde(default)]
    pub feats: Vec<String>,
    /// Known and class spells, sorted, duplicates kept.
    pub spells: Vec<String>,
    /// Languages granted by modifiers, sorted and unique.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Action names sorted by name.
    #[serde(default)]
    pub actions: Vec<String>,
    /// `"<type>: <subtype>"` for every distinct modifier.
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Equipped items, sorted.
    pub equipment: Vec<String>,
    /// Carried, unequipped items, sorted.
    pub inventory: Vec<String>,
    /// Raw coin counts.
    pub currencies: Currencies,
    /// Total wealth in gold pieces.
    pub money: f64,
    /// Notes with nulls removed and whitespace trimmed.
    #[serde(default)]
    pub notes: IndexMap<String, String>,
}

/// Build a player summary from a character document.
pub fn summarize(doc: &CharacterDocument, ignored: &IgnoredItems) -> PlayerSummary {
    let belongings = partition_belongings(doc, ignored);
    let removed = doc.removed_hit_points.unwrap_or(0);

    let mut feats: Vec<String> = doc.feats.iter().map(|f| f.definition.name.clone()).collect();
    feats.sort();

    PlayerSummary {
        name: doc.name.clone(),
        classes: class_lines(doc),
        stats: StatBlock::from_values(&doc.stats),
        stress: stress_marker(doc),
        hit_points: HitPoints {
            base: doc.base_hit_points,
            current: doc.base_hit_points - removed,
            temp: doc.temporary_hit_points.unwrap_or(0),
        },
        traits: trimmed(&doc.traits),
        bonus_stats: StatBlock::from_values(&doc.bonus_stats),
        override_stats: StatBlock::from_values(&doc.override_stats),
        background: doc.background.display_name(),
        feats,
        spells: spell_names(doc),
        languages: languages(doc),
        actions: action_names(doc),
        modifiers: modifier_lines(doc),
        equipment: belongings.equipment,
        inventory: belongings.inventory,
        currencies: doc.currencies,
        money: doc.currencies.gold_value(),
        notes: trimmed(&doc.notes),
    }
}

fn class_lines(doc: &CharacterDocument) -> Vec<String> {
    doc.classes
        .iter()
        .map(|class| match &class.subclass_definition {
            Some(sub) => format!("Level {} {} | {}", class.level, class.definition.name, sub.name),
            None => format!("Level {} {}", class.level, class.definition.name),
        })
        .collect()
}

/// Known spells from every source plus class spell lists, sorted.
pub fn spell_names(doc: &CharacterDocument) -> Vec<String> {
    let known = doc
        .spells
        .values()
        .flatten()
        .flatten()
        .flatten()
        .filter_map(|spell| spell.definition.as_ref())
        .map(|def| def.name.clone());
    let class = doc
        .class_spells
        .iter()
        .filter_map(|cs| cs.spells.as_ref())
        .flatten()
        .map(|spell| spell.definition.name.clone());

    let mut names: Vec<String> = known.chain(class).collect();
    names.sort();
    names
}

/// Every action across categories, stably sorted by name.
pub fn action_names(doc: &CharacterDocument) -> Vec<String> {
    let mut names: Vec<String> = doc
        .actions
        .values()
        .flatten()
        .flatten()
        .flatten()
        .map(|action| action.name.clone())
        .collect();
    names.sort();
    names
}

/// Distinct `"<friendly type>: <friendly subtype>"` lines, ordered by modifier type.
pub fn modifier_lines(doc: &CharacterDocument) -> Vec<String> {
    let mut modifiers: Vec<_> = doc.modifiers.values().flatten().flatten().collect();
    modifiers.sort_by(|a, b| a.kind.cmp(&b.kind));

    let mut seen = HashSet::new();
    modifiers
        .into_iter()
        .map(|m| {
            format!(
                "{}: {}",
                m.friendly_type_name.as_deref().unwrap_or(MISSING_TEXT),
                m.friendly_subtype_name.as_deref().unwrap_or(MISSING_TEXT)
            )
        })
        .filter(|line| seen.insert(line.clone()))
        .collect()
}

/// Languages granted by `language` modifiers.
pub fn languages(doc: &CharacterDocument) -> Vec<String> {
    let mut names: Vec<String> = doc
        .modifiers
        .values()
        .flatten()
        .flatten()
        .filter(|m| m.kind == LANGUAGE_MODIFIER)
        .filter_map(|m| m.friendly_subtype_name.clone())
        .collect();
    names.sort();
    names.dedup();
    names
}

fn trimmed(map: &IndexMap<String, Option<String>>) -> IndexMap<String, String> {
    map.iter()
        .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.trim().to_string())))
        .collect()
}
