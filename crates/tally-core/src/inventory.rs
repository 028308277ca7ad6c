//! Inventory name resolution and the equipment/inventory split.

use crate::config::IgnoredItems;
use crate::summary::MISSING_TEXT;
use crate::document::{
    CUSTOM_NAME_TYPE, CharacterDocument, CharacterValue, InventoryEntry, SILVERED_TYPE,
};

const SCROLL_MARKER: &str = "Spell Scroll (";

/// Resolve the display name of an inventory entry given its overrides.
///
/// Precedence: spell scrolls show the scroll's custom name, then a custom
/// name replaces the base name, then a silvered flag prefixes it.
pub fn resolve_item_name(entry: &InventoryEntry, overrides: &[&CharacterValue]) -> String {
    let name = &entry.definition.name;
    let custom_name = overrides
        .iter()
        .find(|cv| cv.type_id == CUSTOM_NAME_TYPE)
        .map(|cv| display_value(&cv.value));
    let silvered = overrides
        .iter()
        .any(|cv| cv.type_id == SILVERED_TYPE && cv.value == serde_json::Value::Bool(true));

    if name.contains(SCROLL_MARKER) {
        return format!("Scroll: {}", custom_name.as_deref().unwrap_or(MISSING_TEXT));
    }
    if let Some(custom) = custom_name {
        return custom;
    }
    if silvered {
        return format!("Silvered {name}");
    }
    name.clone()
}

/// Render an override value the way it is shown on the sheet.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A character's items split by whether they are equipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Belongings {
    /// Resolved names of equipped items, sorted.
    pub equipment: Vec<String>,
    /// Resolved names of carried but unequipped items, sorted.
    pub inventory: Vec<String>,
}

/// Resolve every inventory entry, drop ignored names, and split by equipped state.
pub fn partition_belongings(doc: &CharacterDocument, ignored: &IgnoredItems) -> Belongings {
    let mut belongings = Belongings::default();
    for entry in &doc.inventory {
        let name = resolve_item_name(entry, &doc.overrides_for(entry.id));
        if ignored.contains(&name) {
            continue;
        }
        if entry.equipped {
            belongings.equipment.push(name);
        } else {
            belongings.inventory.push(name);
        }
    }
    belongings.equipment.sort();
    belongings.inventory.sort();
    belongings
}

/// The first equipped item whose base name mentions stress.
pub fn stress_marker(doc: &CharacterDocument) -> Option<String> {
    doc.inventory
        .iter()
        .find(|entry| entry.equipped && entry.definition.name.contains("Stress"))
        .map(|entry| entry.definition.name.clone())
}
