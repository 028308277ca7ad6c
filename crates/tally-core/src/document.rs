//! Typed view of the raw character document.
//!
//! Only the fields the summarizer reads are modelled. Everything else in the
//! document is ignored on decode, so new service fields do not break a run,
//! while a missing required field surfaces as
//! [`TallyError::MalformedDocument`].

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{TallyError, TallyResult};

/// Character-value type id carrying a custom display name.
pub const CUSTOM_NAME_TYPE: u32 = 8;
/// Character-value type id carrying the silvered flag.
pub const SILVERED_TYPE: u32 = 20;

/// The raw per-player document returned by the character service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDocument {
    /// Character name.
    pub name: String,
    /// Every item the character carries, equipped or not.
    pub inventory: Vec<InventoryEntry>,
    /// Class levels.
    pub classes: Vec<ClassEntry>,
    /// Base ability scores.
    pub stats: Vec<StatValue>,
    /// Bonus ability scores.
    #[serde(default)]
    pub bonus_stats: Vec<StatValue>,
    /// Ability score overrides.
    #[serde(default)]
    pub override_stats: Vec<StatValue>,
    /// Actions grouped by source (race, class, item, ...).
    pub actions: IndexMap<String, Option<Vec<Option<Action>>>>,
    /// Modifiers grouped by source.
    pub modifiers: IndexMap<String, Option<Vec<Modifier>>>,
    /// Spells already known to the character, grouped by source.
    pub spells: IndexMap<String, Option<Vec<Option<KnownSpell>>>>,
    /// Spells available per class and subclass.
    pub class_spells: Vec<ClassSpells>,
    /// Coin counts.
    pub currencies: Currencies,
    /// Free-form notes.
    #[serde(default)]
    pub notes: IndexMap<String, Option<String>>,
    /// Personality traits, ideals, bonds, flaws.
    #[serde(default)]
    pub traits: IndexMap<String, Option<String>>,
    /// Background.
    pub background: Background,
    /// Feats.
    #[serde(default)]
    pub feats: Vec<Feat>,
    /// Per-character customizations keyed to other document entries.
    #[serde(default)]
    pub character_values: Vec<CharacterValue>,
    /// Maximum hit points before modifiers.
    pub base_hit_points: i64,
    /// Damage taken.
    #[serde(default)]
    pub removed_hit_points: Option<i64>,
    /// Temporary hit points.
    #[serde(default)]
    pub temporary_hit_points: Option<i64>,
}

impl CharacterDocument {
    /// Decode a document from a JSON value.
    pub fn from_value(player: &str, value: serde_json::Value) -> TallyResult<Self> {
        serde_json::from_value(value).map_err(|source| TallyError::MalformedDocument {
            player: player.to_string(),
            source,
        })
    }

    /// Decode a document from JSON text.
    pub fn from_json(player: &str, json: &str) -> TallyResult<Self> {
        serde_json::from_str(json).map_err(|source| TallyError::MalformedDocument {
            player: player.to_string(),
            source,
        })
    }

    /// Character values that customize the inventory entry with the given id.
    pub fn overrides_for(&self, entry_id: u64) -> Vec<&CharacterValue> {
        let id = entry_id.to_string();
        self.character_values
            .iter()
            .filter(|cv| cv.value_id.as_deref() == Some(id.as_str()))
            .collect()
    }
}

/// Something with a display name.
#[derive(Debug, Clone, Deserialize)]
pub struct Named {
    /// Display name.
    pub name: String,
}

/// One item in the character's inventory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    /// Entry id, referenced by character-value overrides.
    pub id: u64,
    /// Whether the item is equipped.
    #[serde(default)]
    pub equipped: bool,
    /// The item definition.
    pub definition: ItemDefinition,
}

/// Definition of an inventory item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDefinition {
    /// Base item name.
    pub name: String,
    /// Modifiers the item grants while equipped or attuned.
    #[serde(default)]
    pub granted_modifiers: Option<Vec<serde_json::Value>>,
}

/// A per-character customization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterValue {
    /// Kind of customization ([`CUSTOM_NAME_TYPE`], [`SILVERED_TYPE`], ...).
    pub type_id: u32,
    /// Id of the entry this value applies to.
    #[serde(default, deserialize_with = "id_as_string")]
    pub value_id: Option<String>,
    /// The customization value.
    #[serde(default)]
    pub value: serde_json::Value,
}

/// The service sends entry ids as strings; accept numbers too.
fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// One class the character has levels in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    /// Levels in this class.
    pub level: u32,
    /// The class.
    pub definition: Named,
    /// The chosen subclass, if any.
    #[serde(default)]
    pub subclass_definition: Option<Named>,
}

/// A raw ability-score entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StatValue {
    /// Stat id, 1 through 6.
    pub id: u32,
    /// Score, if set.
    #[serde(default)]
    pub value: Option<i64>,
}

/// An action the character can take.
#[derive(Debug, Clone, Deserialize)]
pub struct Action {
    /// Action name.
    pub name: String,
}

/// A modifier applied to the character.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    /// Machine type, e.g. `bonus` or `language`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable type.
    #[serde(default)]
    pub friendly_type_name: Option<String>,
    /// Human-readable subtype.
    #[serde(default)]
    pub friendly_subtype_name: Option<String>,
}

/// A known spell; the definition may be absent for placeholder entries.
#[derive(Debug, Clone, Deserialize)]
pub struct KnownSpell {
    /// Spell definition.
    #[serde(default)]
    pub definition: Option<Named>,
}

/// Spells available to one class.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassSpells {
    /// The spells.
    #[serde(default)]
    pub spells: Option<Vec<ClassSpell>>,
}

/// A spell available through a class.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassSpell {
    /// Spell definition.
    pub definition: Named,
}

/// Coin counts by denomination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Currencies {
    /// Copper pieces.
    #[serde(default)]
    pub cp: i64,
    /// Silver pieces.
    #[serde(default)]
    pub sp: i64,
    /// Gold pieces.
    #[serde(default)]
    pub gp: i64,
    /// Electrum pieces.
    #[serde(default)]
    pub ep: i64,
    /// Platinum pieces.
    #[serde(default)]
    pub pp: i64,
}

impl Currencies {
    /// Total value in gold pieces.
    pub fn gold_value(&self) -> f64 {
        self.cp as f64 * 0.01
            + self.sp as f64 * 0.1
            + self.ep as f64 * 0.5
            + self.gp as f64
            + self.pp as f64 * 10.0
    }
}

/// The character's background.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    /// Whether the player wrote a custom background.
    #[serde(default)]
    pub has_custom_background: bool,
    /// The custom background.
    #[serde(default)]
    pub custom_background: Option<CustomBackground>,
    /// The stock background.
    #[serde(default)]
    pub definition: Option<Named>,
}

impl Background {
    /// The custom name when the player has one, else the definition name.
    pub fn display_name(&self) -> Option<String> {
        if self.has_custom_background {
            self.custom_background.as_ref()?.name.clone()
        } else {
            self.definition.as_ref().map(|d| d.name.clone())
        }
    }
}

/// A player-written background.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomBackground {
    /// Background name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A feat.
#[derive(Debug, Clone, Deserialize)]
pub struct Feat {
    /// Feat definition.
    pub definition: Named,
}
