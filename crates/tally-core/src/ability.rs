//! The six ability scores and sparse stat blocks.
//!
//! The character service identifies abilities by a numeric id (1 through 6).
//! A [`StatBlock`] only holds the abilities that carry a non-zero value, so a
//! character with no bonus stats serializes as an empty object.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::StatValue;

/// One of the six ability scores, ordered as the character service numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    /// Id 1.
    Strength,
    /// Id 2.
    Dexterity,
    /// Id 3.
    Constitution,
    /// Id 4.
    Intelligence,
    /// Id 5.
    Wisdom,
    /// Id 6.
    Charisma,
}

impl Ability {
    /// All abilities in id order.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Map a character-service stat id to an ability.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Strength),
            2 => Some(Self::Dexterity),
            3 => Some(Self::Constitution),
            4 => Some(Self::Intelligence),
            5 => Some(Self::Wisdom),
            6 => Some(Self::Charisma),
            _ => None,
        }
    }

    /// The lowercase name used as the JSON key.
    pub fn name(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
            Self::Intelligence => "intelligence",
            Self::Wisdom => "wisdom",
            Self::Charisma => "charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A sparse mapping from ability to score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatBlock(BTreeMap<Ability, i64>);

impl StatBlock {
    /// Build a stat block from raw stat entries.
    ///
    /// Entries with a null or zero value, or with an id outside 1..=6, are
    /// left out.
    pub fn from_values(values: &[StatValue]) -> Self {
        let scores = values
            .iter()
            .filter_map(|stat| {
                let ability = Ability::from_id(stat.id)?;
                match stat.value {
                    Some(value) if value != 0 => Some((ability, value)),
                    _ => None,
                }
            })
            .collect();
        Self(scores)
    }

    /// Score for an ability, if present.
    pub fn get(&self, ability: Ability) -> Option<i64> {
        self.0.get(&ability).copied()
    }

    /// Iterate over present scores in ability order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, i64)> + '_ {
        self.0.iter().map(|(a, v)| (*a, *v))
    }

    /// Number of abilities present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no ability carries a value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
