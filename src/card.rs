use serde::{Deserialize, Serialize};

use crate::ids::CardId;

/// Closed set of trainer-card categories.
///
/// Declaration order is the display/sort order. A value outside this
/// enumeration in the card corpus fails deserialization, which aborts a
/// regeneration before any artifact is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrainerCategory {
    Item,
    PokemonTool,
    Supporter,
    Fossil,
}

impl TrainerCategory {
    /// Position in the declared category order, used by subcategory sorting.
    pub fn rank(self) -> usize {
        match self {
            TrainerCategory::Item => 0,
            TrainerCategory::PokemonTool => 1,
            TrainerCategory::Supporter => 2,
            TrainerCategory::Fossil => 3,
        }
    }
}

/// Capability payload of a card, decided once at deserialization.
///
/// The kind is an explicit tag; nothing downstream probes for field presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum CardKind {
    Pokemon {
        hp: u32,
        /// Native-language type name, resolved through the type registry.
        pokemon_type: String,
        weakness: String,
        retreat: u32,
        /// Alternate higher-rarity form sharing the base display name.
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        ex: bool,
    },
    Trainer {
        category: TrainerCategory,
    },
    /// Fossils are trainer cards that sit in play with hit points.
    Fossil {
        category: TrainerCategory,
        hp: u32,
    },
    /// Placeholder records (the corpus may start with a dummy card).
    Generic,
}

impl CardKind {
    pub fn is_pokemon(&self) -> bool {
        matches!(self, CardKind::Pokemon { .. })
    }

    pub fn trainer_category(&self) -> Option<TrainerCategory> {
        match self {
            CardKind::Trainer { category } | CardKind::Fossil { category, .. } => Some(*category),
            _ => None,
        }
    }

    pub fn hp(&self) -> Option<u32> {
        match self {
            CardKind::Pokemon { hp, .. } | CardKind::Fossil { hp, .. } => Some(*hp),
            _ => None,
        }
    }

    /// True for the ex variant of a Pokémon card.
    pub fn is_ex(&self) -> bool {
        matches!(self, CardKind::Pokemon { ex: true, .. })
    }
}

/// One physical card print from the manual data store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    /// Native-language display name. Not unique: reprints and ex/base
    /// variant pairs share it.
    pub name: String,
    /// Pre-supplied secondary-language name, if the species tables lack one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_alt: Option<String>,
    pub pack: String,
    pub collection_number: u32,
    pub rarity: u32,
    #[serde(flatten)]
    pub kind: CardKind,
}

impl Card {
    pub fn is_ex(&self) -> bool {
        self.kind.is_ex()
    }
}
