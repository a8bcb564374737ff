use serde::{Deserialize, Serialize};

use crate::ids::CardId;

/// Per-attack energy requirement and power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackData {
    pub name: String,
    /// Energy of the Pokémon's own type.
    pub matching_energy: u32,
    pub colorless_energy: u32,
    /// Replaces the derived cost display when the printed cost differs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_override: Option<String>,
    pub power: u32,
}

/// What kind of trait this is, decided once at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "trait", rename_all = "snake_case")]
pub enum TraitKind {
    /// A named Pokémon ability. Ability wording is unstable enough that the
    /// automatic pipeline never fills in its translation.
    Ability { name: String },
    Attack(AttackData),
    /// The rules text of a trainer card.
    Trainer,
}

/// An ability or attack belonging to exactly one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTrait {
    pub card_id: CardId,
    /// Native-language rules text. Attacks without rules text have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    /// Target-language rules text. A pre-supplied value is a manual
    /// translation and is never overwritten by the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect_alt: Option<String>,
    #[serde(flatten)]
    pub kind: TraitKind,
}

impl CardTrait {
    pub fn is_ability(&self) -> bool {
        matches!(self.kind, TraitKind::Ability { .. })
    }

    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            TraitKind::Ability { name } => Some(name),
            TraitKind::Attack(attack) => Some(&attack.name),
            TraitKind::Trainer => None,
        }
    }
}
