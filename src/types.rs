use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Translations carried by every Pokémon type record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTranslations {
    pub en: String,
    pub ja: String,
}

/// One Pokémon type from the manual type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    /// Display color for the UI layer.
    pub color: String,
    /// One-letter shorthand used in energy-cost strings.
    pub shorten: String,
    pub translations: TypeTranslations,
}

/// Immutable lookup table over the type records.
///
/// Built once from the static type data and passed by reference to every
/// consumer; declaration order doubles as the type sort order.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: Vec<PokemonType>,
    by_native: HashMap<String, usize>,
}

impl TypeRegistry {
    pub fn from_types(types: Vec<PokemonType>) -> Self {
        let by_native = crate::index::unique_index(&types, |t| t.translations.ja.clone());
        Self { types, by_native }
    }

    pub fn by_native_name(&self, native: &str) -> Option<&PokemonType> {
        self.by_native.get(native).map(|&i| &self.types[i])
    }

    /// Position in the declared type order, used by type sorting.
    pub fn order_of(&self, native: &str) -> Option<usize> {
        self.by_native.get(native).copied()
    }

    pub fn types(&self) -> &[PokemonType] {
        &self.types
    }

    /// Title-cased English name for a native type name, e.g. "草" -> "Grass".
    /// A miss falls back to the native name so a single unknown type never
    /// aborts a translation run.
    pub fn english_name(&self, native: &str) -> String {
        match self.by_native_name(native) {
            Some(t) => {
                let lower = t.translations.en.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    Some(head) => head.to_uppercase().chain(chars).collect(),
                    None => lower,
                }
            }
            None => {
                log::warn!("unknown pokemon type '{native}', leaving it untranslated");
                native.to_string()
            }
        }
    }
}
