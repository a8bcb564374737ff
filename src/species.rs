use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::card::Card;
use crate::corpus::CorpusError;
use crate::language::Language;

/// Species whose English and Spanish names legitimately differ (apostrophe
/// and accent variants). Everything else failing the en/es check is a corpus
/// error requiring manual correction.
const EXPECTED_LOCALE_DIVERGENCES: [&str; 2] = ["カモネギ", "フラベベ"];

#[derive(Debug, Error)]
pub enum SpeciesError {
    #[error(
        "species '{species}' has mismatched names across locales: en '{en}' vs es '{es}'"
    )]
    LocaleMismatch {
        species: String,
        en: String,
        es: String,
    },
}

/// External species-name localization capability.
///
/// Implementations return `None` for unknown species or missing locales; the
/// pipeline skips those entries instead of aborting.
pub trait SpeciesLocalizer {
    fn localize(&self, native_name: &str, language: Language) -> Option<String>;
}

/// Per-language names recorded for one species in the translated-name document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesTranslations {
    pub en: String,
    pub fr: String,
    pub de: String,
    pub ko: String,
    pub ja: String,
    #[serde(rename = "zh-Hant")]
    pub zh_hant: String,
}

impl SpeciesTranslations {
    pub fn name(&self, language: Language) -> &str {
        match language {
            // Spanish reuses the English names.
            Language::En | Language::Es => &self.en,
            Language::Fr => &self.fr,
            Language::De => &self.de,
            Language::Ko => &self.ko,
            Language::Ja => &self.ja,
            Language::ZhHant => &self.zh_hant,
        }
    }
}

/// The translated-name document: native species name -> names per language.
pub type NameTranslations = IndexMap<String, SpeciesTranslations>;

/// Species-name table loaded from a JSON document, the default
/// `SpeciesLocalizer` for offline runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesTable {
    entries: IndexMap<String, SpeciesRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SpeciesRecord {
    en: String,
    es: String,
    fr: String,
    de: String,
    ko: String,
    ja: String,
    #[serde(rename = "zh-Hant")]
    zh_hant: String,
}

impl SpeciesTable {
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let text = fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CorpusError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl SpeciesLocalizer for SpeciesTable {
    fn localize(&self, native_name: &str, language: Language) -> Option<String> {
        let record = self.entries.get(native_name)?;
        let name = match language {
            Language::En => &record.en,
            Language::Es => &record.es,
            Language::Fr => &record.fr,
            Language::De => &record.de,
            Language::Ko => &record.ko,
            Language::Ja => &record.ja,
            Language::ZhHant => &record.zh_hant,
        };
        Some(name.clone())
    }
}

/// Build the translated-name document for every distinct species name in the
/// card corpus.
///
/// Unknown species and species with incomplete locale coverage are skipped.
/// A cross-locale mismatch for a known species aborts the whole regeneration.
pub fn build_name_translations(
    cards: &[Card],
    localizer: &dyn SpeciesLocalizer,
) -> Result<NameTranslations, SpeciesError> {
    let mut translations = NameTranslations::new();
    for card in cards {
        if !card.kind.is_pokemon() || translations.contains_key(&card.name) {
            continue;
        }
        let Some(en) = localizer.localize(&card.name, Language::En) else {
            log::debug!("no species entry for '{}', skipping", card.name);
            continue;
        };
        if !EXPECTED_LOCALE_DIVERGENCES.contains(&card.name.as_str()) {
            if let Some(es) = localizer.localize(&card.name, Language::Es)
                && es != en
            {
                return Err(SpeciesError::LocaleMismatch {
                    species: card.name.clone(),
                    en,
                    es,
                });
            }
        }
        let [Some(en), Some(fr), Some(de), Some(ko), Some(ja), Some(zh_hant)] =
            Language::SUPPORTED.map(|language| localizer.localize(&card.name, language))
        else {
            log::warn!(
                "species '{}' is missing a locale in the species table, skipping",
                card.name
            );
            continue;
        };
        translations.insert(
            card.name.clone(),
            SpeciesTranslations {
                en,
                fr,
                de,
                ko,
                ja,
                zh_hant,
            },
        );
    }
    Ok(translations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardKind;
    use crate::ids::CardId;

    struct FakeNames {
        mismatch_es: bool,
    }

    impl SpeciesLocalizer for FakeNames {
        fn localize(&self, native_name: &str, language: Language) -> Option<String> {
            if native_name != "フシギダネ" {
                return None;
            }
            Some(match language {
                Language::En => "Bulbasaur".to_string(),
                Language::Es if self.mismatch_es => "Bulbasaurio".to_string(),
                Language::Es => "Bulbasaur".to_string(),
                Language::Fr => "Bulbizarre".to_string(),
                Language::De => "Bisasam".to_string(),
                Language::Ko => "이상해씨".to_string(),
                Language::Ja => "フシギダネ".to_string(),
                Language::ZhHant => "妙蛙種子".to_string(),
            })
        }
    }

    fn pokemon(id: u32, name: &str) -> Card {
        Card {
            id: CardId::from_raw(id),
            name: name.to_string(),
            name_alt: None,
            pack: "最強の遺伝子".to_string(),
            collection_number: id,
            rarity: 1,
            kind: CardKind::Pokemon {
                hp: 70,
                pokemon_type: "草".to_string(),
                weakness: "炎".to_string(),
                retreat: 1,
                ex: false,
            },
        }
    }

    #[test]
    fn unknown_species_are_skipped() {
        let cards = vec![pokemon(1, "フシギダネ"), pokemon(2, "ないポケモン")];
        let table = build_name_translations(&cards, &FakeNames { mismatch_es: false })
            .expect("build should succeed");
        assert_eq!(table.len(), 1);
        assert_eq!(table["フシギダネ"].en, "Bulbasaur");
    }

    #[test]
    fn duplicate_prints_produce_one_entry() {
        let cards = vec![pokemon(1, "フシギダネ"), pokemon(2, "フシギダネ")];
        let table = build_name_translations(&cards, &FakeNames { mismatch_es: false })
            .expect("build should succeed");
        assert_eq!(table.len(), 1);
    }

    struct MissingFrench;

    impl SpeciesLocalizer for MissingFrench {
        fn localize(&self, native_name: &str, language: Language) -> Option<String> {
            if language == Language::Fr {
                return None;
            }
            FakeNames { mismatch_es: false }.localize(native_name, language)
        }
    }

    #[test]
    fn incomplete_locale_coverage_is_skipped() {
        let cards = vec![pokemon(1, "フシギダネ")];
        let table =
            build_name_translations(&cards, &MissingFrench).expect("build should succeed");
        assert!(table.is_empty());
    }

    #[test]
    fn locale_mismatch_is_fatal() {
        let cards = vec![pokemon(1, "フシギダネ")];
        let err = build_name_translations(&cards, &FakeNames { mismatch_es: true })
            .expect_err("mismatch should abort");
        assert!(matches!(err, SpeciesError::LocaleMismatch { .. }));
    }
}
