use std::collections::HashMap;

use crate::corpus::Corpus;
use crate::extract::{FragmentExtractor, TranslateError, is_fully_translated, join_fragments};
use crate::ids::CardId;
use crate::names::NameResolver;
use crate::patterns::{PatternTable, RuleContext};
use crate::traits::CardTrait;

/// What the trait pass did, for diagnostics and tests. Per-trait problems are
/// logged as they are found; the run itself only fails on a fatal
/// `TranslateError`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationReport {
    /// Traits whose `effect_alt` this run filled in.
    pub translated: Vec<CardId>,
    /// Traits left for manual completion (abilities, or coverage gaps).
    pub needs_manual: Vec<CardId>,
}

/// Auto-translate the trait corpus.
///
/// A trait with a pre-supplied `effect_alt` is never re-translated. Abilities
/// are always left for manual completion: their wording routinely needs verbs
/// the pattern table cannot supply. Every other trait with an effect text is
/// extracted and, when every span was covered, joined into `effect_alt`;
/// partial coverage keeps the trait untranslated and logs a warning naming
/// the owning card.
pub fn translate_traits(
    corpus: &Corpus,
    resolver: &NameResolver,
    table: &PatternTable,
) -> Result<(Vec<CardTrait>, TranslationReport), TranslateError> {
    let card_names: HashMap<CardId, &str> = corpus
        .cards
        .iter()
        .map(|card| (card.id, card.name.as_str()))
        .collect();
    let describe = |id: CardId| -> String {
        match card_names.get(&id) {
            Some(name) => format!("'{name}' (card {id})"),
            None => format!("card {id}"),
        }
    };

    let extractor = FragmentExtractor::new(
        table,
        RuleContext {
            resolver,
            types: &corpus.types,
        },
    );

    let mut traits = corpus.traits.clone();
    let mut report = TranslationReport::default();
    for card_trait in &mut traits {
        let Some(effect) = &card_trait.effect else {
            continue;
        };
        if card_trait.effect_alt.is_some() {
            continue;
        }
        if card_trait.is_ability() {
            log::warn!(
                "ability of {} has no effect_alt; ability wording is unstable, set it manually",
                describe(card_trait.card_id)
            );
            report.needs_manual.push(card_trait.card_id);
            continue;
        }
        let fragments = extractor.extract(effect)?;
        if !is_fully_translated(&fragments) {
            log::warn!(
                "auto-translation of {} is incomplete; set effect_alt manually",
                describe(card_trait.card_id)
            );
            report.needs_manual.push(card_trait.card_id);
            continue;
        }
        card_trait.effect_alt = Some(join_fragments(&fragments));
        report.translated.push(card_trait.card_id);
    }
    Ok((traits, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, CardKind};
    use crate::corpus::EvolutionMap;
    use crate::language::Language;
    use crate::species::NameTranslations;
    use crate::traits::{AttackData, TraitKind};
    use crate::types::TypeRegistry;

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

    fn attack(card_id: u32, effect: Option<&str>, effect_alt: Option<&str>) -> CardTrait {
        CardTrait {
            card_id: CardId::from_raw(card_id),
            effect: effect.map(str::to_string),
            effect_alt: effect_alt.map(str::to_string),
            kind: TraitKind::Attack(AttackData {
                name: "たいあたり".to_string(),
                matching_energy: 1,
                colorless_energy: 0,
                energy_override: None,
                power: 20,
            }),
        }
    }

    fn ability(card_id: u32, effect: &str) -> CardTrait {
        CardTrait {
            card_id: CardId::from_raw(card_id),
            effect: Some(effect.to_string()),
            effect_alt: None,
            kind: TraitKind::Ability {
                name: "とくせい".to_string(),
            },
        }
    }

    fn run(traits: Vec<CardTrait>) -> (Vec<CardTrait>, TranslationReport) {
        let corpus = Corpus::new(
            vec![pokemon(1, "フシギダネ")],
            traits,
            EvolutionMap::new(),
            TypeRegistry::from_types(Vec::new()),
        );
        let translations = NameTranslations::new();
        let resolver = NameResolver::new(&corpus.cards, &translations, Language::En);
        let table = PatternTable::standard().expect("table should compile");
        translate_traits(&corpus, &resolver, &table).expect("no fatal errors expected")
    }

    #[test]
    fn covered_attack_text_is_filled_in() {
        let (traits, report) = run(vec![attack(1, Some("相手のポケモン１匹に10ダメージ。"), None)]);
        assert_eq!(
            traits[0].effect_alt.as_deref(),
            Some("This attack does 10 damage to 1 of your opponent's Pokémon.")
        );
        assert_eq!(report.translated, vec![CardId(1)]);
        assert!(report.needs_manual.is_empty());
    }

    #[test]
    fn manual_translation_is_never_overwritten() {
        let (traits, report) = run(vec![attack(
            1,
            Some("相手のポケモン１匹に10ダメージ。"),
            Some("Hand-written wording."),
        )]);
        assert_eq!(traits[0].effect_alt.as_deref(), Some("Hand-written wording."));
        assert!(report.translated.is_empty());
    }

    #[test]
    fn partial_coverage_is_kept_untranslated() {
        let (traits, report) = run(vec![attack(1, Some("未知の効果文をもつワザ"), None)]);
        assert_eq!(traits[0].effect_alt, None);
        assert_eq!(report.needs_manual, vec![CardId(1)]);
    }

    #[test]
    fn abilities_always_require_manual_translation() {
        let (traits, report) = run(vec![ability(1, "相手のポケモン１匹に10ダメージ。")]);
        assert_eq!(traits[0].effect_alt, None);
        assert_eq!(report.needs_manual, vec![CardId(1)]);
    }

    #[test]
    fn traits_without_effect_text_are_untouched() {
        let (traits, report) = run(vec![attack(1, None, None)]);
        assert_eq!(traits[0].effect_alt, None);
        assert!(report.translated.is_empty());
        assert!(report.needs_manual.is_empty());
    }
}
