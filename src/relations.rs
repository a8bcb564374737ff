use std::collections::HashSet;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::ids::CardId;
use crate::names::NameResolver;

/// The targetables document: card id -> logical names its effect text quotes,
/// deduplicated in first-seen order.
pub type Targetables = IndexMap<CardId, Vec<String>>;

/// Serialized form of one relation bucket. Empty link lists are absent
/// rather than empty so the documents stay free of noise collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRelationDoc {
    pub card_ids: Vec<CardId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolutions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeted_by: Option<Vec<CardId>>,
}

#[derive(Debug, Clone)]
struct RelationEntry {
    /// Arena slot of the shared physical-id list. A base-form key and its ex
    /// key store the same slot, so an append through either alias is visible
    /// through the other.
    ids: usize,
    evolutions: Vec<String>,
    targeted_by: Vec<CardId>,
}

/// The relation graph: logical display name -> physical prints, evolution
/// neighbors within the 3-stage chain, and referencing card ids.
///
/// Built once per corpus regeneration, from scratch; never mutated
/// incrementally. `targeted_by` is independent between a base form and its ex
/// form (effect text quotes one exact printed name); only the id list is
/// shared between the aliases.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    entries: IndexMap<String, RelationEntry>,
    id_lists: Vec<Vec<CardId>>,
}

impl RelationGraph {
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn card_ids(&self, name: &str) -> Option<&[CardId]> {
        self.entries
            .get(name)
            .map(|entry| self.id_lists[entry.ids].as_slice())
    }

    pub fn evolutions(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(|entry| entry.evolutions.as_slice())
    }

    pub fn targeted_by(&self, name: &str) -> Option<&[CardId]> {
        self.entries.get(name).map(|entry| entry.targeted_by.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the arena slots into the serializable relation document.
    pub fn to_document(&self) -> IndexMap<String, CardRelationDoc> {
        self.entries
            .iter()
            .map(|(name, entry)| {
                (
                    name.clone(),
                    CardRelationDoc {
                        card_ids: self.id_lists[entry.ids].clone(),
                        evolutions: if entry.evolutions.is_empty() {
                            None
                        } else {
                            Some(entry.evolutions.clone())
                        },
                        targeted_by: if entry.targeted_by.is_empty() {
                            None
                        } else {
                            Some(entry.targeted_by.clone())
                        },
                    },
                )
            })
            .collect()
    }

    fn push_evolution(&mut self, name: &str, related: &str) {
        for key in [name.to_string(), format!("{name}ex")] {
            if let Some(entry) = self.entries.get_mut(&key) {
                entry.evolutions.push(related.to_string());
            }
        }
    }
}

/// Build the relation graph and the targetables map from the full corpus.
///
/// Missing cross-references are omitted, never raised: an evolution-map entry
/// whose endpoints have no bucket is skipped, and a quoted name without a
/// bucket records nothing.
pub fn build_relations(corpus: &Corpus, resolver: &NameResolver) -> (RelationGraph, Targetables) {
    let mut graph = RelationGraph::default();

    // Group cards into buckets. A card whose alternate-variant key already
    // has a bucket joins that bucket's id list under its own key.
    for card in &corpus.cards {
        let name = resolver.logical_name(card);
        let alternate = resolver.alternate_logical_name(card);
        if let Some(entry) = graph.entries.get(&name) {
            let slot = entry.ids;
            graph.id_lists[slot].push(card.id);
        } else if let Some(alternate_entry) = graph.entries.get(&alternate) {
            let slot = alternate_entry.ids;
            graph.id_lists[slot].push(card.id);
            graph.entries.insert(
                name,
                RelationEntry {
                    ids: slot,
                    evolutions: Vec::new(),
                    targeted_by: Vec::new(),
                },
            );
        } else {
            graph.id_lists.push(vec![card.id]);
            graph.entries.insert(
                name,
                RelationEntry {
                    ids: graph.id_lists.len() - 1,
                    evolutions: Vec::new(),
                    targeted_by: Vec::new(),
                },
            );
        }
    }

    // Link evolutions bidirectionally, including the stage-0 ancestor of a
    // stage-2 evolution so every bucket lists the whole reachable chain.
    // Ex-suffixed buckets receive the same links as their base-form bucket.
    for (to, from) in &corpus.evolutions {
        if !graph.contains(to) || !graph.contains(from) {
            continue;
        }
        if let Some(ancestor) = corpus.pre_evolution(from).map(str::to_string) {
            graph.push_evolution(&ancestor, to);
            graph.push_evolution(to, &ancestor);
        }
        graph.push_evolution(from, to);
        graph.push_evolution(to, from);
    }

    // Scan effect texts for quoted logical names.
    let mut targetables = Targetables::new();
    for card_trait in &corpus.traits {
        let Some(effect) = &card_trait.effect else {
            continue;
        };
        for card in &corpus.cards {
            let name = resolver.logical_name(card);
            if !effect.contains(&format!("「{name}」")) {
                continue;
            }
            targetables
                .entry(card_trait.card_id)
                .or_default()
                .push(name.clone());
            if let Some(entry) = graph.entries.get_mut(&name) {
                entry.targeted_by.push(card_trait.card_id);
            }
        }
    }

    for entry in graph.entries.values_mut() {
        dedup_in_order(&mut entry.targeted_by);
    }
    for names in targetables.values_mut() {
        dedup_in_order(names);
    }

    (graph, targetables)
}

fn dedup_in_order<T: Eq + Hash + Clone>(values: &mut Vec<T>) {
    let mut seen = HashSet::with_capacity(values.len());
    values.retain(|value| seen.insert(value.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, CardKind};
    use crate::corpus::EvolutionMap;
    use crate::language::Language;
    use crate::species::NameTranslations;
    use crate::traits::{CardTrait, TraitKind};
    use crate::types::TypeRegistry;

    fn pokemon(id: u32, name: &str, ex: bool) -> Card {
        Card {
            id: CardId::from_raw(id),
            name: name.to_string(),
            name_alt: None,
            pack: "最強の遺伝子".to_string(),
            collection_number: id,
            rarity: if ex { 4 } else { 1 },
            kind: CardKind::Pokemon {
                hp: 70,
                pokemon_type: "草".to_string(),
                weakness: "炎".to_string(),
                retreat: 1,
                ex,
            },
        }
    }

    fn trainer_trait(card_id: u32, effect: &str) -> CardTrait {
        CardTrait {
            card_id: CardId::from_raw(card_id),
            effect: Some(effect.to_string()),
            effect_alt: None,
            kind: TraitKind::Trainer,
        }
    }

    fn build(cards: Vec<Card>, traits: Vec<CardTrait>, evolutions: EvolutionMap) -> (RelationGraph, Targetables) {
        let corpus = Corpus::new(cards, traits, evolutions, TypeRegistry::from_types(Vec::new()));
        let translations = NameTranslations::new();
        let resolver = NameResolver::new(&corpus.cards, &translations, Language::En);
        build_relations(&corpus, &resolver)
    }

    #[test]
    fn ex_and_base_prints_share_one_id_list_under_both_keys() {
        let cards = vec![
            pokemon(1, "フシギダネ", false),
            pokemon(2, "フシギダネ", true),
            pokemon(3, "フシギダネ", false),
        ];
        let (graph, _) = build(cards, Vec::new(), EvolutionMap::new());
        let expected = [CardId(1), CardId(2), CardId(3)];
        assert_eq!(graph.card_ids("フシギダネ"), Some(expected.as_slice()));
        assert_eq!(graph.card_ids("フシギダネex"), Some(expected.as_slice()));
    }

    #[test]
    fn three_stage_chain_links_every_reachable_relative() {
        let cards = vec![
            pokemon(1, "フシギダネ", false),
            pokemon(2, "フシギソウ", false),
            pokemon(3, "フシギバナ", false),
        ];
        let mut evolutions = EvolutionMap::new();
        evolutions.insert("フシギソウ".to_string(), "フシギダネ".to_string());
        evolutions.insert("フシギバナ".to_string(), "フシギソウ".to_string());
        let (graph, _) = build(cards, Vec::new(), evolutions);

        let base = graph.evolutions("フシギダネ").expect("base bucket exists");
        assert!(base.contains(&"フシギソウ".to_string()));
        assert!(base.contains(&"フシギバナ".to_string()));

        let stage2 = graph.evolutions("フシギバナ").expect("stage2 bucket exists");
        assert!(stage2.contains(&"フシギダネ".to_string()));
        assert!(stage2.contains(&"フシギソウ".to_string()));
    }

    #[test]
    fn ex_bucket_receives_the_same_evolution_links() {
        let cards = vec![
            pokemon(1, "フシギダネ", false),
            pokemon(2, "フシギソウ", false),
            pokemon(3, "フシギバナ", false),
            pokemon(4, "フシギバナ", true),
        ];
        let mut evolutions = EvolutionMap::new();
        evolutions.insert("フシギソウ".to_string(), "フシギダネ".to_string());
        evolutions.insert("フシギバナ".to_string(), "フシギソウ".to_string());
        let (graph, _) = build(cards, Vec::new(), evolutions);

        let ex = graph.evolutions("フシギバナex").expect("ex bucket exists");
        assert!(ex.contains(&"フシギダネ".to_string()));
        assert!(ex.contains(&"フシギソウ".to_string()));
    }

    #[test]
    fn repeated_quotes_are_deduplicated_in_first_seen_order() {
        let cards = vec![pokemon(1, "フシギダネ", false), pokemon(2, "フシギダネ", false)];
        let traits = vec![trainer_trait(
            9,
            "「フシギダネ」を選ぶ。「フシギダネ」に10ダメージ。",
        )];
        let (graph, targetables) = build(cards, traits, EvolutionMap::new());
        assert_eq!(
            targetables[&CardId(9)],
            vec!["フシギダネ".to_string()]
        );
        assert_eq!(graph.targeted_by("フシギダネ"), Some([CardId(9)].as_slice()));
    }

    #[test]
    fn missing_evolution_endpoints_are_skipped() {
        let cards = vec![pokemon(1, "フシギソウ", false)];
        let mut evolutions = EvolutionMap::new();
        evolutions.insert("フシギソウ".to_string(), "フシギダネ".to_string());
        let (graph, _) = build(cards, Vec::new(), evolutions);
        assert_eq!(graph.evolutions("フシギソウ"), Some([].as_slice()));
    }

    #[test]
    fn empty_link_lists_serialize_as_absent() {
        let cards = vec![pokemon(1, "フシギダネ", false)];
        let (graph, _) = build(cards, Vec::new(), EvolutionMap::new());
        let doc = graph.to_document();
        let json = serde_json::to_string(&doc).expect("document should serialize");
        assert!(!json.contains("evolutions"));
        assert!(!json.contains("targetedBy"));
    }
}
