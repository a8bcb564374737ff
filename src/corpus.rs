use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::card::Card;
use crate::traits::CardTrait;
use crate::types::{PokemonType, TypeRegistry};

/// Mapping from a logical name to its immediate pre-evolution's logical name.
/// Chains are at most three stages, so a lookup never recurses past depth 2.
pub type EvolutionMap = IndexMap<String, String>;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Everything the pipeline reads: the card and trait corpora, the evolution
/// map and the type registry. Loaded once per regeneration and never mutated.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub cards: Vec<Card>,
    /// The trait corpus, possibly already carrying manual `effect_alt` values.
    pub traits: Vec<CardTrait>,
    pub evolutions: EvolutionMap,
    pub types: TypeRegistry,
    /// Names that appear as a pre-evolution of something.
    evolved_from: HashSet<String>,
}

impl Corpus {
    pub fn new(
        cards: Vec<Card>,
        traits: Vec<CardTrait>,
        evolutions: EvolutionMap,
        types: TypeRegistry,
    ) -> Self {
        let evolved_from = evolutions.values().cloned().collect();
        Self {
            cards,
            traits,
            evolutions,
            types,
            evolved_from,
        }
    }

    /// Load the manual data store from a directory of JSON documents.
    pub fn load(data_dir: &Path) -> Result<Self, CorpusError> {
        let cards: Vec<Card> = read_json(&data_dir.join("cards.json"))?;
        let traits: Vec<CardTrait> =
            read_json(&data_dir.join("partially-translated-traits.json"))?;
        let evolutions: EvolutionMap = read_json(&data_dir.join("evolutions.json"))?;
        let types: Vec<PokemonType> = read_json(&data_dir.join("pokemon-types.json"))?;
        Ok(Self::new(
            cards,
            traits,
            evolutions,
            TypeRegistry::from_types(types),
        ))
    }

    pub fn pre_evolution(&self, name: &str) -> Option<&str> {
        self.evolutions.get(name).map(String::as_str)
    }

    pub fn has_post_evolution(&self, name: &str) -> bool {
        self.evolved_from.contains(name)
    }

    /// 0 for a basic Pokémon, 1 for a stage-1, 2 for a stage-2.
    pub fn evolution_stage(&self, name: &str) -> u8 {
        match self.pre_evolution(name) {
            None => 0,
            Some(from) => {
                if self.pre_evolution(from).is_some() {
                    2
                } else {
                    1
                }
            }
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CorpusError> {
    let text = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CorpusError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_corpus() -> Corpus {
        let mut evolutions = EvolutionMap::new();
        evolutions.insert("フシギソウ".to_string(), "フシギダネ".to_string());
        evolutions.insert("フシギバナ".to_string(), "フシギソウ".to_string());
        Corpus::new(Vec::new(), Vec::new(), evolutions, TypeRegistry::from_types(Vec::new()))
    }

    #[test]
    fn evolution_stage_walks_the_chain() {
        let corpus = chain_corpus();
        assert_eq!(corpus.evolution_stage("フシギダネ"), 0);
        assert_eq!(corpus.evolution_stage("フシギソウ"), 1);
        assert_eq!(corpus.evolution_stage("フシギバナ"), 2);
        // Unknown names are basics.
        assert_eq!(corpus.evolution_stage("ピカチュウ"), 0);
    }

    #[test]
    fn post_evolution_lookup_uses_map_values() {
        let corpus = chain_corpus();
        assert!(corpus.has_post_evolution("フシギダネ"));
        assert!(corpus.has_post_evolution("フシギソウ"));
        assert!(!corpus.has_post_evolution("フシギバナ"));
    }
}
