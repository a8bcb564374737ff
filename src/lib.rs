//! Build-time data pipeline for a trading-card database browser.
//!
//! Two subsystems run over the card corpus before the UI ever sees it: the
//! effect-text translation pipeline (an ordered pattern table applied
//! repeatedly to native-language rules text) and the card-relationship graph
//! builder (same-name grouping across ex/base variants, evolution links,
//! name references inside effect texts). Both are deterministic, batch,
//! whole-corpus transforms producing JSON documents.

pub mod card;
pub mod corpus;
pub mod extract;
pub mod ids;
pub mod index;
pub mod language;
pub mod names;
pub mod patterns;
pub mod pipeline;
pub mod relations;
pub mod sorting;
pub mod species;
pub mod traits;
pub mod translate;
pub mod types;

pub use card::{Card, CardKind, TrainerCategory};
pub use corpus::{Corpus, CorpusError, EvolutionMap};
pub use extract::{
    Fragment, FragmentExtractor, TranslateError, is_fully_translated, join_fragments,
};
pub use ids::CardId;
pub use language::Language;
pub use names::NameResolver;
pub use patterns::{PatternRule, PatternTable, Replacement, RuleContext, halfwidth_digits};
pub use pipeline::{GeneratedArtifacts, PipelineError, Regenerator, regenerate};
pub use relations::{CardRelationDoc, RelationGraph, Targetables, build_relations};
pub use sorting::{SortKey, SortSpec, sort_cards};
pub use species::{
    NameTranslations, SpeciesError, SpeciesLocalizer, SpeciesTable, SpeciesTranslations,
    build_name_translations,
};
pub use traits::{AttackData, CardTrait, TraitKind};
pub use translate::{TranslationReport, translate_traits};
pub use types::{PokemonType, TypeRegistry, TypeTranslations};
