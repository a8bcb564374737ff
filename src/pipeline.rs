use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::corpus::{Corpus, CorpusError};
use crate::extract::TranslateError;
use crate::language::Language;
use crate::names::NameResolver;
use crate::patterns::PatternTable;
use crate::relations::{CardRelationDoc, Targetables, build_relations};
use crate::species::{NameTranslations, SpeciesError, SpeciesLocalizer, build_name_translations};
use crate::traits::CardTrait;
use crate::translate::{TranslationReport, translate_traits};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error(transparent)]
    Species(#[from] SpeciesError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error("invalid pattern table: {0}")]
    Pattern(#[from] regex::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize {artifact}: {source}")]
    Serialize {
        artifact: &'static str,
        source: serde_json::Error,
    },
}

/// Everything one regeneration produces, built fully in memory before any
/// file is touched.
#[derive(Debug, Clone)]
pub struct GeneratedArtifacts {
    pub card_relations: IndexMap<String, CardRelationDoc>,
    pub targetables: Targetables,
    pub name_translations: NameTranslations,
    pub traits: Vec<CardTrait>,
    pub report: TranslationReport,
}

/// Run the whole pipeline over a corpus: translated names, relation graph,
/// targetables and the auto-translated trait corpus.
///
/// Pure with respect to the filesystem; a fatal error here means nothing was
/// written and the previous artifacts stay valid.
pub fn regenerate(
    corpus: &Corpus,
    species: &dyn SpeciesLocalizer,
) -> Result<GeneratedArtifacts, PipelineError> {
    let name_translations = build_name_translations(&corpus.cards, species)?;
    let resolver = NameResolver::new(&corpus.cards, &name_translations, Language::En);
    let (graph, targetables) = build_relations(corpus, &resolver);
    let table = PatternTable::standard()?;
    let (traits, report) = translate_traits(corpus, &resolver, &table)?;
    Ok(GeneratedArtifacts {
        card_relations: graph.to_document(),
        targetables,
        name_translations,
        traits,
        report,
    })
}

/// Writes regeneration output to a directory, serializing overlapping
/// triggers.
///
/// A change event arriving while a run is in flight queues on the internal
/// lock instead of interleaving writes to the shared artifacts. The four
/// documents are regenerated together and overwritten wholesale.
pub struct Regenerator {
    out_dir: PathBuf,
    lock: Mutex<()>,
}

impl Regenerator {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// One full regeneration: build everything, then write everything.
    pub fn run(
        &self,
        corpus: &Corpus,
        species: &dyn SpeciesLocalizer,
    ) -> Result<GeneratedArtifacts, PipelineError> {
        let _guard = self
            .lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let artifacts = regenerate(corpus, species)?;
        self.write(&artifacts)?;
        Ok(artifacts)
    }

    fn write(&self, artifacts: &GeneratedArtifacts) -> Result<(), PipelineError> {
        let documents = [
            ("card-relations.json", render_json("card-relations.json", &artifacts.card_relations)?),
            ("targetables.json", render_json("targetables.json", &artifacts.targetables)?),
            (
                "pokemon-translations.json",
                render_json("pokemon-translations.json", &artifacts.name_translations)?,
            ),
            ("traits.json", render_json("traits.json", &artifacts.traits)?),
        ];
        fs::create_dir_all(&self.out_dir).map_err(|source| PipelineError::Write {
            path: self.out_dir.clone(),
            source,
        })?;

        // Stage next to the final paths, then rename the whole set. A failed
        // write never leaves a mixed old/new artifact set behind.
        let mut staged = Vec::with_capacity(documents.len());
        for (file_name, text) in &documents {
            let tmp = self.out_dir.join(format!("{file_name}.tmp"));
            if let Err(source) = fs::write(&tmp, text) {
                for tmp in &staged {
                    let _ = fs::remove_file(tmp);
                }
                return Err(PipelineError::Write { path: tmp, source });
            }
            staged.push(tmp);
        }
        for (tmp, (file_name, _)) in staged.iter().zip(&documents) {
            let path = self.out_dir.join(file_name);
            fs::rename(tmp, &path).map_err(|source| PipelineError::Write { path, source })?;
        }
        log::info!(
            "wrote generated documents to {} ({} traits translated, {} need manual work)",
            self.out_dir.display(),
            artifacts.report.translated.len(),
            artifacts.report.needs_manual.len()
        );
        Ok(())
    }
}

fn render_json<T: Serialize>(artifact: &'static str, value: &T) -> Result<String, PipelineError> {
    let mut text =
        serde_json::to_string_pretty(value).map_err(|source| PipelineError::Serialize {
            artifact,
            source,
        })?;
    text.push('\n');
    Ok(text)
}
