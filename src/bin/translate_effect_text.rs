use std::env;
use std::io::{self, Read};
use std::path::PathBuf;

use pocketdex::extract::{FragmentExtractor, is_fully_translated, join_fragments};
use pocketdex::names::NameResolver;
use pocketdex::patterns::{PatternTable, RuleContext};
use pocketdex::species::{SpeciesTable, build_name_translations};
use pocketdex::{Corpus, Language};

fn read_input_text(text_arg: Option<String>) -> Result<String, String> {
    if let Some(text) = text_arg {
        return Ok(text);
    }
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|err| format!("failed to read stdin: {err}"))?;
    if input.trim().is_empty() {
        return Err("missing effect text (pass --text or stdin)".to_string());
    }
    Ok(input.trim_end_matches('\n').to_string())
}

fn main() -> Result<(), String> {
    env_logger::init();

    let mut data_dir = PathBuf::from("data/manual");
    let mut text_arg: Option<String> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" => {
                data_dir = args
                    .next()
                    .map(PathBuf::from)
                    .ok_or_else(|| "--data requires a directory".to_string())?;
            }
            "--text" => {
                text_arg = Some(
                    args.next()
                        .ok_or_else(|| "--text requires a value".to_string())?,
                );
            }
            _ => {
                return Err(format!(
                    "unknown argument '{arg}'. expected --data <dir> and/or --text <value>"
                ));
            }
        }
    }

    let text = read_input_text(text_arg)?;
    let corpus = Corpus::load(&data_dir).map_err(|err| err.to_string())?;
    let species =
        SpeciesTable::load(&data_dir.join("species-names.json")).map_err(|err| err.to_string())?;
    let translations =
        build_name_translations(&corpus.cards, &species).map_err(|err| err.to_string())?;
    let resolver = NameResolver::new(&corpus.cards, &translations, Language::En);
    let table = PatternTable::standard().map_err(|err| err.to_string())?;

    let extractor = FragmentExtractor::new(
        &table,
        RuleContext {
            resolver: &resolver,
            types: &corpus.types,
        },
    );
    let fragments = extractor
        .extract(&text)
        .map_err(|err| format!("extraction failed: {err}"))?;

    println!("Fragments");
    for fragment in &fragments {
        if !fragment.leading_text.is_empty() {
            println!("- [untranslated] {:?}", fragment.leading_text);
        }
        if !fragment.source.is_empty() {
            println!("- {:?} => {:?}", fragment.source, fragment.converted);
        }
    }
    println!();
    println!("Joined: {}", join_fragments(&fragments));
    println!(
        "Coverage: {}",
        if is_fully_translated(&fragments) {
            "full"
        } else {
            "partial (needs manual completion)"
        }
    );

    Ok(())
}
