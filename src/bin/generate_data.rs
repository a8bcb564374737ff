use std::env;
use std::path::PathBuf;

use pocketdex::pipeline::Regenerator;
use pocketdex::species::SpeciesTable;
use pocketdex::Corpus;

fn main() -> Result<(), String> {
    env_logger::init();

    let mut data_dir = PathBuf::from("data/manual");
    let mut out_dir = PathBuf::from("data/generated");

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" => {
                data_dir = args
                    .next()
                    .map(PathBuf::from)
                    .ok_or_else(|| "--data requires a directory".to_string())?;
            }
            "--out" => {
                out_dir = args
                    .next()
                    .map(PathBuf::from)
                    .ok_or_else(|| "--out requires a directory".to_string())?;
            }
            _ => {
                return Err(format!(
                    "unknown argument '{arg}'. expected --data <dir> and/or --out <dir>"
                ));
            }
        }
    }

    let corpus = Corpus::load(&data_dir).map_err(|err| err.to_string())?;
    let species =
        SpeciesTable::load(&data_dir.join("species-names.json")).map_err(|err| err.to_string())?;

    let regenerator = Regenerator::new(out_dir);
    let artifacts = regenerator
        .run(&corpus, &species)
        .map_err(|err| err.to_string())?;

    println!(
        "Wrote {} relation buckets, {} targetable entries, {} species translations",
        artifacts.card_relations.len(),
        artifacts.targetables.len(),
        artifacts.name_translations.len()
    );
    println!(
        "Traits: {} auto-translated, {} left for manual completion",
        artifacts.report.translated.len(),
        artifacts.report.needs_manual.len()
    );

    Ok(())
}
