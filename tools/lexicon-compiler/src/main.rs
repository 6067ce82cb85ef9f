use clap::Parser;
use std::fs;
use std::path::PathBuf;

use glossa_protocol::{Language, Lexicon, SharedTables};
use rkyv::ser::{serializers::AllocSerializer, Serializer};

#[derive(Parser)]
#[command(author, version, about = "Compiles JSON lexicon dumps to rkyv binaries")]
struct Cli {
    /// Language of the lexicon, or "common" for the shared tables
    #[arg(short, long)]
    language: String,

    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    println!("📖 Reading JSON from {:?}...", cli.input);
    let input_data = fs::read_to_string(&cli.input)?;

    let bytes = if cli.language == "common" {
        let tables: SharedTables = serde_json::from_str(&input_data)?;
        println!(
            "⚙️  Compiling shared tables ({} relations, {} semfields)...",
            tables.relations().len(),
            tables.hierarchy().len()
        );
        compile(&tables)
    } else {
        let language: Language = cli.language.parse()?;
        let lexicon: Lexicon = serde_json::from_str(&input_data)?;
        println!(
            "⚙️  Compiling the {} lexicon ({} synsets, {} morphology rows)...",
            language,
            lexicon.synsets().len(),
            lexicon.morphos().len()
        );
        compile(&lexicon)
    };

    fs::write(&cli.output, bytes)?;
    println!("✅ Success! Binary written to {:?}", cli.output);
    Ok(())
}

fn compile<T>(value: &T) -> rkyv::AlignedVec
where
    T: rkyv::Serialize<AllocSerializer<256>>,
{
    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(value)
        .expect("Failed to rkyv serialize");
    serializer.into_serializer().into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_store::{ArchiveStore, Store};

    #[test]
    fn test_compiled_json_loads_back() {
        let json = r#"{
            "synset": [
                {
                    "id": "n#00000001",
                    "word": "entity",
                    "phrase": null,
                    "gloss": "that which exists"
                }
            ],
            "lemma": null,
            "index": null,
            "morpho": null,
            "relation": [
                {
                    "type": "@",
                    "id_source": "n#00000002",
                    "id_target": "n#00000001",
                    "w_source": null,
                    "w_target": null,
                    "status": null
                }
            ],
            "synonyms": null,
            "semfield": null
        }"#;
        let lexicon: Lexicon = serde_json::from_str(json).unwrap();
        let bytes = compile(&lexicon);

        let mut store = ArchiveStore::new();
        store
            .load_lexicon(Language::English, bytes.as_slice())
            .unwrap();
        let loaded = store.lexicon(Language::English).unwrap();
        assert_eq!(loaded.synsets()[0].gloss, "that which exists");
        assert_eq!(loaded.relations()[0].ty, "@");
    }
}
