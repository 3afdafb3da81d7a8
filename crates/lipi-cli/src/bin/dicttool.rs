use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use lipi_core::normalizer::normalize;
use lipi_core::Transliterator;

#[derive(Parser)]
#[command(name = "dicttool", about = "Dictionary maintenance for the lipi engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract words from a text file and add phonetic renderings to dictionary.json
    BulkImport {
        /// Directory holding the engine data files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Plain-text file to harvest words from
        words_file: PathBuf,
    },

    /// Show how a single word resolves through the pipeline
    Parse {
        /// Directory holding the engine data files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Word to trace
        word: String,
    },
}

fn load_engine(data_dir: &Path) -> Transliterator {
    Transliterator::new(data_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load engine data from {}: {}", data_dir.display(), e);
        process::exit(1);
    })
}

/// Latin letter runs of length two or more, lowercased and deduplicated.
fn harvest_words(text: &str) -> BTreeSet<String> {
    let mut words = BTreeSet::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            current.push(c.to_ascii_lowercase());
        } else if !current.is_empty() {
            if current.chars().count() > 1 {
                words.insert(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
    }
    if current.chars().count() > 1 {
        words.insert(current);
    }
    words
}

fn bulk_import(data_dir: &Path, words_file: &Path) {
    let engine = load_engine(data_dir);

    let text = fs::read_to_string(words_file).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", words_file.display(), e);
        process::exit(1);
    });

    let dict_path = data_dir.join("dictionary.json");
    let mut entries: BTreeMap<String, String> = match fs::read_to_string(&dict_path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            eprintln!("Failed to parse {}: {}", dict_path.display(), e);
            process::exit(1);
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(e) => {
            eprintln!("Failed to read {}: {}", dict_path.display(), e);
            process::exit(1);
        }
    };

    let words = harvest_words(&text);
    let total = words.len();
    let mut added = 0usize;
    let mut skipped = 0usize;

    for word in words {
        if entries.contains_key(&word) {
            skipped += 1;
            continue;
        }
        let rendering = engine.parser().parse(&normalize(&word));
        entries.insert(word, rendering);
        added += 1;
    }

    let json = serde_json::to_string_pretty(&entries).unwrap_or_else(|e| {
        eprintln!("Failed to serialize dictionary: {}", e);
        process::exit(1);
    });
    fs::write(&dict_path, json).unwrap_or_else(|e| {
        eprintln!("Failed to write {}: {}", dict_path.display(), e);
        process::exit(1);
    });

    eprintln!(
        "Imported {} words ({} added, {} already present) -> {}",
        total,
        added,
        skipped,
        dict_path.display()
    );
}

fn parse_word(data_dir: &Path, word: &str) {
    let engine = load_engine(data_dir);
    let explanation = engine.explain_word(word);

    println!("input:      {}", word);
    println!("normalized: {}", explanation.normalized);
    println!("resolved:   {:?}", explanation.resolution);
    println!("output:     {}", explanation.output);
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::BulkImport {
            data_dir,
            words_file,
        } => bulk_import(&data_dir, &words_file),
        Command::Parse { data_dir, word } => parse_word(&data_dir, &word),
    }
}
