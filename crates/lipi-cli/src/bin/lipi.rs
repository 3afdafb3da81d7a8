use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use lipi_core::Transliterator;

#[derive(Parser)]
#[command(name = "lipi", about = "Banglish to Bengali transliteration")]
struct Cli {
    /// Directory holding mapping.json, dictionary.json, and patterns.json
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Transliterate this text and exit instead of reading stdin
    #[arg(long)]
    text: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let engine = Transliterator::new(&cli.data_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load engine data from {}: {}", cli.data_dir.display(), e);
        process::exit(1);
    });

    if let Some(text) = cli.text {
        println!("{}", engine.transliterate(&text));
        return;
    }

    // Interactive loop: one line in, one line out.
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        if stdout.flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line == "exit" || line == "quit" {
            break;
        }
        println!("{}", engine.transliterate(line));
    }
}
