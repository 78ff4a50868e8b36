//! Command-line interface for akshara-rs
//!
//! Usage:
//!   akshara [OPTIONS] <TEXT>
//!   echo "ನಮಸ್ಕಾರ" | akshara
//!
//! Options:
//!   -s, --segments        Print one akshara per line
//!   -j, --json            Output dictionary entries as JSON
//!   -g, --glossary <FILE> Build a dictionary from a word<TAB>gloss file
//!   -c, --config <FILE>   Romanizer configuration (TOML)
//!   -h, --help            Show help

use akshara_rs::sink::write_entries;
use akshara_rs::{
    kannada_words, DictionaryEntryBuilder, GlossList, JsonSink, Romanizer, RomanizerConfig,
    WordEntry, DEFAULT_GLOSS,
};
use std::env;
use std::io::{self, BufRead};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn print_help() {
    eprintln!(
        r#"akshara - Kannada akshara segmentation and romanization

USAGE:
    akshara [OPTIONS] [TEXT]
    echo "ನಮಸ್ಕಾರ" | akshara

OPTIONS:
    -s, --segments        Print one akshara per line
    -j, --json            Output dictionary entries as JSON
    -g, --glossary <FILE> Build a dictionary from a word<TAB>gloss file
    -c, --config <FILE>   Romanizer configuration (TOML)
    -h, --help            Show this help message

EXAMPLES:
    akshara "ನಮಸ್ಕಾರ"
    akshara -s "ಜಗತ್ತು"
    akshara -j "ಕನ್ನಡ ಒಂದು ಭಾಷೆ"
    akshara -g words.tsv > dictionary.json

Set RUST_LOG=debug for diagnostics.
"#
    );
}

/// Unwrap a Result or print the error and exit.
macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut segments_mode = false;
    let mut json_output = false;
    let mut glossary_path: Option<String> = None;
    let mut config_path: Option<String> = None;
    let mut text: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-s" | "--segments" => {
                segments_mode = true;
            }
            "-j" | "--json" => {
                json_output = true;
            }
            "-g" | "--glossary" => {
                i += 1;
                if i < args.len() {
                    glossary_path = Some(args[i].clone());
                } else {
                    eprintln!("Error: --glossary requires a file path");
                    process::exit(1);
                }
            }
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(args[i].clone());
                } else {
                    eprintln!("Error: --config requires a file path");
                    process::exit(1);
                }
            }
            arg if !arg.starts_with('-') => {
                text = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => die!(
            RomanizerConfig::load(Path::new(&path)),
            "Error loading config: {}"
        ),
        None => RomanizerConfig::default(),
    };
    let romanizer = die!(Romanizer::from_config(&config), "Error building romanizer: {}");
    for warning in romanizer.table().warnings() {
        tracing::warn!(?warning, "lookup table");
    }
    let builder = DictionaryEntryBuilder::with_romanizer(romanizer);

    // Dictionary mode: the glossary supplies both words and glosses
    if let Some(path) = glossary_path {
        let list = die!(GlossList::load(Path::new(&path)), "Error reading glossary: {}");
        let entries: Vec<WordEntry> = builder
            .build_batch(list.pairs())
            .into_iter()
            .zip(list.pairs())
            .filter_map(|(result, (word, _))| match result {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(word = %word, error = %e, "skipping entry");
                    None
                }
            })
            .collect();
        write_json(&entries);
        return;
    }

    // Read from stdin if no text provided
    let input_text = if let Some(t) = text {
        t
    } else {
        let stdin = io::stdin();
        let mut lines = Vec::new();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => lines.push(l),
                Err(e) => {
                    eprintln!("Error reading stdin: {}", e);
                    process::exit(1);
                }
            }
        }
        lines.join("\n")
    };

    if input_text.is_empty() {
        eprintln!("Error: No input text provided");
        print_help();
        process::exit(1);
    }

    if json_output {
        let entries: Vec<WordEntry> = kannada_words(&input_text)
            .into_iter()
            .filter_map(|word| builder.build(word, DEFAULT_GLOSS).ok())
            .collect();
        write_json(&entries);
    } else if segments_mode {
        for unit in builder.romanizer().segments_of(&input_text) {
            println!(
                "{}\t{}\t{}..{}\t{}",
                unit.text,
                unit.roman,
                unit.start,
                unit.end,
                unit.category.as_str()
            );
        }
    } else {
        println!("{}", builder.romanizer().romanize(&input_text));
    }
}

fn write_json(entries: &[WordEntry]) {
    let stdout = io::stdout();
    let mut sink = JsonSink::new(stdout.lock());
    die!(write_entries(&mut sink, entries), "Error writing JSON: {}");
}
