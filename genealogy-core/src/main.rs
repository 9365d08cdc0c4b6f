//! genealogy-core - command-line entry point
//!
//! `merge` (the default) reads the English and Telugu genealogy files, writes
//! the bilingual tree and prints a short report. `check`, `match` and `serve`
//! expose the contract checker, the name predicate and the stdio protocol.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use genealogy_core::config::{self, MergeConfig};
use genealogy_core::services::name_dictionary::store;
use genealogy_core::services::{encoding, json, pipeline, qa};
use genealogy_core::{names_match, protocol};

#[derive(Parser, Debug)]
#[command(name = "genealogy-core")]
#[command(about = "Merge English and Telugu genealogy trees into one bilingual tree")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    merge: MergeArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge both language trees and write the bilingual asset
    Merge(MergeArgs),

    /// Check a bilingual asset against the shape the UI expects
    Check {
        /// Bilingual genealogy JSON file
        file: PathBuf,
    },

    /// Print whether an English and a Telugu name are treated as the same person
    Match {
        english: String,
        telugu: String,

        /// English → Telugu name dictionary (JSON object)
        #[arg(long, value_name = "FILE", env = "GENEALOGY_DICTIONARY")]
        dictionary: Option<PathBuf>,
    },

    /// Answer line-delimited JSON requests on stdin/stdout
    Serve {
        /// English → Telugu name dictionary (JSON object)
        #[arg(long, value_name = "FILE", env = "GENEALOGY_DICTIONARY")]
        dictionary: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
struct MergeArgs {
    /// English genealogy root
    #[arg(long, value_name = "FILE", env = "GENEALOGY_ENGLISH", default_value = config::DEFAULT_ENGLISH_PATH)]
    english: PathBuf,

    /// Telugu genealogy root
    #[arg(long, value_name = "FILE", env = "GENEALOGY_TELUGU", default_value = config::DEFAULT_TELUGU_PATH)]
    telugu: PathBuf,

    /// Where the bilingual tree is written
    #[arg(long, value_name = "FILE", env = "GENEALOGY_OUTPUT", default_value = config::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// English → Telugu name dictionary (JSON object); bundled table if omitted
    #[arg(long, value_name = "FILE", env = "GENEALOGY_DICTIONARY")]
    dictionary: Option<PathBuf>,
}

impl From<MergeArgs> for MergeConfig {
    fn from(args: MergeArgs) -> Self {
        MergeConfig {
            english_path: args.english,
            telugu_path: args.telugu,
            output_path: args.output,
            dictionary_path: args.dictionary,
        }
    }
}

fn main() -> Result<ExitCode> {
    // stdout carries the report and the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("genealogy_core=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => run_merge(cli.merge),
        Some(Commands::Merge(args)) => run_merge(args),
        Some(Commands::Check { file }) => run_check(file),
        Some(Commands::Match {
            english,
            telugu,
            dictionary,
        }) => {
            let dict = store::load(dictionary.as_deref()).context("Failed to load name dictionary")?;
            println!("{}", names_match(&dict, &english, &telugu));
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Serve { dictionary }) => {
            let dict = store::load(dictionary.as_deref()).context("Failed to load name dictionary")?;
            info!("Serving requests on stdin");
            protocol::serve(io::stdin().lock(), io::stdout().lock(), &dict)
                .context("stdio protocol failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_merge(args: MergeArgs) -> Result<ExitCode> {
    let cfg = MergeConfig::from(args);

    let (_, report) = pipeline::run(&cfg).context("Failed to merge genealogy trees")?;

    for line in report.status_lines() {
        println!("{line}");
    }

    Ok(ExitCode::SUCCESS)
}

fn run_check(file: PathBuf) -> Result<ExitCode> {
    let decoded = encoding::read_text(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let tree: serde_json::Value = json::from_str(&decoded.text)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let issues = qa::run(&tree);
    for issue in &issues {
        println!("{} {}: {}", issue.path, issue.code, issue.message);
    }

    if issues.is_empty() {
        println!("{}: OK", file.display());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}: {} issue(s)", file.display(), issues.len());
        Ok(ExitCode::FAILURE)
    }
}
