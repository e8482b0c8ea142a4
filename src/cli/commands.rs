use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};

use crate::config::HistoryConfig;
use crate::history::History;
use crate::repl::run_prompt;
use crate::utils::terminal::display_line;
use crate::utils::{default_config_path, default_history_path, format_path_with_tilde};

#[derive(Parser)]
#[command(name = "line-history")]
#[command(version = "0.1.0")]
#[command(about = "Inspect and maintain line-editor history files", long_about = None)]
pub struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// History file, overriding the config
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about the history
    Stats,
    /// Print history entries, oldest first
    List {
        /// Only the newest N entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Add lines to the history
    Add {
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Merge another history file into this one
    Merge {
        source: PathBuf,
        /// Skip lines already present
        #[arg(long)]
        dedup: bool,
    },
    /// Deduplicate the history file and cut it to `file_size` entries
    Trim,
    /// Delete the history file
    Purge,
    /// Interactive prompt for browsing and adding history
    Shell,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = resolve_config(cli.config.as_deref(), cli.file.as_deref())?;
    let mut history = History::open(config).context("Failed to load history")?;

    match command {
        Commands::Stats => show_stats(&history),
        Commands::List { limit, json } => list_entries(&history, *limit, *json)?,
        Commands::Add { lines } => {
            let added = lines.iter().filter(|line| history.add(line)).count();
            history.save().context("Failed to save history")?;
            println!("Added {} of {} lines", added, lines.len());
        }
        Commands::Merge { source, dedup } => {
            let exists = source
                .try_exists()
                .with_context(|| format!("Failed to access {}", source.display()))?;
            ensure!(exists, "Merge source {} does not exist", source.display());
            history
                .read(Some(source.as_path()), *dedup)
                .with_context(|| format!("Failed to merge {}", source.display()))?;
            history.save().context("Failed to save history")?;
            println!("History now has {} entries", history.len());
        }
        Commands::Trim => {
            let max = history.config().file_size;
            history.trim(None, max).context("Failed to trim history")?;
            println!("Trimmed history to {} entries", history.file_record(None).entries_in_file);
        }
        Commands::Purge => {
            history.purge().context("Failed to purge history")?;
            println!("History purged");
        }
        Commands::Shell => run_prompt(&mut history)?,
    }

    Ok(())
}

/// Config file, then `--file`, then the default history location
fn resolve_config(config_path: Option<&Path>, file: Option<&Path>) -> Result<HistoryConfig> {
    let config = match config_path {
        Some(path) => HistoryConfig::load(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => match default_config_path() {
            Some(path) => HistoryConfig::load_or_default(&path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => HistoryConfig::default(),
        },
    };

    match (file, &config.file) {
        (Some(file), _) => Ok(config.with_file(file)),
        (None, Some(_)) => Ok(config),
        (None, None) => Ok(config.with_file(default_history_path()?)),
    }
}

fn show_stats(history: &History) {
    println!("Line History Statistics");
    println!("=======================");
    println!("Total entries: {}", history.len());
    if let Some(last) = history.last() {
        println!("Index range: {}..={}", history.first(), last);
    }
    if let Some(path) = history.path() {
        println!("History file: {}", format_path_with_tilde(path));
    }

    if let Some(oldest) = history.entries().next() {
        println!("Oldest entry: {}", oldest.timestamp().format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(newest) = history.entries().next_back() {
        println!("Newest entry: {}", newest.timestamp().format("%Y-%m-%d %H:%M:%S"));
    }
}

fn list_entries(history: &History, limit: Option<usize>, json: bool) -> Result<()> {
    let skip = limit.map_or(0, |limit| history.len().saturating_sub(limit));
    let entries: Vec<_> = history.entries().skip(skip).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in entries {
        println!(
            "{:>5}  {}  {}",
            entry.index(),
            entry.timestamp().format("%Y-%m-%d %H:%M:%S"),
            display_line(entry.line())
        );
    }
    Ok(())
}
