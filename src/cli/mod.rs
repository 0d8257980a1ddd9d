//! CLI command definitions and handlers

use crate::config::{self, Configuration};
use crate::formula::Score;
use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Diffsize - Estimates how difficult a diff is to review
#[derive(Parser, Debug)]
#[command(name = "diffsize")]
#[command(
    version,
    about = "Estimate how difficult a diff is to review",
    long_about = "Diffsize scores a diff with a configurable formula over features of the \
change (added lines, deleted lines, comment lines, ...) and buckets the \
result into categories from extra small to extra large.",
    after_help = "\
Examples:
  git diff main | diffsize evaluate         Score a diff from stdin
  diffsize evaluate --diff change.diff      Score a saved diff
  diffsize evaluate -d change.diff -f json  JSON output for scripting
  diffsize staged .                         Score the changes staged for commit
  diffsize evaluate -c .diffsize.yaml -d change.diff   Use a custom configuration"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a diff read from a file or stdin
    Evaluate {
        /// Path to a .diff formatted file (default: stdin)
        #[arg(long, short = 'd')]
        diff: Option<PathBuf>,

        /// Path to a YAML configuration file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Score the changes staged for commit in a local repository
    Staged {
        /// Path to the repository (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Include unstaged working tree changes as well
        #[arg(long)]
        workdir: bool,

        /// Path to a YAML configuration file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Evaluate {
            diff,
            config,
            format,
        } => {
            let diff = read_diff(diff.as_deref())?;
            score(&diff, config.as_deref(), &format)
        }
        Commands::Staged {
            path,
            workdir,
            config,
            format,
        } => {
            let diff = if workdir {
                crate::git::workdir_diff(&path)?
            } else {
                crate::git::staged_diff(&path)?
            };
            score(&diff, config.as_deref(), &format)
        }
    }
}

fn read_diff(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read diff from {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read diff from stdin")?;
            Ok(buffer)
        }
    }
}

fn score(diff: &str, config_path: Option<&Path>, format: &str) -> Result<()> {
    let configuration = match config_path {
        Some(path) => config::load(path)?,
        None => Configuration::default(),
    };

    info!(bytes = diff.len(), "scoring diff");
    let score = crate::evaluate_diff(diff, configuration)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&score)?),
        _ => render_text(&score),
    }

    if score.error.is_some() {
        std::process::exit(1);
    }
    Ok(())
}

fn render_text(score: &Score) {
    if let Some(error) = &score.error {
        eprintln!(
            "{} {} (token {})",
            style("error:").red().bold(),
            error.message,
            error.token_position
        );
        return;
    }

    let Some(result) = score.result else {
        return;
    };

    println!("{} {}", style("score:").bold(), result);
    if let Some(category) = &score.category {
        println!("{} {}", style("category:").bold(), category.name);
    }
    if let Some(threshold) = score.threshold {
        if result > threshold {
            println!(
                "{} score exceeds the review threshold of {}",
                style("warning:").yellow().bold(),
                threshold
            );
        }
    }

    if !score.substitutions.is_empty() {
        println!("{}", style("substitutions:").bold());
        for (name, value) in &score.substitutions {
            println!("  {name} = {value}");
        }
    }
}
