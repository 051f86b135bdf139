//! CLI interface for the skill matcher

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-match")]
#[command(about = "Match your skills against job vacancies")]
#[command(long_about = "Compute matched and missing skills for a vacancy, score the overlap, and highlight matched skills inside the vacancy markup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one vacancy against your skills
    Analyze {
        /// Vacancy file (JSON, MD, HTML, TXT)
        #[arg(long)]
        vacancy: PathBuf,

        /// Skills file (JSON or one skill per line)
        #[arg(short, long)]
        skills: PathBuf,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Disable highlighting for this run
        #[arg(long)]
        no_highlight: bool,

        /// Use plain markers without tooltips for this run
        #[arg(long)]
        no_tooltip: bool,
    },

    /// Browse a vacancy list with match scores
    Board {
        /// JSON array of vacancies
        #[arg(long)]
        vacancies: PathBuf,

        /// Skills file (JSON or one skill per line)
        #[arg(short, long)]
        skills: PathBuf,

        /// Only show vacancies with at least one matched skill
        #[arg(long)]
        only_matched: bool,

        /// Favorite vacancy ids, comma separated
        #[arg(long, value_delimiter = ',')]
        favorites: Vec<i64>,

        /// Only show favorites
        #[arg(long)]
        only_favorites: bool,

        /// Page size (defaults to the configured value)
        #[arg(long)]
        page_size: Option<usize>,

        /// Number of pages to load
        #[arg(long, default_value = "1")]
        pages: usize,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "display.highlight_enabled")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}
