//! skill-match: skill gap analysis and highlighting for job vacancies

use clap::Parser;
use log::{error, info};
use skill_match::cli::{self, Cli, Commands, ConfigAction};
use skill_match::config::{Config, OutputFormat};
use skill_match::error::{Result, SkillMatchError};
use skill_match::input::InputManager;
use skill_match::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use skill_match::output::report::{BoardReport, MatchReport, ReportMetadata};
use skill_match::processing::analyzer::AnalysisEngine;
use skill_match::processing::board::{BoardFilters, InMemoryVacancies, VacancyBoard};
use skill_match::processing::highlighter::Highlighter;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            vacancy,
            skills,
            output,
            save,
            no_highlight,
            no_tooltip,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let mut preferences = config.display;
            if no_highlight {
                preferences.highlight_enabled = false;
            }
            if no_tooltip {
                preferences.tooltip_enabled = false;
            }

            let mut input = InputManager::new();
            let loaded_vacancy = input.load_vacancy(&vacancy).await?;
            let skill_list = input.load_skills(&skills).await?;

            let engine = AnalysisEngine::new(&config).with_preferences(preferences);
            let analysis = engine.analyze(&loaded_vacancy, &skill_list);
            info!(
                "Analysis complete: {}% of {} skills matched",
                analysis.match_result.percent,
                analysis.match_result.total_considered()
            );

            let report = MatchReport::new(
                analysis,
                ReportMetadata::new(display_path(&vacancy), display_path(&skills)),
            );
            let generator = report_generator(&config, save.is_none());
            let rendered = generator.generate_report(&report, format)?;
            emit(&rendered, save, format, &vacancy)
        }

        Commands::Board {
            vacancies,
            skills,
            only_matched,
            favorites,
            only_favorites,
            page_size,
            pages,
            output,
            save,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let page_size = page_size.unwrap_or(config.board.page_size);
            if page_size == 0 {
                return Err(SkillMatchError::InvalidInput(
                    "Page size must be greater than zero".to_string(),
                ));
            }

            let mut input = InputManager::new();
            let source = InMemoryVacancies::new(input.load_vacancies(&vacancies).await?);
            let skill_list = input.load_skills(&skills).await?;

            let mut board = VacancyBoard::new(page_size);
            for _ in 0..pages.max(1) {
                if !board.load_next(&source) {
                    break;
                }
            }

            let filters = BoardFilters {
                only_matched,
                only_favorites,
                favorites: favorites.into_iter().collect(),
            };
            let highlighter = Highlighter::new(config.highlight.clone());
            let entries = board.entries(
                &skill_list,
                &filters,
                &highlighter,
                config.display.highlight_enabled,
            );

            let report = BoardReport {
                entries,
                pagination: board.pagination().clone(),
                total_loaded: board.vacancies().len(),
                only_matched,
                only_favorites,
                skills: skill_list,
                metadata: ReportMetadata::new(display_path(&vacancies), display_path(&skills)),
            };
            let generator = report_generator(&config, save.is_none());
            let rendered = generator.generate_board(&report, format)?;
            emit(&rendered, save, format, &vacancies)
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    SkillMatchError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("# {}", config_path.display());
                println!("{}", content);
                Ok(())
            }
            ConfigAction::Reset => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults");
                Ok(())
            }
            ConfigAction::Set { key, value } => {
                config.set(&key, &value)?;
                config.save_to(config_path)?;
                println!("Set {} = {}", key, value);
                Ok(())
            }
        },
    }
}

fn resolve_format(output: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match output {
        Some(format) => cli::parse_output_format(format).map_err(SkillMatchError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn report_generator(config: &Config, to_terminal: bool) -> ReportGenerator {
    ReportGenerator::with_options(
        config.output.color_output && to_terminal,
        true,
        true,
        true,
        &config.highlight,
    )
}

fn emit(rendered: &str, save: Option<PathBuf>, format: OutputFormat, source: &Path) -> Result<()> {
    match save {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(suggest_filename(format, &source.to_string_lossy()))
            } else {
                path
            };
            save_report_to_file(rendered, &path)?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
