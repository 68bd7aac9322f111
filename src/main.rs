//! ATS checker: resume and job description matching CLI

use ats_checker::cli::{self, Cli, Commands, ConfigAction};
use ats_checker::config::Config;
use ats_checker::enrichment::{DisabledProvider, EnrichmentProvider, OllamaProvider};
use ats_checker::error::{AtsCheckerError, Result};
use ats_checker::input::manager::InputManager;
use ats_checker::output::ReportGenerator;
use ats_checker::processing::analyzer::AnalysisEngine;
use clap::Parser;
use log::{error, info, warn};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Last line of defense: report a failure without crashing.
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            format,
            save,
            no_enrichment,
            nlp,
            detailed,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| AtsCheckerError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| AtsCheckerError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format =
                cli::parse_output_format(&format).map_err(AtsCheckerError::InvalidInput)?;

            if let Some(mode) = nlp {
                config.nlp.mode = cli::parse_nlp_mode(&mode).map_err(AtsCheckerError::InvalidInput)?;
            }

            info!("Extracting text from input documents");
            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_text = input_manager.extract_text(&job).await?;

            if job_text.trim().is_empty() {
                return Err(AtsCheckerError::MissingInput(
                    "job description is empty".to_string(),
                ));
            }

            let enrichment: Box<dyn EnrichmentProvider> =
                if no_enrichment || !config.enrichment.enabled {
                    Box::new(DisabledProvider)
                } else {
                    match OllamaProvider::connect(&config.enrichment).await {
                        Ok(provider) => Box::new(provider),
                        Err(e) => {
                            warn!("enrichment provider setup failed: {}", e);
                            Box::new(DisabledProvider)
                        }
                    }
                };

            let engine = AnalysisEngine::new(&config, enrichment)?;
            info!("Language backend: {}", engine.backend_name());

            let report = engine.analyze(&resume_text, &job_text).await?;
            let rendered = ReportGenerator::render(&report, output_format, detailed)?;

            match save {
                Some(path) => {
                    std::fs::write(&path, &rendered)?;
                    info!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Scoring weights:");
                println!("  skills:     {:.2}", config.scoring.skills_weight);
                println!("  experience: {:.2}", config.scoring.experience_weight);
                println!("  education:  {:.2}", config.scoring.education_weight);
                println!("  keywords:   {:.2}", config.scoring.keyword_weight);
                println!(
                    "Rating thresholds: {:.0}/{:.0}/{:.0}",
                    config.scoring.excellent_threshold,
                    config.scoring.good_threshold,
                    config.scoring.fair_threshold
                );
                println!("Max keywords: {}", config.keywords.max_keywords);
                println!("NLP mode: {:?}", config.nlp.mode);
                println!("Embedding model dir: {}", config.nlp.model_dir.display());
                println!(
                    "Enrichment: {} ({}, model {}, timeout {}s)",
                    if config.enrichment.enabled {
                        "enabled"
                    } else {
                        "disabled"
                    },
                    config.enrichment.base_url,
                    config.enrichment.model,
                    config.enrichment.timeout_secs
                );
            }

            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults.");
            }
        },
    }

    Ok(())
}
