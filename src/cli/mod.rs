//! Command-line interface for jobhunt.
//!
//! Provides commands for running the pipeline, listing its steps, and
//! inspecting the resolved configuration.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::OpenAiBackend;
use crate::config::Settings;
use crate::domain::ApplicationInput;
use crate::pipeline::{default_steps, Runner};

/// jobhunt - five-step LLM pipeline for job applications
#[derive(Parser, Debug)]
#[command(name = "jobhunt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline and print the report
    Run {
        /// Target company name
        #[arg(short, long)]
        company: String,

        /// File containing the job description (stdin if not provided)
        #[arg(short, long)]
        job_description: Option<PathBuf>,

        /// File containing the candidate profile
        #[arg(short, long)]
        profile: PathBuf,

        /// API credential (falls back to the environment)
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the pipeline steps and their declared inputs
    Steps,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Run {
                company,
                job_description,
                profile,
                api_key,
                output,
            } => run_pipeline(company, job_description, profile, api_key, output).await,
            Commands::Steps => list_steps(),
            Commands::Config => show_config(),
        }
    }
}

/// Run the full pipeline from CLI arguments
async fn run_pipeline(
    company: String,
    job_description: Option<PathBuf>,
    profile: PathBuf,
    api_key: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let settings = Settings::resolve(api_key)?;

    // Refuse to start without a credential or with any empty field; nothing
    // is sent to the service until all four check out.
    if !settings.has_api_key() {
        anyhow::bail!("No API key provided. Set OPENAI_API_KEY or pass --api-key");
    }

    let job_description = match job_description {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read job description: {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read job description from stdin")?;
            buffer
        }
    };

    let candidate_profile = std::fs::read_to_string(&profile)
        .with_context(|| format!("Failed to read candidate profile: {}", profile.display()))?;

    let input = ApplicationInput::new(job_description, candidate_profile, company);
    input.validate()?;

    eprintln!("jobhunt — running {} steps", default_steps().len());
    eprintln!("{}", "=".repeat(50));

    let backend = OpenAiBackend::from_settings(&settings);
    let runner = Runner::new(backend, settings);
    let report = runner.run(&input).await?;

    eprintln!("{}", "=".repeat(50));
    eprintln!("[run {} complete]", report.run_id);

    let rendered = report.render();
    match output {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Print the step table with models, temperatures and declared reads
fn list_steps() -> Result<()> {
    let settings = Settings::resolve(None)?;

    for (idx, step) in default_steps().iter().enumerate() {
        let id = step.id();
        let reads = if step.reads().is_empty() {
            "-".to_string()
        } else {
            step.reads()
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        println!(
            "{}. {:<24} model: {:<14} temp: {:<4} reads: {}",
            idx + 1,
            id.as_str(),
            settings.model_for(id),
            settings.temperature_for(id),
            reads
        );
    }

    Ok(())
}

/// Show the resolved configuration
fn show_config() -> Result<()> {
    let settings = Settings::resolve(None)?;

    println!("API base: {}", settings.api_base);
    println!(
        "API key: {}",
        if settings.has_api_key() { "set" } else { "missing" }
    );
    match &settings.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: none found"),
    }

    println!("\nPer-step parameters:");
    for step in crate::domain::StepId::ALL {
        println!(
            "  {:<24} {} @ {}",
            step.as_str(),
            settings.model_for(step),
            settings.temperature_for(step)
        );
    }

    Ok(())
}
