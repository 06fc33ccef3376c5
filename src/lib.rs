//! jobhunt - five-step LLM pipeline for job applications
//!
//! Given a job description, a candidate profile and a company name, the
//! pipeline runs five text-generation steps in a fixed order and
//! concatenates their outputs into one report:
//!
//! 1. `extract_skills`: requirements pulled from the job description
//! 2. `analyze_skill_gap`: requirements vs. the candidate profile
//! 3. `research_company`: facts about the target company
//! 4. `generate_cover_letter`: tailored letter from everything above
//! 5. `generate_interview_prep`: role-specific cheat sheet
//!
//! Execution is strictly sequential; each step's prompt embeds the declared
//! prior results. The first failure aborts the run with no partial report.
//!
//! # Modules
//!
//! - `adapters`: completion backends (OpenAI-compatible HTTP)
//! - `config`: credential, API base and per-step model settings
//! - `domain`: inputs, step results, context, report
//! - `pipeline`: the step definitions and the sequential runner
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Run the pipeline (job description on stdin)
//! jobhunt run --company Acme --profile profile.txt < posting.txt
//!
//! # Inspect the step table
//! jobhunt steps
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod pipeline;

// Re-export main types at crate root for convenience
pub use adapters::{CompletionBackend, CompletionRequest, OpenAiBackend, ServiceError};
pub use config::Settings;
pub use domain::{ApplicationInput, PipelineContext, Report, StepId, StepResult};
pub use pipeline::{PipelineError, PipelineStep, Runner, COVER_LETTER_SALUTATION};

/// One-call entry point: run the full pipeline against the OpenAI backend
/// and return the rendered report text.
pub async fn run_application(
    job_description: impl Into<String>,
    candidate_profile: impl Into<String>,
    company_name: impl Into<String>,
    settings: Settings,
) -> Result<String, PipelineError> {
    let input = ApplicationInput::new(job_description, candidate_profile, company_name);
    let backend = OpenAiBackend::from_settings(&settings);
    let report = Runner::new(backend, settings).run(&input).await?;
    Ok(report.render())
}
