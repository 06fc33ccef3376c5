//! Step identifiers and the accumulating pipeline context.
//!
//! The context is the only state shared between steps: an append-only
//! mapping from step id to the result that step produced. It is owned by a
//! single run and discarded once the report is rendered.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    /// Extract required/bonus skills and responsibilities from the job description
    ExtractSkills,

    /// Compare extracted skills against the candidate profile
    AnalyzeSkillGap,

    /// Research the target company
    ResearchCompany,

    /// Write a tailored cover letter from everything gathered so far
    GenerateCoverLetter,

    /// Build an interview prep cheat sheet
    GenerateInterviewPrep,
}

impl StepId {
    /// All steps in execution order.
    pub const ALL: [StepId; 5] = [
        StepId::ExtractSkills,
        StepId::AnalyzeSkillGap,
        StepId::ResearchCompany,
        StepId::GenerateCoverLetter,
        StepId::GenerateInterviewPrep,
    ];

    /// Stable snake_case name (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::ExtractSkills => "extract_skills",
            StepId::AnalyzeSkillGap => "analyze_skill_gap",
            StepId::ResearchCompany => "research_company",
            StepId::GenerateCoverLetter => "generate_cover_letter",
            StepId::GenerateInterviewPrep => "generate_interview_prep",
        }
    }

    /// Section title used in the rendered report.
    pub fn title(&self) -> &'static str {
        match self {
            StepId::ExtractSkills => "Skill Extraction",
            StepId::AnalyzeSkillGap => "Skill Gap Analysis",
            StepId::ResearchCompany => "Company Research",
            StepId::GenerateCoverLetter => "Cover Letter",
            StepId::GenerateInterviewPrep => "Interview Prep",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The output of one completed step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// Step that produced this result
    pub step: StepId,

    /// Text returned by the completion service
    pub content: String,

    /// When the result was produced
    pub created_at: DateTime<Utc>,
}

impl StepResult {
    /// Create a result stamped with the current time.
    pub fn new(step: StepId, content: String) -> Self {
        Self {
            step,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Violations of the context's append-only contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// A step result was inserted twice within one run
    #[error("step '{0}' already has a result in this run")]
    Duplicate(StepId),

    /// A step read a context entry that has not been produced yet
    #[error("step '{step}' requires the result of '{needs}', which is not in the context")]
    Missing { step: StepId, needs: StepId },
}

/// Append-only mapping from step id to result, in completion order.
///
/// Seeded empty at the start of a run; grows by one entry per completed step.
/// Entries are never replaced or removed.
#[derive(Debug, Default)]
pub struct PipelineContext {
    // Five entries at most; a Vec keeps insertion order and stays cheap.
    results: Vec<StepResult>,
}

impl PipelineContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step result. Rejects duplicates: within one run a step's
    /// result is computed exactly once.
    pub fn insert(&mut self, result: StepResult) -> Result<(), ContextError> {
        if self.contains(result.step) {
            return Err(ContextError::Duplicate(result.step));
        }
        self.results.push(result);
        Ok(())
    }

    pub fn contains(&self, step: StepId) -> bool {
        self.results.iter().any(|r| r.step == step)
    }

    pub fn get(&self, step: StepId) -> Option<&StepResult> {
        self.results.iter().find(|r| r.step == step)
    }

    /// Result text for a step, if present.
    pub fn content(&self, step: StepId) -> Option<&str> {
        self.get(step).map(|r| r.content.as_str())
    }

    /// Result text for a declared dependency of `step`. Fails if the
    /// dependency has not run yet, which would mean the fixed step order
    /// was violated.
    pub fn require(&self, step: StepId, needs: StepId) -> Result<&str, ContextError> {
        self.content(needs)
            .ok_or(ContextError::Missing { step, needs })
    }

    /// Results in completion order.
    pub fn iter(&self) -> impl Iterator<Item = &StepResult> {
        self.results.iter()
    }

    /// Consume the context, yielding results in completion order.
    pub fn into_results(self) -> Vec<StepResult> {
        self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
