//! User-supplied application inputs and pre-flight validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of the job title derived from the posting's first line.
const MAX_JOB_TITLE_LEN: usize = 120;

/// The three free-text inputs to a pipeline run. Immutable once entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationInput {
    /// Full job posting text
    pub job_description: String,

    /// Candidate skills and experience, free text
    pub candidate_profile: String,

    /// Target company name
    pub company_name: String,
}

/// Pre-flight input rejection, raised before any completion call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),
}

impl ApplicationInput {
    pub fn new(
        job_description: impl Into<String>,
        candidate_profile: impl Into<String>,
        company_name: impl Into<String>,
    ) -> Self {
        Self {
            job_description: job_description.into(),
            candidate_profile: candidate_profile.into(),
            company_name: company_name.into(),
        }
    }

    /// All three fields must be non-empty (ignoring whitespace).
    pub fn validate(&self) -> Result<(), InputError> {
        if self.job_description.trim().is_empty() {
            return Err(InputError::EmptyField("job_description"));
        }
        if self.candidate_profile.trim().is_empty() {
            return Err(InputError::EmptyField("candidate_profile"));
        }
        if self.company_name.trim().is_empty() {
            return Err(InputError::EmptyField("company_name"));
        }
        Ok(())
    }

    /// Job title derived from the posting: its first non-empty line, which is
    /// how pasted postings lead in practice. Capped so a wall of text never
    /// ends up in a prompt header.
    pub fn job_title(&self) -> &str {
        let line = self
            .job_description
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("unspecified");

        match line.char_indices().nth(MAX_JOB_TITLE_LEN) {
            Some((idx, _)) => &line[..idx],
            None => line,
        }
    }
}
