//! Sequential pipeline execution.
//!
//! The runner walks the fixed step list in order, threading each result into
//! the shared context. The first failure aborts the run: later steps never
//! execute and already-computed results are discarded with the context.

use std::time::Instant;

use thiserror::Error;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::adapters::{CompletionBackend, ServiceError};
use crate::config::Settings;
use crate::domain::{
    ApplicationInput, ContextError, InputError, PipelineContext, Report, StepId, StepResult,
};

use super::step::PipelineStep;
use super::steps::default_steps;

/// Failure modes of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An input field failed pre-flight validation; no service call was made
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The completion service failed on a step; the run was aborted there
    #[error("step '{step}' failed: {source}")]
    ExternalService {
        step: StepId,
        #[source]
        source: ServiceError,
    },

    /// The fixed step order was violated (a bug, not a user error)
    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Executes the five steps in order against a completion backend.
pub struct Runner<B> {
    backend: B,
    settings: Settings,
    steps: Vec<Box<dyn PipelineStep>>,
}

impl<B: CompletionBackend> Runner<B> {
    /// Create a runner with the standard five-step pipeline.
    pub fn new(backend: B, settings: Settings) -> Self {
        Self {
            backend,
            settings,
            steps: default_steps(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run the pipeline once and assemble the report.
    ///
    /// Strictly sequential: step N+1 starts only after step N's result is in
    /// the context. No retry and no partial report; see the module docs.
    #[instrument(skip_all, fields(company = %input.company_name))]
    pub async fn run(&self, input: &ApplicationInput) -> Result<Report, PipelineError> {
        input.validate()?;

        let run_id = Uuid::new_v4();
        let total = self.steps.len();
        info!(%run_id, backend = self.backend.name(), total, "starting pipeline run");

        let mut context = PipelineContext::new();
        let run_start = Instant::now();

        for (idx, step) in self.steps.iter().enumerate() {
            let id = step.id();
            info!(step = %id, position = idx + 1, total, "executing step");

            let request = step.request(input, &context, &self.settings)?;
            let step_start = Instant::now();

            let content = self
                .backend
                .complete(&request)
                .await
                .map_err(|source| {
                    error!(step = %id, error = %source, "step failed, aborting run");
                    PipelineError::ExternalService { step: id, source }
                })?;

            info!(
                step = %id,
                duration_ms = step_start.elapsed().as_millis() as u64,
                output_bytes = content.len(),
                "step completed"
            );

            context.insert(StepResult::new(id, content))?;
        }

        info!(
            %run_id,
            duration_ms = run_start.elapsed().as_millis() as u64,
            "pipeline run completed"
        );

        Ok(Report::from_context(run_id, context))
    }
}
