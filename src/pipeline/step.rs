//! The unit of work the runner executes.

use crate::adapters::CompletionRequest;
use crate::config::Settings;
use crate::domain::{ApplicationInput, ContextError, PipelineContext, StepId};

/// A named, independently testable pipeline step.
///
/// A step is a pure function from (inputs, prior results) to one completion
/// request; it holds no state and performs no I/O itself. `reads()` declares
/// exactly which prior results the prompt embeds, which is what fixes the
/// execution order.
pub trait PipelineStep: Send + Sync {
    /// Which step this is
    fn id(&self) -> StepId;

    /// Context entries this step's prompt reads. Empty for steps that only
    /// use the user-supplied inputs.
    fn reads(&self) -> &'static [StepId];

    /// Build the completion request for this step. Fails only if a declared
    /// dependency is missing from the context, which would mean the fixed
    /// step order was violated.
    fn request(
        &self,
        input: &ApplicationInput,
        context: &PipelineContext,
        settings: &Settings,
    ) -> Result<CompletionRequest, ContextError>;
}
