//! Domain types for the jobhunt pipeline.
//!
//! This module contains the core data structures:
//! - ApplicationInput: the three user-supplied fields
//! - StepId / StepResult / PipelineContext: step outputs and their ordering
//! - Report: the assembled final output

pub mod context;
pub mod input;
pub mod report;

// Re-export commonly used types
pub use context::{ContextError, PipelineContext, StepId, StepResult};
pub use input::{ApplicationInput, InputError};
pub use report::Report;
