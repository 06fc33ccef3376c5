//! Pipeline definition and execution.
//!
//! This module contains:
//! - PipelineStep: the unit of work (declared reads + prompt construction)
//! - the five concrete steps
//! - Runner: sequential execution with first-failure abort

pub mod runner;
pub mod step;
pub mod steps;

// Re-export commonly used types
pub use runner::{PipelineError, Runner};
pub use step::PipelineStep;
pub use steps::{default_steps, COVER_LETTER_SALUTATION};
