//! Final report assembly and rendering.
//!
//! A report is the five step results concatenated in step order under fixed
//! section headers, with a short closing checklist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::context::{PipelineContext, StepId, StepResult};

/// Closing checklist appended after the five sections.
const NEXT_STEPS: &[&str] = &[
    "Fold a specific detail from the company research into the cover letter.",
    "Pick the top missing skill from the gap analysis and plan how to close it.",
    "Rehearse the interview prep answers out loud at least once.",
    "Send the application and note the date for a follow-up.",
];

/// The assembled output of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run this report came from (log correlation only)
    pub run_id: Uuid,

    /// When the report was assembled
    pub generated_at: DateTime<Utc>,

    /// Step results in completion order
    pub sections: Vec<StepResult>,
}

impl Report {
    /// Assemble a report from a finished run's context, consuming it.
    pub fn from_context(run_id: Uuid, context: PipelineContext) -> Self {
        Self {
            run_id,
            generated_at: Utc::now(),
            sections: context.into_results(),
        }
    }

    /// Result text for one section, if present.
    pub fn section(&self, step: StepId) -> Option<&str> {
        self.sections
            .iter()
            .find(|r| r.step == step)
            .map(|r| r.content.as_str())
    }

    /// Render the report as markdown-ish plain text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("# Job Application Report\n\n");
        out.push_str(&format!(
            "Generated: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        for result in &self.sections {
            out.push_str(&format!(
                "\n## {} ({})\n\n{}\n",
                result.step.title(),
                result.step,
                result.content.trim_end()
            ));
        }

        out.push_str("\n## Next Steps\n\n");
        for item in NEXT_STEPS {
            out.push_str(&format!("- {item}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        let mut ctx = PipelineContext::new();
        for step in StepId::ALL {
            ctx.insert(StepResult::new(step, format!("{step} output")))
                .unwrap();
        }
        Report::from_context(Uuid::new_v4(), ctx)
    }

    #[test]
    fn test_sections_keep_step_order() {
        let report = sample_report();
        let order: Vec<StepId> = report.sections.iter().map(|r| r.step).collect();
        assert_eq!(order, StepId::ALL.to_vec());
    }

    #[test]
    fn test_render_has_titled_sections_in_order() {
        let rendered = sample_report().render();

        let mut last = 0;
        for step in StepId::ALL {
            let header = format!("## {} ({})", step.title(), step);
            let pos = rendered.find(&header).unwrap_or_else(|| {
                panic!("section header missing: {header}");
            });
            assert!(pos > last, "section '{step}' out of order");
            last = pos;
        }

        // Checklist comes after every section
        let footer = rendered.find("## Next Steps").unwrap();
        assert!(footer > last);
    }

    #[test]
    fn test_section_lookup() {
        let report = sample_report();
        assert_eq!(
            report.section(StepId::GenerateCoverLetter),
            Some("generate_cover_letter output")
        );

        let empty = Report::from_context(Uuid::new_v4(), PipelineContext::new());
        assert_eq!(empty.section(StepId::GenerateCoverLetter), None);
    }
}
