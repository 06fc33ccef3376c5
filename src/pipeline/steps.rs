//! The five pipeline steps and their prompts.
//!
//! Prompt shapes are deterministic: the same inputs and context always
//! produce the same request. Model and temperature come from `Settings`.

use crate::adapters::CompletionRequest;
use crate::config::Settings;
use crate::domain::{ApplicationInput, ContextError, PipelineContext, StepId};

use super::step::PipelineStep;

/// Required opening line of every generated cover letter.
pub const COVER_LETTER_SALUTATION: &str = "Dear Hiring Manager,";

/// The five steps in execution order.
pub fn default_steps() -> Vec<Box<dyn PipelineStep>> {
    vec![
        Box::new(ExtractSkills),
        Box::new(AnalyzeSkillGap),
        Box::new(ResearchCompany),
        Box::new(GenerateCoverLetter),
        Box::new(GenerateInterviewPrep),
    ]
}

fn request_for(
    step: StepId,
    settings: &Settings,
    prompt: String,
) -> Result<CompletionRequest, ContextError> {
    Ok(CompletionRequest::new(
        settings.model_for(step),
        settings.temperature_for(step),
        prompt,
    ))
}

/// Step 1: pull required skills, experience and responsibilities out of the
/// job description.
pub struct ExtractSkills;

impl PipelineStep for ExtractSkills {
    fn id(&self) -> StepId {
        StepId::ExtractSkills
    }

    fn reads(&self) -> &'static [StepId] {
        &[]
    }

    fn request(
        &self,
        input: &ApplicationInput,
        _context: &PipelineContext,
        settings: &Settings,
    ) -> Result<CompletionRequest, ContextError> {
        let prompt = format!(
            "Analyze this job description and extract:\n\
             1. Required technical skills (list each)\n\
             2. Preferred/bonus skills (list each)\n\
             3. Years of experience required\n\
             4. Key responsibilities (top 5)\n\
             5. Seniority level\n\n\
             Job Description: {}\n\n\
             Return as a clean structured list.",
            input.job_description
        );
        request_for(self.id(), settings, prompt)
    }
}

/// Step 2: compare the extracted requirements with the candidate profile.
pub struct AnalyzeSkillGap;

impl PipelineStep for AnalyzeSkillGap {
    fn id(&self) -> StepId {
        StepId::AnalyzeSkillGap
    }

    fn reads(&self) -> &'static [StepId] {
        &[StepId::ExtractSkills]
    }

    fn request(
        &self,
        input: &ApplicationInput,
        context: &PipelineContext,
        settings: &Settings,
    ) -> Result<CompletionRequest, ContextError> {
        let jd_skills = context.require(self.id(), StepId::ExtractSkills)?;
        let prompt = format!(
            "Compare these skill sets:\n\n\
             REQUIRED BY JOB: {}\n\
             CANDIDATE HAS: {}\n\n\
             Provide:\n\
             1. Skills the candidate ALREADY has\n\
             2. Skills the candidate is MISSING\n\
             3. Quick recommendations to bridge the gaps\n\
             4. Overall match percentage (estimate)",
            jd_skills, input.candidate_profile
        );
        request_for(self.id(), settings, prompt)
    }
}

/// Step 3: gather company facts for the cover letter and interview prep.
/// Reads no prior results; runs third anyway, the report presents research
/// after the skills analysis.
pub struct ResearchCompany;

impl PipelineStep for ResearchCompany {
    fn id(&self) -> StepId {
        StepId::ResearchCompany
    }

    fn reads(&self) -> &'static [StepId] {
        &[]
    }

    fn request(
        &self,
        input: &ApplicationInput,
        _context: &PipelineContext,
        settings: &Settings,
    ) -> Result<CompletionRequest, ContextError> {
        let prompt = format!(
            "Provide a research summary about \"{}\" covering:\n\
             1. What the company does\n\
             2. Company culture and values\n\
             3. Recent news or achievements\n\
             4. Why a candidate might want to work there\n\
             5. 2-3 smart interview questions to ask them",
            input.company_name
        );
        request_for(self.id(), settings, prompt)
    }
}

/// Step 4: write the cover letter from everything gathered so far.
pub struct GenerateCoverLetter;

impl PipelineStep for GenerateCoverLetter {
    fn id(&self) -> StepId {
        StepId::GenerateCoverLetter
    }

    fn reads(&self) -> &'static [StepId] {
        &[
            StepId::ExtractSkills,
            StepId::AnalyzeSkillGap,
            StepId::ResearchCompany,
        ]
    }

    fn request(
        &self,
        input: &ApplicationInput,
        context: &PipelineContext,
        settings: &Settings,
    ) -> Result<CompletionRequest, ContextError> {
        let skills = context.require(self.id(), StepId::ExtractSkills)?;
        let gaps = context.require(self.id(), StepId::AnalyzeSkillGap)?;
        let research = context.require(self.id(), StepId::ResearchCompany)?;

        let prompt = format!(
            "Write a compelling, professional cover letter (NOT generic).\n\n\
             Context:\n\
             COMPANY: {}\n\
             JOB DESCRIPTION: {}\n\
             CANDIDATE PROFILE: {}\n\
             SKILLS ANALYSIS: {}\n\
             GAP ANALYSIS: {}\n\
             COMPANY RESEARCH: {}\n\n\
             Requirements:\n\
             - 3-4 paragraphs, ~300 words\n\
             - Opening: Genuine enthusiasm + something specific about the company\n\
             - Middle: Connect 2-3 specific skills to the role\n\
             - Closing: Clear call to action\n\
             - Tone: Professional but human\n\n\
             Start with: {}",
            input.company_name,
            input.job_description,
            input.candidate_profile,
            skills,
            gaps,
            research,
            COVER_LETTER_SALUTATION
        );
        request_for(self.id(), settings, prompt)
    }
}

/// Step 5: interview prep cheat sheet from the job title, extracted skills
/// and company name.
pub struct GenerateInterviewPrep;

impl PipelineStep for GenerateInterviewPrep {
    fn id(&self) -> StepId {
        StepId::GenerateInterviewPrep
    }

    fn reads(&self) -> &'static [StepId] {
        &[StepId::ExtractSkills]
    }

    fn request(
        &self,
        input: &ApplicationInput,
        context: &PipelineContext,
        settings: &Settings,
    ) -> Result<CompletionRequest, ContextError> {
        let skills = context.require(self.id(), StepId::ExtractSkills)?;
        let prompt = format!(
            "Create an interview prep cheat sheet for a {} role at {}.\n\
             Required Skills: {}\n\n\
             Include:\n\
             1. Top 5 technical questions with answer guidance\n\
             2. Top 3 behavioral questions (STAR format hints)\n\
             3. Key concepts to revise\n\
             4. 3 smart questions to ask the interviewer\n\
             5. \"Tell me about yourself\" one-liner starter",
            input.job_title(),
            input.company_name,
            skills
        );
        request_for(self.id(), settings, prompt)
    }
}
