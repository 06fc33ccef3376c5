//! Runner configuration.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (OPENAI_API_KEY, JOBHUNT_API_BASE, JOBHUNT_CONFIG)
//! 2. Config file (.jobhunt/config.yaml)
//! 3. Built-in defaults
//!
//! Config file discovery:
//! - JOBHUNT_CONFIG, if set, names the file directly
//! - otherwise the current directory and its parents are searched for
//!   .jobhunt/config.yaml, then ~/.jobhunt/config.yaml
//!
//! The result is an immutable `Settings` value handed to the Runner at
//! construction; nothing here is cached globally. The API credential is
//! never read from the config file, only from the environment or an
//! explicit argument, so the file stays safe to commit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::StepId;

/// Default API base for the completion service
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Override for the completion API base URL
    pub api_base: Option<String>,

    /// Per-step model overrides, keyed by step name
    #[serde(default)]
    pub models: HashMap<StepId, String>,

    /// Per-step temperature overrides, keyed by step name
    #[serde(default)]
    pub temperatures: HashMap<StepId, f32>,
}

/// Resolved, immutable settings for one Runner.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// API credential (may be empty; callers gate on it before running)
    pub api_key: String,

    /// Completion API base URL
    pub api_base: String,

    /// Per-step model overrides
    pub models: HashMap<StepId, String>,

    /// Per-step temperature overrides
    pub temperatures: HashMap<StepId, f32>,

    /// Path of the config file that was applied (if any)
    pub config_file: Option<PathBuf>,
}

/// Built-in model choice per step. The cover letter is the one place the
/// larger model earns its cost.
fn default_model(step: StepId) -> &'static str {
    match step {
        StepId::GenerateCoverLetter => "gpt-4",
        _ => "gpt-3.5-turbo",
    }
}

/// Built-in sampling temperature per step. Extraction and comparison run
/// deterministic; the generative steps get progressively looser.
fn default_temperature(step: StepId) -> f32 {
    match step {
        StepId::ExtractSkills => 0.0,
        StepId::AnalyzeSkillGap => 0.0,
        StepId::ResearchCompany => 0.3,
        StepId::GenerateCoverLetter => 0.7,
        StepId::GenerateInterviewPrep => 0.5,
    }
}

impl Settings {
    /// Resolve settings from the environment and an optional config file.
    ///
    /// `api_key` takes precedence over the OPENAI_API_KEY environment
    /// variable. A missing key is not an error here: commands that do not
    /// call the service (steps listing, config display) work without one.
    pub fn resolve(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .unwrap_or_default();

        let config_path = find_config_file();
        let file = match config_path {
            Some(ref path) => load_config_file(path)?,
            None => ConfigFile::default(),
        };

        let api_base = std::env::var("JOBHUNT_API_BASE")
            .ok()
            .or(file.api_base)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            models: file.models,
            temperatures: file.temperatures,
            config_file: config_path,
        })
    }

    /// Settings with built-in defaults and the given credential.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            ..Self::default()
        }
    }

    /// Model identifier to use for a step.
    pub fn model_for(&self, step: StepId) -> &str {
        self.models
            .get(&step)
            .map(String::as_str)
            .unwrap_or_else(|| default_model(step))
    }

    /// Sampling temperature to use for a step.
    pub fn temperature_for(&self, step: StepId) -> f32 {
        self.temperatures
            .get(&step)
            .copied()
            .unwrap_or_else(|| default_temperature(step))
    }

    /// Whether a usable credential is present.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Find a config file: JOBHUNT_CONFIG, then .jobhunt/config.yaml in the
/// current directory and its parents, then ~/.jobhunt/config.yaml.
fn find_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("JOBHUNT_CONFIG") {
        return Some(PathBuf::from(path));
    }

    let mut current = std::env::current_dir().ok()?;
    loop {
        let candidate = current.join(".jobhunt").join("config.yaml");
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            break;
        }
    }

    let home_candidate = dirs::home_dir()?.join(".jobhunt").join("config.yaml");
    home_candidate.exists().then_some(home_candidate)
}

/// Load and parse a config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
