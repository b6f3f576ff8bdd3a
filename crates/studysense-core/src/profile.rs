//! Learner profiles with JSON persistence.
//!
//! A profile bundles the inputs the engine needs for one learner: the style
//! vector from their assessment and their append-only quiz and session
//! histories.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{LearningStyle, QuizResult, StudySession, StyleDimension};
use crate::style::{Responses, StyleClassifier};

/// Everything known about one learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerProfile {
    /// Display name.
    pub name: String,
    /// Learning-style vector from the most recent assessment.
    pub style: LearningStyle,
    /// Question ids the learner agreed with during the assessment.
    #[serde(default)]
    pub preferences: Vec<String>,
    /// When the assessment was completed.
    pub created_at: DateTime<Utc>,
    /// Quiz history, oldest first.
    #[serde(default)]
    pub quiz_results: Vec<QuizResult>,
    /// Study session history, oldest first.
    #[serde(default)]
    pub sessions: Vec<StudySession>,
}

impl LearnerProfile {
    /// Start a fresh profile from a completed assessment.
    pub fn from_assessment(
        name: impl Into<String>,
        responses: &Responses,
        classifier: &StyleClassifier,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            style: classifier.classify(responses),
            preferences: classifier.preferences(responses),
            created_at,
            quiz_results: Vec::new(),
            sessions: Vec::new(),
        }
    }

    /// The learner's dominant style dimension.
    pub fn dominant_style(&self) -> StyleDimension {
        self.style.dominant()
    }

    /// Save the profile as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize profile")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write profile to {}", path.display()))?;
        Ok(())
    }

    /// Load a profile from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile from {}", path.display()))?;
        let profile: LearnerProfile = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse profile JSON: {}", path.display()))?;
        Ok(profile)
    }
}

/// Load assessment responses from a JSON object of question id → rating.
pub fn load_responses(path: &Path) -> Result<Responses> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read responses from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse responses JSON: {}", path.display()))
}
