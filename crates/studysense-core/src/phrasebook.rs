//! Reasoning and tip text used to explain recommendations.
//!
//! All learner-facing text lives here, keyed by dominant style and archetype,
//! so it can be replaced by a TOML file without touching the scorer. The
//! built-in phrasebook is English.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::behavior::Archetype;
use crate::model::StyleDimension;

/// Placeholder in [`Phrasebook::style_match`] replaced by the style label.
pub const STYLE_PLACEHOLDER: &str = "{style}";

/// Text templates for reasoning strings and personalized tips.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrasebook {
    /// Clause used when a technique matches the dominant style.
    pub style_match: String,
    /// Clause used for highly effective techniques.
    pub high_effectiveness: String,
    /// Joins reasoning clauses.
    pub separator: String,
    style_labels: HashMap<StyleDimension, String>,
    archetype_reasons: HashMap<Archetype, String>,
    style_tips: HashMap<StyleDimension, Vec<String>>,
    archetype_tips: HashMap<Archetype, Vec<String>>,
}

impl Phrasebook {
    /// The built-in English phrasebook, shared for the process lifetime.
    pub fn english() -> &'static Phrasebook {
        static ENGLISH: OnceLock<Phrasebook> = OnceLock::new();
        ENGLISH.get_or_init(english)
    }

    /// Label used for a style inside reasoning text.
    pub fn style_label(&self, dimension: StyleDimension) -> &str {
        self.style_labels
            .get(&dimension)
            .map(String::as_str)
            .unwrap_or_else(|| dimension.label())
    }

    /// The style-match clause for a dominant dimension.
    pub fn style_clause(&self, dimension: StyleDimension) -> String {
        self.style_match
            .replace(STYLE_PLACEHOLDER, self.style_label(dimension))
    }

    /// The fixed reasoning clause for an archetype.
    pub fn archetype_reason(&self, archetype: Archetype) -> Option<&str> {
        self.archetype_reasons.get(&archetype).map(String::as_str)
    }

    /// Tips for a dominant style, most important first.
    pub fn style_tips(&self, dimension: StyleDimension) -> &[String] {
        self.style_tips
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Tips for an archetype, most important first.
    pub fn archetype_tips(&self, archetype: Archetype) -> &[String] {
        self.archetype_tips
            .get(&archetype)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Load a phrasebook from TOML, falling back to English for anything the
    /// file leaves out.
    pub fn load(path: &Path) -> Result<Phrasebook> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read phrasebook: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid phrasebook: {}", path.display()))
    }

    /// Parse phrasebook overrides from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Phrasebook> {
        let overrides: TomlPhrasebook =
            toml::from_str(content).context("failed to parse phrasebook TOML")?;

        let mut book = english();
        if let Some(s) = overrides.style_match {
            book.style_match = s;
        }
        if let Some(s) = overrides.high_effectiveness {
            book.high_effectiveness = s;
        }
        if let Some(s) = overrides.separator {
            book.separator = s;
        }
        for (key, label) in overrides.style_labels {
            book.style_labels.insert(key.parse()?, label);
        }
        for (key, reason) in overrides.archetype_reasons {
            book.archetype_reasons.insert(key.parse()?, reason);
        }
        for (key, tips) in overrides.style_tips {
            book.style_tips.insert(key.parse()?, tips);
        }
        for (key, tips) in overrides.archetype_tips {
            book.archetype_tips.insert(key.parse()?, tips);
        }
        Ok(book)
    }
}

impl Default for Phrasebook {
    fn default() -> Self {
        Phrasebook::english().clone()
    }
}

/// Intermediate TOML structure; map keys are parsed into enums after loading.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlPhrasebook {
    style_match: Option<String>,
    high_effectiveness: Option<String>,
    separator: Option<String>,
    #[serde(default)]
    style_labels: BTreeMap<String, String>,
    #[serde(default)]
    archetype_reasons: BTreeMap<String, String>,
    #[serde(default)]
    style_tips: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    archetype_tips: BTreeMap<String, Vec<String>>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn english() -> Phrasebook {
    let archetype_reasons = HashMap::from([
        (
            Archetype::FastLearner,
            "Suitable for your quick learning pace".to_string(),
        ),
        (
            Archetype::Methodical,
            "Aligns with your systematic approach".to_string(),
        ),
        (
            Archetype::Struggling,
            "Designed to build confidence gradually".to_string(),
        ),
        (
            Archetype::Inconsistent,
            "Flexible format fits your schedule".to_string(),
        ),
    ]);

    let style_tips = HashMap::from([
        (
            StyleDimension::Visual,
            strings(&[
                "Use color coding and diagrams",
                "Create visual summaries",
                "Watch for patterns and connections",
            ]),
        ),
        (
            StyleDimension::Auditory,
            strings(&[
                "Read content aloud",
                "Use background music if helpful",
                "Discuss with others or record yourself",
            ]),
        ),
        (
            StyleDimension::ReadingWriting,
            strings(&[
                "Take detailed notes",
                "Summarize in your own words",
                "Create outlines and lists",
            ]),
        ),
        (
            StyleDimension::Kinesthetic,
            strings(&[
                "Take breaks to move around",
                "Use hands-on examples",
                "Apply concepts immediately",
            ]),
        ),
    ]);

    let archetype_tips = HashMap::from([
        (
            Archetype::FastLearner,
            strings(&[
                "Challenge yourself with advanced concepts",
                "Set time limits for focused practice",
            ]),
        ),
        (
            Archetype::Methodical,
            strings(&[
                "Follow a structured approach",
                "Check your understanding at each step",
            ]),
        ),
        (
            Archetype::Struggling,
            strings(&[
                "Start with easier examples",
                "Don't hesitate to review fundamentals",
            ]),
        ),
        (
            Archetype::Inconsistent,
            strings(&[
                "Set small, achievable goals",
                "Use reminders and scheduling",
            ]),
        ),
    ]);

    Phrasebook {
        style_match: "Matches your {style} learning preference".to_string(),
        high_effectiveness: "Proven high effectiveness rate".to_string(),
        separator: " • ".to_string(),
        style_labels: HashMap::new(),
        archetype_reasons,
        style_tips,
        archetype_tips,
    }
}
