//! The static technique catalog.
//!
//! A catalog is an immutable arena of [`StudyTechnique`] records addressed by
//! stable string ids. The built-in catalog is built once per process; custom
//! catalogs are loaded from TOML files and validated on load.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::StudyError;
use crate::guard::ValidationWarning;
use crate::model::{Difficulty, StudyTechnique, TechniqueType};

/// An immutable, ordered collection of study techniques.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    techniques: Vec<StudyTechnique>,
}

impl Catalog {
    /// Build a catalog, rejecting entries that would break scoring.
    pub fn new(techniques: Vec<StudyTechnique>) -> Result<Self, StudyError> {
        let mut seen = HashSet::new();
        for t in &techniques {
            if !seen.insert(t.id.as_str()) {
                return Err(StudyError::DuplicateTechnique(t.id.clone()));
            }
            check_technique(t)?;
        }
        Ok(Self { techniques })
    }

    /// The built-in catalog, constructed on first use and shared afterwards.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| Catalog {
            techniques: builtin_techniques(),
        })
    }

    /// Techniques in catalog order.
    pub fn techniques(&self) -> &[StudyTechnique] {
        &self.techniques
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudyTechnique> {
        self.techniques.iter()
    }

    /// Look up a technique by id.
    pub fn get(&self, id: &str) -> Option<&StudyTechnique> {
        self.techniques.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.techniques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }
}

fn check_technique(t: &StudyTechnique) -> Result<(), StudyError> {
    let invalid = |reason: &str| StudyError::InvalidTechnique {
        id: t.id.clone(),
        reason: reason.to_string(),
    };
    if t.id.trim().is_empty() {
        return Err(invalid("id is empty"));
    }
    if t.name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if !(t.effectiveness > 0.0 && t.effectiveness <= 1.0) {
        return Err(invalid(&format!(
            "effectiveness must be in (0, 1], got {}",
            t.effectiveness
        )));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn technique(
    id: &str,
    name: &str,
    description: &str,
    technique_type: TechniqueType,
    effectiveness: f64,
    difficulty: Difficulty,
    estimated_time: u32,
    tags: &[&str],
) -> StudyTechnique {
    StudyTechnique {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        technique_type,
        effectiveness,
        difficulty,
        estimated_time,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn builtin_techniques() -> Vec<StudyTechnique> {
    use Difficulty::*;
    use TechniqueType as T;

    vec![
        technique(
            "1",
            "Interactive Flashcards",
            "Digital flashcards with spaced repetition algorithms",
            T::Visual,
            0.85,
            Beginner,
            15,
            &["memory", "vocabulary", "quick-review"],
        ),
        technique(
            "2",
            "Video Lectures",
            "Engaging video content with visual demonstrations",
            T::Visual,
            0.78,
            Beginner,
            30,
            &["comprehensive", "demonstration", "passive-learning"],
        ),
        technique(
            "3",
            "Audio Podcasts",
            "Educational podcasts and audio explanations",
            T::Auditory,
            0.72,
            Beginner,
            25,
            &["multitasking", "storytelling", "discussion"],
        ),
        technique(
            "4",
            "Practice Quizzes",
            "Interactive quizzes with immediate feedback",
            T::Reading,
            0.88,
            Intermediate,
            20,
            &["assessment", "active-recall", "feedback"],
        ),
        technique(
            "5",
            "Mind Mapping",
            "Visual representation of information and concepts",
            T::Visual,
            0.82,
            Intermediate,
            35,
            &["organization", "creativity", "connections"],
        ),
        technique(
            "6",
            "Hands-on Projects",
            "Practical application through real-world projects",
            T::Kinesthetic,
            0.92,
            Advanced,
            120,
            &["application", "creativity", "problem-solving"],
        ),
        technique(
            "7",
            "Group Discussions",
            "Collaborative learning through peer interaction",
            T::Auditory,
            0.79,
            Intermediate,
            45,
            &["collaboration", "communication", "perspectives"],
        ),
        technique(
            "8",
            "Note-taking Systems",
            "Structured note-taking methods and templates",
            T::Reading,
            0.76,
            Beginner,
            25,
            &["organization", "summary", "retention"],
        ),
        technique(
            "9",
            "Simulation Games",
            "Interactive simulations and educational games",
            T::Kinesthetic,
            0.84,
            Intermediate,
            40,
            &["engagement", "problem-solving", "fun"],
        ),
        technique(
            "10",
            "Research Papers",
            "In-depth reading and analysis of academic sources",
            T::Reading,
            0.75,
            Advanced,
            60,
            &["analysis", "critical-thinking", "depth"],
        ),
    ]
}

/// Intermediate TOML structure for catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    techniques: Vec<TomlTechnique>,
}

#[derive(Debug, Deserialize)]
struct TomlTechnique {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "type")]
    technique_type: String,
    effectiveness: f64,
    difficulty: String,
    estimated_time: u32,
    #[serde(default)]
    tags: Vec<String>,
}

impl TomlTechnique {
    fn into_technique(self) -> Result<StudyTechnique, StudyError> {
        Ok(StudyTechnique {
            technique_type: self.technique_type.parse()?,
            difficulty: self.difficulty.parse()?,
            id: self.id,
            name: self.name,
            description: self.description,
            effectiveness: self.effectiveness,
            estimated_time: self.estimated_time,
            tags: self.tags,
        })
    }
}

/// Parse a single TOML catalog file.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a catalog.
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let techniques = parse_techniques(content, source_path)?;
    Catalog::new(techniques)
        .with_context(|| format!("invalid catalog: {}", source_path.display()))
}

fn parse_techniques(content: &str, source_path: &Path) -> Result<Vec<StudyTechnique>> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    parsed
        .techniques
        .into_iter()
        .map(|t| {
            let id = t.id.clone();
            t.into_technique()
                .with_context(|| format!("technique '{id}' in {}", source_path.display()))
        })
        .collect()
}

/// Load every `.toml` file under a directory into one catalog.
///
/// Files are read in path order so the merged catalog order is stable.
/// Unparsable files are skipped with a warning; duplicate ids across files
/// are an error.
pub fn load_catalog_directory(dir: &Path) -> Result<Catalog> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = Vec::new();
    collect_toml_files(dir, &mut paths)?;
    paths.sort();

    let mut techniques = Vec::new();
    for path in &paths {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
        match parse_techniques(&content, path) {
            Ok(found) => techniques.extend(found),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    Catalog::new(techniques).with_context(|| format!("invalid catalog: {}", dir.display()))
}

fn collect_toml_files(dir: &Path, out: &mut Vec<std::path::PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            collect_toml_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            out.push(path);
        }
    }
    Ok(())
}

/// Load a catalog from a file or directory.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if path.is_dir() {
        load_catalog_directory(path)
    } else {
        parse_catalog(path)
    }
}

/// Check a catalog for issues that do not break scoring but are probably
/// mistakes.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for t in catalog.iter() {
        if t.estimated_time == 0 {
            warnings.push(ValidationWarning::for_record(
                &t.id,
                "estimated_time is 0 minutes",
            ));
        }
        if t.description.trim().is_empty() {
            warnings.push(ValidationWarning::for_record(&t.id, "description is empty"));
        }
        if t.tags.is_empty() {
            warnings.push(ValidationWarning::for_record(&t.id, "no tags"));
        }
    }

    let mut names = HashSet::new();
    for t in catalog.iter() {
        if !names.insert(t.name.to_lowercase()) {
            warnings.push(ValidationWarning::for_record(
                &t.id,
                format!("name '{}' is used by more than one technique", t.name),
            ));
        }
    }

    warnings
}
