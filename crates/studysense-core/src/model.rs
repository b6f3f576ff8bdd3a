//! Core data model types for studysense.
//!
//! Learning-style vectors, the quiz and session history records supplied by
//! the host application, catalog techniques, and the recommendations the
//! engine produces from them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StudyError;

/// Floor applied to every raw style score before normalizing.
pub const STYLE_FLOOR: f64 = 0.1;

/// One of the four learning-style dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleDimension {
    Visual,
    Auditory,
    ReadingWriting,
    Kinesthetic,
}

impl StyleDimension {
    /// All dimensions in canonical iteration order. Ties between weights are
    /// always broken in favour of the earlier entry.
    pub const ALL: [StyleDimension; 4] = [
        StyleDimension::Visual,
        StyleDimension::Auditory,
        StyleDimension::ReadingWriting,
        StyleDimension::Kinesthetic,
    ];

    /// Short label used in reasoning text and phrasebook keys.
    pub fn label(self) -> &'static str {
        match self {
            StyleDimension::Visual => "visual",
            StyleDimension::Auditory => "auditory",
            StyleDimension::ReadingWriting => "reading",
            StyleDimension::Kinesthetic => "kinesthetic",
        }
    }

    /// Human-facing name, e.g. for profile headers.
    pub fn display_name(self) -> &'static str {
        match self {
            StyleDimension::Visual => "Visual",
            StyleDimension::Auditory => "Auditory",
            StyleDimension::ReadingWriting => "Reading/Writing",
            StyleDimension::Kinesthetic => "Kinesthetic",
        }
    }
}

impl fmt::Display for StyleDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StyleDimension {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "visual" => Ok(StyleDimension::Visual),
            "auditory" => Ok(StyleDimension::Auditory),
            "reading" | "reading_writing" | "readingwriting" | "reading/writing" => {
                Ok(StyleDimension::ReadingWriting)
            }
            "kinesthetic" => Ok(StyleDimension::Kinesthetic),
            other => Err(StudyError::unknown("style dimension", other)),
        }
    }
}

/// A normalized learning-style vector.
///
/// The four weights are strictly positive and sum to 1.0. Values are only
/// produced by [`LearningStyle::new`], [`LearningStyle::from_raw_scores`] or
/// deserialization, all of which enforce that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStyle")]
pub struct LearningStyle {
    visual: f64,
    auditory: f64,
    reading_writing: f64,
    kinesthetic: f64,
}

#[derive(Deserialize)]
struct RawStyle {
    visual: f64,
    auditory: f64,
    reading_writing: f64,
    kinesthetic: f64,
}

impl TryFrom<RawStyle> for LearningStyle {
    type Error = StudyError;

    fn try_from(raw: RawStyle) -> Result<Self, Self::Error> {
        LearningStyle::new(
            raw.visual,
            raw.auditory,
            raw.reading_writing,
            raw.kinesthetic,
        )
    }
}

impl LearningStyle {
    /// Build a vector from caller-supplied weights, renormalizing them to sum
    /// to 1.0. Every weight must be finite and strictly positive.
    pub fn new(
        visual: f64,
        auditory: f64,
        reading_writing: f64,
        kinesthetic: f64,
    ) -> Result<Self, StudyError> {
        let weights = [visual, auditory, reading_writing, kinesthetic];
        for (dim, w) in StyleDimension::ALL.iter().zip(weights) {
            if !w.is_finite() || w <= 0.0 {
                return Err(StudyError::InvalidStyle(format!(
                    "{dim} weight must be a positive finite number, got {w}"
                )));
            }
        }
        let style = Self::normalize(weights);
        if let Some((dim, _)) = style.iter().find(|&(_, w)| w <= 0.0) {
            return Err(StudyError::InvalidStyle(format!(
                "{dim} weight is too small relative to the others to represent"
            )));
        }
        Ok(style)
    }

    /// Build a vector from raw classifier scores. Each score is floored at
    /// [`STYLE_FLOOR`] before normalizing, so this never fails.
    pub fn from_raw_scores(raw: [f64; 4]) -> Self {
        Self::normalize(raw.map(|score| STYLE_FLOOR.max(score)))
    }

    /// Scale by the largest weight first so the sum cannot overflow.
    fn normalize(weights: [f64; 4]) -> Self {
        let max = weights.iter().copied().fold(f64::MIN_POSITIVE, f64::max);
        let [visual, auditory, reading_writing, kinesthetic] = weights.map(|w| w / max);
        let total = visual + auditory + reading_writing + kinesthetic;
        Self {
            visual: visual / total,
            auditory: auditory / total,
            reading_writing: reading_writing / total,
            kinesthetic: kinesthetic / total,
        }
    }

    pub fn visual(&self) -> f64 {
        self.visual
    }

    pub fn auditory(&self) -> f64 {
        self.auditory
    }

    pub fn reading_writing(&self) -> f64 {
        self.reading_writing
    }

    pub fn kinesthetic(&self) -> f64 {
        self.kinesthetic
    }

    /// Weight of a single dimension.
    pub fn weight(&self, dimension: StyleDimension) -> f64 {
        match dimension {
            StyleDimension::Visual => self.visual,
            StyleDimension::Auditory => self.auditory,
            StyleDimension::ReadingWriting => self.reading_writing,
            StyleDimension::Kinesthetic => self.kinesthetic,
        }
    }

    /// `(dimension, weight)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleDimension, f64)> + '_ {
        StyleDimension::ALL.into_iter().map(|d| (d, self.weight(d)))
    }

    /// The dimension with the highest weight; the latest dimension in
    /// [`StyleDimension::ALL`] wins a tie.
    pub fn dominant(&self) -> StyleDimension {
        let mut best = StyleDimension::Visual;
        let mut best_weight = self.visual;
        for (dim, w) in self.iter().skip(1) {
            if w >= best_weight {
                best = dim;
                best_weight = w;
            }
        }
        best
    }

    /// The largest of the four weights.
    pub fn max_weight(&self) -> f64 {
        self.visual
            .max(self.auditory)
            .max(self.reading_writing)
            .max(self.kinesthetic)
    }
}

/// A completed quiz. Append-only history, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Score from 0 to 100.
    pub score: f64,
    /// Topic the quiz covered.
    #[serde(default)]
    pub topic: String,
    /// Minutes spent on the quiz.
    pub time_spent: f64,
    /// Number of attempts, at least 1.
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    pub completed_at: DateTime<Utc>,
}

fn default_attempts() -> u32 {
    1
}

/// A completed study session. Append-only history, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    /// Catalog id of the technique that was practised.
    pub technique_id: String,
    /// Duration in seconds.
    pub duration: u64,
    /// Self-reported rating from 1 to 5.
    pub rating: u8,
    #[serde(default)]
    pub notes: String,
    pub completed_at: DateTime<Utc>,
}

/// Modality a study technique is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechniqueType {
    Visual,
    Auditory,
    Reading,
    Kinesthetic,
    Mixed,
}

impl TechniqueType {
    /// The style dimension this type draws on, or `None` for mixed techniques.
    pub fn dimension(self) -> Option<StyleDimension> {
        match self {
            TechniqueType::Visual => Some(StyleDimension::Visual),
            TechniqueType::Auditory => Some(StyleDimension::Auditory),
            TechniqueType::Reading => Some(StyleDimension::ReadingWriting),
            TechniqueType::Kinesthetic => Some(StyleDimension::Kinesthetic),
            TechniqueType::Mixed => None,
        }
    }
}

impl fmt::Display for TechniqueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TechniqueType::Visual => write!(f, "visual"),
            TechniqueType::Auditory => write!(f, "auditory"),
            TechniqueType::Reading => write!(f, "reading"),
            TechniqueType::Kinesthetic => write!(f, "kinesthetic"),
            TechniqueType::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for TechniqueType {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "visual" => Ok(TechniqueType::Visual),
            "auditory" => Ok(TechniqueType::Auditory),
            "reading" | "reading_writing" => Ok(TechniqueType::Reading),
            "kinesthetic" => Ok(TechniqueType::Kinesthetic),
            "mixed" => Ok(TechniqueType::Mixed),
            other => Err(StudyError::unknown("technique type", other)),
        }
    }
}

/// How demanding a technique is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(StudyError::unknown("difficulty", other)),
        }
    }
}

/// A static catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyTechnique {
    /// Stable catalog identifier.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub technique_type: TechniqueType,
    /// Fixed effectiveness in (0, 1].
    pub effectiveness: f64,
    pub difficulty: Difficulty,
    /// Estimated time in minutes.
    pub estimated_time: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A scored, explained technique suggestion.
///
/// Borrows its technique from the catalog it was scored against; built fresh
/// on every engine call and never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    /// `rec-{technique id}`.
    pub id: String,
    pub technique: &'a StudyTechnique,
    /// Always within `[0.1, 0.95]`.
    pub confidence: f64,
    pub reasoning: String,
    /// At most three tips.
    pub personalized_tips: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_dimension_display_and_parse() {
        assert_eq!(StyleDimension::ReadingWriting.to_string(), "reading");
        assert_eq!(
            StyleDimension::ReadingWriting.display_name(),
            "Reading/Writing"
        );
        assert_eq!(
            "reading_writing".parse::<StyleDimension>().unwrap(),
            StyleDimension::ReadingWriting
        );
        assert_eq!(
            "Visual".parse::<StyleDimension>().unwrap(),
            StyleDimension::Visual
        );
        assert!("olfactory".parse::<StyleDimension>().is_err());
    }

    #[test]
    fn technique_type_maps_to_dimension() {
        assert_eq!(
            TechniqueType::Reading.dimension(),
            Some(StyleDimension::ReadingWriting)
        );
        assert_eq!(TechniqueType::Mixed.dimension(), None);
        assert_eq!("mixed".parse::<TechniqueType>().unwrap(), TechniqueType::Mixed);
        assert!("smell".parse::<TechniqueType>().is_err());
        assert_eq!(
            "Advanced".parse::<Difficulty>().unwrap(),
            Difficulty::Advanced
        );
    }

    #[test]
    fn new_style_is_renormalized() {
        let style = LearningStyle::new(2.0, 1.0, 1.0, 1.0).unwrap();
        assert!((style.visual() - 0.4).abs() < 1e-12);
        let total: f64 = style.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn new_style_rejects_zero_and_nan() {
        assert!(LearningStyle::new(0.0, 0.5, 0.3, 0.2).is_err());
        assert!(LearningStyle::new(f64::NAN, 0.5, 0.3, 0.2).is_err());
        assert!(LearningStyle::new(-0.1, 0.5, 0.3, 0.2).is_err());
    }

    #[test]
    fn huge_weights_stay_normalized() {
        let style = LearningStyle::new(f64::MAX, f64::MAX, f64::MAX, f64::MAX).unwrap();
        for (_, w) in style.iter() {
            assert!((w - 0.25).abs() < 1e-12);
        }

        let style = LearningStyle::new(1e300, 1e300, 2e300, 1e300).unwrap();
        assert!((style.reading_writing() - 0.4).abs() < 1e-12);
        let total: f64 = style.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unrepresentable_skew_is_rejected() {
        let err = LearningStyle::new(1e300, 1e-300, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, StudyError::InvalidStyle(_)));

        let json = r#"{"visual":1e300,"auditory":1e-300,"reading_writing":1.0,"kinesthetic":1.0}"#;
        assert!(serde_json::from_str::<LearningStyle>(json).is_err());
    }

    #[test]
    fn raw_scores_are_floored() {
        let style = LearningStyle::from_raw_scores([0.0, 0.0, 0.0, 0.0]);
        for (_, w) in style.iter() {
            assert!((w - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn dominant_prefers_last_on_tie() {
        let style = LearningStyle::new(0.3, 0.3, 0.2, 0.2).unwrap();
        assert_eq!(style.dominant(), StyleDimension::Auditory);

        let style = LearningStyle::new(0.1, 0.2, 0.35, 0.35).unwrap();
        assert_eq!(style.dominant(), StyleDimension::Kinesthetic);
        assert!((style.max_weight() - 0.35).abs() < 1e-12);

        let uniform = LearningStyle::from_raw_scores([0.0; 4]);
        assert_eq!(uniform.dominant(), StyleDimension::Kinesthetic);

        let style = LearningStyle::new(0.4, 0.2, 0.2, 0.2).unwrap();
        assert_eq!(style.dominant(), StyleDimension::Visual);
    }

    #[test]
    fn style_deserialization_validates() {
        let ok: LearningStyle = serde_json::from_str(
            r#"{"visual":0.5,"auditory":0.2,"reading_writing":0.2,"kinesthetic":0.1}"#,
        )
        .unwrap();
        assert_eq!(ok.dominant(), StyleDimension::Visual);

        let bad = serde_json::from_str::<LearningStyle>(
            r#"{"visual":0.0,"auditory":0.2,"reading_writing":0.2,"kinesthetic":0.1}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn technique_serde_uses_type_key() {
        let json = r#"{
            "id": "x",
            "name": "X",
            "type": "kinesthetic",
            "effectiveness": 0.9,
            "difficulty": "advanced",
            "estimated_time": 45
        }"#;
        let t: StudyTechnique = serde_json::from_str(json).unwrap();
        assert_eq!(t.technique_type, TechniqueType::Kinesthetic);
        assert!(t.tags.is_empty());
        let back = serde_json::to_value(&t).unwrap();
        assert_eq!(back["type"], "kinesthetic");
    }

    #[test]
    fn quiz_result_defaults_attempts() {
        let json = r#"{"score": 80, "time_spent": 12.5, "completed_at": "2025-01-01T00:00:00Z"}"#;
        let q: QuizResult = serde_json::from_str(json).unwrap();
        assert_eq!(q.attempts, 1);
        assert!(q.topic.is_empty());
    }
}
