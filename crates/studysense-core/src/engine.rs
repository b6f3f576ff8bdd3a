//! The recommendation engine.
//!
//! Combines a learner's style vector, behavioural archetype, and recent
//! performance with the technique catalog into a ranked, explained list of
//! recommendations. The engine is stateless: every call reads its inputs,
//! never mutates them, and builds fresh [`Recommendation`] values.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;

use crate::behavior::{Archetype, BehaviorStats};
use crate::catalog::Catalog;
use crate::model::{
    Difficulty, LearningStyle, QuizResult, Recommendation, StudySession, StudyTechnique,
    StyleDimension, TechniqueType,
};
use crate::performance::{self, PerformanceSignal};
use crate::phrasebook::Phrasebook;
use crate::profile::LearnerProfile;

/// Number of recommendations returned when the caller does not choose.
pub const DEFAULT_LIMIT: usize = 5;
/// Lowest confidence ever reported.
pub const MIN_CONFIDENCE: f64 = 0.1;
/// Highest confidence ever reported.
pub const MAX_CONFIDENCE: f64 = 0.95;
/// Techniques above this effectiveness earn the effectiveness clause.
pub const HIGH_EFFECTIVENESS: f64 = 0.8;
/// Reasoning keeps at most this many clauses.
pub const MAX_REASONS: usize = 2;
/// Style tips taken before archetype tips.
pub const STYLE_TIPS: usize = 2;
/// Total tips per recommendation.
pub const MAX_TIPS: usize = 3;

/// One row of the archetype adjustment table: techniques matching
/// `applies` are multiplied by `matched`, all others by `otherwise`.
#[derive(Debug, Clone, Copy)]
pub struct AdjustmentRule {
    pub archetype: Archetype,
    pub description: &'static str,
    pub applies: fn(&StudyTechnique) -> bool,
    pub matched: f64,
    pub otherwise: f64,
}

impl AdjustmentRule {
    pub fn multiplier(&self, technique: &StudyTechnique) -> f64 {
        if (self.applies)(technique) {
            self.matched
        } else {
            self.otherwise
        }
    }
}

fn is_advanced(t: &StudyTechnique) -> bool {
    t.difficulty == Difficulty::Advanced
}

fn is_intermediate(t: &StudyTechnique) -> bool {
    t.difficulty == Difficulty::Intermediate
}

fn is_beginner(t: &StudyTechnique) -> bool {
    t.difficulty == Difficulty::Beginner
}

fn is_short(t: &StudyTechnique) -> bool {
    t.estimated_time < 30
}

/// Archetype × technique attribute → multiplier.
pub static ADJUSTMENT_RULES: [AdjustmentRule; 4] = [
    AdjustmentRule {
        archetype: Archetype::FastLearner,
        description: "advanced difficulty",
        applies: is_advanced,
        matched: 1.2,
        otherwise: 1.0,
    },
    AdjustmentRule {
        archetype: Archetype::Methodical,
        description: "intermediate difficulty",
        applies: is_intermediate,
        matched: 1.1,
        otherwise: 0.9,
    },
    AdjustmentRule {
        archetype: Archetype::Struggling,
        description: "beginner difficulty",
        applies: is_beginner,
        matched: 1.2,
        otherwise: 0.7,
    },
    AdjustmentRule {
        archetype: Archetype::Inconsistent,
        description: "under 30 minutes",
        applies: is_short,
        matched: 1.1,
        otherwise: 0.8,
    },
];

/// The adjustment rule for an archetype.
pub fn adjustment_rule(archetype: Archetype) -> Option<&'static AdjustmentRule> {
    ADJUSTMENT_RULES.iter().find(|r| r.archetype == archetype)
}

/// Multiplier applied to a technique's confidence for a learner archetype.
pub fn archetype_adjustment(archetype: Archetype, technique: &StudyTechnique) -> f64 {
    adjustment_rule(archetype)
        .map(|rule| rule.multiplier(technique))
        .unwrap_or(1.0)
}

/// Per-call signals shared by every technique scored in one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LearnerContext {
    pub archetype: Archetype,
    pub behavior: BehaviorStats,
    pub performance: PerformanceSignal,
    pub dominant: StyleDimension,
}

impl LearnerContext {
    /// Derive the context for one learner at a given time.
    pub fn derive(
        style: &LearningStyle,
        quiz_results: &[QuizResult],
        sessions: &[StudySession],
        now: DateTime<Utc>,
    ) -> Self {
        let behavior = BehaviorStats::from_history(quiz_results, sessions, now);
        Self {
            archetype: behavior.nearest_archetype(),
            behavior,
            performance: performance::analyze(quiz_results),
            dominant: style.dominant(),
        }
    }
}

/// Scores a catalog against learner inputs.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine<'a> {
    catalog: &'a Catalog,
    phrasebook: &'a Phrasebook,
}

impl RecommendationEngine<'static> {
    /// An engine over the built-in catalog and English phrasebook.
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin(), Phrasebook::english())
    }
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(catalog: &'a Catalog, phrasebook: &'a Phrasebook) -> Self {
        Self {
            catalog,
            phrasebook,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Rank the catalog for a learner, using the current time for the
    /// session-frequency window.
    pub fn generate(
        &self,
        style: &LearningStyle,
        quiz_results: &[QuizResult],
        sessions: &[StudySession],
        limit: usize,
    ) -> Vec<Recommendation<'a>> {
        self.generate_at(style, quiz_results, sessions, limit, Utc::now())
    }

    /// Rank the catalog for a learner relative to an explicit time.
    pub fn generate_at(
        &self,
        style: &LearningStyle,
        quiz_results: &[QuizResult],
        sessions: &[StudySession],
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<Recommendation<'a>> {
        let context = LearnerContext::derive(style, quiz_results, sessions, now);
        self.rank(style, &context, limit)
    }

    /// The signals the ranking is built from, for display next to it.
    pub fn explain(
        &self,
        style: &LearningStyle,
        quiz_results: &[QuizResult],
        sessions: &[StudySession],
    ) -> LearnerContext {
        self.explain_at(style, quiz_results, sessions, Utc::now())
    }

    pub fn explain_at(
        &self,
        style: &LearningStyle,
        quiz_results: &[QuizResult],
        sessions: &[StudySession],
        now: DateTime<Utc>,
    ) -> LearnerContext {
        LearnerContext::derive(style, quiz_results, sessions, now)
    }

    /// Rank the catalog for an already-derived learner context.
    pub fn rank(
        &self,
        style: &LearningStyle,
        context: &LearnerContext,
        limit: usize,
    ) -> Vec<Recommendation<'a>> {
        tracing::debug!(
            archetype = %context.archetype,
            trend = context.performance.trend,
            consistency = context.performance.consistency,
            dominant = %context.dominant,
            "scoring {} techniques",
            self.catalog.len()
        );

        let mut scored: Vec<Recommendation<'a>> = self
            .catalog
            .iter()
            .map(|technique| Recommendation {
                id: format!("rec-{}", technique.id),
                technique,
                confidence: self.confidence(technique, style, context),
                reasoning: self.reasoning(technique, context),
                personalized_tips: self.tips(context),
            })
            .collect();

        // Stable: equal confidences keep catalog order.
        scored.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        scored.truncate(limit);
        scored
    }

    /// Recompute recommendations for many learners in parallel. Results are in
    /// the same order as `learners`.
    pub fn generate_batch(
        &self,
        learners: &[LearnerProfile],
        limit: usize,
    ) -> Vec<Vec<Recommendation<'a>>> {
        let now = Utc::now();
        learners
            .par_iter()
            .map(|learner| {
                self.generate_at(
                    &learner.style,
                    &learner.quiz_results,
                    &learner.sessions,
                    limit,
                    now,
                )
            })
            .collect()
    }

    /// Confidence that a technique suits the learner, within
    /// `[MIN_CONFIDENCE, MAX_CONFIDENCE]`.
    pub fn confidence(
        &self,
        technique: &StudyTechnique,
        style: &LearningStyle,
        context: &LearnerContext,
    ) -> f64 {
        let mut confidence = match technique.technique_type.dimension() {
            Some(dimension) => style.weight(dimension),
            None => style.max_weight(),
        };
        confidence *= technique.effectiveness;
        confidence *= archetype_adjustment(context.archetype, technique);
        confidence *= context.performance.trend_factor();
        confidence *= context.performance.consistency_factor();
        confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
    }

    /// Short explanation of why a technique was suggested.
    pub fn reasoning(&self, technique: &StudyTechnique, context: &LearnerContext) -> String {
        let mut reasons: Vec<String> = Vec::with_capacity(3);

        let matches_style = technique.technique_type == TechniqueType::Mixed
            || technique.technique_type.dimension() == Some(context.dominant);
        if matches_style {
            reasons.push(self.phrasebook.style_clause(context.dominant));
        }
        if let Some(reason) = self.phrasebook.archetype_reason(context.archetype) {
            reasons.push(reason.to_string());
        }
        if technique.effectiveness > HIGH_EFFECTIVENESS {
            reasons.push(self.phrasebook.high_effectiveness.clone());
        }

        reasons.truncate(MAX_REASONS);
        reasons.join(&self.phrasebook.separator)
    }

    /// Tips for the learner: dominant-style tips first, then archetype tips.
    pub fn tips(&self, context: &LearnerContext) -> Vec<String> {
        self.phrasebook
            .style_tips(context.dominant)
            .iter()
            .take(STYLE_TIPS)
            .chain(self.phrasebook.archetype_tips(context.archetype))
            .take(MAX_TIPS)
            .cloned()
            .collect()
    }
}
