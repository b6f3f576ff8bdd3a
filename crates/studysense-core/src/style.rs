//! Learning-style classification from Likert-scale assessment responses.

use std::collections::BTreeMap;

use crate::model::{LearningStyle, StyleDimension};

/// Assessment responses: question id → rating on a 1–5 Likert scale.
pub type Responses = BTreeMap<String, u8>;

/// Lowest rating a question accepts.
pub const MIN_RATING: u8 = 1;
/// Highest rating a question accepts.
pub const MAX_RATING: u8 = 5;
/// Ratings at or above this count as a stated preference.
pub const PREFERENCE_THRESHOLD: u8 = 4;

/// A single diagnostic question of the assessment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Question {
    pub id: &'static str,
    pub dimension: StyleDimension,
    /// Contribution of one rating point to the dimension's raw score.
    pub weight: f64,
    pub prompt: &'static str,
}

/// The assessment instrument, in the order it is presented to a learner.
pub static INSTRUMENT: [Question; 12] = [
    Question {
        id: "timeOnVisuals",
        dimension: StyleDimension::Visual,
        weight: 0.3,
        prompt: "I learn better when information is presented with charts, diagrams, or visual aids",
    },
    Question {
        id: "prefersDiagrams",
        dimension: StyleDimension::Visual,
        weight: 0.4,
        prompt: "I prefer to see the overall picture before focusing on details",
    },
    Question {
        id: "colorCoding",
        dimension: StyleDimension::Visual,
        weight: 0.3,
        prompt: "I use colors, highlights, or visual markers when studying",
    },
    Question {
        id: "likesMusic",
        dimension: StyleDimension::Auditory,
        weight: 0.3,
        prompt: "I often study better with background music or sounds",
    },
    Question {
        id: "prefersDiscussion",
        dimension: StyleDimension::Auditory,
        weight: 0.4,
        prompt: "I learn best through discussions and verbal explanations",
    },
    Question {
        id: "readAloud",
        dimension: StyleDimension::Auditory,
        weight: 0.3,
        prompt: "I often read aloud or talk through problems to understand them",
    },
    Question {
        id: "takesNotes",
        dimension: StyleDimension::ReadingWriting,
        weight: 0.4,
        prompt: "I learn best by taking detailed written notes",
    },
    Question {
        id: "readsInstructions",
        dimension: StyleDimension::ReadingWriting,
        weight: 0.3,
        prompt: "I prefer to read instructions carefully before starting a task",
    },
    Question {
        id: "writesToLearn",
        dimension: StyleDimension::ReadingWriting,
        weight: 0.3,
        prompt: "Writing summaries helps me remember information better",
    },
    Question {
        id: "needsMovement",
        dimension: StyleDimension::Kinesthetic,
        weight: 0.4,
        prompt: "I need to move around or use my hands while learning",
    },
    Question {
        id: "learnsByDoing",
        dimension: StyleDimension::Kinesthetic,
        weight: 0.3,
        prompt: "I learn best through hands-on experience and practice",
    },
    Question {
        id: "usesGestures",
        dimension: StyleDimension::Kinesthetic,
        weight: 0.3,
        prompt: "I use gestures and body movement when explaining concepts",
    },
];

/// Converts assessment responses into a [`LearningStyle`].
///
/// Pure: the same responses always produce the same vector, and missing
/// answers degrade to the score floor instead of failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleClassifier;

impl StyleClassifier {
    /// The questions this classifier scores.
    pub fn instrument(&self) -> &'static [Question] {
        &INSTRUMENT
    }

    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&'static Question> {
        INSTRUMENT.iter().find(|q| q.id == id)
    }

    /// Classify a set of responses. Unknown question ids are ignored.
    pub fn classify(&self, responses: &Responses) -> LearningStyle {
        let raw = StyleDimension::ALL.map(|dim| self.raw_score(dim, responses));
        LearningStyle::from_raw_scores(raw)
    }

    /// Weighted sum of the ratings for one dimension, before flooring.
    pub fn raw_score(&self, dimension: StyleDimension, responses: &Responses) -> f64 {
        INSTRUMENT
            .iter()
            .filter(|q| q.dimension == dimension)
            .fold(0.0, |score, q| {
                let rating = responses.get(q.id).copied().map(f64::from).unwrap_or(0.0);
                score + rating * q.weight
            })
    }

    /// Question ids the learner agreed with, in instrument order.
    pub fn preferences(&self, responses: &Responses) -> Vec<String> {
        INSTRUMENT
            .iter()
            .filter(|q| {
                responses
                    .get(q.id)
                    .is_some_and(|&rating| rating >= PREFERENCE_THRESHOLD)
            })
            .map(|q| q.id.to_string())
            .collect()
    }
}
