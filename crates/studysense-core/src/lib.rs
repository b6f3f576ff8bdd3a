//! Study-technique recommendation engine for studysense.
//!
//! Classifies a learner's style from a short questionnaire, places their quiz
//! and session history in a behavioural archetype, reads the trend of their
//! recent scores, and ranks a catalog of study techniques with a confidence,
//! a short reasoning string, and personalized tips for each.

pub mod behavior;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod guard;
pub mod model;
pub mod performance;
pub mod phrasebook;
pub mod profile;
pub mod style;
pub mod summary;

pub use catalog::Catalog;
pub use engine::RecommendationEngine;
pub use error::StudyError;
pub use model::{LearningStyle, QuizResult, Recommendation, StudySession, StudyTechnique};
pub use phrasebook::Phrasebook;
pub use profile::LearnerProfile;
