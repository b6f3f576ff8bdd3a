//! Input validation layered in front of the engine.
//!
//! The engine assumes well-formed records and never re-checks them. Callers
//! that accept records from outside (files, forms) run them through these
//! checks first and decide whether warnings are fatal.

use std::fmt;

use crate::catalog::Catalog;
use crate::error::StudyError;
use crate::model::{QuizResult, StudySession};
use crate::profile::LearnerProfile;
use crate::style::{Responses, StyleClassifier, MAX_RATING, MIN_RATING};

/// A problem found in an input record.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// The record the warning is about (e.g. `quiz[2]` or a technique id).
    pub record: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    pub fn for_record(record: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
            message: message.into(),
        }
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self {
            record: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.record {
            Some(record) => write!(f, "[{record}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Check assessment responses: ratings within 1–5 and known question ids.
pub fn validate_responses(responses: &Responses) -> Vec<ValidationWarning> {
    let classifier = StyleClassifier;
    let mut warnings = Vec::new();

    for (id, &rating) in responses {
        if classifier.question(id).is_none() {
            warnings.push(ValidationWarning::for_record(id, "unknown question id"));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            warnings.push(ValidationWarning::for_record(
                id,
                format!("rating {rating} is outside {MIN_RATING}-{MAX_RATING}"),
            ));
        }
    }

    let missing = classifier
        .instrument()
        .iter()
        .filter(|q| !responses.contains_key(q.id))
        .count();
    if missing > 0 {
        warnings.push(ValidationWarning::general(format!(
            "{missing} question(s) unanswered; they count as 0"
        )));
    }

    warnings
}

/// Check quiz history: score range, time, attempts, chronological order.
pub fn validate_quiz_results(quiz_results: &[QuizResult]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (i, q) in quiz_results.iter().enumerate() {
        let record = format!("quiz[{i}]");
        if !q.score.is_finite() || !(0.0..=100.0).contains(&q.score) {
            warnings.push(ValidationWarning::for_record(
                &record,
                format!("score {} is outside 0-100", q.score),
            ));
        }
        if !q.time_spent.is_finite() || q.time_spent < 0.0 {
            warnings.push(ValidationWarning::for_record(
                &record,
                format!("time_spent {} must be a non-negative number", q.time_spent),
            ));
        }
        if q.attempts == 0 {
            warnings.push(ValidationWarning::for_record(
                &record,
                "attempts must be at least 1",
            ));
        }
    }

    for (i, pair) in quiz_results.windows(2).enumerate() {
        if pair[1].completed_at < pair[0].completed_at {
            warnings.push(ValidationWarning::for_record(
                format!("quiz[{}]", i + 1),
                "completed before the previous quiz; history must be chronological",
            ));
        }
    }

    warnings
}

/// Check session history: rating range, chronological order, and (when a
/// catalog is given) that each technique id exists.
pub fn validate_sessions(
    sessions: &[StudySession],
    catalog: Option<&Catalog>,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (i, s) in sessions.iter().enumerate() {
        let record = format!("session[{i}]");
        if !(MIN_RATING..=MAX_RATING).contains(&s.rating) {
            warnings.push(ValidationWarning::for_record(
                &record,
                format!("rating {} is outside {MIN_RATING}-{MAX_RATING}", s.rating),
            ));
        }
        if let Some(catalog) = catalog {
            if catalog.get(&s.technique_id).is_none() {
                warnings.push(ValidationWarning::for_record(
                    &record,
                    format!("unknown technique id '{}'", s.technique_id),
                ));
            }
        }
    }

    for (i, pair) in sessions.windows(2).enumerate() {
        if pair[1].completed_at < pair[0].completed_at {
            warnings.push(ValidationWarning::for_record(
                format!("session[{}]", i + 1),
                "completed before the previous session; history must be chronological",
            ));
        }
    }

    warnings
}

/// Run every history check for a learner profile.
pub fn validate_profile(profile: &LearnerProfile, catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = validate_quiz_results(&profile.quiz_results);
    warnings.extend(validate_sessions(&profile.sessions, Some(catalog)));
    warnings
}

/// Turn warnings into an error for callers that want strict input.
pub fn ensure_valid(warnings: &[ValidationWarning]) -> Result<(), StudyError> {
    match warnings.first() {
        None => Ok(()),
        Some(first) => Err(StudyError::InvalidRecords {
            count: warnings.len(),
            first: first.to_string(),
        }),
    }
}
