//! Behavioural archetype assignment from quiz and session history.
//!
//! A learner's history is summarised into a [`BehaviorStats`] triple and
//! assigned to the nearest archetype reference profile.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StudyError;
use crate::model::{QuizResult, StudySession};

/// Quiz score that counts as a success.
pub const PASSING_SCORE: f64 = 70.0;
/// Length of the trailing window used for session frequency.
pub const FREQUENCY_WINDOW_DAYS: i64 = 7;
/// Scale applied to the success-rate difference so it weighs on the same
/// order of magnitude as minutes and sessions per day.
pub const SUCCESS_RATE_SCALE: f64 = 100.0;

const DEFAULT_AVG_TIME: f64 = 20.0;
const DEFAULT_SUCCESS_RATE: f64 = 0.7;
const DEFAULT_SESSION_FREQUENCY: f64 = 1.0;

/// A fixed behavioural archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    FastLearner,
    Methodical,
    Struggling,
    Inconsistent,
}

impl Archetype {
    /// All archetypes in enumeration order; distance ties go to the earlier one.
    pub const ALL: [Archetype; 4] = [
        Archetype::FastLearner,
        Archetype::Methodical,
        Archetype::Struggling,
        Archetype::Inconsistent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::FastLearner => "fast-learner",
            Archetype::Methodical => "methodical",
            Archetype::Struggling => "struggling",
            Archetype::Inconsistent => "inconsistent",
        }
    }

    /// Reference profile used for distance comparison.
    pub fn profile(self) -> BehaviorStats {
        let (avg_time, success_rate, session_frequency) = match self {
            Archetype::FastLearner => (15.0, 0.8, 2.5),
            Archetype::Methodical => (35.0, 0.9, 1.2),
            Archetype::Struggling => (25.0, 0.6, 0.8),
            Archetype::Inconsistent => (20.0, 0.7, 1.8),
        };
        BehaviorStats {
            avg_time,
            success_rate,
            session_frequency,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "fast-learner" => Ok(Archetype::FastLearner),
            "methodical" => Ok(Archetype::Methodical),
            "struggling" => Ok(Archetype::Struggling),
            "inconsistent" => Ok(Archetype::Inconsistent),
            other => Err(StudyError::unknown("archetype", other)),
        }
    }
}

/// Summary statistics of a learner's behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehaviorStats {
    /// Mean minutes per quiz.
    pub avg_time: f64,
    /// Fraction of quizzes at or above [`PASSING_SCORE`].
    pub success_rate: f64,
    /// Sessions per day over the trailing window.
    pub session_frequency: f64,
}

impl BehaviorStats {
    /// Summarise a history relative to `now`. Empty inputs fall back to
    /// neutral defaults rather than failing.
    pub fn from_history(
        quiz_results: &[QuizResult],
        sessions: &[StudySession],
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            avg_time: average_time(quiz_results),
            success_rate: success_rate(quiz_results),
            session_frequency: session_frequency(sessions, now),
        }
    }

    /// Euclidean distance with the success-rate axis scaled by
    /// [`SUCCESS_RATE_SCALE`].
    pub fn distance(&self, other: &BehaviorStats) -> f64 {
        let time = self.avg_time - other.avg_time;
        let success = (self.success_rate - other.success_rate) * SUCCESS_RATE_SCALE;
        let frequency = self.session_frequency - other.session_frequency;
        (time.powi(2) + success.powi(2) + frequency.powi(2)).sqrt()
    }

    /// The archetype whose reference profile is closest to these stats.
    pub fn nearest_archetype(&self) -> Archetype {
        let mut closest = Archetype::ALL[0];
        let mut min_distance = f64::INFINITY;
        for archetype in Archetype::ALL {
            let distance = self.distance(&archetype.profile());
            if distance < min_distance {
                min_distance = distance;
                closest = archetype;
            }
        }
        closest
    }
}

/// Assign an archetype using the current wall-clock time.
pub fn cluster(quiz_results: &[QuizResult], sessions: &[StudySession]) -> Archetype {
    cluster_at(quiz_results, sessions, Utc::now())
}

/// Assign an archetype with an explicit reference time for the session window.
pub fn cluster_at(
    quiz_results: &[QuizResult],
    sessions: &[StudySession],
    now: DateTime<Utc>,
) -> Archetype {
    BehaviorStats::from_history(quiz_results, sessions, now).nearest_archetype()
}

fn average_time(quiz_results: &[QuizResult]) -> f64 {
    if quiz_results.is_empty() {
        return DEFAULT_AVG_TIME;
    }
    quiz_results.iter().map(|q| q.time_spent).sum::<f64>() / quiz_results.len() as f64
}

fn success_rate(quiz_results: &[QuizResult]) -> f64 {
    if quiz_results.is_empty() {
        return DEFAULT_SUCCESS_RATE;
    }
    let passed = quiz_results
        .iter()
        .filter(|q| q.score >= PASSING_SCORE)
        .count();
    passed as f64 / quiz_results.len() as f64
}

fn session_frequency(sessions: &[StudySession], now: DateTime<Utc>) -> f64 {
    if sessions.is_empty() {
        return DEFAULT_SESSION_FREQUENCY;
    }
    let window_start = now - Duration::days(FREQUENCY_WINDOW_DAYS);
    let recent = sessions
        .iter()
        .filter(|s| s.completed_at > window_start)
        .count();
    recent as f64 / FREQUENCY_WINDOW_DAYS as f64
}
