//! Dashboard statistics for a learner's history.

use serde::Serialize;

use crate::model::{QuizResult, StudySession};
use crate::performance::RECENT_WINDOW;

/// Aggregate view of a learner's quiz and session history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearnerSummary {
    pub quiz_count: usize,
    /// Mean quiz score rounded to a whole number, 0 when there are no quizzes.
    pub average_score: u32,
    /// Up to the last five scores, oldest first.
    pub recent_scores: Vec<f64>,
    pub session_count: usize,
    /// Total study time in seconds.
    pub total_study_time: u64,
    /// Mean session rating to one decimal, 0 when there are no sessions.
    pub average_rating: f64,
}

impl LearnerSummary {
    pub fn from_history(quiz_results: &[QuizResult], sessions: &[StudySession]) -> Self {
        let average_score = if quiz_results.is_empty() {
            0
        } else {
            let total: f64 = quiz_results.iter().map(|q| q.score).sum();
            (total / quiz_results.len() as f64).round().max(0.0) as u32
        };

        let start = quiz_results.len().saturating_sub(RECENT_WINDOW);
        let recent_scores = quiz_results[start..].iter().map(|q| q.score).collect();

        let average_rating = if sessions.is_empty() {
            0.0
        } else {
            let total: u32 = sessions.iter().map(|s| u32::from(s.rating)).sum();
            (f64::from(total) / sessions.len() as f64 * 10.0).round() / 10.0
        };

        Self {
            quiz_count: quiz_results.len(),
            average_score,
            recent_scores,
            session_count: sessions.len(),
            total_study_time: sessions
                .iter()
                .fold(0u64, |total, s| total.saturating_add(s.duration)),
            average_rating,
        }
    }

    /// Total study time as "Xh Ym" or "Ym".
    pub fn study_time_display(&self) -> String {
        let minutes = self.total_study_time / 60;
        match (minutes / 60, minutes % 60) {
            (0, m) => format!("{m}m"),
            (h, m) => format!("{h}h {m}m"),
        }
    }
}

/// Verbal label for a 1-5 session rating.
pub fn rating_label(rating: u8) -> &'static str {
    match rating {
        5 => "Excellent",
        4 => "Very Good",
        3 => "Good",
        2 => "Fair",
        _ => "Needs Improvement",
    }
}
