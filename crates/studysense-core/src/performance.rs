//! Short-term trend and consistency of recent quiz scores.

use serde::{Deserialize, Serialize};

use crate::model::QuizResult;

/// Number of most recent quiz results considered.
pub const RECENT_WINDOW: usize = 5;

/// Trend and consistency derived from recent quiz scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSignal {
    /// Mean score change per quiz, in fractions of 100 points. Negative when
    /// scores are declining.
    pub trend: f64,
    /// 1.0 for perfectly stable scores, falling towards 0.0 as variance grows.
    pub consistency: f64,
}

impl PerformanceSignal {
    /// The prior used when there is not enough history to measure anything.
    pub const NEUTRAL: PerformanceSignal = PerformanceSignal {
        trend: 0.0,
        consistency: 0.5,
    };

    /// Confidence multiplier from the trend: improving learners are amplified,
    /// declining ones dampened.
    pub fn trend_factor(&self) -> f64 {
        1.0 + self.trend * 0.2
    }

    /// Confidence multiplier from consistency, between 0.8 and 1.2.
    pub fn consistency_factor(&self) -> f64 {
        0.8 + self.consistency * 0.4
    }
}

impl Default for PerformanceSignal {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Analyze the most recent quiz results, oldest first.
pub fn analyze(quiz_results: &[QuizResult]) -> PerformanceSignal {
    if quiz_results.len() < 2 {
        return PerformanceSignal::NEUTRAL;
    }

    let start = quiz_results.len().saturating_sub(RECENT_WINDOW);
    let scores: Vec<f64> = quiz_results[start..].iter().map(|q| q.score).collect();
    let n = scores.len() as f64;

    let trend = scores
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / 100.0)
        .sum::<f64>()
        / (n - 1.0);

    // Population variance over the same window, scaled into [0, 1].
    let mean = scores.iter().sum::<f64>() / n;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    let consistency = (1.0 - variance / 1000.0).max(0.0);

    PerformanceSignal { trend, consistency }
}
