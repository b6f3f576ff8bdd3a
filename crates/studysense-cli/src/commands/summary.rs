//! The `studysense summary` command.

use std::path::PathBuf;

use anyhow::Result;

use studysense_core::summary::{rating_label, LearnerSummary};
use studysense_core::LearnerProfile;

pub fn execute(profile_path: PathBuf) -> Result<()> {
    let profile = LearnerProfile::load_json(&profile_path)?;
    let summary = LearnerSummary::from_history(&profile.quiz_results, &profile.sessions);

    println!("{} ({} learner)", profile.name, profile.dominant_style());
    println!("  Quizzes taken:   {}", summary.quiz_count);
    println!("  Average score:   {}%", summary.average_score);
    if !summary.recent_scores.is_empty() {
        let recent: Vec<String> = summary
            .recent_scores
            .iter()
            .map(|s| format!("{s:.0}"))
            .collect();
        println!("  Recent scores:   {}", recent.join(", "));
    }
    println!("  Study sessions:  {}", summary.session_count);
    println!("  Study time:      {}", summary.study_time_display());
    if summary.session_count > 0 {
        println!(
            "  Average rating:  {:.1} ({})",
            summary.average_rating,
            rating_label(summary.average_rating.round() as u8)
        );
    }
    Ok(())
}
