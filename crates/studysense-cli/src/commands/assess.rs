//! The `studysense assess` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use studysense_core::guard::validate_responses;
use studysense_core::profile::{load_responses, LearnerProfile};
use studysense_core::style::StyleClassifier;

pub fn execute(responses_path: PathBuf, name: String, output: Option<PathBuf>) -> Result<()> {
    let responses = load_responses(&responses_path)?;
    for w in validate_responses(&responses) {
        tracing::warn!("{w}");
    }

    let profile = LearnerProfile::from_assessment(name, &responses, &StyleClassifier, Utc::now());
    let dominant = profile.dominant_style();

    println!("Learning style for {}:", profile.name);
    for (dimension, weight) in profile.style.iter() {
        let marker = if dimension == dominant { " *" } else { "" };
        println!(
            "  {:<16} {:>5.1}%{marker}",
            dimension.display_name(),
            weight * 100.0
        );
    }
    println!("Dominant style: {}", dominant.display_name());

    if !profile.preferences.is_empty() {
        println!("Strong preferences: {}", profile.preferences.join(", "));
    }

    if let Some(path) = output {
        profile.save_json(&path)?;
        println!("Profile saved to {}", path.display());
    }

    Ok(())
}
