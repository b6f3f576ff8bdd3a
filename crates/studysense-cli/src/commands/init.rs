//! The `studysense init` command.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};

use studysense_core::config::{CONFIG_FILE_NAME, STARTER_CONFIG};
use studysense_core::model::{QuizResult, StudySession};
use studysense_core::profile::LearnerProfile;
use studysense_core::style::{Responses, StyleClassifier};

const EXAMPLE_PROFILE: &str = "profiles/example.json";

pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE_NAME).exists() {
        println!("{CONFIG_FILE_NAME} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE_NAME, STARTER_CONFIG)
            .with_context(|| format!("failed to write {CONFIG_FILE_NAME}"))?;
        println!("Created {CONFIG_FILE_NAME}");
    }

    let example_path = Path::new(EXAMPLE_PROFILE);
    if example_path.exists() {
        println!("{EXAMPLE_PROFILE} already exists, skipping.");
    } else {
        example_profile().save_json(example_path)?;
        println!("Created {EXAMPLE_PROFILE}");
    }

    println!("\nNext steps:");
    println!("  1. Run: studysense questions");
    println!("  2. Run: studysense assess --responses answers.json --output profiles/me.json");
    println!("  3. Run: studysense recommend --profile {EXAMPLE_PROFILE}");

    Ok(())
}

/// A visual learner with a week of improving quiz scores.
fn example_profile() -> LearnerProfile {
    let responses: Responses = [
        ("timeOnVisuals", 5u8),
        ("prefersDiagrams", 5),
        ("colorCoding", 4),
        ("likesMusic", 2),
        ("prefersDiscussion", 3),
        ("readAloud", 2),
        ("takesNotes", 3),
        ("readsInstructions", 3),
        ("writesToLearn", 2),
        ("needsMovement", 2),
        ("learnsByDoing", 3),
        ("usesGestures", 2),
    ]
    .into_iter()
    .map(|(id, rating)| (id.to_string(), rating))
    .collect();

    let now = Utc::now();
    let mut profile =
        LearnerProfile::from_assessment("Example Learner", &responses, &StyleClassifier, now);

    profile.quiz_results = [(62.0, 24.0), (70.0, 21.0), (78.0, 18.0), (85.0, 16.0)]
        .into_iter()
        .enumerate()
        .map(|(i, (score, time_spent))| QuizResult {
            score,
            topic: "biology".to_string(),
            time_spent,
            attempts: 1,
            completed_at: now - Duration::days(6 - 2 * i as i64),
        })
        .collect();
    profile.sessions = vec![
        StudySession {
            technique_id: "1".to_string(),
            duration: 900,
            rating: 5,
            notes: "Flashcards before the quiz".to_string(),
            completed_at: now - Duration::days(5),
        },
        StudySession {
            technique_id: "5".to_string(),
            duration: 2100,
            rating: 4,
            notes: String::new(),
            completed_at: now - Duration::days(1),
        },
    ];
    profile
}
