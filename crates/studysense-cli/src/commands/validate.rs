//! The `studysense validate` command.

use std::path::PathBuf;

use anyhow::Result;

use studysense_core::catalog::validate_catalog;
use studysense_core::guard::{validate_profile, ValidationWarning};
use studysense_core::LearnerProfile;

use super::resolve_catalog;

pub fn execute(profile_path: Option<PathBuf>, catalog_path: Option<PathBuf>) -> Result<()> {
    let catalog = resolve_catalog(catalog_path.as_deref())?;
    let mut total_warnings = 0;

    if let Some(path) = &catalog_path {
        println!("Catalog: {} ({} techniques)", path.display(), catalog.len());
        let warnings = validate_catalog(&catalog);
        print_warnings(&warnings);
        total_warnings += warnings.len();
    }

    if let Some(path) = &profile_path {
        let profile = LearnerProfile::load_json(path)?;
        println!(
            "Profile: {} ({} quizzes, {} sessions)",
            profile.name,
            profile.quiz_results.len(),
            profile.sessions.len()
        );
        let warnings = validate_profile(&profile, &catalog);
        print_warnings(&warnings);
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All inputs valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn print_warnings(warnings: &[ValidationWarning]) {
    for w in warnings {
        let prefix = w
            .record
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
}
