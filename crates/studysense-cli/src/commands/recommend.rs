//! The `studysense recommend` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use serde::Serialize;

use studysense_core::config::{load_config_from, OutputFormat};
use studysense_core::engine::LearnerContext;
use studysense_core::guard::{ensure_valid, validate_profile};
use studysense_core::{LearnerProfile, Recommendation, RecommendationEngine};

use super::{resolve_catalog, resolve_phrasebook};

#[derive(Serialize)]
struct RecommendOutput<'a> {
    learner: &'a str,
    context: &'a LearnerContext,
    recommendations: &'a [Recommendation<'a>],
}

#[allow(clippy::too_many_arguments)]
pub fn execute(
    profile_path: PathBuf,
    limit: Option<usize>,
    catalog_path: Option<PathBuf>,
    phrasebook_path: Option<PathBuf>,
    format: Option<OutputFormat>,
    strict: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let limit = limit.unwrap_or(config.limit);
    let format = format.unwrap_or(config.format);
    let strict = strict || config.strict;

    let catalog = resolve_catalog(catalog_path.or(config.catalog).as_deref())?;
    let phrasebook = resolve_phrasebook(phrasebook_path.or(config.phrasebook).as_deref())?;
    let profile = LearnerProfile::load_json(&profile_path)?;

    let warnings = validate_profile(&profile, &catalog);
    if strict {
        ensure_valid(&warnings)?;
    } else {
        for w in &warnings {
            tracing::warn!("{w}");
        }
    }

    let engine = RecommendationEngine::new(&catalog, &phrasebook);
    let context = engine.explain(&profile.style, &profile.quiz_results, &profile.sessions);
    let recommendations = engine.rank(&profile.style, &context, limit);

    match format {
        OutputFormat::Json => {
            let output = RecommendOutput {
                learner: &profile.name,
                context: &context,
                recommendations: &recommendations,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => print_table(&profile, &context, &recommendations),
    }

    Ok(())
}

fn print_table(profile: &LearnerProfile, context: &LearnerContext, recs: &[Recommendation<'_>]) {
    println!(
        "{}: {} learner, {} (trend {:+.2}, consistency {:.2})",
        profile.name,
        context.dominant.display_name(),
        context.archetype,
        context.performance.trend,
        context.performance.consistency,
    );

    if recs.is_empty() {
        println!("No techniques to recommend.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Technique",
        "Type",
        "Difficulty",
        "Time",
        "Confidence",
        "Why",
    ]);
    for (i, rec) in recs.iter().enumerate() {
        let t = rec.technique;
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&t.name),
            Cell::new(t.technique_type),
            Cell::new(t.difficulty),
            Cell::new(format!("{} min", t.estimated_time)),
            Cell::new(format!("{:.0}%", rec.confidence * 100.0)),
            Cell::new(&rec.reasoning),
        ]);
    }
    println!("{table}");

    // Tips depend only on the learner, so every row carries the same list.
    println!("\nTips:");
    for tip in &recs[0].personalized_tips {
        println!("  - {tip}");
    }
}
