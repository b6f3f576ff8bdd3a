//! The `studysense questions` command.

use anyhow::Result;

use studysense_core::style::{StyleClassifier, MAX_RATING, MIN_RATING};

pub fn execute() -> Result<()> {
    let classifier = StyleClassifier;
    println!("Rate each statement from {MIN_RATING} (disagree) to {MAX_RATING} (agree).\n");
    for (i, q) in classifier.instrument().iter().enumerate() {
        println!("{:>2}. [{}] {}", i + 1, q.id, q.prompt);
        println!(
            "    {} (weight {:.1})",
            q.dimension.display_name(),
            q.weight
        );
    }
    println!("\nSave your answers as a JSON object of id -> rating, e.g.");
    println!("  {{\"timeOnVisuals\": 4, \"likesMusic\": 2, ...}}");
    Ok(())
}
