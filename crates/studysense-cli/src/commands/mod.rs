//! Subcommand implementations and the input loading they share.

pub mod assess;
pub mod catalog;
pub mod init;
pub mod questions;
pub mod recommend;
pub mod summary;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use studysense_core::catalog::load_catalog;
use studysense_core::{Catalog, Phrasebook};

/// The catalog at `path`, or the built-in one.
pub(crate) fn resolve_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let catalog = load_catalog(path)?;
            tracing::info!(
                "loaded {} techniques from {}",
                catalog.len(),
                path.display()
            );
            Ok(catalog)
        }
        None => Ok(Catalog::builtin().clone()),
    }
}

/// The phrasebook at `path`, or the built-in English one.
pub(crate) fn resolve_phrasebook(path: Option<&Path>) -> Result<Phrasebook> {
    match path {
        Some(path) => Phrasebook::load(path),
        None => Ok(Phrasebook::default()),
    }
}
