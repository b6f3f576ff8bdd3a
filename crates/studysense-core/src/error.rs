//! Domain error types.
//!
//! The scoring engine itself never fails on valid-shaped input. These errors
//! come from the edges: constructing a style vector by hand, loading a
//! catalog or phrasebook, and the strict record guard.

use thiserror::Error;

/// Errors raised while building or validating studysense inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StudyError {
    /// A learning-style vector had a non-finite, negative, or zero component.
    #[error("invalid learning style: {0}")]
    InvalidStyle(String),

    /// A catalog entry violated a catalog invariant.
    #[error("invalid technique '{id}': {reason}")]
    InvalidTechnique { id: String, reason: String },

    /// Two catalog entries share an id.
    #[error("duplicate technique id: {0}")]
    DuplicateTechnique(String),

    /// A string did not name a known enum variant.
    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    /// The record guard rejected the input.
    #[error("{count} invalid record(s), first: {first}")]
    InvalidRecords { count: usize, first: String },
}

impl StudyError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        StudyError::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }

    /// Returns `true` if the error concerns the technique catalog.
    pub fn is_catalog_error(&self) -> bool {
        matches!(
            self,
            StudyError::InvalidTechnique { .. } | StudyError::DuplicateTechnique(_)
        )
    }
}
