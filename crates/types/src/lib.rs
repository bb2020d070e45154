//! # Oncora Types
//!
//! Validated primitive types shared across the Oncora workspace.
//!
//! Contains:
//! - [`NonEmptyText`], a trimmed string guaranteed to hold content
//! - The closed categorical enumerations used by case records ([`CancerSubtype`], [`Region`],
//!   [`AgeRange`], [`Sex`], [`Outcome`])
//!
//! Categorical values travel on the wire as kebab-case strings. Parsing is strict: values are
//! expected to be pre-normalised, so `"Hodgkin-Lymphoma"` is rejected.

mod categories;
mod text;

pub use categories::{AgeRange, CancerSubtype, Outcome, Region, Sex};
pub use text::NonEmptyText;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors returned when a string does not name a known category value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryError {
    #[error("unknown {kind} value: '{value}'")]
    Unknown { kind: &'static str, value: String },
}
