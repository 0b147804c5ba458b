//! Common types and utilities shared across the crate.
//!
//! This module provides the unified error type used by both the OOXML
//! parsers and the rule engine, ensuring a consistent API for users.

// Submodule declarations
pub mod error;

// Re-exports for convenience
pub use error::{Error, Result};
