//! Unified error types for the transcript validation engine.
//!
//! This module provides a unified error type that encompasses container,
//! markup, and batch-input errors, presenting a consistent API to users.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
