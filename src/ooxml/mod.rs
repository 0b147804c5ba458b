//! Office Open XML (OOXML) format readers.
//!
//! This module provides parsing of the two OOXML inputs the validation
//! engine consumes: Word transcripts (.docx) and Excel reference workbooks
//! (.xlsx).
//!
//! # Architecture
//!
//! The module is organized into layers:
//!
//! 1. **Container Layer** (`container`): ZIP package handling, part access
//! 2. **Format-Specific Readers**:
//!    - `docx`: transcript paragraphs and runs from WordprocessingML
//!    - `xlsx`: reference question column from SpreadsheetML
//!
//! Both readers parse streamingly with quick-xml and match element and
//! attribute names by local name, so any namespace prefix is accepted.
//!
//! # Example: Parsing a transcript
//!
//! ```rust,no_run
//! use tamarindo::ooxml::docx::Transcript;
//!
//! let bytes = std::fs::read("entrevista.docx")?;
//! let transcript = Transcript::from_bytes(&bytes)?;
//! println!("transcript has {} paragraphs", transcript.paragraphs.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod container;
pub mod docx;
pub mod xlsx;

use quick_xml::events::{BytesRef, BytesStart};

/// Read an attribute by local name, so `w:val` and bare `val` both match.
pub(crate) fn attr_local(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok())
        .map(|value| value.into_owned())
}

/// Resolve a reference event from text content: numeric character
/// references (`&#191;`, `&#xBF;`) and the five predefined XML entities.
/// OOXML parts carry no DTD, so anything else has no resolution.
pub(crate) fn resolve_reference(e: &BytesRef) -> Option<String> {
    match e.resolve_char_ref() {
        Ok(Some(ch)) => Some(ch.to_string()),
        _ => {
            let name = String::from_utf8_lossy(e.as_ref());
            quick_xml::escape::resolve_predefined_entity(&name).map(|s| s.to_string())
        },
    }
}
