//! Per-document analysis: run the rule engine over a transcript and shape
//! the outcome into the reporting contract.
//!
//! [`AnalysisResult`] serializes to the JSON shape consumers of the engine
//! expect: `archivo` (file name), `resumen` (error counts by kind, in
//! first-occurrence order) and `errores` (every violation, in engine
//! order).

use crate::common::{Error, Result};
use crate::rules::{self, ErrorKind, ErrorRecord};
use crate::transcript::Transcript;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Error counts grouped by kind.
///
/// Entries keep the order in which each kind first occurred, so the
/// rendered summary mirrors the error list instead of an alphabetical
/// reshuffle. Serializes as a JSON map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary(Vec<(ErrorKind, u32)>);

impl Summary {
    /// Count errors by kind, keeping first-occurrence order.
    pub fn from_errors(errors: &[ErrorRecord]) -> Self {
        let mut counts: Vec<(ErrorKind, u32)> = Vec::new();
        for error in errors {
            match counts.iter_mut().find(|(kind, _)| *kind == error.kind) {
                Some((_, count)) => *count += 1,
                None => counts.push((error.kind, 1)),
            }
        }
        Self(counts)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(kind, count)` entries in summary order.
    pub fn iter(&self) -> impl Iterator<Item = (ErrorKind, u32)> + '_ {
        self.0.iter().copied()
    }
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (kind, count) in &self.0 {
            map.serialize_entry(kind.as_str(), count)?;
        }
        map.end()
    }
}

/// Full analysis outcome for one document.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// File name of the analyzed document, as uploaded.
    #[serde(rename = "archivo")]
    pub file_name: String,
    /// Error counts grouped by kind.
    #[serde(rename = "resumen")]
    pub summary: Summary,
    /// Every rule violation, in engine order.
    #[serde(rename = "errores")]
    pub errors: Vec<ErrorRecord>,
}

/// Run every validator over a parsed transcript.
pub fn analyze_transcript(
    transcript: &Transcript,
    file_name: impl Into<String>,
    reference: &[String],
) -> AnalysisResult {
    let errors = rules::run_all(transcript, reference);
    AnalysisResult {
        file_name: file_name.into(),
        summary: Summary::from_errors(&errors),
        errors,
    }
}

/// Parse DOCX bytes and analyze the resulting transcript.
///
/// A document that fails to parse is reported with its file name so batch
/// callers surface which upload was broken.
pub fn analyze_document_bytes(
    file_name: &str,
    bytes: &[u8],
    reference: &[String],
) -> Result<AnalysisResult> {
    let transcript = Transcript::from_bytes(bytes).map_err(|e| match e {
        Error::MalformedDocument(msg) => {
            Error::MalformedDocument(format!("{}: {}", file_name, msg))
        },
        other => other,
    })?;
    Ok(analyze_transcript(&transcript, file_name, reference))
}
