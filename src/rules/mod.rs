//! The validation rule engine.
//!
//! Six independent checks scan a parsed transcript and emit
//! [`ErrorRecord`]s. Each check is a pure function with no state shared
//! between paragraphs or documents; [`run_all`] concatenates their output
//! in the fixed reporting order, which determines the position of entries
//! in a result but carries no other meaning.

pub mod formatting;
pub mod labels;
pub mod questions;
pub mod vocabulary;

use crate::transcript::Transcript;
use crate::transcript::questions::extract_questions;
use serde::{Serialize, Serializer};
use std::fmt;

/// Fixed category tag of one validation failure.
///
/// Serializes as the exact vocabulary string reviewers see in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An extracted question is missing from the reference list.
    QuestionMismatch,
    /// A label-shaped prefix is not one of the recognized labels, or the
    /// text matches a forbidden label pattern.
    InvalidLabel,
    /// An interviewer label is not carried by any bold run.
    HeaderNotBold,
    /// An interviewer intervention has non-bold text.
    BoldFormatting,
    /// A run uses a font other than the required one.
    WrongFont,
    /// A run uses a size other than the required one.
    WrongSize,
    /// A speaker label is followed by no intervention text.
    EmptyIntervention,
}

impl ErrorKind {
    /// The fixed vocabulary string for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QuestionMismatch => "Pregunta no coincide",
            Self::InvalidLabel => "Etiqueta inválida",
            Self::HeaderNotBold => "Encabezado sin negrita",
            Self::BoldFormatting => "Formato en negrita",
            Self::WrongFont => "Fuente incorrecta",
            Self::WrongSize => "Tamaño incorrecto",
            Self::EmptyIntervention => "Intervención vacía tras etiqueta",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One validation failure: the paragraph it happened on, its fixed
/// category, and a human-readable detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    /// 1-based paragraph index.
    #[serde(rename = "linea")]
    pub line: u32,
    #[serde(rename = "tipo_error")]
    pub kind: ErrorKind,
    #[serde(rename = "descripcion")]
    pub description: String,
}

impl ErrorRecord {
    pub fn new(line: u32, kind: ErrorKind, description: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            description: description.into(),
        }
    }
}

/// Run all six validators over one transcript, concatenating their errors
/// in the fixed reporting order: question match, label validity,
/// interviewer bold, font/size, empty intervention, forbidden pattern.
pub fn run_all(transcript: &Transcript, reference: &[String]) -> Vec<ErrorRecord> {
    let extracted = extract_questions(transcript);

    let mut errors = questions::check_question_match(&extracted, reference);
    errors.extend(labels::check_label_validity(transcript));
    errors.extend(formatting::check_interviewer_bold(transcript));
    errors.extend(formatting::check_font_and_size(transcript));
    errors.extend(labels::check_empty_interventions(transcript));
    errors.extend(labels::check_forbidden_patterns(transcript));
    errors
}
