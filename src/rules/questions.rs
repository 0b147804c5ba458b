//! Cross-check extracted questions against the reference list.

use super::{ErrorKind, ErrorRecord};
use crate::transcript::questions::ExtractedQuestion;

/// Every extracted question must appear verbatim in the reference list.
///
/// Comparison is exact string equality; duplicates are checked (and
/// reported) individually.
pub fn check_question_match(
    extracted: &[ExtractedQuestion],
    reference: &[String],
) -> Vec<ErrorRecord> {
    extracted
        .iter()
        .filter(|question| !reference.contains(&question.text))
        .map(|question| {
            ErrorRecord::new(
                question.line,
                ErrorKind::QuestionMismatch,
                format!("'{}' no está en la matriz de referencia", question.text),
            )
        })
        .collect()
}
