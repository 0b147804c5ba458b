//! Question extraction from transcript paragraphs.
//!
//! Questions are sentence-like fragments terminated by `?`, optionally
//! opened by the Spanish `¿`. A paragraph may contain several.

use crate::rules::vocabulary::QUESTION_FRAGMENT_RE;
use crate::transcript::Transcript;

/// One question found in a paragraph, tagged with the paragraph index.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedQuestion {
    /// 1-based paragraph index the question was found in.
    pub line: u32,
    /// Trimmed question text, including the terminating `?`.
    pub text: String,
}

/// Scan every paragraph for question-like fragments, in document order.
pub fn extract_questions(transcript: &Transcript) -> Vec<ExtractedQuestion> {
    let mut questions = Vec::new();
    for para in &transcript.paragraphs {
        // The stored paragraph text is trimmed; trimming can remove the
        // whole body of a fragment like `"   ?"`, so scan the raw text.
        for m in QUESTION_FRAGMENT_RE.find_iter(&para.raw_text()) {
            let trimmed = m.as_str().trim();
            if !trimmed.is_empty() {
                questions.push(ExtractedQuestion {
                    line: para.index,
                    text: trimmed.to_string(),
                });
            }
        }
    }
    questions
}
