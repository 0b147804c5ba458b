//! Transcript document model.
//!
//! This module provides the owned paragraph/run model the rule engine
//! operates on. The shape mirrors the view a transcript reviewer has of a
//! Word document: an ordered list of paragraphs, each with its visible
//! text and the formatting runs it is built from.
//!
//! The model is plain data. It is produced by the DOCX reader
//! (`crate::ooxml::docx`) but can just as well be constructed directly,
//! which is how the rule validators are tested.
//!
//! # Example
//!
//! ```
//! use tamarindo::{Paragraph, Run, Transcript};
//!
//! let transcript = Transcript::new(vec![Paragraph::from_runs(
//!     1,
//!     vec![Run::new("ENTREVISTADOR: ¿Cómo estás?", true)],
//! )]);
//!
//! assert_eq!(transcript.paragraphs[0].text, "ENTREVISTADOR: ¿Cómo estás?");
//! ```

pub mod questions;

use crate::common::Result;
use smallvec::SmallVec;
use std::borrow::Cow;

/// A formatting-homogeneous fragment of text within a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// Fragment text, untrimmed; tabs and breaks appear as `\t` and `\n`.
    pub text: String,
    /// Bold flag; a run without an explicit bold property is not bold.
    pub bold: bool,
    /// Font name, when the run sets one.
    pub font_name: Option<String>,
    /// Font size in points, when the run sets one.
    pub font_size_pt: Option<f32>,
}

impl Run {
    /// Create a run with no font information.
    pub fn new(text: impl Into<String>, bold: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            font_name: None,
            font_size_pt: None,
        }
    }
}

/// One logical block of document text with a stable 1-based position.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    /// 1-based position in the document, assigned at parse time.
    pub index: u32,
    /// Trimmed paragraph text (concatenation of run texts, then trimmed).
    pub text: String,
    /// Ordered formatting runs; may be empty.
    pub runs: SmallVec<[Run; 4]>,
}

impl Paragraph {
    /// Build a paragraph from its runs, deriving the trimmed text.
    pub fn from_runs(index: u32, runs: impl IntoIterator<Item = Run>) -> Self {
        let runs: SmallVec<[Run; 4]> = runs.into_iter().collect();
        let mut text = String::new();
        for run in &runs {
            text.push_str(&run.text);
        }
        Self {
            index,
            text: text.trim().to_string(),
            runs,
        }
    }

    /// Build a run-less paragraph from plain text (trimmed).
    pub fn from_text(index: u32, text: &str) -> Self {
        Self {
            index,
            text: text.trim().to_string(),
            runs: SmallVec::new(),
        }
    }

    /// Untrimmed concatenation of the run texts. A run-less paragraph has
    /// no raw form beyond its stored text.
    pub fn raw_text(&self) -> Cow<'_, str> {
        if self.runs.is_empty() {
            Cow::Borrowed(self.text.as_str())
        } else {
            Cow::Owned(self.runs.iter().map(|run| run.text.as_str()).collect())
        }
    }
}

/// An ordered sequence of paragraphs parsed from one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    pub paragraphs: Vec<Paragraph>,
}

impl Transcript {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Parse a transcript from raw DOCX bytes.
    ///
    /// Fails with [`crate::Error::MalformedDocument`] if the bytes are not
    /// a readable DOCX package.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        crate::ooxml::docx::parse_transcript(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_runs_concatenates_and_trims() {
        let para = Paragraph::from_runs(
            3,
            vec![Run::new("ENTREVISTADA: ", true), Run::new("hola  ", false)],
        );
        assert_eq!(para.index, 3);
        assert_eq!(para.text, "ENTREVISTADA: hola");
        assert_eq!(para.runs.len(), 2);
        assert_eq!(para.runs[0].text, "ENTREVISTADA: ");
    }

    #[test]
    fn from_text_keeps_no_runs() {
        let para = Paragraph::from_text(1, "  algo  ");
        assert_eq!(para.text, "algo");
        assert!(para.runs.is_empty());
    }

    #[test]
    fn raw_text_keeps_the_untrimmed_concatenation() {
        let para = Paragraph::from_runs(
            2,
            vec![Run::new("  ENTREVISTADO: ", true), Run::new("bien  ", false)],
        );
        assert_eq!(para.text, "ENTREVISTADO: bien");
        assert_eq!(para.raw_text(), "  ENTREVISTADO: bien  ");
    }
}
