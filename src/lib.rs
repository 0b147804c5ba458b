//! Tamarindo - A Rust engine for validating interview transcripts
//!
//! This library analyzes interview transcripts delivered as Word documents
//! (.docx), checks them against a fixed set of labeling and formatting
//! rules plus a reference question matrix delivered as an Excel workbook
//! (.xlsx), and shapes the outcome as JSON-serializable reports or as a
//! downloadable archive of plain-text reports.
//!
//! # Features
//!
//! - **DOCX reader**: paragraphs and formatting runs from WordprocessingML
//! - **XLSX reader**: the reference question column from SpreadsheetML
//! - **Rule engine**: speaker labels, bold headers, font and size,
//!   empty interventions, forbidden label patterns, question cross-check
//! - **Batch analysis**: up to 10 documents per call, analyzed in parallel,
//!   results in input order
//! - **Reports**: JSON contract with Spanish field names, plus per-document
//!   text reports packed into one ZIP archive
//!
//! # Example - Analyzing a batch
//!
//! ```no_run
//! use tamarindo::{UploadedFile, analyze_batch};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let documents = vec![UploadedFile::new(
//!     "entrevista_01.docx",
//!     std::fs::read("entrevista_01.docx")?,
//! )];
//! let reference = UploadedFile::new("preguntas.xlsx", std::fs::read("preguntas.xlsx")?);
//!
//! let report = analyze_batch(&documents, &reference)?;
//! for result in &report.results {
//!     println!("{}: {} errores", result.file_name, result.errors.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Analyzing a single document
//!
//! ```no_run
//! use tamarindo::{Transcript, analyze_transcript};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("entrevista.docx")?;
//! let transcript = Transcript::from_bytes(&bytes)?;
//!
//! let result = analyze_transcript(&transcript, "entrevista.docx", &[]);
//! for error in &result.errors {
//!     println!("Línea {}: {}", error.line, error.description);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Producing the report archive
//!
//! ```no_run
//! use tamarindo::{UploadedFile, analyze_batch_archive};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let documents = vec![UploadedFile::new(
//!     "entrevista_01.docx",
//!     std::fs::read("entrevista_01.docx")?,
//! )];
//! let reference = UploadedFile::new("preguntas.xlsx", std::fs::read("preguntas.xlsx")?);
//!
//! let archive = analyze_batch_archive(&documents, &reference)?;
//! std::fs::write("informes.zip", archive)?;
//! # Ok(())
//! # }
//! ```

/// Shared plumbing: the unified error type and crate `Result` alias.
pub mod common;

/// OOXML readers for the two inputs: transcripts (.docx) and reference
/// workbooks (.xlsx).
pub mod ooxml;

/// The paragraph/run transcript model and question extraction.
pub mod transcript;

/// The rule engine: vocabulary constants, validators and error records.
pub mod rules;

/// Per-document analysis results and error summaries.
pub mod analysis;

/// Plain-text report rendering and the report ZIP archive.
pub mod report;

/// Batch orchestration over uploaded files.
pub mod batch;

// Re-export the types most callers touch
pub use analysis::{AnalysisResult, Summary, analyze_document_bytes, analyze_transcript};
pub use batch::{
    BatchReport, MAX_BATCH_DOCUMENTS, UploadedFile, analyze_batch, analyze_batch_archive,
};
pub use common::{Error, Result};
pub use rules::{ErrorKind, ErrorRecord};
pub use transcript::{Paragraph, Run, Transcript};
