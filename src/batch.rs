//! Batch orchestration: select the uploads worth analyzing, extract the
//! reference questions once, fan the documents out over worker threads and
//! reassemble results in input order.
//!
//! Two output modes share the same pipeline: [`analyze_batch`] returns the
//! JSON-serializable [`BatchReport`], [`analyze_batch_archive`] renders
//! per-document text reports into one ZIP archive.

use crate::analysis::{self, AnalysisResult};
use crate::common::{Error, Result};
use crate::ooxml::xlsx;
use crate::report::ReportArchive;
use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;

/// Maximum documents analyzed per batch; extras are silently dropped.
pub const MAX_BATCH_DOCUMENTS: usize = 10;

/// One uploaded file: its original name and raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Outcome of a whole batch, in document order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Always `true`: failures surface as `Err`, never as a report.
    pub ok: bool,
    /// Number of documents analyzed (after filtering and truncation).
    #[serde(rename = "total_archivos")]
    pub total_files: usize,
    /// Per-document analyses.
    #[serde(rename = "resultados")]
    pub results: Vec<AnalysisResult>,
}

/// Analyze a batch of transcripts against a reference spreadsheet.
///
/// Documents not named `*.docx` (case-insensitive) are ignored; an empty
/// selection is [`Error::NoValidInput`]. At most [`MAX_BATCH_DOCUMENTS`]
/// documents are analyzed. The reference must be named `*.xlsx`. Any
/// malformed input aborts the whole batch.
pub fn analyze_batch(documents: &[UploadedFile], reference: &UploadedFile) -> Result<BatchReport> {
    let results = run_batch(documents, reference)?;
    Ok(BatchReport {
        ok: true,
        total_files: results.len(),
        results,
    })
}

/// Like [`analyze_batch`], but render the per-document text reports and
/// return them as the bytes of one deflate-compressed ZIP archive.
pub fn analyze_batch_archive(
    documents: &[UploadedFile],
    reference: &UploadedFile,
) -> Result<Vec<u8>> {
    let results = run_batch(documents, reference)?;

    let mut archive = ReportArchive::new();
    for result in &results {
        archive.add_document(result)?;
    }
    archive.into_bytes()
}

/// Shared pipeline behind both output modes.
fn run_batch(
    documents: &[UploadedFile],
    reference: &UploadedFile,
) -> Result<Vec<AnalysisResult>> {
    let mut selected: Vec<&UploadedFile> = documents
        .iter()
        .filter(|doc| has_extension(&doc.file_name, ".docx"))
        .collect();

    if selected.is_empty() {
        return Err(Error::NoValidInput(
            "no .docx documents in the batch".to_string(),
        ));
    }
    if selected.len() > MAX_BATCH_DOCUMENTS {
        warn!(
            "batch of {} documents truncated to {}",
            selected.len(),
            MAX_BATCH_DOCUMENTS
        );
        selected.truncate(MAX_BATCH_DOCUMENTS);
    }

    if !has_extension(&reference.file_name, ".xlsx") {
        return Err(Error::NoValidInput(format!(
            "reference file {} is not an .xlsx spreadsheet",
            reference.file_name
        )));
    }

    let questions = xlsx::read_reference_questions(&reference.bytes)?;
    debug!(
        "reference {} provides {} questions",
        reference.file_name,
        questions.len()
    );

    let results = selected
        .par_iter()
        .map(|doc| analysis::analyze_document_bytes(&doc.file_name, &doc.bytes, &questions))
        .collect::<Result<Vec<_>>>()?;

    debug!("analyzed {} documents", results.len());
    Ok(results)
}

/// Name-suffix check, ASCII case-insensitive and safe on multi-byte names.
fn has_extension(file_name: &str, extension: &str) -> bool {
    file_name
        .len()
        .checked_sub(extension.len())
        .and_then(|start| file_name.get(start..))
        .is_some_and(|suffix| suffix.eq_ignore_ascii_case(extension))
}
