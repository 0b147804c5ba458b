//! Plain-text report rendering and the downloadable report archive.
//!
//! Each analyzed document yields two UTF-8 artifacts: an error listing
//! (`<base>_errores.txt`, one line per violation) and a summary
//! (`<base>_resumen.txt`, one line per error kind). [`ReportArchive`]
//! packs the artifacts for a whole batch into a single deflate-compressed
//! ZIP, built entirely in memory.

use crate::analysis::AnalysisResult;
use crate::common::Result;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;

/// Render the per-line error listing for one document.
pub fn render_error_report(result: &AnalysisResult) -> String {
    if result.errors.is_empty() {
        return "Sin errores detectados.\n".to_string();
    }

    let mut out = String::new();
    for error in &result.errors {
        out.push_str(&format!(
            "Línea {}: {} - {}\n",
            error.line, error.kind, error.description
        ));
    }
    out
}

/// Render the error-count summary for one document.
pub fn render_summary_report(result: &AnalysisResult) -> String {
    if result.summary.is_empty() {
        return "Sin errores que resumir.\n".to_string();
    }

    let mut out = String::new();
    for (kind, count) in result.summary.iter() {
        out.push_str(&format!("{}: {} ocurrencias\n", kind, count));
    }
    out
}

/// File name without its final extension (`entrevista_01.docx` →
/// `entrevista_01`).
fn base_name(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
}

/// In-memory ZIP archive of batch reports, written in document order.
pub struct ReportArchive {
    writer: zip::ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl ReportArchive {
    pub fn new() -> Self {
        Self {
            writer: zip::ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated),
        }
    }

    /// Append both report files for one analyzed document.
    pub fn add_document(&mut self, result: &AnalysisResult) -> Result<()> {
        let base = base_name(&result.file_name);
        self.write_entry(&format!("{}_errores.txt", base), &render_error_report(result))?;
        self.write_entry(
            &format!("{}_resumen.txt", base),
            &render_summary_report(result),
        )
    }

    fn write_entry(&mut self, name: &str, content: &str) -> Result<()> {
        self.writer.start_file(name, self.options)?;
        self.writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Close the archive and return its bytes.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        Ok(self.writer.finish()?.into_inner())
    }
}

impl Default for ReportArchive {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Summary;
    use crate::rules::{ErrorKind, ErrorRecord};
    use std::io::Read;

    fn result_with(file_name: &str, errors: Vec<ErrorRecord>) -> AnalysisResult {
        AnalysisResult {
            file_name: file_name.to_string(),
            summary: Summary::from_errors(&errors),
            errors,
        }
    }

    #[test]
    fn error_report_lists_one_line_per_error() {
        let result = result_with(
            "entrevista.docx",
            vec![
                ErrorRecord::new(1, ErrorKind::InvalidLabel, "Etiqueta 'USUARIO' no es válida."),
                ErrorRecord::new(3, ErrorKind::WrongFont, "'Calibri' en vez de Arial"),
            ],
        );

        assert_eq!(
            render_error_report(&result),
            "Línea 1: Etiqueta inválida - Etiqueta 'USUARIO' no es válida.\n\
             Línea 3: Fuente incorrecta - 'Calibri' en vez de Arial\n"
        );
    }

    #[test]
    fn clean_document_renders_placeholder_lines() {
        let result = result_with("limpio.docx", Vec::new());
        assert_eq!(render_error_report(&result), "Sin errores detectados.\n");
        assert_eq!(render_summary_report(&result), "Sin errores que resumir.\n");
    }

    #[test]
    fn summary_report_counts_in_occurrence_order() {
        let result = result_with(
            "entrevista.docx",
            vec![
                ErrorRecord::new(2, ErrorKind::WrongSize, "10.5pt en vez de 12pt"),
                ErrorRecord::new(4, ErrorKind::InvalidLabel, "Etiqueta 'X' no es válida."),
                ErrorRecord::new(6, ErrorKind::WrongSize, "11.0pt en vez de 12pt"),
            ],
        );

        assert_eq!(
            render_summary_report(&result),
            "Tamaño incorrecto: 2 ocurrencias\nEtiqueta inválida: 1 ocurrencias\n"
        );
    }

    #[test]
    fn archive_holds_both_files_per_document_in_order() {
        let mut archive = ReportArchive::new();
        archive
            .add_document(&result_with(
                "entrevista_01.docx",
                vec![ErrorRecord::new(
                    1,
                    ErrorKind::EmptyIntervention,
                    "Debe ir junto al texto, sin salto de línea",
                )],
            ))
            .unwrap();
        archive
            .add_document(&result_with("entrevista_02.docx", Vec::new()))
            .unwrap();

        let bytes = archive.into_bytes().unwrap();
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(zip.len(), 4);

        let names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "entrevista_01_errores.txt",
                "entrevista_01_resumen.txt",
                "entrevista_02_errores.txt",
                "entrevista_02_resumen.txt",
            ]
        );

        let mut content = String::new();
        zip.by_name("entrevista_01_errores.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(
            content,
            "Línea 1: Intervención vacía tras etiqueta - Debe ir junto al texto, sin salto de línea\n"
        );

        content.clear();
        zip.by_name("entrevista_02_resumen.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "Sin errores que resumir.\n");
    }

    #[test]
    fn base_name_drops_only_the_final_extension() {
        assert_eq!(base_name("entrevista_01.docx"), "entrevista_01");
        assert_eq!(base_name("a.b.docx"), "a.b");
        assert_eq!(base_name("sinextension"), "sinextension");
    }
}
