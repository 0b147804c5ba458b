//! Transcript reader for WordprocessingML (.docx) documents.
//!
//! The reader extracts the paragraph/run structure the rule engine needs
//! from `word/document.xml` in a single streaming pass, mirroring the view
//! of the common Word object model: only paragraphs that are direct
//! children of `w:body` count (tables are skipped), and only direct `w:r`
//! children of a paragraph count as runs (hyperlink and field content is
//! invisible).
//!
//! Run text concatenates all `w:t` content; `w:tab` becomes `\t`, `w:br`
//! and `w:cr` become `\n`, and character and entity references resolve to
//! the text they stand for. Text is otherwise taken as written, untrimmed,
//! so run boundaries survive exactly; the paragraph text is the trimmed
//! concatenation of its run texts.

use crate::common::{Error, Result};
use crate::ooxml::{attr_local, resolve_reference};
use crate::ooxml::container::Package;
use crate::transcript::{Paragraph, Run};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;
use std::io::Cursor;

pub use crate::transcript::Transcript;

const DOCUMENT_PART: &str = "word/document.xml";

/// Parse a transcript from raw DOCX bytes.
///
/// Fails with [`Error::MalformedDocument`] if the bytes are not a ZIP
/// container, the container lacks `word/document.xml`, or that part is not
/// well-formed XML.
pub fn parse_transcript(bytes: &[u8]) -> Result<Transcript> {
    let package = Package::from_reader(Cursor::new(bytes))
        .map_err(|_| Error::MalformedDocument("not a DOCX package (invalid ZIP archive)".to_string()))?;
    let document = package
        .part(DOCUMENT_PART)
        .map_err(|_| Error::MalformedDocument(format!("missing {} part", DOCUMENT_PART)))?;
    parse_document_xml(&document)
}

/// Accumulates one `w:r` while its events stream by.
#[derive(Default)]
struct RunState {
    text: String,
    bold: Option<bool>,
    font_name: Option<String>,
    font_size_pt: Option<f32>,
}

impl RunState {
    fn finish(self) -> Run {
        Run {
            text: self.text,
            bold: self.bold.unwrap_or(false),
            font_name: self.font_name,
            font_size_pt: self.font_size_pt,
        }
    }
}

/// Streaming parse of `word/document.xml`.
fn parse_document_xml(xml: &[u8]) -> Result<Transcript> {
    let mut reader = Reader::from_reader(xml);

    let mut paragraphs = Vec::new();
    let mut next_index: u32 = 0;

    // Depth of the currently open ancestors; child elements of `w:body`
    // start exactly at `body_children`.
    let mut depth: usize = 0;
    let mut body_children: Option<usize> = None;
    let mut table_depth: usize = 0;

    let mut para_runs: Option<SmallVec<[Run; 4]>> = None;
    let mut para_children: usize = 0;
    let mut run: Option<RunState> = None;
    let mut run_children: usize = 0;
    let mut in_rpr = false;
    let mut in_text = false;

    let mut buf = Vec::with_capacity(1024);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                match e.local_name().as_ref() {
                    b"body" => body_children = Some(depth + 1),
                    b"tbl" => table_depth += 1,
                    b"p" if body_children == Some(depth)
                        && table_depth == 0
                        && para_runs.is_none() =>
                    {
                        para_runs = Some(SmallVec::new());
                        para_children = depth + 1;
                    },
                    b"r" if para_runs.is_some() && depth == para_children && run.is_none() => {
                        run = Some(RunState::default());
                        run_children = depth + 1;
                    },
                    b"rPr" if run.is_some() && depth == run_children => in_rpr = true,
                    b"t" if run.is_some() && depth == run_children => in_text = true,
                    b"tab" if depth == run_children => {
                        if let Some(state) = run.as_mut() {
                            state.text.push('\t');
                        }
                    },
                    b"br" | b"cr" if depth == run_children => {
                        if let Some(state) = run.as_mut() {
                            state.text.push('\n');
                        }
                    },
                    name => {
                        if in_rpr && depth == run_children + 1 {
                            apply_run_property(name, &e, run.as_mut());
                        }
                    },
                }
                depth += 1;
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"p" if body_children == Some(depth) && table_depth == 0 => {
                    next_index += 1;
                    paragraphs.push(Paragraph::from_runs(next_index, []));
                },
                b"r" if para_runs.is_some() && depth == para_children => {
                    if let Some(runs) = para_runs.as_mut() {
                        runs.push(RunState::default().finish());
                    }
                },
                b"tab" if run.is_some() && depth == run_children => {
                    if let Some(state) = run.as_mut() {
                        state.text.push('\t');
                    }
                },
                b"br" | b"cr" if run.is_some() && depth == run_children => {
                    if let Some(state) = run.as_mut() {
                        state.text.push('\n');
                    }
                },
                name => {
                    if in_rpr && depth == run_children + 1 {
                        apply_run_property(name, &e, run.as_mut());
                    }
                },
            },
            Ok(Event::Text(e)) if in_text => {
                if let Some(state) = run.as_mut() {
                    state.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            },
            // The reader splits `&amp;` and `&#191;` out of text as
            // reference events; they are part of the run text.
            Ok(Event::GeneralRef(e)) if in_text => {
                if let Some(state) = run.as_mut() {
                    match resolve_reference(&e) {
                        Some(resolved) => state.text.push_str(&resolved),
                        None => {
                            return Err(Error::MalformedDocument(format!(
                                "unresolvable entity reference: &{};",
                                String::from_utf8_lossy(e.as_ref())
                            )));
                        },
                    }
                }
            },
            Ok(Event::End(e)) => {
                depth = depth.saturating_sub(1);
                match e.local_name().as_ref() {
                    b"tbl" => table_depth = table_depth.saturating_sub(1),
                    b"t" if in_text && depth == run_children => in_text = false,
                    b"rPr" if in_rpr && depth == run_children => in_rpr = false,
                    b"r" if run.is_some() && depth + 1 == run_children => {
                        let finished = run.take().map(RunState::finish);
                        if let (Some(runs), Some(r)) = (para_runs.as_mut(), finished) {
                            runs.push(r);
                        }
                    },
                    b"p" if para_runs.is_some() && depth + 1 == para_children => {
                        if let Some(runs) = para_runs.take() {
                            next_index += 1;
                            paragraphs.push(Paragraph::from_runs(next_index, runs));
                        }
                    },
                    _ => {},
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::MalformedDocument(format!(
                    "invalid document XML: {}",
                    e
                )));
            },
            _ => {},
        }
    }

    Ok(Transcript::new(paragraphs))
}

/// Apply one `w:rPr` child to the run being built.
fn apply_run_property(name: &[u8], e: &BytesStart, run: Option<&mut RunState>) {
    let Some(run) = run else { return };
    match name {
        b"b" => run.bold = Some(parse_on_off(e)),
        b"rFonts" => {
            if let Some(font) = attr_local(e, b"ascii") {
                run.font_name = Some(font);
            }
        },
        b"sz" => {
            // w:sz carries half-points; an unparsable value degrades to
            // "no size set" rather than failing the document.
            run.font_size_pt = attr_local(e, b"val")
                .and_then(|v| atoi_simd::parse::<u32>(v.as_bytes()).ok())
                .map(|half_points| half_points as f32 / 2.0);
        },
        _ => {},
    }
}

/// Collapse an OOXML on/off attribute: element present with no `w:val`
/// means on; `"true"` and `"1"` mean on; anything else means off.
fn parse_on_off(e: &BytesStart) -> bool {
    match attr_local(e, b"val") {
        None => true,
        Some(value) => value == "true" || value == "1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::test_support::build_docx;

    const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document {NS}><w:body>{body}</w:body></w:document>"#
        )
    }

    #[test]
    fn parses_paragraphs_runs_and_formatting() {
        let xml = document(concat!(
            r#"<w:p>"#,
            r#"<w:r><w:rPr><w:b/><w:rFonts w:ascii="Arial"/><w:sz w:val="24"/></w:rPr>"#,
            r#"<w:t xml:space="preserve">ENTREVISTADOR: </w:t></w:r>"#,
            r#"<w:r><w:t>¿Cómo estás?</w:t></w:r>"#,
            r#"</w:p>"#,
            r#"<w:p><w:r><w:t>ENTREVISTADO: bien</w:t></w:r></w:p>"#,
        ));
        let transcript = parse_transcript(&build_docx(&xml)).unwrap();

        assert_eq!(transcript.paragraphs.len(), 2);

        let first = &transcript.paragraphs[0];
        assert_eq!(first.index, 1);
        assert_eq!(first.text, "ENTREVISTADOR: ¿Cómo estás?");
        assert_eq!(first.runs.len(), 2);
        assert_eq!(first.runs[0].text, "ENTREVISTADOR: ");
        assert!(first.runs[0].bold);
        assert_eq!(first.runs[0].font_name.as_deref(), Some("Arial"));
        assert_eq!(first.runs[0].font_size_pt, Some(12.0));
        assert!(!first.runs[1].bold);
        assert_eq!(first.runs[1].font_name, None);

        let second = &transcript.paragraphs[1];
        assert_eq!(second.index, 2);
        assert_eq!(second.text, "ENTREVISTADO: bien");
    }

    #[test]
    fn bold_attribute_forms() {
        let xml = document(concat!(
            r#"<w:p><w:r><w:rPr><w:b w:val="0"/></w:rPr><w:t>a</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:rPr><w:b w:val="false"/></w:rPr><w:t>b</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:rPr><w:b w:val="1"/></w:rPr><w:t>c</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>d</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t>e</w:t></w:r></w:p>"#,
        ));
        let transcript = parse_transcript(&build_docx(&xml)).unwrap();
        let bolds: Vec<bool> = transcript
            .paragraphs
            .iter()
            .map(|p| p.runs[0].bold)
            .collect();
        assert_eq!(bolds, vec![false, false, true, true, false]);
    }

    #[test]
    fn tabs_and_breaks_become_whitespace_characters() {
        let xml = document(
            r#"<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>"#,
        );
        let transcript = parse_transcript(&build_docx(&xml)).unwrap();
        assert_eq!(transcript.paragraphs[0].runs[0].text, "a\tb\nc");
        assert_eq!(transcript.paragraphs[0].text, "a\tb\nc");
    }

    #[test]
    fn entity_and_character_references_resolve_in_run_text() {
        let xml = document(concat!(
            r#"<w:p><w:r><w:t>A &amp; B</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t>ENTREVISTADOR: &#191;Qu&#233; hora es?</w:t></w:r></w:p>"#,
        ));
        let transcript = parse_transcript(&build_docx(&xml)).unwrap();
        assert_eq!(transcript.paragraphs[0].runs[0].text, "A & B");
        assert_eq!(transcript.paragraphs[0].text, "A & B");
        assert_eq!(
            transcript.paragraphs[1].text,
            "ENTREVISTADOR: ¿Qué hora es?"
        );
    }

    #[test]
    fn unknown_entity_references_are_a_malformed_document() {
        let xml = document(r#"<w:p><w:r><w:t>a &nbsp; b</w:t></w:r></w:p>"#);
        let err = parse_transcript(&build_docx(&xml)).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn half_point_sizes_convert_to_points() {
        let xml = document(
            r#"<w:p><w:r><w:rPr><w:sz w:val="21"/></w:rPr><w:t>x</w:t></w:r></w:p>"#,
        );
        let transcript = parse_transcript(&build_docx(&xml)).unwrap();
        assert_eq!(transcript.paragraphs[0].runs[0].font_size_pt, Some(10.5));
    }

    #[test]
    fn table_paragraphs_are_not_transcript_lines() {
        let xml = document(concat!(
            r#"<w:p><w:r><w:t>uno</w:t></w:r></w:p>"#,
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>celda</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
            r#"<w:p><w:r><w:t>dos</w:t></w:r></w:p>"#,
        ));
        let transcript = parse_transcript(&build_docx(&xml)).unwrap();
        let texts: Vec<&str> = transcript
            .paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(texts, vec!["uno", "dos"]);
        assert_eq!(transcript.paragraphs[1].index, 2);
    }

    #[test]
    fn hyperlink_runs_are_invisible() {
        let xml = document(concat!(
            r#"<w:p>"#,
            r#"<w:hyperlink><w:r><w:t>¿enlace?</w:t></w:r></w:hyperlink>"#,
            r#"<w:r><w:t>visible</w:t></w:r>"#,
            r#"</w:p>"#,
        ));
        let transcript = parse_transcript(&build_docx(&xml)).unwrap();
        assert_eq!(transcript.paragraphs[0].runs.len(), 1);
        assert_eq!(transcript.paragraphs[0].text, "visible");
    }

    #[test]
    fn empty_paragraphs_keep_their_position() {
        let xml = document(concat!(
            r#"<w:p><w:r><w:t>uno</w:t></w:r></w:p>"#,
            r#"<w:p/>"#,
            r#"<w:p><w:r><w:t>tres</w:t></w:r></w:p>"#,
        ));
        let transcript = parse_transcript(&build_docx(&xml)).unwrap();
        assert_eq!(transcript.paragraphs.len(), 3);
        assert_eq!(transcript.paragraphs[1].text, "");
        assert!(transcript.paragraphs[1].runs.is_empty());
        assert_eq!(transcript.paragraphs[2].index, 3);
    }

    #[test]
    fn non_zip_bytes_are_a_malformed_document() {
        let err = parse_transcript(b"no es un docx").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn package_without_document_part_is_malformed() {
        let bytes = crate::ooxml::test_support::build_package(&[("word/styles.xml", "<a/>")]);
        let err = parse_transcript(&bytes).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn broken_xml_is_a_malformed_document() {
        let bytes = crate::ooxml::test_support::build_package(&[(
            "word/document.xml",
            r#"<w:document w:bad="unterminated"#,
        )]);
        let err = parse_transcript(&bytes).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }
}
