//! Reference question reader for SpreadsheetML (.xlsx) workbooks.
//!
//! The validation engine needs exactly one thing from the reference
//! workbook: the question texts in column C of the first worksheet, row 2
//! onward (row 1 is a header). This reader resolves the first sheet through
//! `xl/workbook.xml` and its relationships part, loads the shared strings
//! table when present, and streams the worksheet once.
//!
//! Cell values are normalized to strings the way a spreadsheet user reads
//! them: shared and inline strings resolve to their text, booleans render
//! as `TRUE`/`FALSE`, and numbers render in decimal (floats always with a
//! decimal point, so a cell holding `11` in a text column compares as
//! `"11"` but a true float cell as `"11.0"`).

use crate::common::{Error, Result};
use crate::ooxml::{attr_local, resolve_reference};
use crate::ooxml::container::Package;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::Cursor;

/// Questions from the reference workbook, in sheet order.
pub type ReferenceQuestions = Vec<String>;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// 1-based column holding the questions (column C).
const QUESTION_COLUMN: u32 = 3;
/// Rows at the top of the sheet that are headers, not questions.
const HEADER_ROWS: u32 = 1;

/// Read the reference questions from raw XLSX bytes.
///
/// Fails with [`Error::MalformedSpreadsheet`] if the bytes are not a ZIP
/// container, a required part is missing or malformed, a shared-string
/// index is out of range, or the sheet's used range never reaches column C.
pub fn read_reference_questions(bytes: &[u8]) -> Result<ReferenceQuestions> {
    let package = Package::from_reader(Cursor::new(bytes)).map_err(|_| {
        Error::MalformedSpreadsheet("not an XLSX package (invalid ZIP archive)".to_string())
    })?;

    let workbook = package
        .part(WORKBOOK_PART)
        .map_err(|_| Error::MalformedSpreadsheet(format!("missing {} part", WORKBOOK_PART)))?;
    let sheet_rid = first_sheet_relationship(&workbook)?;

    let rels = package
        .part(WORKBOOK_RELS_PART)
        .map_err(|_| Error::MalformedSpreadsheet(format!("missing {} part", WORKBOOK_RELS_PART)))?;
    let sheet_path = resolve_target(&relationship_target(&rels, &sheet_rid)?);

    let shared = if package.has_part(SHARED_STRINGS_PART) {
        let part = package.part(SHARED_STRINGS_PART).map_err(|_| {
            Error::MalformedSpreadsheet(format!("unreadable {} part", SHARED_STRINGS_PART))
        })?;
        parse_shared_strings(&part)?
    } else {
        Vec::new()
    };

    let sheet = package
        .part(&sheet_path)
        .map_err(|_| Error::MalformedSpreadsheet(format!("missing worksheet part: {}", sheet_path)))?;
    collect_question_column(&sheet, &shared)
}

/// Relationship id (`r:id`) of the first `<sheet>` in workbook order.
fn first_sheet_relationship(xml: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sheet" => {
                return attr_local(&e, b"id").ok_or_else(|| {
                    Error::MalformedSpreadsheet(
                        "workbook sheet without a relationship id".to_string(),
                    )
                });
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::MalformedSpreadsheet(format!(
                    "invalid workbook XML: {}",
                    e
                )));
            },
            _ => {},
        }
    }

    Err(Error::MalformedSpreadsheet(
        "workbook declares no sheets".to_string(),
    ))
}

/// Target of the relationship with the given id.
fn relationship_target(xml: &[u8], rid: &str) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if attr_local(&e, b"Id").as_deref() == Some(rid) {
                    return attr_local(&e, b"Target").ok_or_else(|| {
                        Error::MalformedSpreadsheet(format!(
                            "relationship {} has no target",
                            rid
                        ))
                    });
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::MalformedSpreadsheet(format!(
                    "invalid relationships XML: {}",
                    e
                )));
            },
            _ => {},
        }
    }

    Err(Error::MalformedSpreadsheet(format!(
        "unresolved worksheet relationship: {}",
        rid
    )))
}

/// A leading `/` makes the target package-absolute; otherwise it is
/// relative to `xl/`.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

/// Parse `xl/sharedStrings.xml`, concatenating all `<t>` fragments of each
/// `<si>` so rich-text entries keep their full text.
fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut buf = Vec::with_capacity(1024);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"t" if current.is_some() => in_text = true,
                _ => {},
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                strings.push(String::new());
            },
            Ok(Event::Text(e)) if in_text => {
                if let Some(entry) = current.as_mut() {
                    entry.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            },
            Ok(Event::GeneralRef(e)) if in_text => {
                if let Some(entry) = current.as_mut() {
                    match resolve_reference(&e) {
                        Some(resolved) => entry.push_str(&resolved),
                        None => {
                            return Err(Error::MalformedSpreadsheet(format!(
                                "unresolvable entity reference: &{};",
                                String::from_utf8_lossy(e.as_ref())
                            )));
                        },
                    }
                }
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"si" => {
                    if let Some(entry) = current.take() {
                        strings.push(entry);
                    }
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::MalformedSpreadsheet(format!(
                    "invalid shared strings XML: {}",
                    e
                )));
            },
            _ => {},
        }
    }

    Ok(strings)
}

/// One `<c>` while its events stream by.
struct CellState {
    column: u32,
    cell_type: Option<String>,
    value: Option<String>,
}

impl CellState {
    /// Decode the cell's position and type from its start tag. Cells
    /// without an `r` reference take the next position in the row.
    fn open(e: &BytesStart, next_column: u32) -> Self {
        let column = attr_local(e, b"r")
            .as_deref()
            .and_then(column_of_reference)
            .unwrap_or(next_column);
        Self {
            column,
            cell_type: attr_local(e, b"t"),
            value: None,
        }
    }
}

/// Stream the worksheet and collect the question column.
fn collect_question_column(xml: &[u8], shared: &[String]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut questions = Vec::new();

    let mut max_column: u32 = 0;
    let mut row_number: u32 = 0;
    let mut next_column: u32 = 1;
    let mut cell: Option<CellState> = None;
    let mut in_value = false;
    let mut buf = Vec::with_capacity(1024);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"row" => {
                    row_number = row_attr(&e).unwrap_or(row_number + 1);
                    next_column = 1;
                },
                b"c" => {
                    let state = CellState::open(&e, next_column);
                    max_column = max_column.max(state.column);
                    next_column = state.column + 1;
                    cell = Some(state);
                },
                // `<v>` holds plain values, `<is><t>` inline strings.
                b"v" | b"t" if cell.is_some() => in_value = true,
                _ => {},
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"row" => {
                    row_number = row_attr(&e).unwrap_or(row_number + 1);
                    next_column = 1;
                },
                b"c" => {
                    // A self-closing cell is blank but still widens the
                    // used range.
                    let state = CellState::open(&e, next_column);
                    max_column = max_column.max(state.column);
                    next_column = state.column + 1;
                },
                _ => {},
            },
            Ok(Event::Text(e)) if in_value => {
                if let Some(state) = cell.as_mut() {
                    state
                        .value
                        .get_or_insert_with(String::new)
                        .push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            },
            Ok(Event::GeneralRef(e)) if in_value => {
                if let Some(state) = cell.as_mut() {
                    match resolve_reference(&e) {
                        Some(resolved) => {
                            state
                                .value
                                .get_or_insert_with(String::new)
                                .push_str(&resolved);
                        },
                        None => {
                            return Err(Error::MalformedSpreadsheet(format!(
                                "unresolvable entity reference: &{};",
                                String::from_utf8_lossy(e.as_ref())
                            )));
                        },
                    }
                }
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"c" => {
                    if let Some(state) = cell.take()
                        && state.column == QUESTION_COLUMN
                        && row_number > HEADER_ROWS
                        && let Some(text) = convert_cell(&state, shared)?
                    {
                        questions.push(text);
                    }
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::MalformedSpreadsheet(format!(
                    "invalid worksheet XML: {}",
                    e
                )));
            },
            _ => {},
        }
    }

    if max_column < QUESTION_COLUMN {
        return Err(Error::MalformedSpreadsheet(format!(
            "worksheet never reaches column C (widest row ends at column {})",
            max_column
        )));
    }

    Ok(questions)
}

fn row_attr(e: &BytesStart) -> Option<u32> {
    attr_local(e, b"r").and_then(|r| atoi_simd::parse::<u32>(r.as_bytes()).ok())
}

/// Convert Excel column letters of a reference like `"C5"` to a 1-based
/// column number (`A` = 1, `Z` = 26, `AA` = 27).
fn column_of_reference(reference: &str) -> Option<u32> {
    let mut column = 0u32;
    for ch in reference.chars() {
        if !ch.is_ascii_alphabetic() {
            break;
        }
        column = column * 26 + (ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    (column > 0).then_some(column)
}

/// Normalize a finished cell to its string form; blank cells become `None`.
fn convert_cell(state: &CellState, shared: &[String]) -> Result<Option<String>> {
    let Some(raw) = state.value.as_deref() else {
        return Ok(None);
    };

    let text = match state.cell_type.as_deref() {
        Some("s") => {
            let index: usize = atoi_simd::parse(raw.trim().as_bytes()).map_err(|_| {
                Error::MalformedSpreadsheet(format!("invalid shared string index: {}", raw))
            })?;
            shared
                .get(index)
                .ok_or_else(|| {
                    Error::MalformedSpreadsheet(format!(
                        "shared string index out of range: {}",
                        index
                    ))
                })?
                .clone()
        },
        Some("str") | Some("inlineStr") => raw.to_string(),
        Some("b") => match raw.trim() {
            "1" => "TRUE".to_string(),
            _ => "FALSE".to_string(),
        },
        _ => {
            if let Ok(int_val) = atoi_simd::parse::<i64>(raw.as_bytes()) {
                int_val.to_string()
            } else if let Ok(float_val) = fast_float2::parse::<f64, _>(raw) {
                format!("{:?}", float_val)
            } else {
                raw.to_string()
            }
        },
    };

    Ok((!text.trim().is_empty()).then_some(text))
}
