//! Run-formatting checks: interviewer interventions must be fully bold,
//! and every run must use the required font and size.

use super::vocabulary::{INTERVIEWER_LABELS, REQUIRED_FONT, REQUIRED_SIZE_PT};
use super::{ErrorKind, ErrorRecord};
use crate::transcript::Transcript;

/// Interviewer interventions must be entirely bold.
///
/// The first run with non-blank text and no bold flag fails the whole
/// paragraph; one error per paragraph, scanning stops at the offender.
pub fn check_interviewer_bold(transcript: &Transcript) -> Vec<ErrorRecord> {
    let mut errors = Vec::new();
    for para in &transcript.paragraphs {
        let is_interviewer = INTERVIEWER_LABELS.iter().any(|label| {
            para.text
                .strip_prefix(label)
                .is_some_and(|rest| rest.starts_with(':'))
        });
        if !is_interviewer {
            continue;
        }

        let has_plain_text = para
            .runs
            .iter()
            .any(|run| !run.text.trim().is_empty() && !run.bold);
        if has_plain_text {
            let prefix = para
                .text
                .split_once(':')
                .map(|(head, _)| head)
                .unwrap_or(&para.text);
            errors.push(ErrorRecord::new(
                para.index,
                ErrorKind::BoldFormatting,
                format!("Texto de {prefix} no está completamente en negrita."),
            ));
        }
    }
    errors
}

/// Runs must use the required font and size.
///
/// Per run: a wrong font wins over a wrong size; the first violation stops
/// the scan of that paragraph's runs, and checking resumes at the next
/// paragraph. Runs without font information cannot fail.
pub fn check_font_and_size(transcript: &Transcript) -> Vec<ErrorRecord> {
    let mut errors = Vec::new();
    for para in &transcript.paragraphs {
        for run in &para.runs {
            if let Some(font) = &run.font_name
                && !font.eq_ignore_ascii_case(REQUIRED_FONT)
            {
                errors.push(ErrorRecord::new(
                    para.index,
                    ErrorKind::WrongFont,
                    format!("'{font}' en vez de {REQUIRED_FONT}"),
                ));
                break;
            } else if let Some(size) = run.font_size_pt
                && size != REQUIRED_SIZE_PT
            {
                errors.push(ErrorRecord::new(
                    para.index,
                    ErrorKind::WrongSize,
                    format!("{size:?}pt en vez de {REQUIRED_SIZE_PT}pt"),
                ));
                break;
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{Paragraph, Run};

    fn with_font(text: &str, bold: bool, font: Option<&str>, size: Option<f32>) -> Run {
        Run {
            font_name: font.map(str::to_string),
            font_size_pt: size,
            ..Run::new(text, bold)
        }
    }

    #[test]
    fn fully_bold_interviewer_paragraph_passes() {
        let t = Transcript::new(vec![Paragraph::from_runs(
            1,
            vec![
                Run::new("ENTREVISTADOR:", true),
                Run::new("  ", false), // blank separator run may stay plain
                Run::new("¿seguimos?", true),
            ],
        )]);
        assert!(check_interviewer_bold(&t).is_empty());
    }

    #[test]
    fn plain_run_in_interviewer_paragraph_is_one_error() {
        let t = Transcript::new(vec![Paragraph::from_runs(
            1,
            vec![
                Run::new("ENTREVISTADOR: ", true),
                Run::new("Hola", false),
                Run::new("y más texto", false),
            ],
        )]);
        let errors = check_interviewer_bold(&t);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::BoldFormatting);
        assert_eq!(
            errors[0].description,
            "Texto de ENTREVISTADOR no está completamente en negrita."
        );
    }

    #[test]
    fn interviewee_paragraphs_are_not_checked_for_bold() {
        let t = Transcript::new(vec![Paragraph::from_runs(
            1,
            vec![Run::new("ENTREVISTADA: sin negrita", false)],
        )]);
        assert!(check_interviewer_bold(&t).is_empty());
    }

    #[test]
    fn interviewer_feminine_prefix_appears_in_description() {
        let t = Transcript::new(vec![Paragraph::from_runs(
            2,
            vec![Run::new("ENTREVISTADORA: hola", false)],
        )]);
        let errors = check_interviewer_bold(&t);
        assert_eq!(errors[0].line, 2);
        assert_eq!(
            errors[0].description,
            "Texto de ENTREVISTADORA no está completamente en negrita."
        );
    }

    #[test]
    fn wrong_font_is_reported_once_per_paragraph() {
        let t = Transcript::new(vec![Paragraph::from_runs(
            1,
            vec![
                with_font("uno", false, Some("Times New Roman"), None),
                with_font("dos", false, Some("Comic Sans"), None),
            ],
        )]);
        let errors = check_font_and_size(&t);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::WrongFont);
        assert_eq!(errors[0].description, "'Times New Roman' en vez de Arial");
    }

    #[test]
    fn font_comparison_ignores_ascii_case() {
        let t = Transcript::new(vec![Paragraph::from_runs(
            1,
            vec![
                with_font("a", false, Some("arial"), None),
                with_font("b", false, Some("ARIAL"), None),
            ],
        )]);
        assert!(check_font_and_size(&t).is_empty());
    }

    #[test]
    fn wrong_size_renders_with_decimal_point() {
        let t = Transcript::new(vec![
            Paragraph::from_runs(1, vec![with_font("a", false, Some("Arial"), Some(11.0))]),
            Paragraph::from_runs(2, vec![with_font("b", false, None, Some(10.5))]),
        ]);
        let errors = check_font_and_size(&t);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, ErrorKind::WrongSize);
        assert_eq!(errors[0].description, "11.0pt en vez de 12pt");
        assert_eq!(errors[1].description, "10.5pt en vez de 12pt");
    }

    #[test]
    fn wrong_font_wins_over_wrong_size() {
        let t = Transcript::new(vec![Paragraph::from_runs(
            1,
            vec![with_font("a", false, Some("Calibri"), Some(10.0))],
        )]);
        let errors = check_font_and_size(&t);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::WrongFont);
    }

    #[test]
    fn required_font_and_size_pass() {
        let t = Transcript::new(vec![Paragraph::from_runs(
            1,
            vec![
                with_font("a", false, Some("Arial"), Some(12.0)),
                Run::new("sin información de fuente", false),
            ],
        )]);
        assert!(check_font_and_size(&t).is_empty());
    }

    #[test]
    fn each_paragraph_is_checked_independently() {
        let t = Transcript::new(vec![
            Paragraph::from_runs(1, vec![with_font("a", false, Some("Calibri"), None)]),
            Paragraph::from_runs(2, vec![with_font("b", false, Some("Courier"), None)]),
        ]);
        let errors = check_font_and_size(&t);
        let lines: Vec<u32> = errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![1, 2]);
    }
}
