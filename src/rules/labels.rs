//! Speaker-label checks: validity, bold headers, empty interventions, and
//! forbidden label patterns.

use super::vocabulary::{
    EMPTY_INTERVENTION_RE, FORBIDDEN_LABEL_REGEXES, INTERVIEWER_LABELS, LABEL_PREFIX_RE,
    VALID_LABELS,
};
use super::{ErrorKind, ErrorRecord};
use crate::transcript::Transcript;

/// Check leading `LABEL:` prefixes.
///
/// A paragraph starting with an ASCII uppercase token and a colon must use
/// one of the four recognized labels; interviewer labels must additionally
/// be carried by at least one bold run containing the label text.
pub fn check_label_validity(transcript: &Transcript) -> Vec<ErrorRecord> {
    let mut errors = Vec::new();
    for para in &transcript.paragraphs {
        let Some(caps) = LABEL_PREFIX_RE.captures(&para.text) else {
            continue;
        };
        let label = &caps[1];

        if !VALID_LABELS.contains(label) {
            errors.push(ErrorRecord::new(
                para.index,
                ErrorKind::InvalidLabel,
                format!("Etiqueta '{label}' no es válida."),
            ));
        } else if INTERVIEWER_LABELS.contains(&label) {
            let carried_bold = para
                .runs
                .iter()
                .any(|run| run.bold && run.text.contains(label));
            if !carried_bold {
                errors.push(ErrorRecord::new(
                    para.index,
                    ErrorKind::HeaderNotBold,
                    format!("Etiqueta '{label}' debería estar en negrita."),
                ));
            }
        }
    }
    errors
}

/// Check for a label followed by nothing: the intervention text must sit
/// on the same paragraph as its label.
pub fn check_empty_interventions(transcript: &Transcript) -> Vec<ErrorRecord> {
    let mut errors = Vec::new();
    for para in &transcript.paragraphs {
        if EMPTY_INTERVENTION_RE.is_match(&para.text) {
            errors.push(ErrorRecord::new(
                para.index,
                ErrorKind::EmptyIntervention,
                "Debe ir junto al texto, sin salto de línea",
            ));
        }
    }
    errors
}

/// Check paragraphs against the forbidden label patterns.
///
/// Matching is case-insensitive, but a match whose text is exactly one of
/// the four canonical labels is exempt from the role-word patterns. The
/// first pattern with a non-exempt match wins and the paragraph's
/// remaining patterns are skipped.
pub fn check_forbidden_patterns(transcript: &Transcript) -> Vec<ErrorRecord> {
    let mut errors = Vec::new();
    for para in &transcript.paragraphs {
        for (pattern, regex) in FORBIDDEN_LABEL_REGEXES.iter() {
            let flagged = regex
                .find_iter(&para.text)
                .any(|m| !VALID_LABELS.contains(m.as_str()));
            if flagged {
                errors.push(ErrorRecord::new(
                    para.index,
                    ErrorKind::InvalidLabel,
                    format!("Se encontró coincidencia con patrón: {pattern}"),
                ));
                break;
            }
        }
    }
    errors
}
