//! Fixed rule vocabulary: speaker labels, forbidden patterns, and
//! formatting requirements.
//!
//! Everything here is configuration data of the engine, not user input.
//! New forbidden patterns or labels are additions to these tables, not new
//! code.

use once_cell::sync::Lazy;
use phf::phf_set;
use regex::Regex;

/// The four recognized speaker labels, exact uppercase.
pub static VALID_LABELS: phf::Set<&'static str> = phf_set! {
    "ENTREVISTADOR",
    "ENTREVISTADORA",
    "ENTREVISTADO",
    "ENTREVISTADA",
};

/// The two labels whose whole intervention must be bold.
pub const INTERVIEWER_LABELS: [&str; 2] = ["ENTREVISTADOR", "ENTREVISTADORA"];

/// Required run font; compared ASCII case-insensitively.
pub const REQUIRED_FONT: &str = "Arial";

/// Required run size in points.
pub const REQUIRED_SIZE_PT: f32 = 12.0;

/// Forbidden label patterns, in checking order.
///
/// The list deliberately keeps near-duplicate entries: it is the exact
/// vocabulary reviewers know, and the pattern text is displayed verbatim
/// in error descriptions.
pub const FORBIDDEN_LABEL_PATTERNS: [&str; 11] = [
    r"\bUsuario\b",
    r"\bX{3,}\b",
    r"\bXxxxxxx\b",
    r"\bEntrevistador[a-z]*\b",
    r"\bEntrevistado[a-z]*\b",
    r"\bentrevistador[a-z]*\b",
    r"\bentrevistado[a-z]*\b",
    r"\bModerador[a-z]*\b",
    r"\bmoderador[a-z]*\b",
    r"\bSpeaker[a-z]*\b",
    r"\bSPEAKER[a-z]*\b",
];

/// Compiled forbidden patterns paired with their display form. Matching is
/// case-insensitive regardless of the pattern's own casing.
pub static FORBIDDEN_LABEL_REGEXES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    FORBIDDEN_LABEL_PATTERNS
        .iter()
        .map(|pattern| (*pattern, Regex::new(&format!("(?i){pattern}")).unwrap()))
        .collect()
});

/// A speaker-label prefix: leading ASCII uppercase token, then a colon.
pub static LABEL_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z]+):").unwrap());

/// A valid label followed by a colon and nothing but whitespace.
pub static EMPTY_INTERVENTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(ENTREVISTADOR|ENTREVISTADORA|ENTREVISTADO|ENTREVISTADA):\s*$").unwrap()
});

/// A question-like fragment: no newline and no question mark inside,
/// optionally opened by `¿`, terminated by `?`.
pub static QUESTION_FRAGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"¿?[^?¿\n]+\?").unwrap());
