//! Whitespace and word-boundary cleanup for extracted text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static HORIZONTAL_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static SPACE_AFTER_NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n ").unwrap());
static LOWER_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());
static ACRONYM_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z])([A-Z][a-z])").unwrap());
static DIGIT_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9])([A-Z])").unwrap());
static LOWER_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([0-9])").unwrap());
static HEX_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9A-Fa-f]{8,}").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize joined extraction fragments.
///
/// Steps, in order:
/// 1. three or more newlines become two
/// 2. runs of spaces and tabs become one space
/// 3. a space right after a newline is dropped
/// 4. `aB` becomes `a B`
/// 5. `ABc` becomes `A Bc`
/// 6. `1A` becomes `1 A`, `a1` becomes `a 1`
/// 7. runs of eight or more hex digits are removed
/// 8. remaining whitespace runs collapse and the result is trimmed
///
/// Step 8 keeps line structure: a run that contains newlines collapses to
/// those newlines (at most two), any other run to a single space.
pub fn normalize(text: &str) -> String {
    let text = EXCESS_NEWLINES.replace_all(text, "\n\n");
    let text = HORIZONTAL_SPACE.replace_all(&text, " ");
    let text = SPACE_AFTER_NEWLINE.replace_all(&text, "\n");
    let text = LOWER_UPPER.replace_all(&text, "$1 $2");
    let text = ACRONYM_WORD.replace_all(&text, "$1 $2");
    let text = DIGIT_UPPER.replace_all(&text, "$1 $2");
    let text = LOWER_DIGIT.replace_all(&text, "$1 $2");
    let text = HEX_RUN.replace_all(&text, "");
    collapse_whitespace(&text).trim().to_string()
}

/// Collapse whitespace runs, keeping up to two newlines from each run.
fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(text, |caps: &Captures<'_>| {
            match caps[0].matches('\n').count() {
                0 => " ",
                1 => "\n",
                _ => "\n\n",
            }
        })
        .into_owned()
}

/// Collapse every whitespace run to a single space and trim.
pub fn squash_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}
