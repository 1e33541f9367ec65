//! Field validators for record input.
//!
//! Each validator is a pure predicate over a string, encoding the syntactic
//! contract of one field. They give input feedback; they do not check meaning
//! (`validate_date("2024-02-30")` passes, there is no calendar lookup).
//!
//! Digit classes are ASCII on purpose: `[0-9]`, not Unicode `\d`.

use crate::model::{Field, RecordDraft, RecordPatch};
use once_cell::sync::Lazy;
use regex::Regex;

static DESCRIPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S(?:.*\S)?$").expect("Invalid regex"));

static NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0|[1-9][0-9]*)(\.[0-9]{1,2})?$").expect("Invalid regex"));

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$").expect("Invalid regex")
});

static CATEGORY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+(?:[ -][A-Za-z]+)*$").expect("Invalid regex"));

static ISBN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:ISBN[-\s]?)?(?:97[89][-\s]?)?[0-9]{1,5}[-\s]?[0-9]{1,7}[-\s]?[0-9]{1,7}[-\s]?[0-9X]\b")
        .expect("Invalid regex")
});

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("Invalid regex"));

pub const DESCRIPTION_HINT: &str = "No leading/trailing spaces allowed";
pub const NUMERIC_HINT: &str = "Must be a positive number";
pub const CATEGORY_HINT: &str = "Letters, spaces, and hyphens only";
pub const DATE_HINT: &str = "Use YYYY-MM-DD format";
pub const DUPLICATE_WORDS_HINT: &str = "Contains a repeated word";

/// Non-empty text whose first and last characters are not whitespace.
///
/// ```
/// use bookvault::validation::validate_description;
///
/// assert!(validate_description("A"));
/// assert!(validate_description("The Great Gatsby"));
/// assert!(!validate_description(" Leading space"));
/// assert!(!validate_description("   "));
/// ```
pub fn validate_description(input: &str) -> bool {
    DESCRIPTION_RE.is_match(input)
}

/// `0`, or an integer without leading zero, with at most two decimals.
pub fn validate_numeric(input: &str) -> bool {
    NUMERIC_RE.is_match(input)
}

/// `YYYY-MM-DD` with month in 01..=12 and day in 01..=31.
pub fn validate_date(input: &str) -> bool {
    DATE_RE.is_match(input)
}

/// Alphabetic runs joined by exactly one space or hyphen.
pub fn validate_category(input: &str) -> bool {
    CATEGORY_RE.is_match(input)
}

/// Loose ISBN-10/13 shape check, found anywhere in `input`: optional `ISBN`
/// prefix and `978`/`979` group, then digit groups with optional `-` or space
/// separators and a final digit or `X`. Check digits are not verified.
///
/// ```
/// use bookvault::validation::validate_isbn;
///
/// assert!(validate_isbn("978-0-7432-7356-5"));
/// assert!(validate_isbn("ISBN 0-7432-7356-x"));
/// assert!(!validate_isbn("no number here"));
/// ```
pub fn validate_isbn(input: &str) -> bool {
    ISBN_RE.is_match(input)
}

/// True when a word is immediately repeated (`"the the"`), case-sensitively.
///
/// Equivalent to the back-reference pattern `\b(\w+)\s+\1\b`: two adjacent
/// word tokens separated only by whitespace must be identical. Repeats that
/// are not adjacent are not reported.
pub fn validate_duplicate_words(input: &str) -> bool {
    let mut words = WORD_RE.find_iter(input);
    let Some(mut prev) = words.next() else {
        return false;
    };

    for word in words {
        let gap = &input[prev.end()..word.start()];
        if !gap.is_empty() && gap.chars().all(char::is_whitespace) && prev.as_str() == word.as_str()
        {
            return true;
        }
        prev = word;
    }

    false
}

/// Converts validated page input into a page count, dropping decimals.
pub fn parse_pages(input: &str) -> Option<u32> {
    if !validate_numeric(input) {
        return None;
    }
    let whole = input.split('.').next().unwrap_or(input);
    whole.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of checking a draft or patch. Warnings never block a save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
    pub warnings: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn check(&mut self, field: Field, value: &str) {
        let (valid, hint) = match field {
            Field::Title | Field::Author => (validate_description(value), DESCRIPTION_HINT),
            Field::Pages => (parse_pages(value).is_some(), NUMERIC_HINT),
            Field::Tag => (validate_category(value), CATEGORY_HINT),
            Field::DateAdded => (validate_date(value), DATE_HINT),
        };
        if !valid {
            self.errors.push(FieldError::new(field, hint));
        }
        if field == Field::Title && validate_duplicate_words(value) {
            self.warnings
                .push(FieldError::new(field, DUPLICATE_WORDS_HINT));
        }
    }
}

/// Runs the validator set over a complete draft.
pub fn validate_draft(draft: &RecordDraft) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.check(Field::Title, &draft.title);
    report.check(Field::Author, &draft.author);
    report.check(Field::Pages, &draft.pages);
    report.check(Field::Tag, &draft.tag);
    if let Some(date) = &draft.date_added {
        report.check(Field::DateAdded, date);
    }
    report
}

/// Runs the validator set over the fields a patch touches.
pub fn validate_patch(patch: &RecordPatch) -> ValidationReport {
    let mut report = ValidationReport::default();
    let fields = [
        (Field::Title, &patch.title),
        (Field::Author, &patch.author),
        (Field::Pages, &patch.pages),
        (Field::Tag, &patch.tag),
        (Field::DateAdded, &patch.date_added),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            report.check(field, value);
        }
    }
    report
}

/// Checks a single value against the validator for `field`.
pub fn validate_field(field: Field, value: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.check(field, value);
    report
}
