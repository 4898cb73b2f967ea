//! Form validation and sanitization
//!
//! Rules are plain data: each [`FieldRule`] names a field, the message shown
//! when it fails, and the ordered [`Check`]s applied to its value. [`run`]
//! evaluates a rule table against a submitted field bag and returns a
//! sanitized copy alongside any errors, leaving the submission untouched.

use std::collections::HashMap;

use serde::Serialize;
use validator::ValidateLength;

/// One step of a field pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Strip leading and trailing whitespace
    Trim,
    /// Reject values shorter than `n` characters
    MinLength(u64),
    /// Replace HTML-significant characters with entities
    Escape,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub message: &'static str,
    pub checks: &'static [Check],
}

const REQUIRED_TEXT: &[Check] = &[Check::Trim, Check::MinLength(1), Check::Escape];

/// Rules applied to book create and update submissions
pub const BOOK_RULES: &[FieldRule] = &[
    FieldRule {
        field: "title",
        message: "Title must not be empty.",
        checks: REQUIRED_TEXT,
    },
    FieldRule {
        field: "author",
        message: "Author must not be empty.",
        checks: REQUIRED_TEXT,
    },
    FieldRule {
        field: "summary",
        message: "Summary must not be empty.",
        checks: REQUIRED_TEXT,
    },
    FieldRule {
        field: "isbn",
        message: "ISBN must not be empty",
        checks: REQUIRED_TEXT,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Outcome of running a rule table
#[derive(Debug, Clone, Default)]
pub struct Validation {
    values: HashMap<String, String>,
    errors: Vec<FieldError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors in rule declaration order
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Sanitized value of a field, empty when it was not submitted
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or_default()
    }
}

/// Evaluate `rules` over a copy of `fields`.
///
/// Every check of a rule runs, so the sanitized copy is fully trimmed and
/// escaped even for failing fields; a rule contributes at most one error.
pub fn run(rules: &[FieldRule], fields: &HashMap<String, String>) -> Validation {
    let mut values = fields.clone();
    let mut errors = Vec::new();

    for rule in rules {
        let mut value = fields.get(rule.field).cloned().unwrap_or_default();
        let mut failed = false;

        for check in rule.checks {
            match *check {
                Check::Trim => value = value.trim().to_string(),
                Check::MinLength(min) => {
                    if !value.validate_length(Some(min), None, None) {
                        failed = true;
                    }
                }
                Check::Escape => value = escape(&value),
            }
        }

        if failed {
            errors.push(FieldError {
                field: rule.field.to_string(),
                message: rule.message.to_string(),
            });
        }
        values.insert(rule.field.to_string(), value);
    }

    Validation { values, errors }
}

/// Entity-encode characters that are significant in HTML text or attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}
