use nutype::nutype;
use serde::Serialize;

/// A contact form submission. Every field is normalized by [`sanitize_text`]
/// as soon as it is constructed or deserialized, so validation only ever
/// sees canonical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub telegram: ContactTelegram,
    pub email: ContactEmail,
    pub message: ContactMessage,
}

#[nutype(
    sanitize(with = sanitize_text),
    derive(Debug, Clone, PartialEq, Eq, From, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    sanitize(with = sanitize_text),
    derive(Debug, Clone, PartialEq, Eq, From, Deref, Serialize, Deserialize)
)]
pub struct ContactTelegram(String);

/// The submitter's email address as typed. Its format is checked during
/// validation, not on construction.
#[nutype(
    sanitize(with = sanitize_text),
    derive(Debug, Clone, PartialEq, Eq, From, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

#[nutype(
    sanitize(with = sanitize_text),
    derive(Debug, Clone, PartialEq, Eq, From, Deref, Serialize, Deserialize)
)]
pub struct ContactMessage(String);

/// Trims leading and trailing whitespace and collapses every internal run of
/// whitespace into a single space.
///
/// Whitespace follows the ECMAScript `\s` class browsers use for form input:
/// the zero width no-break space (U+FEFF) counts, next line (U+0085) does not.
pub fn sanitize_text(value: String) -> String {
    let mut words = value.split(is_whitespace).filter(|word| !word.is_empty());
    let Some(first) = words.next() else {
        return String::new();
    };

    words.fold(first.to_owned(), |mut out, word| {
        out.push(' ');
        out.push_str(word);
        out
    })
}

fn is_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Telegram,
    Email,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactRule {
    Required,
    Format,
    Length,
}

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactViolation {
    pub field: ContactField,
    pub rule: ContactRule,
    pub message: &'static str,
}
