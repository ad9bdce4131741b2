use std::collections::BTreeMap;

use email_address::{EmailAddress, Options};
use nutype::nutype;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Submission {
    /// Name of the submitter
    pub name: SubmissionName,
    /// Email address of the submitter
    pub email: SubmissionEmail,
    /// The message itself
    pub message: SubmissionMessage,
}

#[nutype(
    validate(not_empty, len_char_max = 255),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize, JsonSchema)
)]
pub struct SubmissionName(String);

impl SubmissionName {
    pub const MAX_LENGTH: usize = 255;
}

#[nutype(
    validate(not_empty, len_char_max = 255, predicate = |s| is_valid_email(s)),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize, JsonSchema)
)]
pub struct SubmissionEmail(String);

impl SubmissionEmail {
    pub const MAX_LENGTH: usize = 255;
}

/// Whether `s` is a bare email address like `max@example.com`.
///
/// Display names (`Max <max@example.com>`) and domain literals
/// (`max@[127.0.0.1]`) are rejected.
pub fn is_valid_email(s: &str) -> bool {
    let options = Options::default()
        .without_display_text()
        .without_domain_literal();
    EmailAddress::parse_with_options(s, options).is_ok()
}

#[nutype(
    validate(not_empty, len_char_max = 2000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize, JsonSchema)
)]
pub struct SubmissionMessage(String);

impl SubmissionMessage {
    pub const MAX_LENGTH: usize = 2000;
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionField {
    Name,
    Email,
    Message,
}

impl SubmissionField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl std::fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single value of an unvalidated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    /// Any value that is not a string, e.g. a number or a nested object.
    Other,
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

/// An unvalidated submission as received from a client, keyed by field name.
///
/// Unknown keys are kept but never looked at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSubmission(BTreeMap<String, RawValue>);

impl RawSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, field: SubmissionField) -> Option<&RawValue> {
        self.0.get(field.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawSubmission {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&Submission> for RawSubmission {
    fn from(value: &Submission) -> Self {
        Self::new()
            .with(SubmissionField::Name.as_str(), value.name.as_str())
            .with(SubmissionField::Email.as_str(), value.email.as_str())
            .with(SubmissionField::Message.as_str(), value.message.as_str())
    }
}

/// Outcome of validating a [`RawSubmission`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid(Submission),
    Invalid(ValidationErrors),
}

/// Violated rules, grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<SubmissionField, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: SubmissionField, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: SubmissionField) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = SubmissionField> + '_ {
        self.0.keys().copied()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Summarizes the errors as the first message followed by the number of
/// remaining ones, e.g. `The name field is required. (and 2 more errors)`.
impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut messages = self.messages();
        let Some(first) = messages.next() else {
            return f.write_str("The given data was invalid.");
        };
        f.write_str(first)?;
        match messages.count() {
            0 => Ok(()),
            1 => f.write_str(" (and 1 more error)"),
            n => write!(f, " (and {n} more errors)"),
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl SubmissionName {
    pub fn as_str(&self) -> &str {
        self
    }
}

impl SubmissionEmail {
    pub fn as_str(&self) -> &str {
        self
    }
}

impl SubmissionMessage {
    pub fn as_str(&self) -> &str {
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn field_newtypes_enforce_bounds() {
        let name = "a".repeat(SubmissionName::MAX_LENGTH);
        assert!(SubmissionName::try_new(name.clone()).is_ok());
        assert!(SubmissionName::try_new(name + "a").is_err());
        assert!(SubmissionName::try_new(String::new()).is_err());

        let message = "ä".repeat(SubmissionMessage::MAX_LENGTH);
        assert!(SubmissionMessage::try_new(message.clone()).is_ok());
        assert!(SubmissionMessage::try_new(message + "ä").is_err());

        assert!(SubmissionEmail::try_new("max@example.com".to_owned()).is_ok());
        assert!(SubmissionEmail::try_new("not-an-email".to_owned()).is_err());
        assert!(SubmissionEmail::try_new(format!("{}@example.com", "a".repeat(244))).is_err());
    }

    #[test]
    fn email_must_be_bare_address() {
        for email in ["max@example.com", "max.mustermann+intake@mail.example.com"] {
            assert!(is_valid_email(email), "{email}");
        }

        for email in [
            "Max Mustermann <max@example.com>",
            "<max@example.com>",
            "max@[127.0.0.1]",
            "max@",
            "@example.com",
        ] {
            assert!(!is_valid_email(email), "{email}");
            assert!(SubmissionEmail::try_new(email.to_owned()).is_err(), "{email}");
        }
    }

    #[test]
    fn submission_serializes_as_flat_object() {
        let submission = Submission {
            name: "Max Mustermann".try_into().unwrap(),
            email: "max@example.com".try_into().unwrap(),
            message: "Hello World!".try_into().unwrap(),
        };

        let value = serde_json::to_value(&submission).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "name": "Max Mustermann",
                "email": "max@example.com",
                "message": "Hello World!",
            })
        );
    }

    #[test]
    fn validation_errors_serialize_by_field_name() {
        let mut errors = ValidationErrors::new();
        errors.add(SubmissionField::Message, "c");
        errors.add(SubmissionField::Name, "a");
        errors.add(SubmissionField::Name, "b");

        let value = serde_json::to_value(&errors).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "name": ["a", "b"], "message": ["c"] })
        );
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            [SubmissionField::Name, SubmissionField::Message]
        );
    }

    #[test]
    fn validation_errors_summary() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.to_string(), "The given data was invalid.");

        errors.add(SubmissionField::Name, "The name field is required.");
        assert_eq!(errors.to_string(), "The name field is required.");

        errors.add(SubmissionField::Email, "The email field is required.");
        assert_eq!(
            errors.to_string(),
            "The name field is required. (and 1 more error)"
        );

        errors.add(SubmissionField::Message, "The message field is required.");
        assert_eq!(
            errors.to_string(),
            "The name field is required. (and 2 more errors)"
        );
    }

    #[test]
    fn raw_submission_lookup() {
        let raw = RawSubmission::from_iter([("name", "Max"), ("unknown", "x")]);

        assert_eq!(
            raw.get(SubmissionField::Name),
            Some(&RawValue::Text("Max".into()))
        );
        assert_eq!(raw.get(SubmissionField::Email), None);
    }
}
