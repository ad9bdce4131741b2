use intake_models::submission::{
    is_valid_email, RawSubmission, RawValue, Submission, SubmissionEmail, SubmissionField,
    SubmissionMessage, SubmissionName, Validation, ValidationErrors,
};

const NAME_RULES: &[Rule] = &[
    Rule::Required,
    Rule::String,
    Rule::Max(SubmissionName::MAX_LENGTH),
];

const EMAIL_RULES: &[Rule] = &[
    Rule::Required,
    Rule::String,
    Rule::Email,
    Rule::Max(SubmissionEmail::MAX_LENGTH),
];

const MESSAGE_RULES: &[Rule] = &[
    Rule::Required,
    Rule::String,
    Rule::Max(SubmissionMessage::MAX_LENGTH),
];

/// Validate a raw submission against the submission schema.
///
/// Every field is checked, so the result lists all violations at once. The
/// contents of valid fields are passed through unchanged.
pub fn validate(raw: &RawSubmission) -> Validation {
    let mut errors = ValidationErrors::new();

    let name = validate_field(
        raw,
        SubmissionField::Name,
        NAME_RULES,
        |name| SubmissionName::try_new(name),
        &mut errors,
    );
    let email = validate_field(
        raw,
        SubmissionField::Email,
        EMAIL_RULES,
        |email| SubmissionEmail::try_new(email),
        &mut errors,
    );
    let message = validate_field(
        raw,
        SubmissionField::Message,
        MESSAGE_RULES,
        |message| SubmissionMessage::try_new(message),
        &mut errors,
    );

    match (name, email, message) {
        (Some(name), Some(email), Some(message)) if errors.is_empty() => {
            Validation::Valid(Submission {
                name,
                email,
                message,
            })
        }
        _ => Validation::Invalid(errors),
    }
}

fn validate_field<T, E>(
    raw: &RawSubmission,
    field: SubmissionField,
    rules: &[Rule],
    new: impl FnOnce(String) -> Result<T, E>,
    errors: &mut ValidationErrors,
) -> Option<T> {
    let value = raw.get(field);

    let mut valid = true;
    for &rule in rules {
        if !rule.check(value) {
            errors.add(field, rule.message(field));
            valid = false;
            if rule.is_implicit() {
                break;
            }
        }
    }

    let Some(RawValue::Text(text)) = value.filter(|_| valid) else {
        return None;
    };

    new(text.clone())
        .inspect_err(|_| errors.add(field, format!("The {field} field is invalid.")))
        .ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    /// The field is present and not blank.
    Required,
    /// The field is a string.
    String,
    /// The field is a syntactically valid email address.
    Email,
    /// The field has at most this many characters.
    Max(usize),
}

impl Rule {
    /// Whether the remaining rules of a field are skipped if this one fails.
    fn is_implicit(self) -> bool {
        matches!(self, Self::Required | Self::String)
    }

    fn check(self, value: Option<&RawValue>) -> bool {
        match (self, value) {
            (Self::Required, None) => false,
            (Self::Required, Some(RawValue::Text(text))) => !text.trim().is_empty(),
            (Self::Required, Some(RawValue::Other)) => true,
            (Self::String, Some(value)) => matches!(value, RawValue::Text(_)),
            (_, None | Some(RawValue::Other)) => true,
            (Self::Email, Some(RawValue::Text(text))) => is_valid_email(text),
            (Self::Max(max), Some(RawValue::Text(text))) => text.chars().count() <= max,
        }
    }

    fn message(self, field: SubmissionField) -> String {
        match self {
            Self::Required => format!("The {field} field is required."),
            Self::String => format!("The {field} field must be a string."),
            Self::Email => format!("The {field} field must be a valid email address."),
            Self::Max(max) => {
                format!("The {field} field must not be greater than {max} characters.")
            }
        }
    }
}
