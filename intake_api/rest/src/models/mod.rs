use intake_models::submission::ValidationErrors;
use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Serialize, JsonSchema)]
pub struct ApiMessage<M> {
    pub message: M,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ApiValidationError {
    /// Summary of the first violated rule
    pub message: String,
    /// Violated rules, grouped by field
    pub errors: ValidationErrors,
}

impl From<ValidationErrors> for ApiValidationError {
    fn from(errors: ValidationErrors) -> Self {
        Self {
            message: errors.to_string(),
            errors,
        }
    }
}
