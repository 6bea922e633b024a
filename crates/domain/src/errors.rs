//! Domain-level errors

use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Latitude or longitude missing or not a finite number
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Free-text address query was empty after trimming
    #[error("Empty query")]
    EmptyQuery,
}

impl DomainError {
    /// Create an invalid coordinates error
    pub fn invalid_coordinates(detail: impl Into<String>) -> Self {
        Self::InvalidCoordinates(detail.into())
    }
}

/// Flatten `validator` errors into sorted `path: message` lines
///
/// Nested structs contribute `parent.field` paths and list items
/// `list[index].field` paths.
#[must_use]
pub fn violation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut lines = Vec::new();
    collect_violations(errors, "", &mut lines);
    lines.sort();
    lines
}

fn collect_violations(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = format!("{prefix}{field}");
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string);
                    out.push(format!("{path}: {message}"));
                }
            },
            ValidationErrorsKind::Struct(nested) => {
                collect_violations(nested, &format!("{path}."), out);
            },
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_violations(nested, &format!("{path}[{index}]."), out);
                }
            },
        }
    }
}
