use thiserror::Error;

use crate::render::exporter::ExportError;
use crate::schema::validate::FieldErrors;

/// Application-level error taxonomy. Every variant is recoverable — none of
/// them crashes the process or corrupts the store's last-good record.
#[derive(Debug, Error)]
pub enum AppError {
    /// The candidate record violated the schema. Field-level messages are
    /// carried verbatim so callers can surface them next to their inputs.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{validate, RawResume};

    #[test]
    fn test_validation_errors_convert_and_display() {
        let errors = validate(&RawResume::default()).expect_err("blank record is invalid");
        let app: AppError = errors.into();
        let rendered = app.to_string();
        assert!(rendered.starts_with("validation failed: "));
        assert!(rendered.contains("email: Invalid email address"));
    }

    #[test]
    fn test_export_error_is_transparent() {
        let app: AppError = AppError::from(ExportError::Busy);
        assert_eq!(app.to_string(), ExportError::Busy.to_string());
    }
}
