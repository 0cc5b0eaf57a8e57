use uuid::Uuid;

/// Errors raised by the pure domain services. Never carries I/O.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        match fields.into_iter().next() {
            Some((field, errs)) => {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is invalid".to_string());
                Self::validation(field, reason)
            }
            None => Self::validation("input", "is invalid"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Forbidden")]
    Forbidden,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP-style status for presentation layers.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Domain(DomainError::Validation { .. }) => 422,
            AppError::Domain(DomainError::NotFound { .. }) => 404,
            AppError::Forbidden => 403,
            AppError::Conflict(_) => 409,
            AppError::Storage(e) => {
                tracing::error!(error = %e, "Storage error");
                500
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                500
            }
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Domain(DomainError::Validation { .. }) => "validation",
            AppError::Domain(DomainError::NotFound { .. }) => "not_found",
            AppError::Forbidden => "forbidden",
            AppError::Conflict(_) => "conflict",
            AppError::Storage(_) => "storage",
            AppError::Internal(_) => "internal",
        }
    }

    /// Message safe to show to a user. Storage and internal failures are masked.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Storage(_) | AppError::Internal(_) => "Internal server error".into(),
            other => other.to_string(),
        }
    }

    /// JSON error envelope, same shape for every failure.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.public_message(),
                "status": self.status_code(),
            }
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct SampleForm {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
    }

    #[test]
    fn test_validation_maps_to_422() {
        let err = AppError::from(DomainError::validation("title", "is required"));
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.code(), "validation");
        assert_eq!(err.public_message(), "Invalid title: is required");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::from(DomainError::not_found("Goal", Uuid::nil()));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn test_storage_message_is_masked() {
        let err = AppError::Storage("disk full at /var/data".into());
        assert_eq!(err.status_code(), 500);
        let json = err.to_json();
        assert_eq!(json["error"]["message"], "Internal server error");
        assert_eq!(json["error"]["status"], 500);
    }

    #[test]
    fn test_validator_errors_convert_with_field_name() {
        let form = SampleForm {
            name: String::new(),
        };
        let err: DomainError = form.validate().unwrap_err().into();
        assert_eq!(
            err,
            DomainError::Validation {
                field: "name".into(),
                reason: "must not be empty".into(),
            }
        );
    }
}
