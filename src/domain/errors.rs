use std::collections::BTreeMap;

use thiserror::Error;

/// Per-field validation messages, keyed by form field name.
pub type FormErrors = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),

    /// The submitted form failed validation.
    #[error("{info}")]
    Invalid { info: String, form: FormErrors },

    /// The request is well-formed but breaks a business rule against current state.
    #[error("{info}")]
    Conflict { info: String, form: FormErrors },

    #[error("Enter valid mpesa code")]
    InvalidPaymentCode,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(what: &str) -> Self {
        DomainError::NotFound(format!("{what} not found"))
    }

    pub fn invalid(info: impl Into<String>, form: FormErrors) -> Self {
        DomainError::Invalid {
            info: info.into(),
            form,
        }
    }

    /// A business-rule rejection without field errors.
    pub fn conflict(info: impl Into<String>) -> Self {
        DomainError::Conflict {
            info: info.into(),
            form: FormErrors::new(),
        }
    }
}
