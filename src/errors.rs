use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;
use thiserror::Error;

use crate::domain::errors::{DomainError, FormErrors};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    /// 422 with per-field messages.
    #[error("{info}")]
    Invalid { info: String, form: FormErrors },

    /// 409: the request breaks a rule against current state.
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

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::Invalid { info, form } => AppError::Invalid { info, form },
            DomainError::Conflict { info, form } => AppError::Conflict { info, form },
            DomainError::InvalidPaymentCode => AppError::InvalidPaymentCode,
            DomainError::Unauthorized(msg) => AppError::Unauthorized(msg),
            DomainError::Forbidden(msg) => AppError::Forbidden(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Invalid { .. } | AppError::InvalidPaymentCode => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::NotFound(_) => response.json(json!({ "error": self.to_string() })),
            AppError::Invalid { info, form } | AppError::Conflict { info, form } => {
                response.json(json!({ "info": info, "form": form }))
            }
            AppError::InvalidPaymentCode => response.json(json!({ "mpesa": self.to_string() })),
            AppError::Unauthorized(info) | AppError::Forbidden(info) => {
                response.json(json!({ "info": info }))
            }
            AppError::Internal(msg) => {
                log::error!("internal error: {msg}");
                response.json(json!({ "error": "Internal server error" }))
            }
        }
    }
}
