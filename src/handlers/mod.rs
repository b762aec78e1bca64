pub mod accounts;
pub mod admin;
pub mod bookings;
pub mod cart;
pub mod feedback;

use actix_web::{error::JsonPayloadError, web, HttpRequest};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::errors::FormErrors;
use crate::errors::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Money goes over the wire as a decimal string, e.g. "450.00".
pub(crate) fn money(amount: &BigDecimal) -> String {
    amount.to_string()
}

pub(crate) fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339()
}

/// Malformed JSON bodies get the same 422 envelope as failed forms.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let mut form = FormErrors::new();
        form.insert("body".to_string(), err.to_string());
        AppError::Invalid {
            info: "This form is invalid".to_string(),
            form,
        }
        .into()
    })
}
