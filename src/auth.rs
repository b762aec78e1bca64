//! Request extractors for caller identity.
//!
//! Sessions are handled upstream. The customer id arrives in `X-Customer-Id`
//! and admin routes require `X-Admin-Key` to match the configured key.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use uuid::Uuid;

use crate::errors::AppError;

pub const CUSTOMER_HEADER: &str = "X-Customer-Id";
pub const ADMIN_HEADER: &str = "X-Admin-Key";

/// The customer making the request.
///
/// ```rust,ignore
/// async fn handler(CurrentCustomer(customer_id): CurrentCustomer) -> impl Responder { .. }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrentCustomer(pub Uuid);

impl FromRequest for CurrentCustomer {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = req
            .headers()
            .get(CUSTOMER_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok());
        ready(id.map(CurrentCustomer).ok_or_else(|| {
            AppError::Unauthorized("Please login to continue.".to_string())
        }))
    }
}

/// Configured admin key, registered as app data.
#[derive(Clone)]
pub struct AdminKey(pub String);

/// Proof that the request carried the admin key.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

impl FromRequest for AdminAccess {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(expected) = req.app_data::<web::Data<AdminKey>>() else {
            return ready(Err(AppError::Internal("admin key not configured".to_string())));
        };
        let given = req
            .headers()
            .get(ADMIN_HEADER)
            .and_then(|v| v.to_str().ok());
        ready(match given {
            Some(key) if key == expected.0 => Ok(AdminAccess),
            _ => Err(AppError::Forbidden(
                "You are not allowed to perform this action.".to_string(),
            )),
        })
    }
}
