use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::CurrentCustomer;
use crate::domain::feedback::{Feedback, FeedbackForm};
use crate::errors::AppError;
use crate::AppState;

use super::timestamp;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct FeedbackRequest {
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub subject: String,
    pub message: String,
    pub created_at: String,
}

impl From<Feedback> for FeedbackResponse {
    fn from(f: Feedback) -> Self {
        Self {
            created_at: timestamp(&f.created_at),
            id: f.id,
            author_id: f.author_id,
            subject: f.subject,
            message: f.message,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackSentResponse {
    pub message: String,
    pub feedback: FeedbackResponse,
}

/// POST /customers/me/feedback
#[utoipa::path(
    post,
    path = "/customers/me/feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 201, description = "Feedback stored", body = FeedbackSentResponse),
        (status = 404, description = "Unknown customer"),
        (status = 409, description = "Same feedback already sent"),
        (status = 422, description = "Invalid form"),
    ),
    tag = "customers"
)]
pub async fn submit_feedback(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
    body: web::Json<FeedbackRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let form = FeedbackForm {
        subject: body.subject,
        message: body.message,
    };
    let feedback = web::block(move || state.feedback.submit(customer_id, form)).await??;
    Ok(HttpResponse::Created().json(FeedbackSentResponse {
        message: "Feedback has been sent. Thank you".to_string(),
        feedback: feedback.into(),
    }))
}
