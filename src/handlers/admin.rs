//! Site administration: managers, their profiles and the feedback they send.
//!
//! Every route here requires the `X-Admin-Key` header.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AdminAccess;
use crate::domain::manager::{Manager, ManagerForm, ManagerProfile, ModerationAction};
use crate::errors::AppError;
use crate::AppState;

use super::feedback::FeedbackResponse;
use super::{timestamp, MessageResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ManagerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub is_archived: bool,
    pub is_approved: bool,
    pub created_at: String,
}

impl From<Manager> for ManagerResponse {
    fn from(m: Manager) -> Self {
        Self {
            created_at: timestamp(&m.created_at),
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            username: m.username,
            is_active: m.is_active,
            is_archived: m.is_archived,
            is_approved: m.is_approved,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ManagersResponse {
    pub managers: Vec<ManagerResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerProfileResponse {
    pub id: Uuid,
    pub manager_id: Uuid,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl From<ManagerProfile> for ManagerProfileResponse {
    fn from(p: ManagerProfile) -> Self {
        Self {
            created_at: timestamp(&p.created_at),
            id: p.id,
            manager_id: p.manager_id,
            phone_number: p.phone_number,
            gender: p.gender,
            image: p.image,
            is_active: p.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerProfilesResponse {
    pub profiles: Vec<ManagerProfileResponse>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct IdsRequest {
    /// Manager ids, or manager profile ids for the profile actions
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerFeedbackResponse {
    pub feedback: Vec<FeedbackResponse>,
}

async fn moderate(
    state: web::Data<AppState>,
    action: ModerationAction,
    ids: Vec<Uuid>,
) -> Result<HttpResponse, AppError> {
    let message = web::block(move || state.managers.moderate(action, &ids)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

// ── Managers ─────────────────────────────────────────────────────────────────

/// POST /admin/managers
///
/// Creates the manager together with an empty profile. The profile starts active.
#[utoipa::path(
    post,
    path = "/admin/managers",
    request_body = ManagerRequest,
    responses(
        (status = 201, description = "Manager created", body = ManagerResponse),
        (status = 403, description = "Missing or wrong admin key"),
        (status = 422, description = "Invalid form or email already in use"),
    ),
    tag = "admin"
)]
pub async fn create_manager(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    body: web::Json<ManagerRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let form = ManagerForm {
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
    };
    let manager = web::block(move || state.managers.create(form)).await??;
    Ok(HttpResponse::Created().json(ManagerResponse::from(manager)))
}

#[utoipa::path(
    get,
    path = "/admin/managers",
    responses(
        (status = 200, description = "All managers", body = ManagersResponse),
        (status = 403, description = "Missing or wrong admin key"),
    ),
    tag = "admin"
)]
pub async fn list_managers(
    _admin: AdminAccess,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let managers = web::block(move || state.managers.list()).await??;
    Ok(HttpResponse::Ok().json(ManagersResponse {
        managers: managers.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    delete,
    path = "/admin/managers/{id}",
    params(("id" = Uuid, Path, description = "Manager ID")),
    responses(
        (status = 204, description = "Manager deleted"),
        (status = 403, description = "Missing or wrong admin key"),
        (status = 404, description = "Manager not found"),
    ),
    tag = "admin"
)]
pub async fn delete_manager(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.managers.delete(id)).await??;
    Ok(HttpResponse::NoContent().finish())
}

// ── Manager profiles ─────────────────────────────────────────────────────────

/// GET /admin/manager-profiles
///
/// Profile ids listed here are the ones the profile bulk actions take.
#[utoipa::path(
    get,
    path = "/admin/manager-profiles",
    responses(
        (status = 200, description = "Manager profiles, newest first", body = ManagerProfilesResponse),
        (status = 403, description = "Missing or wrong admin key"),
    ),
    tag = "admin"
)]
pub async fn list_manager_profiles(
    _admin: AdminAccess,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profiles = web::block(move || state.managers.profiles()).await??;
    Ok(HttpResponse::Ok().json(ManagerProfilesResponse {
        profiles: profiles.into_iter().map(Into::into).collect(),
    }))
}

// ── Bulk actions ─────────────────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/admin/managers/approve",
    request_body = IdsRequest,
    responses(
        (status = 200, description = "Managers approved", body = MessageResponse),
        (status = 422, description = "No ids given"),
    ),
    tag = "admin"
)]
pub async fn approve_managers(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    body: web::Json<IdsRequest>,
) -> Result<HttpResponse, AppError> {
    moderate(state, ModerationAction::ApproveManagers, body.into_inner().ids).await
}

#[utoipa::path(
    post,
    path = "/admin/managers/archive",
    request_body = IdsRequest,
    responses(
        (status = 200, description = "Managers archived", body = MessageResponse),
        (status = 422, description = "No ids given"),
    ),
    tag = "admin"
)]
pub async fn archive_managers(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    body: web::Json<IdsRequest>,
) -> Result<HttpResponse, AppError> {
    moderate(state, ModerationAction::ArchiveManagers, body.into_inner().ids).await
}

#[utoipa::path(
    post,
    path = "/admin/manager-profiles/activate",
    request_body = IdsRequest,
    responses(
        (status = 200, description = "Profiles activated", body = MessageResponse),
        (status = 422, description = "No ids given"),
    ),
    tag = "admin"
)]
pub async fn activate_profiles(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    body: web::Json<IdsRequest>,
) -> Result<HttpResponse, AppError> {
    moderate(state, ModerationAction::ActivateProfiles, body.into_inner().ids).await
}

#[utoipa::path(
    post,
    path = "/admin/manager-profiles/deactivate",
    request_body = IdsRequest,
    responses(
        (status = 200, description = "Profiles deactivated", body = MessageResponse),
        (status = 422, description = "No ids given"),
    ),
    tag = "admin"
)]
pub async fn deactivate_profiles(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    body: web::Json<IdsRequest>,
) -> Result<HttpResponse, AppError> {
    moderate(state, ModerationAction::DeactivateProfiles, body.into_inner().ids).await
}

// ── Manager feedback ─────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/admin/manager-feedback",
    responses(
        (status = 200, description = "Feedback sent by managers", body = ManagerFeedbackResponse),
        (status = 403, description = "Missing or wrong admin key"),
    ),
    tag = "admin"
)]
pub async fn list_manager_feedback(
    _admin: AdminAccess,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let feedback = web::block(move || state.managers.feedback()).await??;
    Ok(HttpResponse::Ok().json(ManagerFeedbackResponse {
        feedback: feedback.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    delete,
    path = "/admin/manager-feedback/{id}",
    params(("id" = Uuid, Path, description = "Feedback ID")),
    responses(
        (status = 204, description = "Feedback deleted"),
        (status = 404, description = "Feedback not found"),
    ),
    tag = "admin"
)]
pub async fn delete_manager_feedback(
    _admin: AdminAccess,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.managers.delete_feedback(id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
