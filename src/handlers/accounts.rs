use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::accounts::{LoginRequest as Credentials, PasswordChange};
use crate::application::dashboard::Dashboard;
use crate::auth::CurrentCustomer;
use crate::domain::account::{Customer, ProfileForm, SignupForm};
use crate::errors::AppError;
use crate::AppState;

use super::bookings::{AppointmentResponse, BookingPaymentResponse, BookingResponse};
use super::cart::{OrderResponse, PaymentResponse};
use super::{timestamp, MessageResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

impl From<SignupRequest> for SignupForm {
    fn from(r: SignupRequest) -> Self {
        SignupForm {
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            password1: r.password1,
            password2: r.password2,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    pub status: bool,
    pub message: String,
    pub customer_id: Uuid,
    pub redirect: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    /// Email address or username
    pub username: String,
    pub password: String,
    /// "remember-me" keeps the session past browser close
    pub remember: Option<String>,
    /// Where to go after login
    pub next: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub customer_id: Uuid,
    pub remember: bool,
    pub redirect: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub is_verified: bool,
    pub created_at: String,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            created_at: timestamp(&c.created_at),
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
            username: c.username,
            is_verified: c.is_verified,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub customer: CustomerResponse,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
    pub order: Option<OrderResponse>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    /// "Male" or "Female"
    pub gender: Option<String>,
    pub image: Option<String>,
}

impl From<ProfileRequest> for ProfileForm {
    fn from(r: ProfileRequest) -> Self {
        ProfileForm {
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone_number: r.phone_number,
            gender: r.gender,
            image: r.image,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct PasswordChangeRequest {
    pub old_password: String,
    pub new_password1: String,
    pub new_password2: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub customer: CustomerResponse,
    pub booking_payments: Vec<BookingPaymentResponse>,
    pub order_payments: Vec<PaymentResponse>,
    pub appointments: Vec<AppointmentResponse>,
    pub bookings: Vec<BookingResponse>,
    pub orders: Vec<OrderResponse>,
    pub current_order: Option<OrderResponse>,
}

impl From<Dashboard> for DashboardResponse {
    fn from(d: Dashboard) -> Self {
        fn all<T, U: From<T>>(items: Vec<T>) -> Vec<U> {
            items.into_iter().map(U::from).collect()
        }
        Self {
            customer: d.customer.into(),
            booking_payments: all(d.booking_payments),
            order_payments: all(d.order_payments),
            appointments: all(d.appointments),
            bookings: all(d.bookings),
            orders: all(d.orders),
            current_order: d.current_order.map(Into::into),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /customers/signup
///
/// Creates an unverified account. The verification link is published through
/// the outbox as a `CustomerRegistered` event.
#[utoipa::path(
    post,
    path = "/customers/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 422, description = "Invalid form or email already in use"),
    ),
    tag = "customers"
)]
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let form = SignupForm::from(body.into_inner());
    let registration = web::block(move || state.accounts.signup(form)).await??;
    Ok(HttpResponse::Created().json(SignupResponse {
        status: true,
        message: registration.message,
        customer_id: registration.customer.id,
        redirect: "/customers/login".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/customers/verify/{uid}/{token}",
    params(
        ("uid" = String, Path, description = "Encoded customer id"),
        ("token" = String, Path, description = "Verification token"),
    ),
    responses(
        (status = 200, description = "Email verified", body = MessageResponse),
        (status = 409, description = "Invalid verification link"),
    ),
    tag = "customers"
)]
pub async fn verify_email(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (uid, token) = path.into_inner();
    let message = web::block(move || state.accounts.verify_email(&uid, &token)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

/// POST /customers/login
///
/// Checks credentials and account state only; session handling happens upstream.
#[utoipa::path(
    post,
    path = "/customers/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 401, description = "Bad credentials"),
        (status = 403, description = "Account not yet usable"),
    ),
    tag = "customers"
)]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let request = Credentials {
        username: body.username,
        password: body.password,
        remember: body.remember,
        next: body.next,
    };
    let success = web::block(move || state.accounts.login(request)).await??;
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: success.message,
        customer_id: success.customer.id,
        remember: success.remember,
        redirect: success.redirect,
    }))
}

#[utoipa::path(
    get,
    path = "/customers/me/profile",
    responses((status = 200, description = "Profile with the current order", body = ProfileResponse)),
    tag = "customers"
)]
pub async fn get_profile(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
) -> Result<HttpResponse, AppError> {
    let view = web::block(move || state.accounts.profile(customer_id)).await??;
    Ok(HttpResponse::Ok().json(ProfileResponse {
        customer: view.customer.into(),
        phone_number: view.profile.phone_number,
        gender: view.profile.gender,
        image: view.profile.image,
        order: view.order.map(Into::into),
    }))
}

#[utoipa::path(
    put,
    path = "/customers/me/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 422, description = "Invalid form or email already in use"),
    ),
    tag = "customers"
)]
pub async fn update_profile(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
    body: web::Json<ProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let form = ProfileForm::from(body.into_inner());
    let message =
        web::block(move || state.accounts.update_profile(customer_id, form)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

#[utoipa::path(
    post,
    path = "/customers/me/password",
    request_body = PasswordChangeRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 422, description = "Invalid form"),
    ),
    tag = "customers"
)]
pub async fn change_password(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
    body: web::Json<PasswordChangeRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let change = PasswordChange {
        old_password: body.old_password,
        new_password1: body.new_password1,
        new_password2: body.new_password2,
    };
    let message =
        web::block(move || state.accounts.change_password(customer_id, change)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

#[utoipa::path(
    get,
    path = "/customers/me/dashboard",
    responses((status = 200, description = "Customer history", body = DashboardResponse)),
    tag = "customers"
)]
pub async fn dashboard(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
) -> Result<HttpResponse, AppError> {
    let dashboard = web::block(move || state.dashboard.dashboard(customer_id)).await??;
    Ok(HttpResponse::Ok().json(DashboardResponse::from(dashboard)))
}
