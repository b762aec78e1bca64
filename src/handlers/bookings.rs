use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::bookings::AppointmentRequest as NewAppointment;
use crate::auth::CurrentCustomer;
use crate::domain::booking::{Appointment, Apprenticeship, Booking, BookingPayment, SalonService};
use crate::domain::errors::FormErrors;
use crate::domain::payment::PaymentForm;
use crate::errors::AppError;
use crate::AppState;

use super::cart::PaymentRequest;
use super::{money, timestamp, MessageResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub name: String,
    pub price: String,
}

impl From<SalonService> for ServiceResponse {
    fn from(s: SalonService) -> Self {
        Self {
            price: money(&s.price),
            id: s.id,
            name: s.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: Uuid,
    pub service_id: Uuid,
    pub transaction_id: String,
    pub is_active: bool,
    pub is_paid: bool,
    pub created_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            created_at: timestamp(&b.created_at),
            id: b.id,
            service_id: b.service_id,
            transaction_id: b.transaction_id,
            is_active: b.is_active,
            is_paid: b.is_paid,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentBookingResponse {
    /// `null` when the customer has no ongoing booking.
    pub booking: Option<BookingResponse>,
    pub service: Option<ServiceResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingPaymentResponse {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub transaction_id: String,
    pub amount: String,
    pub created_at: String,
}

impl From<BookingPayment> for BookingPaymentResponse {
    fn from(p: BookingPayment) -> Self {
        Self {
            amount: money(&p.amount),
            created_at: timestamp(&p.created_at),
            id: p.id,
            booking_id: p.booking_id,
            transaction_id: p.transaction_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingPaidResponse {
    pub message: String,
    pub payment: BookingPaymentResponse,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AppointmentRequest {
    /// RFC 3339 start time, e.g. "2026-03-01T09:00:00Z"
    pub date: String,
    /// RFC 3339 end time, strictly after `date`
    pub stop_date: String,
    pub service_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub service_id: Option<Uuid>,
    pub date: String,
    pub stop_date: String,
    pub created_at: String,
}

impl From<Appointment> for AppointmentResponse {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            service_id: a.service_id,
            date: timestamp(&a.range.start),
            stop_date: timestamp(&a.range.stop),
            created_at: timestamp(&a.created_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentSetResponse {
    pub message: String,
    pub appointment: AppointmentResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApprenticeshipResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

impl From<Apprenticeship> for ApprenticeshipResponse {
    fn from(a: Apprenticeship) -> Self {
        Self {
            created_at: timestamp(&a.created_at),
            id: a.id,
            title: a.title,
            description: a.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApprenticeshipsResponse {
    pub apprenticeships: Vec<ApprenticeshipResponse>,
}

fn parse_time(form: &mut FormErrors, field: &str, value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(t) => Some(t.with_timezone(&Utc)),
        Err(_) => {
            form.insert(field.to_string(), "Enter a valid date/time.".to_string());
            None
        }
    }
}

impl TryFrom<AppointmentRequest> for NewAppointment {
    type Error = AppError;

    fn try_from(r: AppointmentRequest) -> Result<Self, Self::Error> {
        let mut form = FormErrors::new();
        let date = parse_time(&mut form, "date", &r.date);
        let stop_date = parse_time(&mut form, "stop_date", &r.stop_date);
        match (date, stop_date) {
            (Some(date), Some(stop_date)) => Ok(NewAppointment {
                date,
                stop_date,
                service_id: r.service_id,
            }),
            _ => Err(AppError::Invalid {
                info: "This form is invalid".to_string(),
                form,
            }),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /services/{service_id}/book
#[utoipa::path(
    post,
    path = "/services/{service_id}/book",
    params(("service_id" = Uuid, Path, description = "Service ID")),
    responses(
        (status = 201, description = "Service booked", body = MessageResponse),
        (status = 404, description = "Unknown service"),
        (status = 409, description = "A booking is already ongoing"),
    ),
    tag = "bookings"
)]
pub async fn book_service(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let service_id = path.into_inner();
    let message =
        web::block(move || state.bookings.book_service(customer_id, service_id)).await??;
    Ok(HttpResponse::Created().json(MessageResponse::new(message)))
}

#[utoipa::path(
    get,
    path = "/bookings/current",
    responses((status = 200, description = "Ongoing booking, if any", body = CurrentBookingResponse)),
    tag = "bookings"
)]
pub async fn current_booking(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
) -> Result<HttpResponse, AppError> {
    let current = web::block(move || state.bookings.current_booking(customer_id)).await??;
    let response = match current {
        Some(checkout) => CurrentBookingResponse {
            booking: Some(checkout.booking.into()),
            service: Some(checkout.service.into()),
        },
        None => CurrentBookingResponse {
            booking: None,
            service: None,
        },
    };
    Ok(HttpResponse::Ok().json(response))
}

/// POST /bookings/{booking_id}/pay
///
/// The amount must equal the booked service's price.
#[utoipa::path(
    post,
    path = "/bookings/{booking_id}/pay",
    params(("booking_id" = Uuid, Path, description = "Booking ID")),
    request_body = PaymentRequest,
    responses(
        (status = 201, description = "Booking paid", body = BookingPaidResponse),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Wrong amount or already paid"),
        (status = 422, description = "Invalid form or M-Pesa code"),
    ),
    tag = "bookings"
)]
pub async fn pay_booking(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
    path: web::Path<Uuid>,
    body: web::Json<PaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let booking_id = path.into_inner();
    let form = PaymentForm::from(body.into_inner());
    let (payment, message) =
        web::block(move || state.bookings.pay(customer_id, booking_id, form)).await??;
    Ok(HttpResponse::Created().json(BookingPaidResponse {
        message,
        payment: payment.into(),
    }))
}

/// POST /appointments
#[utoipa::path(
    post,
    path = "/appointments",
    request_body = AppointmentRequest,
    responses(
        (status = 201, description = "Appointment set", body = AppointmentSetResponse),
        (status = 404, description = "Unknown customer or service"),
        (status = 409, description = "Overlaps an existing appointment"),
        (status = 422, description = "Invalid dates"),
    ),
    tag = "bookings"
)]
pub async fn book_appointment(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
    body: web::Json<AppointmentRequest>,
) -> Result<HttpResponse, AppError> {
    let request = NewAppointment::try_from(body.into_inner())?;
    let appointment =
        web::block(move || state.bookings.book_appointment(customer_id, request)).await??;
    Ok(HttpResponse::Created().json(AppointmentSetResponse {
        message: "Appointment has been set successfully.".to_string(),
        appointment: appointment.into(),
    }))
}

/// GET /apprenticeships
///
/// Open listings only. No login required.
#[utoipa::path(
    get,
    path = "/apprenticeships",
    responses((status = 200, description = "Open apprenticeships", body = ApprenticeshipsResponse)),
    tag = "bookings"
)]
pub async fn list_apprenticeships(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let listings = web::block(move || state.bookings.apprenticeships()).await??;
    Ok(HttpResponse::Ok().json(ApprenticeshipsResponse {
        apprenticeships: listings.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_times_are_parsed_as_rfc3339() {
        let request = NewAppointment::try_from(AppointmentRequest {
            date: "2026-03-01T09:00:00+03:00".to_string(),
            stop_date: "2026-03-01T10:00:00Z".to_string(),
            service_id: None,
        })
        .unwrap();
        assert_eq!(request.date.to_rfc3339(), "2026-03-01T06:00:00+00:00");
        assert_eq!(request.stop_date.to_rfc3339(), "2026-03-01T10:00:00+00:00");
    }

    #[test]
    fn unparseable_times_are_reported_per_field() {
        let err = NewAppointment::try_from(AppointmentRequest {
            date: "tomorrow".to_string(),
            stop_date: String::new(),
            service_id: None,
        })
        .unwrap_err();
        match err {
            AppError::Invalid { form, .. } => {
                assert!(form.contains_key("date"));
                assert!(form.contains_key("stop_date"));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
