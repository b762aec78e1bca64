use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::booking::{
    Appointment, Apprenticeship, Booking, BookingPayment, DateRange, NewBookingPayment,
    SalonService,
};
use crate::domain::errors::DomainError;
use crate::domain::events::OutboxMessage;
use crate::domain::payment::{generate_key, PaymentForm, CART_KEY_LENGTH, PAYMENT_KEY_LENGTH};
use crate::domain::ports::{AppointmentRepository, BookingRepository, CustomerRepository};

/// The customer's ongoing booking and the service it is for.
pub struct BookingCheckout {
    pub booking: Booking,
    pub service: SalonService,
}

#[derive(Debug)]
pub struct AppointmentRequest {
    pub date: DateTime<Utc>,
    pub stop_date: DateTime<Utc>,
    pub service_id: Option<Uuid>,
}

pub struct BookingService<R> {
    repo: R,
}

impl<R> BookingService<R>
where
    R: BookingRepository + AppointmentRepository + CustomerRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    fn service(&self, id: Uuid) -> Result<SalonService, DomainError> {
        self.repo
            .find_service(id)?
            .ok_or_else(|| DomainError::not_found("Service"))
    }

    pub fn book_service(&self, customer_id: Uuid, service_id: Uuid) -> Result<String, DomainError> {
        let customer = self
            .repo
            .find_customer(customer_id)?
            .ok_or_else(|| DomainError::not_found("Customer"))?;
        let service = self.service(service_id)?;
        if self.repo.find_ongoing_booking(customer.id)?.is_some() {
            return Err(DomainError::conflict(format!(
                "Hi {}, you've an ongoing booking",
                customer.full_name()
            )));
        }
        let booking =
            self.repo
                .create_booking(customer.id, service.id, &generate_key(CART_KEY_LENGTH))?;
        log::info!(
            "customer {} booked {} ({})",
            customer.id,
            service.name,
            booking.transaction_id
        );
        Ok(format!(
            "{}, has been booked successfully proceed to payment.",
            service.name
        ))
    }

    pub fn current_booking(&self, customer_id: Uuid) -> Result<Option<BookingCheckout>, DomainError> {
        let Some(booking) = self.repo.find_ongoing_booking(customer_id)? else {
            return Ok(None);
        };
        let service = self.service(booking.service_id)?;
        Ok(Some(BookingCheckout { booking, service }))
    }

    pub fn pay(
        &self,
        customer_id: Uuid,
        booking_id: Uuid,
        form: PaymentForm,
    ) -> Result<(BookingPayment, String), DomainError> {
        let customer = self
            .repo
            .find_customer(customer_id)?
            .ok_or_else(|| DomainError::not_found("Customer"))?;
        let booking = self
            .repo
            .find_booking(booking_id)?
            .filter(|b| b.customer_id == customer.id)
            .ok_or_else(|| DomainError::not_found("Booking"))?;
        let payment = form.validate()?;
        payment.check_code()?;

        let service = self.service(booking.service_id)?;
        payment.check_amount(&service.price)?;
        if self.repo.find_booking_payment(booking.id)?.is_some() {
            return Err(DomainError::conflict(format!(
                "You've already made payment for {} booking",
                booking.transaction_id
            )));
        }

        let transaction_id = generate_key(PAYMENT_KEY_LENGTH);
        let event = OutboxMessage::booking_paid(
            &booking,
            &service,
            &customer,
            &transaction_id,
            &payment.amount,
        );
        let recorded = self.repo.pay_booking(
            NewBookingPayment {
                booking_id: booking.id,
                customer_id: customer.id,
                mpesa: payment.mpesa,
                amount: payment.amount,
                transaction_id,
            },
            event,
        )?;
        log::info!("booking {} paid by customer {}", booking.id, customer.id);
        Ok((
            recorded,
            format!(
                "Hi {}, payment has been sent successfully.",
                customer.full_name()
            ),
        ))
    }

    /// Reserve a time range, refusing any overlap with existing appointments.
    pub fn book_appointment(
        &self,
        customer_id: Uuid,
        request: AppointmentRequest,
    ) -> Result<Appointment, DomainError> {
        let customer = self
            .repo
            .find_customer(customer_id)?
            .ok_or_else(|| DomainError::not_found("Customer"))?;
        let range = DateRange::new(request.date, request.stop_date)?;
        if let Some(service_id) = request.service_id {
            self.service(service_id)?;
        }
        let clashes = self.repo.overlapping_appointments(&range)?;
        if !clashes.is_empty() {
            log::debug!(
                "appointment {:?} clashes with {} existing",
                range,
                clashes.len()
            );
            return Err(DomainError::conflict(
                "Sorry, An appointment exists in selected dates",
            ));
        }
        let appointment = self
            .repo
            .create_appointment(customer.id, request.service_id, &range)?;
        log::info!(
            "customer {} set appointment {}",
            customer.id,
            appointment.id
        );
        Ok(appointment)
    }

    pub fn apprenticeships(&self) -> Result<Vec<Apprenticeship>, DomainError> {
        self.repo.open_apprenticeships()
    }
}
