use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::{DomainError, FormErrors};

/// A service offered by the salon, e.g. a hairstyle.
#[derive(Debug, Clone)]
pub struct SalonService {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub transaction_id: String,
    /// `false` while the booking is still ongoing.
    pub is_active: bool,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct BookingPayment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub customer_id: Uuid,
    pub amount: BigDecimal,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBookingPayment {
    pub booking_id: Uuid,
    pub customer_id: Uuid,
    pub mpesa: String,
    pub amount: BigDecimal,
    pub transaction_id: String,
}

/// A closed interval of time. Both ends are inclusive when testing for overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, stop: DateTime<Utc>) -> Result<Self, DomainError> {
        if stop <= start {
            let mut form = FormErrors::new();
            form.insert(
                "stop_date".to_string(),
                "Stop date must be after the start date.".to_string(),
            );
            return Err(DomainError::invalid(
                "Sorry Stop time has to be future of Start time not past",
                form,
            ));
        }
        Ok(Self { start, stop })
    }

    /// True when `requested` cannot be scheduled alongside `self`.
    ///
    /// Three cases: the requested start falls inside this range, the requested
    /// stop falls inside this range, or this range lies entirely within the
    /// requested one.
    pub fn conflicts_with(&self, requested: &DateRange) -> bool {
        let start_inside = self.start <= requested.start && self.stop >= requested.start;
        let stop_inside = self.start <= requested.stop && self.stop >= requested.stop;
        let swallowed = self.start >= requested.start && self.stop <= requested.stop;
        start_inside || stop_inside || swallowed
    }
}

#[derive(Debug, Clone)]
pub struct Appointment {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Option<Uuid>,
    pub range: DateRange,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Apprenticeship {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
