use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::booking::{
    Appointment, Apprenticeship, Booking, BookingPayment, DateRange, NewBookingPayment,
    SalonService,
};
use crate::domain::errors::DomainError;
use crate::domain::events::OutboxMessage;
use crate::domain::ports::{AppointmentRepository, BookingRepository};
use crate::schema::{appointments, apprenticeships, booking_payments, bookings, services};

use super::models::{
    AppointmentRow, ApprenticeshipRow, BookingPaymentRow, BookingRow, NewAppointmentRow,
    NewBookingPaymentRow, NewBookingRow, ServiceRow,
};
use super::{record_event, DieselRepository};

impl BookingRepository for DieselRepository {
    fn find_service(&self, id: Uuid) -> Result<Option<SalonService>, DomainError> {
        let mut conn = self.conn()?;
        let row = services::table
            .filter(services::id.eq(id))
            .select(ServiceRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn find_ongoing_booking(&self, customer_id: Uuid) -> Result<Option<Booking>, DomainError> {
        let mut conn = self.conn()?;
        let row = bookings::table
            .filter(bookings::customer_id.eq(customer_id))
            .filter(bookings::is_active.eq(false))
            .select(BookingRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn create_booking(
        &self,
        customer_id: Uuid,
        service_id: Uuid,
        transaction_id: &str,
    ) -> Result<Booking, DomainError> {
        let mut conn = self.conn()?;
        let row = diesel::insert_into(bookings::table)
            .values(&NewBookingRow {
                id: Uuid::new_v4(),
                customer_id,
                service_id,
                transaction_id,
            })
            .returning(BookingRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        let mut conn = self.conn()?;
        let row = bookings::table
            .filter(bookings::id.eq(id))
            .select(BookingRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn find_booking_payment(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<BookingPayment>, DomainError> {
        let mut conn = self.conn()?;
        let row = booking_payments::table
            .filter(booking_payments::booking_id.eq(booking_id))
            .select(BookingPaymentRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn pay_booking(
        &self,
        payment: NewBookingPayment,
        event: OutboxMessage,
    ) -> Result<BookingPayment, DomainError> {
        let mut conn = self.conn()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let recorded = diesel::insert_into(booking_payments::table)
                .values(&NewBookingPaymentRow {
                    id: Uuid::new_v4(),
                    booking_id: payment.booking_id,
                    customer_id: payment.customer_id,
                    mpesa: payment.mpesa,
                    amount: payment.amount,
                    transaction_id: payment.transaction_id,
                })
                .returning(BookingPaymentRow::as_returning())
                .get_result(conn)?;

            diesel::update(bookings::table.filter(bookings::id.eq(payment.booking_id)))
                .set(bookings::is_paid.eq(true))
                .execute(conn)?;

            record_event(conn, event)?;
            Ok(recorded.into())
        })
    }

    fn customer_bookings(&self, customer_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        let mut conn = self.conn()?;
        let rows = bookings::table
            .filter(bookings::customer_id.eq(customer_id))
            .order(bookings::created_at.desc())
            .select(BookingRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn booking_payments(&self, customer_id: Uuid) -> Result<Vec<BookingPayment>, DomainError> {
        let mut conn = self.conn()?;
        let rows = booking_payments::table
            .filter(booking_payments::customer_id.eq(customer_id))
            .order(booking_payments::created_at.desc())
            .select(BookingPaymentRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn open_apprenticeships(&self) -> Result<Vec<Apprenticeship>, DomainError> {
        let mut conn = self.conn()?;
        let rows = apprenticeships::table
            .filter(apprenticeships::is_active.eq(true))
            .filter(apprenticeships::closed.eq(false))
            .filter(apprenticeships::is_archived.eq(false))
            .order(apprenticeships::created_at.desc())
            .select(ApprenticeshipRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl AppointmentRepository for DieselRepository {
    fn overlapping_appointments(
        &self,
        range: &DateRange,
    ) -> Result<Vec<Appointment>, DomainError> {
        let mut conn = self.conn()?;
        // Same three cases as `DateRange::conflicts_with`, bounds inclusive.
        let start_inside = appointments::date
            .le(range.start)
            .and(appointments::stop_date.ge(range.start));
        let stop_inside = appointments::date
            .le(range.stop)
            .and(appointments::stop_date.ge(range.stop));
        let swallowed = appointments::date
            .ge(range.start)
            .and(appointments::stop_date.le(range.stop));
        let rows = appointments::table
            .filter(start_inside.or(stop_inside).or(swallowed))
            .select(AppointmentRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn create_appointment(
        &self,
        customer_id: Uuid,
        service_id: Option<Uuid>,
        range: &DateRange,
    ) -> Result<Appointment, DomainError> {
        let mut conn = self.conn()?;
        let row = diesel::insert_into(appointments::table)
            .values(&NewAppointmentRow {
                id: Uuid::new_v4(),
                customer_id,
                service_id,
                date: range.start,
                stop_date: range.stop,
            })
            .returning(AppointmentRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn customer_appointments(&self, customer_id: Uuid) -> Result<Vec<Appointment>, DomainError> {
        let mut conn = self.conn()?;
        let rows = appointments::table
            .filter(appointments::customer_id.eq(customer_id))
            .order(appointments::date.desc())
            .select(AppointmentRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use chrono::{DateTime, TimeZone, Utc};
    use diesel::prelude::*;
    use uuid::Uuid;

    use crate::db::DbPool;
    use crate::domain::account::NewCustomer;
    use crate::domain::booking::{DateRange, NewBookingPayment};
    use crate::domain::errors::DomainError;
    use crate::domain::events::OutboxMessage;
    use crate::domain::ports::{AppointmentRepository, BookingRepository, CustomerRepository};
    use crate::infrastructure::test_support::{outbox_events, setup_db};
    use crate::infrastructure::DieselRepository;
    use crate::schema::{apprenticeships, services};

    fn seed_customer(repo: &DieselRepository, email: &str, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        let event = OutboxMessage::customer_registered(id, email, "Jane", "u", "t");
        repo.create_customer(
            NewCustomer {
                id,
                first_name: "Jane".to_string(),
                last_name: "Wanjiru".to_string(),
                email: email.to_string(),
                username: username.to_string(),
                password_hash: "$argon2id$stub".to_string(),
            },
            event,
        )
        .expect("seed customer");
        id
    }

    fn seed_service(pool: &DbPool) -> Uuid {
        let id = Uuid::new_v4();
        let mut conn = pool.get().expect("Failed to get connection");
        diesel::insert_into(services::table)
            .values((
                services::id.eq(id),
                services::name.eq("Box braids"),
                services::price.eq(BigDecimal::from_str("2500.00").unwrap()),
            ))
            .execute(&mut conn)
            .expect("seed service");
        id
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, day, hour, 0, 0).unwrap()
    }

    fn range(day: u32, from: u32, to: u32) -> DateRange {
        DateRange::new(at(day, from), at(day, to)).unwrap()
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn one_ongoing_booking_per_customer() {
        let (_container, pool) = setup_db().await;
        let repo = DieselRepository::new(pool.clone());
        let customer = seed_customer(&repo, "jane@gmail.com", "jane");
        let service = seed_service(&pool);

        let booking = repo.create_booking(customer, service, "BOOK01").unwrap();
        assert_eq!(
            repo.find_ongoing_booking(customer).unwrap().map(|b| b.id),
            Some(booking.id)
        );
        let err = repo.create_booking(customer, service, "BOOK02").unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn paying_a_booking_marks_it_paid_once() {
        let (_container, pool) = setup_db().await;
        let repo = DieselRepository::new(pool.clone());
        let customer = seed_customer(&repo, "jane@gmail.com", "jane");
        let service_id = seed_service(&pool);
        let booking = repo.create_booking(customer, service_id, "BOOK01").unwrap();
        let service = repo.find_service(service_id).unwrap().unwrap();
        let customer_row = repo.find_customer(customer).unwrap().unwrap();

        let payment = || NewBookingPayment {
            booking_id: booking.id,
            customer_id: customer,
            mpesa: "ABCDE12345".to_string(),
            amount: service.price.clone(),
            transaction_id: "PAY00001".to_string(),
        };
        let event = || {
            OutboxMessage::booking_paid(&booking, &service, &customer_row, "PAY00001", &service.price)
        };

        repo.pay_booking(payment(), event()).expect("pay failed");
        assert!(repo.find_booking(booking.id).unwrap().unwrap().is_paid);
        assert!(repo.find_booking_payment(booking.id).unwrap().is_some());
        assert_eq!(outbox_events(&pool, &booking.id.to_string()).len(), 1);

        assert!(repo.pay_booking(payment(), event()).is_err());
        assert_eq!(repo.booking_payments(customer).unwrap().len(), 1);
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn overlap_query_matches_the_three_cases() {
        let (_container, pool) = setup_db().await;
        let repo = DieselRepository::new(pool);
        let customer = seed_customer(&repo, "jane@gmail.com", "jane");
        repo.create_appointment(customer, None, &range(3, 10, 12)).unwrap();

        for requested in [range(3, 11, 14), range(3, 8, 11), range(3, 9, 13), range(3, 12, 13)] {
            assert_eq!(repo.overlapping_appointments(&requested).unwrap().len(), 1);
        }
        assert!(repo
            .overlapping_appointments(&range(3, 13, 15))
            .unwrap()
            .is_empty());
        assert_eq!(repo.customer_appointments(customer).unwrap().len(), 1);
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn only_open_apprenticeships_are_returned() {
        let (_container, pool) = setup_db().await;
        let repo = DieselRepository::new(pool.clone());
        {
            let mut conn = pool.get().expect("Failed to get connection");
            for (title, closed) in [("Junior stylist", false), ("Closed intake", true)] {
                diesel::insert_into(apprenticeships::table)
                    .values((
                        apprenticeships::id.eq(Uuid::new_v4()),
                        apprenticeships::title.eq(title),
                        apprenticeships::closed.eq(closed),
                    ))
                    .execute(&mut conn)
                    .expect("seed apprenticeship");
            }
        }
        let open = repo.open_apprenticeships().unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title, "Junior stylist");
    }
}
