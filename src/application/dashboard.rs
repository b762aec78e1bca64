use uuid::Uuid;

use crate::domain::account::Customer;
use crate::domain::booking::{Appointment, Booking, BookingPayment};
use crate::domain::errors::DomainError;
use crate::domain::ports::{
    AppointmentRepository, BookingRepository, CartRepository, CustomerRepository,
};
use crate::domain::store::{Order, OrderPayment};

/// Everything a customer has done with the salon, for the account overview.
pub struct Dashboard {
    pub customer: Customer,
    pub booking_payments: Vec<BookingPayment>,
    pub order_payments: Vec<OrderPayment>,
    pub appointments: Vec<Appointment>,
    pub bookings: Vec<Booking>,
    pub orders: Vec<Order>,
    pub current_order: Option<Order>,
}

pub struct DashboardService<R> {
    repo: R,
}

impl<R> DashboardService<R>
where
    R: CustomerRepository + CartRepository + BookingRepository + AppointmentRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn dashboard(&self, customer_id: Uuid) -> Result<Dashboard, DomainError> {
        let customer = self
            .repo
            .find_customer(customer_id)?
            .ok_or_else(|| DomainError::not_found("Customer"))?;
        let orders = self.repo.customer_orders(customer.id, false)?;
        // Latest unpaid order, whether or not its cart was cleared.
        let current_order = orders.iter().find(|o| !o.completed).cloned();
        Ok(Dashboard {
            booking_payments: self.repo.booking_payments(customer.id)?,
            order_payments: self.repo.order_payments(customer.id)?,
            appointments: self.repo.customer_appointments(customer.id)?,
            bookings: self.repo.customer_bookings(customer.id)?,
            orders,
            current_order,
            customer,
        })
    }
}
