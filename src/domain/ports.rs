use uuid::Uuid;

use super::account::{Customer, CustomerDetails, CustomerProfile, NewCustomer};
use super::booking::{
    Appointment, Apprenticeship, Booking, BookingPayment, DateRange, NewBookingPayment,
    SalonService,
};
use super::errors::DomainError;
use super::events::OutboxMessage;
use super::feedback::Feedback;
use super::manager::{Manager, ManagerProfile, NewManager};
use super::store::{
    CartLine, NewOrderPayment, Order, OrderItem, OrderPayment, Product, WishlistEntry,
};

pub trait CustomerRepository: Send + Sync + 'static {
    /// Insert the customer, an empty profile and `event` atomically.
    fn create_customer(
        &self,
        customer: NewCustomer,
        event: OutboxMessage,
    ) -> Result<Customer, DomainError>;
    fn find_customer(&self, id: Uuid) -> Result<Option<Customer>, DomainError>;
    /// Look a customer up by username or email.
    fn find_customer_by_login(&self, identifier: &str) -> Result<Option<Customer>, DomainError>;
    /// Whether another customer (not `excluding`) already uses `email`.
    fn email_taken(&self, email: &str, excluding: Option<Uuid>) -> Result<bool, DomainError>;
    fn username_taken(&self, username: &str) -> Result<bool, DomainError>;
    fn mark_verified(&self, id: Uuid) -> Result<(), DomainError>;
    fn find_profile(&self, customer_id: Uuid) -> Result<CustomerProfile, DomainError>;
    fn update_customer(
        &self,
        id: Uuid,
        details: &CustomerDetails,
        profile: &CustomerProfile,
    ) -> Result<(), DomainError>;
    fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), DomainError>;
}

pub trait FeedbackRepository: Send + Sync + 'static {
    fn customer_feedback(&self, customer_id: Uuid) -> Result<Vec<Feedback>, DomainError>;
    fn create_feedback(
        &self,
        customer_id: Uuid,
        subject: &str,
        message: &str,
    ) -> Result<Feedback, DomainError>;
}

pub trait CartRepository: Send + Sync + 'static {
    fn find_product_by_slug(&self, slug: &str) -> Result<Option<Product>, DomainError>;
    /// The customer's active, not yet completed order.
    fn find_open_order(&self, customer_id: Uuid) -> Result<Option<Order>, DomainError>;
    fn create_order(&self, customer_id: Uuid, transaction_id: &str) -> Result<Order, DomainError>;
    fn find_order_item(
        &self,
        order_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<OrderItem>, DomainError>;
    fn add_order_item(
        &self,
        order_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<OrderItem, DomainError>;
    fn set_item_quantity(&self, item_id: Uuid, quantity: i32) -> Result<(), DomainError>;
    fn remove_order_item(&self, item_id: Uuid) -> Result<(), DomainError>;
    fn cart_lines(&self, order_id: Uuid) -> Result<Vec<CartLine>, DomainError>;
    fn deactivate_order(&self, order_id: Uuid) -> Result<(), DomainError>;
    /// Newest first. With `active_only`, abandoned carts are left out.
    fn customer_orders(&self, customer_id: Uuid, active_only: bool)
        -> Result<Vec<Order>, DomainError>;
    fn order_payments(&self, customer_id: Uuid) -> Result<Vec<OrderPayment>, DomainError>;
    /// Record the payment, take each line's quantity out of stock, mark the
    /// order completed and write `event`, all or nothing. Fails with
    /// `Conflict` if stock no longer covers a line.
    fn complete_order(
        &self,
        payment: NewOrderPayment,
        lines: &[CartLine],
        event: OutboxMessage,
    ) -> Result<OrderPayment, DomainError>;
}

pub trait WishlistRepository: Send + Sync + 'static {
    fn find_wishlist_entry(
        &self,
        customer_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<WishlistEntry>, DomainError>;
    fn add_wishlist_entry(
        &self,
        customer_id: Uuid,
        product_id: Uuid,
    ) -> Result<WishlistEntry, DomainError>;
    fn remove_wishlist_entry(&self, id: Uuid) -> Result<(), DomainError>;
    fn mark_wishlist_in_cart(&self, id: Uuid) -> Result<(), DomainError>;
    fn wishlist(&self, customer_id: Uuid) -> Result<Vec<(WishlistEntry, Product)>, DomainError>;
}

pub trait BookingRepository: Send + Sync + 'static {
    fn find_service(&self, id: Uuid) -> Result<Option<SalonService>, DomainError>;
    /// The customer's booking that is not yet active, if any.
    fn find_ongoing_booking(&self, customer_id: Uuid) -> Result<Option<Booking>, DomainError>;
    fn create_booking(
        &self,
        customer_id: Uuid,
        service_id: Uuid,
        transaction_id: &str,
    ) -> Result<Booking, DomainError>;
    fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, DomainError>;
    fn find_booking_payment(&self, booking_id: Uuid)
        -> Result<Option<BookingPayment>, DomainError>;
    /// Record the payment, mark the booking paid and write `event` atomically.
    fn pay_booking(
        &self,
        payment: NewBookingPayment,
        event: OutboxMessage,
    ) -> Result<BookingPayment, DomainError>;
    fn customer_bookings(&self, customer_id: Uuid) -> Result<Vec<Booking>, DomainError>;
    fn booking_payments(&self, customer_id: Uuid) -> Result<Vec<BookingPayment>, DomainError>;
    /// Apprenticeships that are active, not closed and not archived.
    fn open_apprenticeships(&self) -> Result<Vec<Apprenticeship>, DomainError>;
}

pub trait AppointmentRepository: Send + Sync + 'static {
    /// Every appointment that conflicts with `range` under `DateRange::conflicts_with`.
    fn overlapping_appointments(&self, range: &DateRange)
        -> Result<Vec<Appointment>, DomainError>;
    fn create_appointment(
        &self,
        customer_id: Uuid,
        service_id: Option<Uuid>,
        range: &DateRange,
    ) -> Result<Appointment, DomainError>;
    fn customer_appointments(&self, customer_id: Uuid) -> Result<Vec<Appointment>, DomainError>;
}

pub trait ManagerRepository: Send + Sync + 'static {
    /// Insert the manager together with an empty profile.
    fn create_manager(&self, manager: NewManager) -> Result<Manager, DomainError>;
    fn list_managers(&self) -> Result<Vec<Manager>, DomainError>;
    fn manager_email_taken(&self, email: &str) -> Result<bool, DomainError>;
    fn manager_username_taken(&self, username: &str) -> Result<bool, DomainError>;
    /// Newest first.
    fn list_manager_profiles(&self) -> Result<Vec<ManagerProfile>, DomainError>;
    /// Returns `false` when no such manager exists.
    fn delete_manager(&self, id: Uuid) -> Result<bool, DomainError>;
    fn approve_managers(&self, ids: &[Uuid]) -> Result<usize, DomainError>;
    fn archive_managers(&self, ids: &[Uuid]) -> Result<usize, DomainError>;
    fn set_profiles_active(&self, profile_ids: &[Uuid], active: bool)
        -> Result<usize, DomainError>;
    fn manager_feedback(&self) -> Result<Vec<Feedback>, DomainError>;
    fn delete_manager_feedback(&self, id: Uuid) -> Result<bool, DomainError>;
}
