use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::account::{Customer, CustomerProfile};
use crate::domain::booking::{
    Appointment, Apprenticeship, Booking, BookingPayment, DateRange, SalonService,
};
use crate::domain::feedback::Feedback;
use crate::domain::manager::{Manager, ManagerProfile};
use crate::domain::store::{Order, OrderItem, OrderPayment, Product, WishlistEntry};
use crate::schema::{
    appointments, apprenticeships, booking_payments, bookings, customer_feedback,
    customer_profiles, customers, manager_feedback, manager_profiles, managers, order_items,
    order_payments, orders, products, salon_outbox, services, wishlist,
};

// ── Accounts ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(r: CustomerRow) -> Self {
        Customer {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            username: r.username,
            password_hash: r.password_hash,
            is_active: r.is_active,
            is_verified: r.is_verified,
            is_archived: r.is_archived,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomerRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = customers)]
pub struct CustomerChangeset<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = customer_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
}

impl From<ProfileRow> for CustomerProfile {
    fn from(r: ProfileRow) -> Self {
        CustomerProfile {
            phone_number: r.phone_number,
            gender: r.gender,
            image: r.image,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customer_profiles)]
pub struct NewProfileRow {
    pub customer_id: Uuid,
}

/// Clearing a field in the form clears the column.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = customer_profiles)]
#[diesel(treat_none_as_null = true)]
pub struct ProfileChangeset<'a> {
    pub phone_number: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub image: Option<&'a str>,
}

// ── Feedback ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customer_feedback)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerFeedbackRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<CustomerFeedbackRow> for Feedback {
    fn from(r: CustomerFeedbackRow) -> Self {
        Feedback {
            id: r.id,
            author_id: r.customer_id,
            subject: r.subject,
            message: r.message,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customer_feedback)]
pub struct NewCustomerFeedbackRow<'a> {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub subject: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = manager_feedback)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ManagerFeedbackRow {
    pub id: Uuid,
    pub manager_id: Uuid,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ManagerFeedbackRow> for Feedback {
    fn from(r: ManagerFeedbackRow) -> Self {
        Feedback {
            id: r.id,
            author_id: r.manager_id,
            subject: r.subject,
            message: r.message,
            created_at: r.created_at,
        }
    }
}

// ── Store ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub price: BigDecimal,
    pub quantity: i32,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Product {
            id: r.id,
            name: r.name,
            slug: r.slug,
            price: r.price,
            quantity: r.quantity,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub transaction_id: String,
    pub is_active: bool,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(r: OrderRow) -> Self {
        Order {
            id: r.id,
            customer_id: r.customer_id,
            transaction_id: r.transaction_id,
            is_active: r.is_active,
            completed: r.completed,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub transaction_id: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

impl From<OrderItemRow> for OrderItem {
    fn from(r: OrderItemRow) -> Self {
        OrderItem {
            id: r.id,
            order_id: r.order_id,
            product_id: r.product_id,
            quantity: r.quantity,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = order_payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderPaymentRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub amount: BigDecimal,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<OrderPaymentRow> for OrderPayment {
    fn from(r: OrderPaymentRow) -> Self {
        OrderPayment {
            id: r.id,
            order_id: r.order_id,
            customer_id: r.customer_id,
            amount: r.amount,
            transaction_id: r.transaction_id,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_payments)]
pub struct NewOrderPaymentRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub mpesa: String,
    pub amount: BigDecimal,
    pub transaction_id: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = wishlist)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WishlistRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub cart: bool,
    pub created_at: DateTime<Utc>,
}

impl From<WishlistRow> for WishlistEntry {
    fn from(r: WishlistRow) -> Self {
        WishlistEntry {
            id: r.id,
            customer_id: r.customer_id,
            product_id: r.product_id,
            cart: r.cart,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = wishlist)]
pub struct NewWishlistRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub product_id: Uuid,
}

// ── Bookings ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceRow {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
}

impl From<ServiceRow> for SalonService {
    fn from(r: ServiceRow) -> Self {
        SalonService {
            id: r.id,
            name: r.name,
            price: r.price,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookingRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub transaction_id: String,
    pub is_active: bool,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(r: BookingRow) -> Self {
        Booking {
            id: r.id,
            customer_id: r.customer_id,
            service_id: r.service_id,
            transaction_id: r.transaction_id,
            is_active: r.is_active,
            is_paid: r.is_paid,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBookingRow<'a> {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub transaction_id: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = booking_payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookingPaymentRow {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub customer_id: Uuid,
    pub amount: BigDecimal,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<BookingPaymentRow> for BookingPayment {
    fn from(r: BookingPaymentRow) -> Self {
        BookingPayment {
            id: r.id,
            booking_id: r.booking_id,
            customer_id: r.customer_id,
            amount: r.amount,
            transaction_id: r.transaction_id,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = booking_payments)]
pub struct NewBookingPaymentRow {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub customer_id: Uuid,
    pub mpesa: String,
    pub amount: BigDecimal,
    pub transaction_id: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AppointmentRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Option<Uuid>,
    pub date: DateTime<Utc>,
    pub stop_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<AppointmentRow> for Appointment {
    fn from(r: AppointmentRow) -> Self {
        Appointment {
            id: r.id,
            customer_id: r.customer_id,
            service_id: r.service_id,
            range: DateRange {
                start: r.date,
                stop: r.stop_date,
            },
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = appointments)]
pub struct NewAppointmentRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Option<Uuid>,
    pub date: DateTime<Utc>,
    pub stop_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = apprenticeships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ApprenticeshipRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<ApprenticeshipRow> for Apprenticeship {
    fn from(r: ApprenticeshipRow) -> Self {
        Apprenticeship {
            id: r.id,
            title: r.title,
            description: r.description,
            created_at: r.created_at,
        }
    }
}

// ── Managers ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = managers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ManagerRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub is_archived: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ManagerRow> for Manager {
    fn from(r: ManagerRow) -> Self {
        Manager {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            username: r.username,
            is_active: r.is_active,
            is_archived: r.is_archived,
            is_approved: r.is_approved,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = managers)]
pub struct NewManagerRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = manager_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ManagerProfileRow {
    pub id: Uuid,
    pub manager_id: Uuid,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ManagerProfileRow> for ManagerProfile {
    fn from(r: ManagerProfileRow) -> Self {
        ManagerProfile {
            id: r.id,
            manager_id: r.manager_id,
            phone_number: r.phone_number,
            gender: r.gender,
            image: r.image,
            is_active: r.is_active,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = manager_profiles)]
pub struct NewManagerProfileRow {
    pub id: Uuid,
    pub manager_id: Uuid,
}

// ── Outbox ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = salon_outbox)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OutboxEventRow {
    pub id: Uuid,
    pub aggregate_type: String,
    pub aggregate_id: String,
    pub event_type: String,
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = salon_outbox)]
pub struct NewOutboxEventRow {
    pub id: Uuid,
    pub aggregate_type: String,
    pub aggregate_id: String,
    pub event_type: String,
    pub payload: Value,
}
