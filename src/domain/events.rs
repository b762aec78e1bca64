use serde_json::{json, Value};
use uuid::Uuid;

use super::account::Customer;
use super::booking::{Booking, SalonService};
use super::store::CartLine;

/// An event recorded in the outbox in the same transaction as the state
/// change it describes. Downstream consumers (the mailer, receipts) read
/// these rows; the service itself never publishes them.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboxMessage {
    pub aggregate_type: String,
    pub aggregate_id: String,
    pub event_type: String,
    pub payload: Value,
}

impl OutboxMessage {
    /// Carries the parts of the verification link for the mailer.
    pub fn customer_registered(
        customer_id: Uuid,
        email: &str,
        full_name: &str,
        uid: &str,
        token: &str,
    ) -> Self {
        Self {
            aggregate_type: "Customer".to_string(),
            aggregate_id: customer_id.to_string(),
            event_type: "CustomerRegistered".to_string(),
            payload: json!({
                "customer_id": customer_id,
                "email": email,
                "full_name": full_name,
                "uid": uid,
                "token": token,
            }),
        }
    }

    pub fn order_paid(
        order_id: Uuid,
        customer: &Customer,
        transaction_id: &str,
        amount: &bigdecimal::BigDecimal,
        lines: &[CartLine],
    ) -> Self {
        let lines: Vec<Value> = lines
            .iter()
            .map(|l| {
                json!({
                    "product_id": l.product.id,
                    "name": l.product.name,
                    "quantity": l.item.quantity,
                    "unit_price": l.product.price.to_string(),
                })
            })
            .collect();
        Self {
            aggregate_type: "Order".to_string(),
            aggregate_id: order_id.to_string(),
            event_type: "OrderPaid".to_string(),
            payload: json!({
                "order_id": order_id,
                "customer_id": customer.id,
                "email": customer.email,
                "transaction_id": transaction_id,
                "amount": amount.to_string(),
                "lines": lines,
            }),
        }
    }

    pub fn booking_paid(
        booking: &Booking,
        service: &SalonService,
        customer: &Customer,
        transaction_id: &str,
        amount: &bigdecimal::BigDecimal,
    ) -> Self {
        Self {
            aggregate_type: "Booking".to_string(),
            aggregate_id: booking.id.to_string(),
            event_type: "BookingPaid".to_string(),
            payload: json!({
                "booking_id": booking.id,
                "booking_reference": booking.transaction_id,
                "customer_id": customer.id,
                "email": customer.email,
                "service": service.name,
                "transaction_id": transaction_id,
                "amount": amount.to_string(),
            }),
        }
    }
}
