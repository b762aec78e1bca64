use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub price: BigDecimal,
    /// Units in stock.
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub transaction_id: String,
    pub is_active: bool,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

/// An order item joined with its product.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub item: OrderItem,
    pub product: Product,
}

impl CartLine {
    pub fn line_total(&self) -> BigDecimal {
        &self.product.price * BigDecimal::from(self.item.quantity)
    }
}

pub fn cart_total(lines: &[CartLine]) -> BigDecimal {
    lines
        .iter()
        .fold(BigDecimal::from(0), |acc, line| acc + line.line_total())
}

#[derive(Debug, Clone)]
pub struct WishlistEntry {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub product_id: Uuid,
    /// Set once the wished-for product has been put in the cart.
    pub cart: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrderPayment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub amount: BigDecimal,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrderPayment {
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub mpesa: String,
    pub amount: BigDecimal,
    pub transaction_id: String,
}

/// Message used whenever a requested quantity exceeds stock.
pub fn unavailable_message(requested: i32, product: &Product) -> String {
    format!(
        "{requested} {} are not available we only have {} remaining.",
        product.name, product.quantity
    )
}

/// Result of asking for one more unit of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockCheck {
    /// The line may hold this many units.
    Fits(i32),
    /// Stock cannot cover this many units.
    Exceeds(i32),
}

/// Check whether a line currently holding `current` units may grow by one.
pub fn check_increment(current: i32, stock: i32) -> StockCheck {
    match current.checked_add(1) {
        Some(wanted) if wanted <= stock => StockCheck::Fits(wanted),
        Some(wanted) => StockCheck::Exceeds(wanted),
        None => StockCheck::Exceeds(i32::MAX),
    }
}

/// Result of taking one unit off a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decrement {
    Keep(i32),
    Remove,
}

pub fn decrement(current: i32) -> Decrement {
    let quantity = current - 1;
    if quantity >= 1 {
        Decrement::Keep(quantity)
    } else {
        Decrement::Remove
    }
}

/// What checkout does to a line whose quantity is compared against stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    Unchanged,
    Clamped { from: i32, to: i32 },
    Removed,
}

pub fn reconcile(quantity: i32, stock: i32) -> Reconciliation {
    if stock >= quantity {
        Reconciliation::Unchanged
    } else if stock > 0 {
        Reconciliation::Clamped {
            from: quantity,
            to: stock,
        }
    } else {
        Reconciliation::Removed
    }
}
