use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::cart::{CartView, CheckoutView, WishlistAdd};
use crate::auth::CurrentCustomer;
use crate::domain::payment::PaymentForm;
use crate::domain::store::{CartLine, Order, OrderPayment, Reconciliation};
use crate::errors::AppError;
use crate::AppState;

use super::{money, timestamp, MessageResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub transaction_id: String,
    pub is_active: bool,
    pub completed: bool,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            created_at: timestamp(&o.created_at),
            id: o.id,
            transaction_id: o.transaction_id,
            is_active: o.is_active,
            completed: o.completed,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemResponse {
    pub product_id: Uuid,
    pub name: String,
    pub slug: String,
    /// Decimal string, e.g. "450.00"
    pub unit_price: String,
    pub quantity: i32,
    pub line_total: String,
}

impl From<CartLine> for CartItemResponse {
    fn from(line: CartLine) -> Self {
        Self {
            line_total: money(&line.line_total()),
            product_id: line.product.id,
            name: line.product.name,
            slug: line.product.slug,
            unit_price: money(&line.product.price),
            quantity: line.item.quantity,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub order: Option<OrderResponse>,
    pub items: Vec<CartItemResponse>,
    pub total: String,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self {
            order: view.order.map(Into::into),
            items: view.lines.into_iter().map(Into::into).collect(),
            total: money(&view.total),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdjustmentResponse {
    pub slug: String,
    pub name: String,
    /// "clamped", "removed" or "unchanged"
    pub action: String,
    pub quantity: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub order: Option<OrderResponse>,
    pub items: Vec<CartItemResponse>,
    pub total: String,
    pub adjustments: Vec<AdjustmentResponse>,
}

impl From<CheckoutView> for CheckoutResponse {
    fn from(view: CheckoutView) -> Self {
        let adjustments = view
            .adjustments
            .into_iter()
            .map(|a| {
                let (action, quantity) = match a.outcome {
                    Reconciliation::Clamped { to, .. } => ("clamped", Some(to)),
                    Reconciliation::Removed => ("removed", None),
                    Reconciliation::Unchanged => ("unchanged", Some(a.product.quantity)),
                };
                AdjustmentResponse {
                    slug: a.product.slug,
                    name: a.product.name,
                    action: action.to_string(),
                    quantity,
                }
            })
            .collect();
        let cart = CartResponse::from(view.cart);
        Self {
            order: cart.order,
            items: cart.items,
            total: cart.total,
            adjustments,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub slug: String,
    pub price: String,
    /// Set once the product has been added to the cart.
    pub in_cart: bool,
    pub created_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistResponse {
    pub entries: Vec<WishlistItemResponse>,
    pub order: Option<OrderResponse>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct PaymentRequest {
    /// 10-character M-Pesa confirmation code
    pub mpesa: String,
    /// Decimal amount as a string, e.g. "900.00"
    pub amount: String,
}

impl From<PaymentRequest> for PaymentForm {
    fn from(r: PaymentRequest) -> Self {
        PaymentForm {
            mpesa: r.mpesa,
            amount: r.amount,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub transaction_id: String,
    pub amount: String,
    pub created_at: String,
}

impl From<OrderPayment> for PaymentResponse {
    fn from(p: OrderPayment) -> Self {
        Self {
            id: p.id,
            transaction_id: p.transaction_id,
            amount: money(&p.amount),
            created_at: timestamp(&p.created_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaidResponse {
    pub message: String,
    pub payment: PaymentResponse,
}

// ── Cart ─────────────────────────────────────────────────────────────────────

/// POST /cart/items/{slug}
///
/// Adds one unit, opening a cart if the customer has none.
#[utoipa::path(
    post,
    path = "/cart/items/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Item added", body = MessageResponse),
        (status = 404, description = "Unknown product or customer"),
        (status = 409, description = "Not enough stock"),
    ),
    tag = "cart"
)]
pub async fn add_to_cart(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let message = web::block(move || state.cart.add_to_cart(customer_id, &slug)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

#[utoipa::path(
    delete,
    path = "/cart/items/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Item removed", body = MessageResponse),
        (status = 404, description = "Product or cart line not found"),
    ),
    tag = "cart"
)]
pub async fn remove_from_cart(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let message = web::block(move || state.cart.remove_from_cart(customer_id, &slug)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

#[utoipa::path(
    post,
    path = "/cart/items/{slug}/decrease",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Quantity decreased or line removed", body = MessageResponse),
        (status = 404, description = "Product or cart line not found"),
    ),
    tag = "cart"
)]
pub async fn decrease_quantity(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let message =
        web::block(move || state.cart.decrease_quantity(customer_id, &slug)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

#[utoipa::path(
    post,
    path = "/cart/items/{slug}/increase",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Quantity increased", body = MessageResponse),
        (status = 404, description = "Product or cart line not found"),
        (status = 409, description = "Not enough stock"),
    ),
    tag = "cart"
)]
pub async fn increase_quantity(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let message =
        web::block(move || state.cart.increase_quantity(customer_id, &slug)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

/// DELETE /cart
///
/// Abandons the current cart. The order is kept, marked inactive.
#[utoipa::path(
    delete,
    path = "/cart",
    responses(
        (status = 200, description = "Cart cleared", body = MessageResponse),
        (status = 404, description = "No current cart"),
    ),
    tag = "cart"
)]
pub async fn clear_cart(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
) -> Result<HttpResponse, AppError> {
    let message = web::block(move || state.cart.clear_cart(customer_id)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

#[utoipa::path(
    get,
    path = "/cart",
    responses((status = 200, description = "Current cart", body = CartResponse)),
    tag = "cart"
)]
pub async fn get_cart(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
) -> Result<HttpResponse, AppError> {
    let view = web::block(move || state.cart.cart(customer_id)).await??;
    Ok(HttpResponse::Ok().json(CartResponse::from(view)))
}

#[utoipa::path(
    get,
    path = "/orders",
    responses((status = 200, description = "Active orders, newest first", body = OrdersResponse)),
    tag = "cart"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || state.cart.orders(customer_id)).await??;
    Ok(HttpResponse::Ok().json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

// ── Wishlist ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/wishlist",
    responses((status = 200, description = "Wishlist with the current order", body = WishlistResponse)),
    tag = "wishlist"
)]
pub async fn get_wishlist(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
) -> Result<HttpResponse, AppError> {
    let view = web::block(move || state.cart.wishlist(customer_id)).await??;
    let entries = view
        .entries
        .into_iter()
        .map(|(entry, product)| WishlistItemResponse {
            id: entry.id,
            product_id: product.id,
            name: product.name,
            slug: product.slug,
            price: money(&product.price),
            in_cart: entry.cart,
            created_at: timestamp(&entry.created_at),
        })
        .collect();
    Ok(HttpResponse::Ok().json(WishlistResponse {
        entries,
        order: view.order.map(Into::into),
    }))
}

#[utoipa::path(
    post,
    path = "/wishlist/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 201, description = "Added to wishlist", body = MessageResponse),
        (status = 200, description = "Already in the cart", body = MessageResponse),
        (status = 404, description = "Unknown product"),
        (status = 409, description = "Already wishlisted"),
    ),
    tag = "wishlist"
)]
pub async fn add_to_wishlist(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let outcome = web::block(move || state.cart.add_to_wishlist(customer_id, &slug)).await??;
    Ok(match outcome {
        WishlistAdd::Added(message) => HttpResponse::Created().json(MessageResponse::new(message)),
        WishlistAdd::AlreadyInCart(message) => {
            HttpResponse::Ok().json(MessageResponse::new(message))
        }
    })
}

#[utoipa::path(
    delete,
    path = "/wishlist/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Removed from wishlist", body = MessageResponse),
        (status = 404, description = "Not in wishlist"),
    ),
    tag = "wishlist"
)]
pub async fn remove_from_wishlist(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let message =
        web::block(move || state.cart.remove_from_wishlist(customer_id, &slug)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

// ── Checkout ─────────────────────────────────────────────────────────────────

/// GET /checkout
///
/// Brings every line within current stock and reports what changed.
#[utoipa::path(
    get,
    path = "/checkout",
    responses((status = 200, description = "Reconciled cart", body = CheckoutResponse)),
    tag = "checkout"
)]
pub async fn checkout(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
) -> Result<HttpResponse, AppError> {
    let view = web::block(move || state.cart.checkout(customer_id)).await??;
    Ok(HttpResponse::Ok().json(CheckoutResponse::from(view)))
}

/// POST /checkout/pay
///
/// Records the payment, takes stock and completes the order in one
/// transaction, together with an `OrderPaid` outbox event.
#[utoipa::path(
    post,
    path = "/checkout/pay",
    request_body = PaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = PaidResponse),
        (status = 409, description = "Empty cart, wrong amount or stock changed"),
        (status = 422, description = "Invalid form or M-Pesa code"),
    ),
    tag = "checkout"
)]
pub async fn pay(
    state: web::Data<AppState>,
    CurrentCustomer(customer_id): CurrentCustomer,
    body: web::Json<PaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let form = PaymentForm::from(body.into_inner());
    let payment = web::block(move || state.cart.pay(customer_id, form)).await??;
    Ok(HttpResponse::Created().json(PaidResponse {
        message: "Payment has been done successfully".to_string(),
        payment: payment.into(),
    }))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::application::cart::Adjustment;
    use crate::domain::store::Product;

    fn product(slug: &str, quantity: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            price: BigDecimal::from_str("100.00").unwrap(),
            quantity,
        }
    }

    #[test]
    fn each_reconciliation_outcome_keeps_its_own_action() {
        let view = CheckoutView {
            cart: CartView {
                order: None,
                lines: Vec::new(),
                total: BigDecimal::from(0),
            },
            adjustments: vec![
                Adjustment {
                    product: product("comb", 2),
                    outcome: Reconciliation::Clamped { from: 5, to: 2 },
                },
                Adjustment {
                    product: product("wig", 0),
                    outcome: Reconciliation::Removed,
                },
                Adjustment {
                    product: product("gel", 4),
                    outcome: Reconciliation::Unchanged,
                },
            ],
        };

        let response = CheckoutResponse::from(view);
        let actions: Vec<_> = response
            .adjustments
            .iter()
            .map(|a| (a.slug.as_str(), a.action.as_str(), a.quantity))
            .collect();
        assert_eq!(
            actions,
            vec![
                ("comb", "clamped", Some(2)),
                ("wig", "removed", None),
                ("gel", "unchanged", Some(4)),
            ]
        );
    }
}
