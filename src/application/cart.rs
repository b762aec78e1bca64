use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::events::OutboxMessage;
use crate::domain::payment::{generate_key, PaymentForm, CART_KEY_LENGTH, PAYMENT_KEY_LENGTH};
use crate::domain::ports::{CartRepository, CustomerRepository, WishlistRepository};
use crate::domain::store::{
    cart_total, check_increment, decrement, reconcile, unavailable_message, CartLine, Decrement,
    NewOrderPayment, Order, OrderItem, OrderPayment, Product, Reconciliation, StockCheck,
    WishlistEntry,
};

/// The current order with its lines and total.
pub struct CartView {
    pub order: Option<Order>,
    pub lines: Vec<CartLine>,
    pub total: BigDecimal,
}

impl CartView {
    fn empty() -> Self {
        Self {
            order: None,
            lines: Vec::new(),
            total: BigDecimal::from(0),
        }
    }
}

/// A line checkout had to change because stock ran short.
pub struct Adjustment {
    pub product: Product,
    pub outcome: Reconciliation,
}

pub struct CheckoutView {
    pub cart: CartView,
    pub adjustments: Vec<Adjustment>,
}

pub struct WishlistView {
    pub entries: Vec<(WishlistEntry, Product)>,
    pub order: Option<Order>,
}

/// Outcome of adding to the wishlist that is not an error.
#[derive(Debug)]
pub enum WishlistAdd {
    Added(String),
    AlreadyInCart(String),
}

pub struct CartService<R> {
    repo: R,
}

impl<R> CartService<R>
where
    R: CartRepository + WishlistRepository + CustomerRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    fn product(&self, slug: &str) -> Result<Product, DomainError> {
        self.repo
            .find_product_by_slug(slug)?
            .ok_or_else(|| DomainError::not_found("Product"))
    }

    fn open_order(&self, customer_id: Uuid) -> Result<Order, DomainError> {
        self.repo
            .find_open_order(customer_id)?
            .ok_or_else(|| DomainError::not_found("Cart"))
    }

    fn cart_item(&self, customer_id: Uuid, product: &Product) -> Result<OrderItem, DomainError> {
        let order = self.open_order(customer_id)?;
        self.repo
            .find_order_item(order.id, product.id)?
            .ok_or_else(|| DomainError::not_found("Cart item"))
    }

    fn view(&self, order: Option<Order>) -> Result<CartView, DomainError> {
        let Some(order) = order else {
            return Ok(CartView::empty());
        };
        let lines = self.repo.cart_lines(order.id)?;
        Ok(CartView {
            total: cart_total(&lines),
            order: Some(order),
            lines,
        })
    }

    pub fn add_to_cart(&self, customer_id: Uuid, slug: &str) -> Result<String, DomainError> {
        let customer = self
            .repo
            .find_customer(customer_id)?
            .ok_or_else(|| DomainError::not_found("Customer"))?;
        let product = self.product(slug)?;
        if let Some(entry) = self.repo.find_wishlist_entry(customer.id, product.id)? {
            self.repo.mark_wishlist_in_cart(entry.id)?;
        }

        let order = match self.repo.find_open_order(customer.id)? {
            Some(order) => order,
            None => {
                let order = self
                    .repo
                    .create_order(customer.id, &generate_key(CART_KEY_LENGTH))?;
                log::info!("opened cart {} for customer {}", order.id, customer.id);
                order
            }
        };

        match self.repo.find_order_item(order.id, product.id)? {
            Some(item) => match check_increment(item.quantity, product.quantity) {
                StockCheck::Fits(quantity) => {
                    self.repo.set_item_quantity(item.id, quantity)?;
                    Ok(format!("{quantity} {} has been added to cart", product.name))
                }
                StockCheck::Exceeds(quantity) => {
                    Err(DomainError::conflict(unavailable_message(quantity, &product)))
                }
            },
            None => match check_increment(0, product.quantity) {
                StockCheck::Fits(quantity) => {
                    self.repo.add_order_item(order.id, product.id, quantity)?;
                    Ok(format!("{quantity} {} has been added to cart", product.name))
                }
                StockCheck::Exceeds(_) => {
                    Err(DomainError::conflict("Sorry this item is out of stock"))
                }
            },
        }
    }

    pub fn remove_from_cart(&self, customer_id: Uuid, slug: &str) -> Result<String, DomainError> {
        let product = self.product(slug)?;
        let item = self.cart_item(customer_id, &product)?;
        self.repo.remove_order_item(item.id)?;
        Ok(format!("{} has been removed from cart successfully", product.name))
    }

    pub fn decrease_quantity(&self, customer_id: Uuid, slug: &str) -> Result<String, DomainError> {
        let product = self.product(slug)?;
        let item = self.cart_item(customer_id, &product)?;
        match decrement(item.quantity) {
            Decrement::Keep(quantity) => {
                self.repo.set_item_quantity(item.id, quantity)?;
                Ok(format!(
                    "{} quantity has been decreased to {quantity}",
                    product.name
                ))
            }
            Decrement::Remove => {
                self.repo.remove_order_item(item.id)?;
                Ok(format!(
                    "{} has been removed from cart successfully.",
                    product.name
                ))
            }
        }
    }

    pub fn increase_quantity(&self, customer_id: Uuid, slug: &str) -> Result<String, DomainError> {
        let product = self.product(slug)?;
        let item = self.cart_item(customer_id, &product)?;
        match check_increment(item.quantity, product.quantity) {
            StockCheck::Fits(quantity) => {
                self.repo.set_item_quantity(item.id, quantity)?;
                Ok(format!(
                    "{} quantity has been increased to {quantity}",
                    product.name
                ))
            }
            StockCheck::Exceeds(quantity) => {
                Err(DomainError::conflict(unavailable_message(quantity, &product)))
            }
        }
    }

    /// Abandon the current cart. The order row is kept but no longer active.
    pub fn clear_cart(&self, customer_id: Uuid) -> Result<String, DomainError> {
        let order = self.open_order(customer_id)?;
        self.repo.deactivate_order(order.id)?;
        log::info!("customer {} cleared cart {}", customer_id, order.id);
        Ok("Cart has been cleared successfully.".to_string())
    }

    pub fn cart(&self, customer_id: Uuid) -> Result<CartView, DomainError> {
        let order = self.repo.find_open_order(customer_id)?;
        self.view(order)
    }

    pub fn orders(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError> {
        self.repo.customer_orders(customer_id, true)
    }

    pub fn wishlist(&self, customer_id: Uuid) -> Result<WishlistView, DomainError> {
        Ok(WishlistView {
            entries: self.repo.wishlist(customer_id)?,
            order: self.repo.find_open_order(customer_id)?,
        })
    }

    pub fn add_to_wishlist(&self, customer_id: Uuid, slug: &str) -> Result<WishlistAdd, DomainError> {
        let product = self.product(slug)?;
        if let Some(order) = self.repo.find_open_order(customer_id)? {
            if let Some(item) = self.repo.find_order_item(order.id, product.id)? {
                return Ok(WishlistAdd::AlreadyInCart(format!(
                    "you have {} {} in your cart.",
                    item.quantity, product.name
                )));
            }
        }
        if self
            .repo
            .find_wishlist_entry(customer_id, product.id)?
            .is_some()
        {
            return Err(DomainError::conflict(format!(
                "{} has already been added to wishlist.",
                product.name
            )));
        }
        self.repo.add_wishlist_entry(customer_id, product.id)?;
        Ok(WishlistAdd::Added(format!(
            "{} has been added to wishlist successfully.",
            product.name
        )))
    }

    pub fn remove_from_wishlist(&self, customer_id: Uuid, slug: &str) -> Result<String, DomainError> {
        let product = self.product(slug)?;
        let Some(entry) = self.repo.find_wishlist_entry(customer_id, product.id)? else {
            return Err(DomainError::NotFound(format!(
                "{} is not in wishlist.",
                product.name
            )));
        };
        self.repo.remove_wishlist_entry(entry.id)?;
        Ok(format!("{} has been removed from wishlist.", product.name))
    }

    /// Bring every cart line within current stock before payment.
    pub fn checkout(&self, customer_id: Uuid) -> Result<CheckoutView, DomainError> {
        let Some(order) = self.repo.find_open_order(customer_id)? else {
            return Ok(CheckoutView {
                cart: CartView::empty(),
                adjustments: Vec::new(),
            });
        };

        let mut adjustments = Vec::new();
        for line in self.repo.cart_lines(order.id)? {
            let outcome = reconcile(line.item.quantity, line.product.quantity);
            match &outcome {
                Reconciliation::Unchanged => continue,
                Reconciliation::Clamped { to, .. } => {
                    self.repo.set_item_quantity(line.item.id, *to)?
                }
                Reconciliation::Removed => self.repo.remove_order_item(line.item.id)?,
            }
            log::debug!(
                "checkout adjusted {} in order {}: {:?}",
                line.product.slug,
                order.id,
                outcome
            );
            adjustments.push(Adjustment {
                product: line.product,
                outcome,
            });
        }

        Ok(CheckoutView {
            cart: self.view(Some(order))?,
            adjustments,
        })
    }

    pub fn pay(&self, customer_id: Uuid, form: PaymentForm) -> Result<OrderPayment, DomainError> {
        let customer = self
            .repo
            .find_customer(customer_id)?
            .ok_or_else(|| DomainError::not_found("Customer"))?;
        let payment = form.validate()?;
        let empty = || DomainError::conflict("Your cart is empty");
        let order = self.repo.find_open_order(customer.id)?.ok_or_else(empty)?;
        let lines = self.repo.cart_lines(order.id)?;
        if lines.is_empty() {
            return Err(empty());
        }

        payment.check_code()?;
        let total = cart_total(&lines);
        payment.check_amount(&total)?;

        let transaction_id = generate_key(PAYMENT_KEY_LENGTH);
        let event =
            OutboxMessage::order_paid(order.id, &customer, &transaction_id, &total, &lines);
        let recorded = self.repo.complete_order(
            NewOrderPayment {
                order_id: order.id,
                customer_id: customer.id,
                mpesa: payment.mpesa,
                amount: payment.amount,
                transaction_id,
            },
            &lines,
            event,
        )?;
        log::info!(
            "order {} paid by customer {} ({})",
            order.id,
            customer.id,
            recorded.transaction_id
        );
        Ok(recorded)
    }
}
