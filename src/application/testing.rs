//! In-memory implementation of every repository port, for service tests.

use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::{Customer, CustomerDetails, CustomerProfile, NewCustomer};
use crate::domain::booking::{
    Appointment, Apprenticeship, Booking, BookingPayment, DateRange, NewBookingPayment,
    SalonService,
};
use crate::domain::errors::DomainError;
use crate::domain::events::OutboxMessage;
use crate::domain::feedback::Feedback;
use crate::domain::manager::{Manager, ManagerProfile, NewManager};
use crate::domain::ports::{
    AppointmentRepository, BookingRepository, CartRepository, CustomerRepository,
    FeedbackRepository, ManagerRepository, WishlistRepository,
};
use crate::domain::store::{
    CartLine, NewOrderPayment, Order, OrderItem, OrderPayment, Product, WishlistEntry,
};

struct ApprenticeshipRow {
    listing: Apprenticeship,
    is_active: bool,
    closed: bool,
    is_archived: bool,
}

#[derive(Default)]
struct State {
    customers: Vec<(Customer, CustomerProfile)>,
    customer_feedback: Vec<Feedback>,
    products: Vec<Product>,
    orders: Vec<Order>,
    items: Vec<OrderItem>,
    order_payments: Vec<OrderPayment>,
    wishlist: Vec<WishlistEntry>,
    services: Vec<SalonService>,
    bookings: Vec<Booking>,
    booking_payments: Vec<BookingPayment>,
    appointments: Vec<Appointment>,
    apprenticeships: Vec<ApprenticeshipRow>,
    managers: Vec<Manager>,
    manager_profiles: Vec<ManagerProfile>,
    manager_feedback: Vec<Feedback>,
    outbox: Vec<OutboxMessage>,
}

impl State {
    fn lines(&self, order_id: Uuid) -> Vec<CartLine> {
        self.items
            .iter()
            .filter(|i| i.order_id == order_id)
            .filter_map(|item| {
                self.products
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .map(|product| CartLine {
                        item: item.clone(),
                        product: product.clone(),
                    })
            })
            .collect()
    }
}

#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryRepository {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// An active, verified customer.
    pub fn seed_customer(&self, first_name: &str, last_name: &str, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        let customer = Customer {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            username: email.split('@').next().unwrap_or(email).to_string(),
            password_hash: String::new(),
            is_active: true,
            is_verified: true,
            is_archived: false,
            created_at: Utc::now(),
        };
        self.state()
            .customers
            .push((customer, CustomerProfile::default()));
        id
    }

    pub fn seed_product(&self, name: &str, slug: &str, price: &str, quantity: i32) -> Uuid {
        let id = Uuid::new_v4();
        self.state().products.push(Product {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
            price: BigDecimal::from_str(price).unwrap(),
            quantity,
        });
        id
    }

    pub fn set_stock(&self, slug: &str, quantity: i32) {
        let mut state = self.state();
        let product = state.products.iter_mut().find(|p| p.slug == slug).unwrap();
        product.quantity = quantity;
    }

    pub fn stock(&self, slug: &str) -> i32 {
        self.state()
            .products
            .iter()
            .find(|p| p.slug == slug)
            .map(|p| p.quantity)
            .unwrap()
    }

    pub fn seed_service(&self, name: &str, price: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.state().services.push(SalonService {
            id,
            name: name.to_string(),
            price: BigDecimal::from_str(price).unwrap(),
        });
        id
    }

    pub fn seed_apprenticeship(&self, title: &str, is_active: bool, closed: bool, is_archived: bool) {
        self.state().apprenticeships.push(ApprenticeshipRow {
            listing: Apprenticeship {
                id: Uuid::new_v4(),
                title: title.to_string(),
                description: String::new(),
                created_at: Utc::now(),
            },
            is_active,
            closed,
            is_archived,
        });
    }

    pub fn seed_manager_feedback(&self, manager_id: Uuid, subject: &str, message: &str) {
        self.state().manager_feedback.push(Feedback {
            id: Uuid::new_v4(),
            author_id: manager_id,
            subject: subject.to_string(),
            message: message.to_string(),
            created_at: Utc::now(),
        });
    }

    pub fn manager_profile_active(&self, manager_id: Uuid) -> Option<bool> {
        self.state()
            .manager_profiles
            .iter()
            .find(|p| p.manager_id == manager_id)
            .map(|p| p.is_active)
    }

    pub fn outbox(&self) -> Vec<OutboxMessage> {
        self.state().outbox.clone()
    }
}

impl CustomerRepository for InMemoryRepository {
    fn create_customer(
        &self,
        customer: NewCustomer,
        event: OutboxMessage,
    ) -> Result<Customer, DomainError> {
        let mut state = self.state();
        if state
            .customers
            .iter()
            .any(|(c, _)| c.email == customer.email || c.username == customer.username)
        {
            return Err(DomainError::conflict("customer already exists"));
        }
        let created = Customer {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            username: customer.username,
            password_hash: customer.password_hash,
            is_active: true,
            is_verified: false,
            is_archived: false,
            created_at: Utc::now(),
        };
        state
            .customers
            .push((created.clone(), CustomerProfile::default()));
        state.outbox.push(event);
        Ok(created)
    }

    fn find_customer(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        Ok(self
            .state()
            .customers
            .iter()
            .find(|(c, _)| c.id == id)
            .map(|(c, _)| c.clone()))
    }

    fn find_customer_by_login(&self, identifier: &str) -> Result<Option<Customer>, DomainError> {
        Ok(self
            .state()
            .customers
            .iter()
            .find(|(c, _)| c.username == identifier || c.email == identifier)
            .map(|(c, _)| c.clone()))
    }

    fn email_taken(&self, email: &str, excluding: Option<Uuid>) -> Result<bool, DomainError> {
        Ok(self
            .state()
            .customers
            .iter()
            .any(|(c, _)| c.email == email && Some(c.id) != excluding))
    }

    fn username_taken(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self
            .state()
            .customers
            .iter()
            .any(|(c, _)| c.username == username))
    }

    fn mark_verified(&self, id: Uuid) -> Result<(), DomainError> {
        let mut state = self.state();
        let (customer, _) = state
            .customers
            .iter_mut()
            .find(|(c, _)| c.id == id)
            .ok_or_else(|| DomainError::not_found("Customer"))?;
        customer.is_verified = true;
        Ok(())
    }

    fn find_profile(&self, customer_id: Uuid) -> Result<CustomerProfile, DomainError> {
        self.state()
            .customers
            .iter()
            .find(|(c, _)| c.id == customer_id)
            .map(|(_, p)| p.clone())
            .ok_or_else(|| DomainError::not_found("Profile"))
    }

    fn update_customer(
        &self,
        id: Uuid,
        details: &CustomerDetails,
        profile: &CustomerProfile,
    ) -> Result<(), DomainError> {
        let mut state = self.state();
        let (customer, stored) = state
            .customers
            .iter_mut()
            .find(|(c, _)| c.id == id)
            .ok_or_else(|| DomainError::not_found("Customer"))?;
        customer.first_name = details.first_name.clone();
        customer.last_name = details.last_name.clone();
        customer.email = details.email.clone();
        *stored = profile.clone();
        Ok(())
    }

    fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), DomainError> {
        let mut state = self.state();
        let (customer, _) = state
            .customers
            .iter_mut()
            .find(|(c, _)| c.id == id)
            .ok_or_else(|| DomainError::not_found("Customer"))?;
        customer.password_hash = password_hash.to_string();
        Ok(())
    }
}

impl FeedbackRepository for InMemoryRepository {
    fn customer_feedback(&self, customer_id: Uuid) -> Result<Vec<Feedback>, DomainError> {
        Ok(self
            .state()
            .customer_feedback
            .iter()
            .filter(|f| f.author_id == customer_id)
            .cloned()
            .collect())
    }

    fn create_feedback(
        &self,
        customer_id: Uuid,
        subject: &str,
        message: &str,
    ) -> Result<Feedback, DomainError> {
        let feedback = Feedback {
            id: Uuid::new_v4(),
            author_id: customer_id,
            subject: subject.to_string(),
            message: message.to_string(),
            created_at: Utc::now(),
        };
        self.state().customer_feedback.push(feedback.clone());
        Ok(feedback)
    }
}

impl CartRepository for InMemoryRepository {
    fn find_product_by_slug(&self, slug: &str) -> Result<Option<Product>, DomainError> {
        Ok(self
            .state()
            .products
            .iter()
            .find(|p| p.slug == slug)
            .cloned())
    }

    fn find_open_order(&self, customer_id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self
            .state()
            .orders
            .iter()
            .find(|o| o.customer_id == customer_id && o.is_active && !o.completed)
            .cloned())
    }

    fn create_order(&self, customer_id: Uuid, transaction_id: &str) -> Result<Order, DomainError> {
        let mut state = self.state();
        if state
            .orders
            .iter()
            .any(|o| o.customer_id == customer_id && o.is_active && !o.completed)
        {
            return Err(DomainError::conflict("customer already has an open cart"));
        }
        let order = Order {
            id: Uuid::new_v4(),
            customer_id,
            transaction_id: transaction_id.to_string(),
            is_active: true,
            completed: false,
            created_at: Utc::now(),
        };
        state.orders.push(order.clone());
        Ok(order)
    }

    fn find_order_item(
        &self,
        order_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<OrderItem>, DomainError> {
        Ok(self
            .state()
            .items
            .iter()
            .find(|i| i.order_id == order_id && i.product_id == product_id)
            .cloned())
    }

    fn add_order_item(
        &self,
        order_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<OrderItem, DomainError> {
        let item = OrderItem {
            id: Uuid::new_v4(),
            order_id,
            product_id,
            quantity,
        };
        self.state().items.push(item.clone());
        Ok(item)
    }

    fn set_item_quantity(&self, item_id: Uuid, quantity: i32) -> Result<(), DomainError> {
        let mut state = self.state();
        let item = state
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| DomainError::not_found("Cart item"))?;
        item.quantity = quantity;
        Ok(())
    }

    fn remove_order_item(&self, item_id: Uuid) -> Result<(), DomainError> {
        self.state().items.retain(|i| i.id != item_id);
        Ok(())
    }

    fn cart_lines(&self, order_id: Uuid) -> Result<Vec<CartLine>, DomainError> {
        Ok(self.state().lines(order_id))
    }

    fn deactivate_order(&self, order_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.state();
        if let Some(order) = state.orders.iter_mut().find(|o| o.id == order_id) {
            order.is_active = false;
        }
        Ok(())
    }

    fn customer_orders(
        &self,
        customer_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<Order>, DomainError> {
        Ok(self
            .state()
            .orders
            .iter()
            .rev()
            .filter(|o| o.customer_id == customer_id && (o.is_active || !active_only))
            .cloned()
            .collect())
    }

    fn order_payments(&self, customer_id: Uuid) -> Result<Vec<OrderPayment>, DomainError> {
        Ok(self
            .state()
            .order_payments
            .iter()
            .rev()
            .filter(|p| p.customer_id == customer_id)
            .cloned()
            .collect())
    }

    fn complete_order(
        &self,
        payment: NewOrderPayment,
        lines: &[CartLine],
        event: OutboxMessage,
    ) -> Result<OrderPayment, DomainError> {
        let mut state = self.state();
        for line in lines {
            let stock = state
                .products
                .iter()
                .find(|p| p.id == line.product.id)
                .map_or(0, |p| p.quantity);
            if stock < line.item.quantity {
                return Err(DomainError::conflict(format!(
                    "{} stock changed, please review your checkout.",
                    line.product.name
                )));
            }
        }
        for line in lines {
            if let Some(product) = state.products.iter_mut().find(|p| p.id == line.product.id) {
                product.quantity -= line.item.quantity;
            }
        }
        if let Some(order) = state.orders.iter_mut().find(|o| o.id == payment.order_id) {
            order.completed = true;
        }
        let recorded = OrderPayment {
            id: Uuid::new_v4(),
            order_id: payment.order_id,
            customer_id: payment.customer_id,
            amount: payment.amount,
            transaction_id: payment.transaction_id,
            created_at: Utc::now(),
        };
        state.order_payments.push(recorded.clone());
        state.outbox.push(event);
        Ok(recorded)
    }
}

impl WishlistRepository for InMemoryRepository {
    fn find_wishlist_entry(
        &self,
        customer_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<WishlistEntry>, DomainError> {
        Ok(self
            .state()
            .wishlist
            .iter()
            .find(|w| w.customer_id == customer_id && w.product_id == product_id)
            .cloned())
    }

    fn add_wishlist_entry(
        &self,
        customer_id: Uuid,
        product_id: Uuid,
    ) -> Result<WishlistEntry, DomainError> {
        let entry = WishlistEntry {
            id: Uuid::new_v4(),
            customer_id,
            product_id,
            cart: false,
            created_at: Utc::now(),
        };
        self.state().wishlist.push(entry.clone());
        Ok(entry)
    }

    fn remove_wishlist_entry(&self, id: Uuid) -> Result<(), DomainError> {
        self.state().wishlist.retain(|w| w.id != id);
        Ok(())
    }

    fn mark_wishlist_in_cart(&self, id: Uuid) -> Result<(), DomainError> {
        let mut state = self.state();
        if let Some(entry) = state.wishlist.iter_mut().find(|w| w.id == id) {
            entry.cart = true;
        }
        Ok(())
    }

    fn wishlist(&self, customer_id: Uuid) -> Result<Vec<(WishlistEntry, Product)>, DomainError> {
        let state = self.state();
        Ok(state
            .wishlist
            .iter()
            .filter(|w| w.customer_id == customer_id)
            .filter_map(|w| {
                state
                    .products
                    .iter()
                    .find(|p| p.id == w.product_id)
                    .map(|p| (w.clone(), p.clone()))
            })
            .collect())
    }
}

impl BookingRepository for InMemoryRepository {
    fn find_service(&self, id: Uuid) -> Result<Option<SalonService>, DomainError> {
        Ok(self.state().services.iter().find(|s| s.id == id).cloned())
    }

    fn find_ongoing_booking(&self, customer_id: Uuid) -> Result<Option<Booking>, DomainError> {
        Ok(self
            .state()
            .bookings
            .iter()
            .find(|b| b.customer_id == customer_id && !b.is_active)
            .cloned())
    }

    fn create_booking(
        &self,
        customer_id: Uuid,
        service_id: Uuid,
        transaction_id: &str,
    ) -> Result<Booking, DomainError> {
        let booking = Booking {
            id: Uuid::new_v4(),
            customer_id,
            service_id,
            transaction_id: transaction_id.to_string(),
            is_active: false,
            is_paid: false,
            created_at: Utc::now(),
        };
        self.state().bookings.push(booking.clone());
        Ok(booking)
    }

    fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        Ok(self.state().bookings.iter().find(|b| b.id == id).cloned())
    }

    fn find_booking_payment(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<BookingPayment>, DomainError> {
        Ok(self
            .state()
            .booking_payments
            .iter()
            .find(|p| p.booking_id == booking_id)
            .cloned())
    }

    fn pay_booking(
        &self,
        payment: NewBookingPayment,
        event: OutboxMessage,
    ) -> Result<BookingPayment, DomainError> {
        let mut state = self.state();
        let booking = state
            .bookings
            .iter_mut()
            .find(|b| b.id == payment.booking_id)
            .ok_or_else(|| DomainError::not_found("Booking"))?;
        booking.is_paid = true;
        let recorded = BookingPayment {
            id: Uuid::new_v4(),
            booking_id: payment.booking_id,
            customer_id: payment.customer_id,
            amount: payment.amount,
            transaction_id: payment.transaction_id,
            created_at: Utc::now(),
        };
        state.booking_payments.push(recorded.clone());
        state.outbox.push(event);
        Ok(recorded)
    }

    fn customer_bookings(&self, customer_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        Ok(self
            .state()
            .bookings
            .iter()
            .rev()
            .filter(|b| b.customer_id == customer_id)
            .cloned()
            .collect())
    }

    fn booking_payments(&self, customer_id: Uuid) -> Result<Vec<BookingPayment>, DomainError> {
        Ok(self
            .state()
            .booking_payments
            .iter()
            .rev()
            .filter(|p| p.customer_id == customer_id)
            .cloned()
            .collect())
    }

    fn open_apprenticeships(&self) -> Result<Vec<Apprenticeship>, DomainError> {
        Ok(self
            .state()
            .apprenticeships
            .iter()
            .filter(|a| a.is_active && !a.closed && !a.is_archived)
            .map(|a| a.listing.clone())
            .collect())
    }
}

impl AppointmentRepository for InMemoryRepository {
    fn overlapping_appointments(
        &self,
        range: &DateRange,
    ) -> Result<Vec<Appointment>, DomainError> {
        Ok(self
            .state()
            .appointments
            .iter()
            .filter(|a| a.range.conflicts_with(range))
            .cloned()
            .collect())
    }

    fn create_appointment(
        &self,
        customer_id: Uuid,
        service_id: Option<Uuid>,
        range: &DateRange,
    ) -> Result<Appointment, DomainError> {
        let appointment = Appointment {
            id: Uuid::new_v4(),
            customer_id,
            service_id,
            range: *range,
            created_at: Utc::now(),
        };
        self.state().appointments.push(appointment.clone());
        Ok(appointment)
    }

    fn customer_appointments(&self, customer_id: Uuid) -> Result<Vec<Appointment>, DomainError> {
        Ok(self
            .state()
            .appointments
            .iter()
            .filter(|a| a.customer_id == customer_id)
            .cloned()
            .collect())
    }
}

impl ManagerRepository for InMemoryRepository {
    fn create_manager(&self, manager: NewManager) -> Result<Manager, DomainError> {
        let mut state = self.state();
        let created = Manager {
            id: Uuid::new_v4(),
            first_name: manager.first_name,
            last_name: manager.last_name,
            email: manager.email,
            username: manager.username,
            is_active: false,
            is_archived: false,
            is_approved: false,
            created_at: Utc::now(),
        };
        state.manager_profiles.push(ManagerProfile {
            id: Uuid::new_v4(),
            manager_id: created.id,
            phone_number: None,
            gender: None,
            image: None,
            is_active: true,
            created_at: created.created_at,
        });
        state.managers.push(created.clone());
        Ok(created)
    }

    fn list_managers(&self) -> Result<Vec<Manager>, DomainError> {
        Ok(self.state().managers.iter().rev().cloned().collect())
    }

    fn manager_email_taken(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.state().managers.iter().any(|m| m.email == email))
    }

    fn manager_username_taken(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.state().managers.iter().any(|m| m.username == username))
    }

    fn list_manager_profiles(&self) -> Result<Vec<ManagerProfile>, DomainError> {
        Ok(self.state().manager_profiles.iter().rev().cloned().collect())
    }

    fn delete_manager(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.state();
        let before = state.managers.len();
        state.managers.retain(|m| m.id != id);
        state.manager_profiles.retain(|p| p.manager_id != id);
        state.manager_feedback.retain(|f| f.author_id != id);
        Ok(state.managers.len() < before)
    }

    fn approve_managers(&self, ids: &[Uuid]) -> Result<usize, DomainError> {
        let mut state = self.state();
        let mut count = 0;
        for manager in state.managers.iter_mut().filter(|m| ids.contains(&m.id)) {
            manager.is_active = true;
            manager.is_archived = false;
            manager.is_approved = true;
            count += 1;
        }
        Ok(count)
    }

    fn archive_managers(&self, ids: &[Uuid]) -> Result<usize, DomainError> {
        let mut state = self.state();
        let mut count = 0;
        for manager in state.managers.iter_mut().filter(|m| ids.contains(&m.id)) {
            manager.is_archived = true;
            count += 1;
        }
        Ok(count)
    }

    fn set_profiles_active(
        &self,
        profile_ids: &[Uuid],
        active: bool,
    ) -> Result<usize, DomainError> {
        let mut state = self.state();
        let mut count = 0;
        for profile in state
            .manager_profiles
            .iter_mut()
            .filter(|p| profile_ids.contains(&p.id))
        {
            profile.is_active = active;
            count += 1;
        }
        Ok(count)
    }

    fn manager_feedback(&self) -> Result<Vec<Feedback>, DomainError> {
        Ok(self.state().manager_feedback.iter().rev().cloned().collect())
    }

    fn delete_manager_feedback(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.state();
        let before = state.manager_feedback.len();
        state.manager_feedback.retain(|f| f.id != id);
        Ok(state.manager_feedback.len() < before)
    }
}
