use diesel::dsl::now;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::events::OutboxMessage;
use crate::domain::ports::{CartRepository, WishlistRepository};
use crate::domain::store::{
    CartLine, NewOrderPayment, Order, OrderItem, OrderPayment, Product, WishlistEntry,
};
use crate::schema::{order_items, order_payments, orders, products, wishlist};

use super::models::{
    NewOrderItemRow, NewOrderPaymentRow, NewOrderRow, NewWishlistRow, OrderItemRow,
    OrderPaymentRow, OrderRow, ProductRow, WishlistRow,
};
use super::{record_event, DieselRepository};

impl CartRepository for DieselRepository {
    fn find_product_by_slug(&self, slug: &str) -> Result<Option<Product>, DomainError> {
        let mut conn = self.conn()?;
        let row = products::table
            .filter(products::slug.eq(slug))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn find_open_order(&self, customer_id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.conn()?;
        let row = orders::table
            .filter(orders::customer_id.eq(customer_id))
            .filter(orders::is_active.eq(true))
            .filter(orders::completed.eq(false))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn create_order(&self, customer_id: Uuid, transaction_id: &str) -> Result<Order, DomainError> {
        let mut conn = self.conn()?;
        let row = diesel::insert_into(orders::table)
            .values(&NewOrderRow {
                id: Uuid::new_v4(),
                customer_id,
                transaction_id,
            })
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn find_order_item(
        &self,
        order_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<OrderItem>, DomainError> {
        let mut conn = self.conn()?;
        let row = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .filter(order_items::product_id.eq(product_id))
            .select(OrderItemRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn add_order_item(
        &self,
        order_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<OrderItem, DomainError> {
        let mut conn = self.conn()?;
        let row = diesel::insert_into(order_items::table)
            .values(&NewOrderItemRow {
                id: Uuid::new_v4(),
                order_id,
                product_id,
                quantity,
            })
            .returning(OrderItemRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn set_item_quantity(&self, item_id: Uuid, quantity: i32) -> Result<(), DomainError> {
        let mut conn = self.conn()?;
        diesel::update(order_items::table.filter(order_items::id.eq(item_id)))
            .set(order_items::quantity.eq(quantity))
            .execute(&mut conn)?;
        Ok(())
    }

    fn remove_order_item(&self, item_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.conn()?;
        diesel::delete(order_items::table.filter(order_items::id.eq(item_id)))
            .execute(&mut conn)?;
        Ok(())
    }

    fn cart_lines(&self, order_id: Uuid) -> Result<Vec<CartLine>, DomainError> {
        let mut conn = self.conn()?;
        let rows = order_items::table
            .inner_join(products::table)
            .filter(order_items::order_id.eq(order_id))
            .order(order_items::created_at.asc())
            .select((OrderItemRow::as_select(), ProductRow::as_select()))
            .load::<(OrderItemRow, ProductRow)>(&mut conn)?;
        Ok(rows
            .into_iter()
            .map(|(item, product)| CartLine {
                item: item.into(),
                product: product.into(),
            })
            .collect())
    }

    fn deactivate_order(&self, order_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.conn()?;
        diesel::update(orders::table.filter(orders::id.eq(order_id)))
            .set((orders::is_active.eq(false), orders::updated_at.eq(now)))
            .execute(&mut conn)?;
        Ok(())
    }

    fn customer_orders(
        &self,
        customer_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.conn()?;
        let mut query = orders::table
            .filter(orders::customer_id.eq(customer_id))
            .order(orders::created_at.desc())
            .select(OrderRow::as_select())
            .into_boxed();
        if active_only {
            query = query.filter(orders::is_active.eq(true));
        }
        let rows = query.load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn order_payments(&self, customer_id: Uuid) -> Result<Vec<OrderPayment>, DomainError> {
        let mut conn = self.conn()?;
        let rows = order_payments::table
            .filter(order_payments::customer_id.eq(customer_id))
            .order(order_payments::created_at.desc())
            .select(OrderPaymentRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn complete_order(
        &self,
        payment: NewOrderPayment,
        lines: &[CartLine],
        event: OutboxMessage,
    ) -> Result<OrderPayment, DomainError> {
        let mut conn = self.conn()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Record the payment
            let recorded = diesel::insert_into(order_payments::table)
                .values(&NewOrderPaymentRow {
                    id: Uuid::new_v4(),
                    order_id: payment.order_id,
                    customer_id: payment.customer_id,
                    mpesa: payment.mpesa,
                    amount: payment.amount,
                    transaction_id: payment.transaction_id,
                })
                .returning(OrderPaymentRow::as_returning())
                .get_result(conn)?;

            // 2. Take stock, refusing to go below zero
            for line in lines {
                let updated = diesel::update(
                    products::table
                        .filter(products::id.eq(line.product.id))
                        .filter(products::quantity.ge(line.item.quantity)),
                )
                .set(products::quantity.eq(products::quantity - line.item.quantity))
                .execute(conn)?;
                if updated == 0 {
                    return Err(DomainError::conflict(format!(
                        "{} stock changed, please review your checkout.",
                        line.product.name
                    )));
                }
            }

            // 3. Close the order
            diesel::update(orders::table.filter(orders::id.eq(payment.order_id)))
                .set((orders::completed.eq(true), orders::updated_at.eq(now)))
                .execute(conn)?;

            // 4. Outbox event in the same transaction
            record_event(conn, event)?;
            Ok(recorded.into())
        })
    }
}

impl WishlistRepository for DieselRepository {
    fn find_wishlist_entry(
        &self,
        customer_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<WishlistEntry>, DomainError> {
        let mut conn = self.conn()?;
        let row = wishlist::table
            .filter(wishlist::customer_id.eq(customer_id))
            .filter(wishlist::product_id.eq(product_id))
            .select(WishlistRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn add_wishlist_entry(
        &self,
        customer_id: Uuid,
        product_id: Uuid,
    ) -> Result<WishlistEntry, DomainError> {
        let mut conn = self.conn()?;
        let row = diesel::insert_into(wishlist::table)
            .values(&NewWishlistRow {
                id: Uuid::new_v4(),
                customer_id,
                product_id,
            })
            .returning(WishlistRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn remove_wishlist_entry(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.conn()?;
        diesel::delete(wishlist::table.filter(wishlist::id.eq(id))).execute(&mut conn)?;
        Ok(())
    }

    fn mark_wishlist_in_cart(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.conn()?;
        diesel::update(wishlist::table.filter(wishlist::id.eq(id)))
            .set(wishlist::cart.eq(true))
            .execute(&mut conn)?;
        Ok(())
    }

    fn wishlist(&self, customer_id: Uuid) -> Result<Vec<(WishlistEntry, Product)>, DomainError> {
        let mut conn = self.conn()?;
        let rows = wishlist::table
            .inner_join(products::table)
            .filter(wishlist::customer_id.eq(customer_id))
            .order(wishlist::created_at.desc())
            .select((WishlistRow::as_select(), ProductRow::as_select()))
            .load::<(WishlistRow, ProductRow)>(&mut conn)?;
        Ok(rows
            .into_iter()
            .map(|(entry, product)| (entry.into(), product.into()))
            .collect())
    }
}
