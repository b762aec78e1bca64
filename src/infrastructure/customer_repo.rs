use diesel::dsl::{exists, now};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::account::{Customer, CustomerDetails, CustomerProfile, NewCustomer};
use crate::domain::errors::DomainError;
use crate::domain::events::OutboxMessage;
use crate::domain::ports::CustomerRepository;
use crate::schema::{customer_profiles, customers};

use super::models::{
    CustomerChangeset, CustomerRow, NewCustomerRow, NewProfileRow, ProfileChangeset, ProfileRow,
};
use super::{record_event, DieselRepository};

impl CustomerRepository for DieselRepository {
    fn create_customer(
        &self,
        customer: NewCustomer,
        event: OutboxMessage,
    ) -> Result<Customer, DomainError> {
        let mut conn = self.conn()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::insert_into(customers::table)
                .values(&NewCustomerRow {
                    id: customer.id,
                    first_name: customer.first_name,
                    last_name: customer.last_name,
                    email: customer.email,
                    username: customer.username,
                    password_hash: customer.password_hash,
                })
                .returning(CustomerRow::as_returning())
                .get_result(conn)?;

            diesel::insert_into(customer_profiles::table)
                .values(&NewProfileRow {
                    customer_id: row.id,
                })
                .execute(conn)?;

            record_event(conn, event)?;
            Ok(row.into())
        })
    }

    fn find_customer(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.conn()?;
        let row = customers::table
            .filter(customers::id.eq(id))
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn find_customer_by_login(&self, identifier: &str) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.conn()?;
        let row = customers::table
            .filter(
                customers::username
                    .eq(identifier)
                    .or(customers::email.eq(identifier)),
            )
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn email_taken(&self, email: &str, excluding: Option<Uuid>) -> Result<bool, DomainError> {
        let mut conn = self.conn()?;
        let taken = diesel::select(exists(
            customers::table
                .filter(customers::email.eq(email))
                .filter(customers::id.ne(excluding.unwrap_or_else(Uuid::nil))),
        ))
        .get_result(&mut conn)?;
        Ok(taken)
    }

    fn username_taken(&self, username: &str) -> Result<bool, DomainError> {
        let mut conn = self.conn()?;
        let taken = diesel::select(exists(
            customers::table.filter(customers::username.eq(username)),
        ))
        .get_result(&mut conn)?;
        Ok(taken)
    }

    fn mark_verified(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.conn()?;
        diesel::update(customers::table.filter(customers::id.eq(id)))
            .set((customers::is_verified.eq(true), customers::updated_at.eq(now)))
            .execute(&mut conn)?;
        Ok(())
    }

    fn find_profile(&self, customer_id: Uuid) -> Result<CustomerProfile, DomainError> {
        let mut conn = self.conn()?;
        let row = customer_profiles::table
            .filter(customer_profiles::customer_id.eq(customer_id))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into).unwrap_or_default())
    }

    fn update_customer(
        &self,
        id: Uuid,
        details: &CustomerDetails,
        profile: &CustomerProfile,
    ) -> Result<(), DomainError> {
        let mut conn = self.conn()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            diesel::update(customers::table.filter(customers::id.eq(id)))
                .set((
                    &CustomerChangeset {
                        first_name: &details.first_name,
                        last_name: &details.last_name,
                        email: &details.email,
                    },
                    customers::updated_at.eq(now),
                ))
                .execute(conn)?;

            let changes = ProfileChangeset {
                phone_number: profile.phone_number.as_deref(),
                gender: profile.gender.as_deref(),
                image: profile.image.as_deref(),
            };
            diesel::insert_into(customer_profiles::table)
                .values(&NewProfileRow { customer_id: id })
                .on_conflict(customer_profiles::customer_id)
                .do_update()
                .set((&changes, customer_profiles::updated_at.eq(now)))
                .execute(conn)?;
            Ok(())
        })
    }

    fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), DomainError> {
        let mut conn = self.conn()?;
        diesel::update(customers::table.filter(customers::id.eq(id)))
            .set((
                customers::password_hash.eq(password_hash),
                customers::updated_at.eq(now),
            ))
            .execute(&mut conn)?;
        Ok(())
    }
}
