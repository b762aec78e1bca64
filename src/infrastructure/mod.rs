//! Diesel adapters for the repository ports.

pub mod booking_repo;
pub mod customer_repo;
pub mod feedback_repo;
pub mod manager_repo;
pub mod models;
pub mod store_repo;

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::events::OutboxMessage;
use crate::schema::salon_outbox;

use models::NewOutboxEventRow;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                log::debug!("unique violation: {}", info.message());
                DomainError::conflict("This record already exists.")
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Implements every port over one connection pool. The trait impls live in
/// the sibling `*_repo` modules.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, DomainError> {
        Ok(self.pool.get()?)
    }
}

/// Append `event` to the outbox on `conn`, inside the caller's transaction.
fn record_event(conn: &mut PgConnection, event: OutboxMessage) -> QueryResult<()> {
    diesel::insert_into(salon_outbox::table)
        .values(&NewOutboxEventRow {
            id: Uuid::new_v4(),
            aggregate_type: event.aggregate_type,
            aggregate_id: event.aggregate_id,
            event_type: event.event_type,
            payload: event.payload,
        })
        .execute(conn)?;
    Ok(())
}
