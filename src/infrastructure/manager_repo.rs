use diesel::dsl::{exists, now};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::feedback::Feedback;
use crate::domain::manager::{Manager, ManagerProfile, NewManager};
use crate::domain::ports::ManagerRepository;
use crate::schema::{manager_feedback, manager_profiles, managers};

use super::models::{
    ManagerFeedbackRow, ManagerProfileRow, ManagerRow, NewManagerProfileRow, NewManagerRow,
};
use super::DieselRepository;

impl ManagerRepository for DieselRepository {
    fn create_manager(&self, manager: NewManager) -> Result<Manager, DomainError> {
        let mut conn = self.conn()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::insert_into(managers::table)
                .values(&NewManagerRow {
                    id: Uuid::new_v4(),
                    first_name: manager.first_name,
                    last_name: manager.last_name,
                    email: manager.email,
                    username: manager.username,
                })
                .returning(ManagerRow::as_returning())
                .get_result(conn)?;

            diesel::insert_into(manager_profiles::table)
                .values(&NewManagerProfileRow {
                    id: Uuid::new_v4(),
                    manager_id: row.id,
                })
                .execute(conn)?;

            Ok(row.into())
        })
    }

    fn list_managers(&self) -> Result<Vec<Manager>, DomainError> {
        let mut conn = self.conn()?;
        let rows = managers::table
            .order(managers::created_at.desc())
            .select(ManagerRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn manager_email_taken(&self, email: &str) -> Result<bool, DomainError> {
        let mut conn = self.conn()?;
        let taken = diesel::select(exists(managers::table.filter(managers::email.eq(email))))
            .get_result(&mut conn)?;
        Ok(taken)
    }

    fn manager_username_taken(&self, username: &str) -> Result<bool, DomainError> {
        let mut conn = self.conn()?;
        let taken = diesel::select(exists(
            managers::table.filter(managers::username.eq(username)),
        ))
        .get_result(&mut conn)?;
        Ok(taken)
    }

    fn list_manager_profiles(&self) -> Result<Vec<ManagerProfile>, DomainError> {
        let mut conn = self.conn()?;
        let rows = manager_profiles::table
            .order(manager_profiles::created_at.desc())
            .select(ManagerProfileRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn delete_manager(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.conn()?;
        // Profile and feedback go with it through ON DELETE CASCADE.
        let deleted =
            diesel::delete(managers::table.filter(managers::id.eq(id))).execute(&mut conn)?;
        Ok(deleted > 0)
    }

    fn approve_managers(&self, ids: &[Uuid]) -> Result<usize, DomainError> {
        let mut conn = self.conn()?;
        let updated = diesel::update(managers::table.filter(managers::id.eq_any(ids)))
            .set((
                managers::is_active.eq(true),
                managers::is_archived.eq(false),
                managers::is_approved.eq(true),
                managers::updated_at.eq(now),
            ))
            .execute(&mut conn)?;
        Ok(updated)
    }

    fn archive_managers(&self, ids: &[Uuid]) -> Result<usize, DomainError> {
        let mut conn = self.conn()?;
        let updated = diesel::update(managers::table.filter(managers::id.eq_any(ids)))
            .set((managers::is_archived.eq(true), managers::updated_at.eq(now)))
            .execute(&mut conn)?;
        Ok(updated)
    }

    fn set_profiles_active(
        &self,
        profile_ids: &[Uuid],
        active: bool,
    ) -> Result<usize, DomainError> {
        let mut conn = self.conn()?;
        let updated =
            diesel::update(manager_profiles::table.filter(manager_profiles::id.eq_any(profile_ids)))
                .set((
                    manager_profiles::is_active.eq(active),
                    manager_profiles::updated_at.eq(now),
                ))
                .execute(&mut conn)?;
        Ok(updated)
    }

    fn manager_feedback(&self) -> Result<Vec<Feedback>, DomainError> {
        let mut conn = self.conn()?;
        let rows = manager_feedback::table
            .order(manager_feedback::created_at.desc())
            .select(ManagerFeedbackRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn delete_manager_feedback(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(manager_feedback::table.filter(manager_feedback::id.eq(id)))
            .execute(&mut conn)?;
        Ok(deleted > 0)
    }
}
