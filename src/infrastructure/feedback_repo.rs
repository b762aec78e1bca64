use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::feedback::Feedback;
use crate::domain::ports::FeedbackRepository;
use crate::schema::customer_feedback;

use super::models::{CustomerFeedbackRow, NewCustomerFeedbackRow};
use super::DieselRepository;

impl FeedbackRepository for DieselRepository {
    fn customer_feedback(&self, customer_id: Uuid) -> Result<Vec<Feedback>, DomainError> {
        let mut conn = self.conn()?;
        let rows = customer_feedback::table
            .filter(customer_feedback::customer_id.eq(customer_id))
            .order(customer_feedback::created_at.desc())
            .select(CustomerFeedbackRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn create_feedback(
        &self,
        customer_id: Uuid,
        subject: &str,
        message: &str,
    ) -> Result<Feedback, DomainError> {
        let mut conn = self.conn()?;
        let row = diesel::insert_into(customer_feedback::table)
            .values(&NewCustomerFeedbackRow {
                id: Uuid::new_v4(),
                customer_id,
                subject,
                message,
            })
            .returning(CustomerFeedbackRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }
}
