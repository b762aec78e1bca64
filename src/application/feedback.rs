use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::feedback::{Feedback, FeedbackForm};
use crate::domain::ports::{CustomerRepository, FeedbackRepository};

pub struct FeedbackService<R> {
    repo: R,
}

impl<R> FeedbackService<R>
where
    R: FeedbackRepository + CustomerRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn submit(&self, customer_id: Uuid, form: FeedbackForm) -> Result<Feedback, DomainError> {
        let customer = self
            .repo
            .find_customer(customer_id)?
            .ok_or_else(|| DomainError::not_found("Customer"))?;
        form.validate()?;
        let previous = self.repo.customer_feedback(customer.id)?;
        if let Err(e) = form.check_duplicate(&previous) {
            log::debug!("duplicate feedback from customer {customer_id}");
            return Err(e);
        }
        let feedback =
            self.repo
                .create_feedback(customer.id, form.subject.trim(), form.message.trim())?;
        log::info!("customer {} sent feedback {}", customer.id, feedback.id);
        Ok(feedback)
    }
}
