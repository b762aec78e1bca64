use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::{DomainError, FormErrors};

pub const MAX_SUBJECT_LENGTH: usize = 100;

const ALREADY_SENT: &str = "You've already sent this feedback, thank you.";
const SUBJECT_EXISTS: &str = "feedback with this title already exists";
const MESSAGE_EXISTS: &str = "feedback with this message already exists";

#[derive(Debug, Clone)]
pub struct Feedback {
    pub id: Uuid,
    pub author_id: Uuid,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FeedbackForm {
    pub subject: String,
    pub message: String,
}

impl FeedbackForm {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = FormErrors::new();
        let subject = self.subject.trim();
        if subject.is_empty() {
            errors.insert("subject".to_string(), "This field is required.".to_string());
        } else if subject.chars().count() > MAX_SUBJECT_LENGTH {
            errors.insert(
                "subject".to_string(),
                format!("Ensure this value has at most {MAX_SUBJECT_LENGTH} characters."),
            );
        }
        if self.message.trim().is_empty() {
            errors.insert("message".to_string(), "This field is required.".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::invalid("sorry, Form is invalid", errors))
        }
    }

    /// Reject the form if the author already sent feedback with the same
    /// subject and/or message. `previous` holds that author's earlier feedback.
    pub fn check_duplicate(&self, previous: &[Feedback]) -> Result<(), DomainError> {
        let subject = self.subject.trim();
        let message = self.message.trim();
        let same_subject = previous.iter().any(|f| f.subject == subject);
        let same_message = previous.iter().any(|f| f.message == message);
        let same_both = previous
            .iter()
            .any(|f| f.subject == subject && f.message == message);

        let mut form = FormErrors::new();
        if same_both {
            form.insert("subject".to_string(), SUBJECT_EXISTS.to_string());
            form.insert("message".to_string(), MESSAGE_EXISTS.to_string());
        } else if same_subject {
            form.insert("subject".to_string(), SUBJECT_EXISTS.to_string());
        } else if same_message {
            form.insert("message".to_string(), MESSAGE_EXISTS.to_string());
        } else {
            return Ok(());
        }
        Err(DomainError::Conflict {
            info: ALREADY_SENT.to_string(),
            form,
        })
    }
}
