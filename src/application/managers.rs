use uuid::Uuid;

use crate::domain::errors::{DomainError, FormErrors};
use crate::domain::feedback::Feedback;
use crate::domain::manager::{Manager, ManagerForm, ManagerProfile, ModerationAction};
use crate::domain::ports::ManagerRepository;

/// Administration of staff accounts and the feedback they send.
pub struct ManagerService<R> {
    repo: R,
}

impl<R: ManagerRepository> ManagerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create(&self, form: ManagerForm) -> Result<Manager, DomainError> {
        let manager = form.into_new_manager()?;
        let message = if self.repo.manager_email_taken(&manager.email)? {
            Some("Manager with this Email address already exists.")
        } else if self.repo.manager_username_taken(&manager.username)? {
            Some("A user with that username already exists.")
        } else {
            None
        };
        if let Some(message) = message {
            let mut form = FormErrors::new();
            form.insert("email".to_string(), message.to_string());
            return Err(DomainError::invalid("Please correct errors below", form));
        }
        let manager = self.repo.create_manager(manager)?;
        log::info!("manager {} created as {}", manager.id, manager.username);
        Ok(manager)
    }

    pub fn list(&self) -> Result<Vec<Manager>, DomainError> {
        self.repo.list_managers()
    }

    /// Profiles newest first; their ids feed the profile bulk actions.
    pub fn profiles(&self) -> Result<Vec<ManagerProfile>, DomainError> {
        self.repo.list_manager_profiles()
    }

    pub fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete_manager(id)? {
            return Err(DomainError::not_found("Manager"));
        }
        log::info!("manager {id} deleted");
        Ok(())
    }

    /// Apply a bulk action and describe how many rows it touched.
    pub fn moderate(&self, action: ModerationAction, ids: &[Uuid]) -> Result<String, DomainError> {
        if ids.is_empty() {
            let mut form = FormErrors::new();
            form.insert(
                "ids".to_string(),
                "Items must be selected in order to perform actions on them.".to_string(),
            );
            return Err(DomainError::invalid("No items selected.", form));
        }
        let count = match action {
            ModerationAction::ApproveManagers => self.repo.approve_managers(ids)?,
            ModerationAction::ArchiveManagers => self.repo.archive_managers(ids)?,
            ModerationAction::ActivateProfiles => self.repo.set_profiles_active(ids, true)?,
            ModerationAction::DeactivateProfiles => self.repo.set_profiles_active(ids, false)?,
        };
        log::info!("{action:?} applied to {count} of {} rows", ids.len());
        Ok(action.summary(count))
    }

    pub fn feedback(&self) -> Result<Vec<Feedback>, DomainError> {
        self.repo.manager_feedback()
    }

    pub fn delete_feedback(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete_manager_feedback(id)? {
            return Err(DomainError::not_found("Feedback"));
        }
        Ok(())
    }
}
