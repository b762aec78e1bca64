use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::account::{check_email_field, check_name_field, derive_username, normalize_email};
use super::errors::{DomainError, FormErrors};

#[derive(Debug, Clone)]
pub struct Manager {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub is_archived: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Staff-facing profile created alongside each manager.
#[derive(Debug, Clone)]
pub struct ManagerProfile {
    pub id: Uuid,
    pub manager_id: Uuid,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewManager {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct ManagerForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ManagerForm {
    pub fn into_new_manager(self) -> Result<NewManager, DomainError> {
        let mut errors = FormErrors::new();
        check_name_field(&mut errors, "first_name", &self.first_name);
        check_name_field(&mut errors, "last_name", &self.last_name);
        check_email_field(&mut errors, &self.email);
        if !errors.is_empty() {
            return Err(DomainError::invalid("Please correct errors below", errors));
        }
        let email = normalize_email(&self.email);
        Ok(NewManager {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            username: derive_username(&email),
            email,
        })
    }
}

/// Bulk moderation actions available to the site administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    ApproveManagers,
    ArchiveManagers,
    ActivateProfiles,
    DeactivateProfiles,
}

impl ModerationAction {
    /// Human-readable summary for `count` affected rows.
    pub fn summary(self, count: usize) -> String {
        let one = count == 1;
        match self {
            ModerationAction::ApproveManagers if one => {
                format!("{count} Manager has successfully been marked as active.")
            }
            ModerationAction::ApproveManagers => {
                format!("{count} Managers have been successfully marked as active.")
            }
            ModerationAction::ArchiveManagers if one => {
                format!("{count} Manager has been archived successfully.")
            }
            ModerationAction::ArchiveManagers => {
                format!("{count} Managers have been archived successfully.")
            }
            ModerationAction::ActivateProfiles if one => {
                format!("{count} Profile has been successfully marked as active.")
            }
            ModerationAction::ActivateProfiles => {
                format!("{count} Profiles have been successfully marked as active.")
            }
            ModerationAction::DeactivateProfiles if one => {
                format!("{count} Profile has been successfully marked as inactive.")
            }
            ModerationAction::DeactivateProfiles => {
                format!("{count} Profiles have been successfully marked as inactive.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_is_singular_for_one() {
        assert_eq!(
            ModerationAction::ApproveManagers.summary(1),
            "1 Manager has successfully been marked as active."
        );
        assert_eq!(
            ModerationAction::ArchiveManagers.summary(1),
            "1 Manager has been archived successfully."
        );
        assert_eq!(
            ModerationAction::DeactivateProfiles.summary(1),
            "1 Profile has been successfully marked as inactive."
        );
    }

    #[test]
    fn summary_is_plural_otherwise() {
        assert_eq!(
            ModerationAction::ApproveManagers.summary(3),
            "3 Managers have been successfully marked as active."
        );
        assert_eq!(
            ModerationAction::ActivateProfiles.summary(0),
            "0 Profiles have been successfully marked as active."
        );
        assert_eq!(
            ModerationAction::ArchiveManagers.summary(2),
            "2 Managers have been archived successfully."
        );
    }

    #[test]
    fn new_manager_gets_derived_username() {
        let manager = ManagerForm {
            first_name: "Ashley".to_string(),
            last_name: "Njeri".to_string(),
            email: "Ashley@Yahoo.com".to_string(),
        }
        .into_new_manager()
        .unwrap();
        assert_eq!(manager.email, "ashley@yahoo.com");
        assert_eq!(manager.username, "ashley");
    }

    #[test]
    fn new_manager_requires_valid_fields() {
        let err = ManagerForm {
            first_name: String::new(),
            last_name: "Njeri".to_string(),
            email: "not-an-email".to_string(),
        }
        .into_new_manager()
        .unwrap_err();
        let DomainError::Invalid { form, .. } = err else {
            panic!("expected invalid form");
        };
        assert!(form.contains_key("first_name"));
        assert!(form.contains_key("email"));
    }
}
