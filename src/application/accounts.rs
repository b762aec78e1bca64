use uuid::Uuid;

use crate::domain::account::{
    check_new_password, derive_username, full_name, login_redirect, normalize_email, Customer,
    CustomerProfile, LoginDecision, NewCustomer, ProfileForm, SignupForm,
};
use crate::domain::errors::{DomainError, FormErrors};
use crate::domain::events::OutboxMessage;
use crate::domain::ports::{CartRepository, CustomerRepository};
use crate::domain::store::Order;

use super::passwords::{hash_password, verify_password};
use super::tokens::VerificationTokens;

const INVALID_LINK: &str =
    "The confirmation link was invalid, possibly because it has already been used.";
const BAD_CREDENTIALS: &str = "your email or password is incorrect. Please check.";

#[derive(Debug)]
pub struct Registration {
    pub customer: Customer,
    pub message: String,
}

pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub remember: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug)]
pub struct LoginSuccess {
    pub customer: Customer,
    pub message: String,
    /// Whether the host should keep the session beyond the browser session.
    pub remember: bool,
    pub redirect: String,
}

pub struct ProfileView {
    pub customer: Customer,
    pub profile: CustomerProfile,
    pub order: Option<Order>,
}

pub struct PasswordChange {
    pub old_password: String,
    pub new_password1: String,
    pub new_password2: String,
}

pub struct AccountService<R> {
    repo: R,
    tokens: VerificationTokens,
    salon_name: String,
}

impl<R> AccountService<R>
where
    R: CustomerRepository + CartRepository,
{
    pub fn new(repo: R, tokens: VerificationTokens, salon_name: impl Into<String>) -> Self {
        Self {
            repo,
            tokens,
            salon_name: salon_name.into(),
        }
    }

    pub(crate) fn customer(&self, id: Uuid) -> Result<Customer, DomainError> {
        self.repo
            .find_customer(id)?
            .ok_or_else(|| DomainError::not_found("Customer"))
    }

    pub fn signup(&self, form: SignupForm) -> Result<Registration, DomainError> {
        let mut errors = form.validate();
        let email = normalize_email(&form.email);
        let username = derive_username(&email);
        if !errors.contains_key("email") {
            if self.repo.email_taken(&email, None)? {
                errors.insert(
                    "email".to_string(),
                    "Customer with this Email address already exists.".to_string(),
                );
            } else if self.repo.username_taken(&username)? {
                errors.insert(
                    "email".to_string(),
                    "A user with that username already exists.".to_string(),
                );
            }
        }
        if !errors.is_empty() {
            log::debug!("signup rejected: {:?}", errors.keys().collect::<Vec<_>>());
            return Err(DomainError::invalid("Please correct errors below", errors));
        }

        let id = Uuid::new_v4();
        let first_name = form.first_name.trim().to_string();
        let last_name = form.last_name.trim().to_string();
        let name = full_name(&first_name, &last_name);
        let event = OutboxMessage::customer_registered(
            id,
            &email,
            &name,
            &VerificationTokens::encode_uid(id),
            &self.tokens.make_token(id, &email),
        );
        let customer = self.repo.create_customer(
            NewCustomer {
                id,
                first_name,
                last_name,
                email,
                username,
                password_hash: hash_password(&form.password1)?,
            },
            event,
        )?;
        log::info!("customer {} registered as {}", customer.id, customer.username);

        Ok(Registration {
            message: format!(
                "Hi {name}, your account has been created successfully  wait for approval."
            ),
            customer,
        })
    }

    pub fn verify_email(&self, uid: &str, token: &str) -> Result<String, DomainError> {
        let invalid = || DomainError::conflict(INVALID_LINK);
        let id = VerificationTokens::decode_uid(uid).ok_or_else(invalid)?;
        let customer = self.repo.find_customer(id)?.ok_or_else(invalid)?;
        if !self.tokens.check_token(customer.id, &customer.email, token) {
            return Err(invalid());
        }
        if customer.is_verified {
            return Ok("you've already confirmed your email.".to_string());
        }
        self.repo.mark_verified(customer.id)?;
        log::info!("customer {} verified their email", customer.id);
        Ok("You've successfully verified your email. use your email to login".to_string())
    }

    /// Check credentials and account state. Issuing a session is left to the host.
    pub fn login(&self, request: LoginRequest) -> Result<LoginSuccess, DomainError> {
        let identifier = normalize_email(&request.username);
        let customer = match self.repo.find_customer_by_login(&identifier)? {
            Some(c) if verify_password(&request.password, &c.password_hash) => c,
            _ => return Err(DomainError::Unauthorized(BAD_CREDENTIALS.to_string())),
        };

        let decision =
            LoginDecision::for_account(customer.is_active, customer.is_verified, customer.is_archived);
        if let Some(refusal) = decision.refusal(&customer.full_name()) {
            log::debug!("login refused for {}: {:?}", customer.id, decision);
            return Err(DomainError::Forbidden(refusal));
        }

        Ok(LoginSuccess {
            message: format!("Hi {}, welcome to {}.", customer.full_name(), self.salon_name),
            remember: request.remember.as_deref() == Some("remember-me"),
            redirect: login_redirect(request.next.as_deref()),
            customer,
        })
    }

    pub fn profile(&self, customer_id: Uuid) -> Result<ProfileView, DomainError> {
        let customer = self.customer(customer_id)?;
        Ok(ProfileView {
            profile: self.repo.find_profile(customer.id)?,
            order: self.repo.find_open_order(customer.id)?,
            customer,
        })
    }

    pub fn update_profile(&self, customer_id: Uuid, form: ProfileForm) -> Result<String, DomainError> {
        let customer = self.customer(customer_id)?;
        let mut errors = form.validate();
        let details = form.details();
        if !errors.contains_key("email") && self.repo.email_taken(&details.email, Some(customer.id))? {
            errors.insert(
                "email".to_string(),
                "Customer with this Email address already exists.".to_string(),
            );
        }
        if !errors.is_empty() {
            return Err(DomainError::invalid("sorry, this form is invalid!", errors));
        }
        self.repo
            .update_customer(customer.id, &details, &form.profile())?;
        log::info!("customer {} updated their profile", customer.id);
        Ok("Your Profile has been updated!".to_string())
    }

    pub fn change_password(
        &self,
        customer_id: Uuid,
        change: PasswordChange,
    ) -> Result<String, DomainError> {
        let customer = self.customer(customer_id)?;
        let mut errors = FormErrors::new();
        if !verify_password(&change.old_password, &customer.password_hash) {
            errors.insert(
                "old_password".to_string(),
                "Your old password was entered incorrectly. Please enter it again.".to_string(),
            );
        }
        check_new_password(
            &mut errors,
            "new_password1",
            &change.new_password1,
            &change.new_password2,
        );
        if !errors.is_empty() {
            return Err(DomainError::invalid("Please correct the errors below.", errors));
        }
        self.repo
            .update_password_hash(customer.id, &hash_password(&change.new_password1)?)?;
        log::info!("customer {} changed their password", customer.id);
        Ok("Your password was successfully updated!".to_string())
    }
}
