use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::FormErrors;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_NAME_LENGTH: usize = 50;

/// Consumer mail domains stripped from an email address to form a username.
/// Checked in order; only the first match is removed.
const USERNAME_STRIPPED_DOMAINS: [&str; 7] = [
    "@gmail.com",
    "@yahoo.com",
    "@hotmail.com",
    "@live.com",
    "@msn.com",
    "@passport.com",
    "@outlook.com",
];

const GENDERS: [&str; 3] = ["male", "female", "other"];

#[derive(Debug, Clone)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomerProfile {
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Account fields a customer may edit on the profile page.
#[derive(Debug, Clone)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

#[derive(Debug, Clone)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
}

pub fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Derive a login name from an already-normalized email address.
pub fn derive_username(email: &str) -> String {
    USERNAME_STRIPPED_DOMAINS
        .iter()
        .find(|domain| email.contains(*domain))
        .map(|domain| email.replacen(domain, "", 1))
        .unwrap_or_else(|| email.to_string())
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (9..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

pub fn check_name_field(errors: &mut FormErrors, field: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field.to_string(), "This field is required.".to_string());
    } else if value.chars().count() > MAX_NAME_LENGTH {
        errors.insert(
            field.to_string(),
            format!("Ensure this value has at most {MAX_NAME_LENGTH} characters."),
        );
    }
}

pub fn check_email_field(errors: &mut FormErrors, email: &str) {
    if email.trim().is_empty() {
        errors.insert("email".to_string(), "This field is required.".to_string());
    } else if !is_valid_email(&normalize_email(email)) {
        errors.insert(
            "email".to_string(),
            "Enter a valid email address.".to_string(),
        );
    }
}

/// Password strength rules, reported against `field`.
pub fn check_new_password(errors: &mut FormErrors, field: &str, password: &str, confirm: &str) {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.insert(
            field.to_string(),
            format!(
                "This password is too short. It must contain at least {MIN_PASSWORD_LENGTH} characters."
            ),
        );
    } else if password.chars().all(|c| c.is_ascii_digit()) {
        errors.insert(
            field.to_string(),
            "This password is entirely numeric.".to_string(),
        );
    }
    if password != confirm {
        errors.insert(
            format!("{}2", field.trim_end_matches('1')),
            "The two password fields didn't match.".to_string(),
        );
    }
}

impl SignupForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        check_name_field(&mut errors, "first_name", &self.first_name);
        check_name_field(&mut errors, "last_name", &self.last_name);
        check_email_field(&mut errors, &self.email);
        check_new_password(&mut errors, "password1", &self.password1, &self.password2);
        errors
    }
}

impl ProfileForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        check_name_field(&mut errors, "first_name", &self.first_name);
        check_name_field(&mut errors, "last_name", &self.last_name);
        check_email_field(&mut errors, &self.email);
        if let Some(phone) = self.phone_number.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            if !is_valid_phone(phone) {
                errors.insert(
                    "phone_number".to_string(),
                    "Enter a valid phone number.".to_string(),
                );
            }
        }
        if let Some(gender) = self.gender.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
            if !GENDERS.contains(&gender) {
                errors.insert(
                    "gender".to_string(),
                    format!("Select a valid choice. {gender} is not one of the available choices."),
                );
            }
        }
        errors
    }

    pub fn details(&self) -> CustomerDetails {
        CustomerDetails {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: normalize_email(&self.email),
        }
    }

    /// Profile fields with blank strings collapsed to `None`.
    pub fn profile(&self) -> CustomerProfile {
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        CustomerProfile {
            phone_number: clean(&self.phone_number),
            gender: clean(&self.gender),
            image: clean(&self.image),
        }
    }
}

/// Outcome of checking account flags at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginDecision {
    Allowed,
    InactiveVerified,
    InactiveUnverified,
    Unverified,
    NotACustomer,
}

impl LoginDecision {
    pub fn for_account(is_active: bool, is_verified: bool, is_archived: bool) -> Self {
        match (is_archived, is_active, is_verified) {
            (true, _, _) => LoginDecision::NotACustomer,
            (false, false, true) => LoginDecision::InactiveVerified,
            (false, false, false) => LoginDecision::InactiveUnverified,
            (false, true, true) => LoginDecision::Allowed,
            (false, true, false) => LoginDecision::Unverified,
        }
    }

    /// Message shown when login is refused; `None` when allowed.
    pub fn refusal(&self, full_name: &str) -> Option<String> {
        match self {
            LoginDecision::Allowed => None,
            LoginDecision::InactiveVerified => Some(
                "your email is verified, but your account is inactive. Check your mail for notification."
                    .to_string(),
            ),
            LoginDecision::InactiveUnverified => {
                Some("your email is not verified, verify your email.".to_string())
            }
            LoginDecision::Unverified => Some(
                "you've registered, but your email is not verified, verify your email and try again."
                    .to_string(),
            ),
            LoginDecision::NotACustomer => Some(format!(
                "Hi {full_name}, you can't login here, this login page is for Customers only."
            )),
        }
    }
}

/// Where to send the customer after a successful login.
///
/// Only same-site paths are honoured; anything else falls back to `/`.
pub fn login_redirect(next: Option<&str>) -> String {
    match next.map(str::trim) {
        Some(next) if is_local_path(next) && !next.contains("add_to_cart") => next.to_string(),
        _ => "/".to_string(),
    }
}

fn is_local_path(next: &str) -> bool {
    next.starts_with('/') && !next.starts_with("//") && !next.starts_with("/\\")
}
