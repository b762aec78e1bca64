use std::str::FromStr;

use bigdecimal::BigDecimal;
use rand::distr::Alphanumeric;
use rand::Rng;

use super::errors::{DomainError, FormErrors};

pub const MPESA_CODE_LENGTH: usize = 10;
pub const CART_KEY_LENGTH: usize = 6;
pub const PAYMENT_KEY_LENGTH: usize = 8;

/// A submitted mobile-money payment before it is checked against what is owed.
#[derive(Debug, Clone)]
pub struct PaymentForm {
    pub mpesa: String,
    pub amount: String,
}

/// A payment form that passed field validation.
#[derive(Debug, Clone)]
pub struct ValidPayment {
    pub mpesa: String,
    pub amount: BigDecimal,
}

impl PaymentForm {
    /// Field validation: both fields present, amount a non-negative decimal.
    pub fn validate(&self) -> Result<ValidPayment, DomainError> {
        let mut errors = FormErrors::new();
        if self.mpesa.trim().is_empty() {
            errors.insert("mpesa".to_string(), "This field is required.".to_string());
        }
        let amount = match self.amount.trim() {
            "" => {
                errors.insert("amount".to_string(), "This field is required.".to_string());
                None
            }
            raw => match BigDecimal::from_str(raw) {
                Ok(amount) if amount >= BigDecimal::from(0) => Some(amount),
                _ => {
                    errors.insert("amount".to_string(), "Enter a number.".to_string());
                    None
                }
            },
        };
        match amount {
            Some(amount) if errors.is_empty() => Ok(ValidPayment {
                mpesa: self.mpesa.clone(),
                amount,
            }),
            _ => Err(DomainError::invalid("This form is invalid", errors)),
        }
    }
}

impl ValidPayment {
    /// Mock M-Pesa check: the confirmation code must be exactly ten characters.
    pub fn check_code(&self) -> Result<(), DomainError> {
        if self.mpesa.chars().count() == MPESA_CODE_LENGTH {
            Ok(())
        } else {
            Err(DomainError::InvalidPaymentCode)
        }
    }

    pub fn check_amount(&self, required: &BigDecimal) -> Result<(), DomainError> {
        if &self.amount == required {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "amount sent is {} but amount required is {}",
                self.amount, required
            )))
        }
    }
}

/// Random uppercase alphanumeric reference for carts, bookings and payments.
pub fn generate_key(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}
