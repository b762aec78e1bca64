//! Settings loaded from environment variables (after `dotenvy::dotenv()`).
//!
//! Required: `DATABASE_URL`, `SECRET_KEY`, `ADMIN_KEY`.
//! Optional: `HOST` (0.0.0.0), `PORT` (8080), `SALON_NAME` (Ashley's Salon),
//! `DATABASE_POOL_SIZE` (10).

use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// HMAC key for email verification tokens.
    pub secret_key: String,
    /// Expected value of the `X-Admin-Key` header.
    pub admin_key: String,
    pub salon_name: String,
    pub pool_size: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed("PORT", 8080)?,
            secret_key: required("SECRET_KEY")?,
            admin_key: required("ADMIN_KEY")?,
            salon_name: env::var("SALON_NAME").unwrap_or_else(|_| "Ashley's Salon".to_string()),
            pool_size: parsed("DATABASE_POOL_SIZE", 10)?,
        })
    }
}

fn required(key: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(key.to_string())),
    }
}

fn parsed<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_falls_back_to_default() {
        assert_eq!(parsed::<u16>("SALON_TEST_UNSET_PORT", 8080).unwrap(), 8080);
    }

    #[test]
    fn parsed_rejects_garbage() {
        env::set_var("SALON_TEST_BAD_PORT", "eighty");
        let err = parsed::<u16>("SALON_TEST_BAD_PORT", 8080).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "SALON_TEST_BAD_PORT"));
    }

    #[test]
    fn blank_required_value_is_missing() {
        env::set_var("SALON_TEST_BLANK", "  ");
        assert!(matches!(
            required("SALON_TEST_BLANK"),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }
}
