//! Use cases. Each service is generic over the repository ports it needs.

pub mod accounts;
pub mod bookings;
pub mod cart;
pub mod dashboard;
pub mod feedback;
pub mod managers;
pub mod passwords;
pub mod tokens;

#[cfg(test)]
pub(crate) mod testing;
