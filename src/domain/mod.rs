//! Entities and business rules. Nothing in here performs I/O.

pub mod account;
pub mod booking;
pub mod errors;
pub mod events;
pub mod feedback;
pub mod manager;
pub mod payment;
pub mod ports;
pub mod store;
