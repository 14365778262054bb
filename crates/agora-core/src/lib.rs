//! # Agora Core
//!
//! The domain layer of the Agora social backend.
//! This crate contains the business rules for accounts, posts, comments and
//! likes, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
