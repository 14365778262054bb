//! # Agora Shared
//!
//! Transport-level payloads shared by the server and its clients that live
//! outside the GraphQL schema.

pub mod health;
pub mod response;

pub use health::HealthResponse;
pub use response::ErrorResponse;
