//! Middleware modules.

pub mod auth;
