//! Request handlers
//!
//! All HTTP handlers organized by domain.

pub mod auth;
pub mod health;
pub mod posts;
pub mod search;
pub mod users;
