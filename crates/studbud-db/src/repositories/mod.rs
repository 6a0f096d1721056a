//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in studbud-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod post;
mod user;

pub use post::PgPostRepository;
pub use user::PgUserRepository;
