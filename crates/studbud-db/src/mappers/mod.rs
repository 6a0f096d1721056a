//! Entity to model mappers
//!
//! This module provides conversions between domain entities (studbud-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert`/`*Update` structs: Prepare entity data for database operations

mod post;
mod user;

pub use post::{PostInsert, PostUpdate};
pub use user::{UserInsert, UserUpdate};
