//! Domain entities - core business objects

mod post;
mod user;

pub use post::{Post, GROUP_FLOOR};
pub use user::User;
