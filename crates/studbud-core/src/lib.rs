//! # studbud-core
//!
//! Domain layer containing entities, value objects, the ranked search engine,
//! and repository traits. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod search;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Post, User, GROUP_FLOOR};
pub use error::DomainError;
pub use search::{rank_posts, MatchTier, SearchPreferences};
pub use traits::{PostRepository, RepoResult, UserRepository};
pub use value_objects::{Filter, PriorityAxis};
