//! Path parameter extractors
//!
//! Type-safe extraction of UUIDs from path parameters.

use uuid::Uuid;

use crate::response::ApiError;

/// Path parameters with post_id
#[derive(Debug, serde::Deserialize)]
pub struct PostIdPath {
    pub post_id: String,
}

impl PostIdPath {
    /// Parse post_id as a Uuid
    pub fn post_id(&self) -> Result<Uuid, ApiError> {
        self.post_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid post_id format"))
    }
}
