//! Search handlers
//!
//! Endpoint for preference-ranked post search.

use axum::{extract::State, Json};
use studbud_service::{SearchRequest, SearchResultsResponse, SearchService};

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Search open posts, ranked by preference match
///
/// POST /search
pub async fn search_posts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Json<SearchResultsResponse>> {
    let service = SearchService::new(state.service_context());
    let response = service.search(request).await?;
    Ok(Json(response))
}
