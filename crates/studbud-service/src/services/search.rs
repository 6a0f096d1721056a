//! Post search service
//!
//! Turns a search request into [`SearchPreferences`], fetches the open posts,
//! and hands them to the core ranking. Preferences reorder results but never
//! exclude a post; only visibility does that.

use chrono::Utc;
use tracing::instrument;

use studbud_core::search::{rank_posts, SearchPreferences};
use studbud_core::value_objects::{Filter, PriorityAxis};

use crate::dto::{PostResponse, SearchRequest, SearchResultsResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Post search service
pub struct SearchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SearchService<'a> {
    /// Create a new SearchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Search open posts, ranked by preference match
    ///
    /// An unknown priority axis is rejected before any posts are fetched.
    #[instrument(skip(self, request))]
    pub async fn search(&self, request: SearchRequest) -> ServiceResult<SearchResultsResponse> {
        let preferences = Self::preferences_from(request)?;

        let now = Utc::now();
        let posts = self.ctx.post_repo().find_active(now).await?;
        let ranked = rank_posts(posts, &preferences);

        Ok(SearchResultsResponse::new(
            ranked
                .iter()
                .map(|post| PostResponse::from_post(post, now))
                .collect(),
        ))
    }

    fn preferences_from(request: SearchRequest) -> ServiceResult<SearchPreferences> {
        let priority: PriorityAxis = request.priority.parse()?;

        let locations = match request.locations {
            Some(values) => Filter::one_of(values.into_values()),
            None => Filter::Any,
        };

        let activity = match request.activity {
            Some(value) if value.eq_ignore_ascii_case("any") => Filter::Any,
            Some(value) => Filter::Exactly(value),
            None => Filter::Any,
        };

        Ok(SearchPreferences {
            locations,
            activity,
            priority,
        })
    }
}
