//! Ranking - orders visible posts by how well they match a searcher's preferences
//!
//! Every visible post appears in the result exactly once; preferences only
//! reorder, they never exclude. Posts fall into four tiers depending on which
//! axes matched, with the searcher's priority axis breaking the tie between
//! single-axis matches. Within a tier the input order is preserved.

use crate::entities::Post;
use crate::value_objects::{Filter, PriorityAxis};

/// What the searcher is looking for
#[derive(Debug, Clone)]
pub struct SearchPreferences {
    pub locations: Filter<String>,
    pub activity: Filter<String>,
    pub priority: PriorityAxis,
}

impl SearchPreferences {
    pub fn new(locations: Filter<String>, activity: Filter<String>, priority: PriorityAxis) -> Self {
        Self {
            locations,
            activity,
            priority,
        }
    }
}

/// Match quality of a post against a set of preferences
///
/// Ordering is best-first: `Both < PriorityOnly < SecondaryOnly < Neither`,
/// so sorting ascending by tier puts the best matches at the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    /// Both axes matched
    Both,
    /// Only the prioritized axis matched
    PriorityOnly,
    /// Only the non-prioritized axis matched
    SecondaryOnly,
    /// Neither axis matched
    Neither,
}

impl MatchTier {
    /// Classify a post against the preferences
    ///
    /// An `Any` filter matches every post on its axis, so a wildcard search
    /// classifies everything as `Both`.
    pub fn classify(post: &Post, prefs: &SearchPreferences) -> Self {
        let location_hit = prefs.locations.matches(&post.location);
        let activity_hit = prefs.activity.matches(&post.activity);

        let (priority_hit, secondary_hit) = match prefs.priority {
            PriorityAxis::Location => (location_hit, activity_hit),
            PriorityAxis::Activity => (activity_hit, location_hit),
        };

        match (priority_hit, secondary_hit) {
            (true, true) => Self::Both,
            (true, false) => Self::PriorityOnly,
            (false, true) => Self::SecondaryOnly,
            (false, false) => Self::Neither,
        }
    }
}

/// Order posts best-match-first, preserving input order within each tier
///
/// Returns every input post; nothing is filtered out.
pub fn rank_posts(mut posts: Vec<Post>, prefs: &SearchPreferences) -> Vec<Post> {
    // sort_by_key is stable, which gives the within-tier ordering guarantee
    posts.sort_by_key(|post| MatchTier::classify(post, prefs));
    posts
}
