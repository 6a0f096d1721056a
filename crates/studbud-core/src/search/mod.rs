//! Preference-ranked post search

mod ranking;

pub use ranking::{rank_posts, MatchTier, SearchPreferences};
