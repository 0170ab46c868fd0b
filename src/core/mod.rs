// Core algorithm exports
pub mod dates;
pub mod destination;
pub mod filters;
pub mod matcher;
pub mod quota;
pub mod scoring;

pub use dates::{overlap_days, overlap_percent, range_days};
pub use destination::{classify_destination, normalize_destination, DestinationMatch, SearchPattern};
pub use filters::{has_owner, is_open_listing, matches_candidate_query};
pub use matcher::{MatchResult, Matcher, MAX_RESULTS};
pub use quota::{limits_for, remaining, QuotaError};
pub use scoring::{calculate_match_score, shared_interests, ScoreBreakdown};
