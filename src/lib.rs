//! Trip Match - matchmaking service for the travel planning app
//!
//! This library provides the trip scoring and ranking used to pair travelers
//! with existing trip listings, plus the free-tier usage quota check.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{Matcher, MatchResult, SearchPattern, MAX_RESULTS};
pub use models::{MatchQuery, ScoredTrip, ScoringWeights, TripListing, TripStatus, FindTripMatchesRequest, FindTripMatchesResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert_eq!(matcher.weights().max_total(), 100);
        assert_eq!(MAX_RESULTS, 5);
    }
}
