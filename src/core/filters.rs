use crate::core::destination::SearchPattern;
use crate::models::{ScoredTrip, TripListing, TripStatus};

/// Check if a trip is still open for matching
#[inline]
pub fn is_open_listing(trip: &TripListing) -> bool {
    trip.status != TripStatus::Cancelled
}

/// Check if a trip passes the candidate pre-filter
///
/// Mirrors the trip store's SQL filter so in-memory candidate sets behave
/// the same as rows loaded from PostgreSQL.
#[inline]
pub fn matches_candidate_query(trip: &TripListing, pattern: &SearchPattern) -> bool {
    is_open_listing(trip) && pattern.matches(&trip.destination)
}

/// Check that a scored result can be shown, i.e. it has a resolvable owner
#[inline]
pub fn has_owner(scored: &ScoredTrip) -> bool {
    scored
        .trip
        .owner
        .as_ref()
        .is_some_and(|owner| !owner.id.trim().is_empty())
}
