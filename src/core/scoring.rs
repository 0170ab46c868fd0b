use std::collections::HashSet;

use crate::core::dates::overlap_percent;
use crate::core::destination::{classify_destination, DestinationMatch, SearchPattern};
use crate::models::{MatchQuery, ScoringWeights, TripListing};

/// Budget difference that still counts as a close match
pub const BUDGET_CLOSE_DIFF: f64 = 2000.0;
/// Budget difference that still counts as a near match
pub const BUDGET_NEAR_DIFF: f64 = 4000.0;

/// Per-factor points for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    pub destination: u32,
    pub dates: u32,
    pub budget: u32,
    pub interests: u32,
    pub travel_style: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.destination + self.dates + self.budget + self.interests + self.travel_style
    }
}

/// Calculate a match score (0-100) for a trip against the traveler's query
///
/// Scoring table with default weights:
/// destination  40 exact / 30 contains / 15 search pattern
/// dates        25 (>=99%) / 20 (>=70%) / 10 (>=40%)
/// budget       10 (diff <= 2000) / 5 (diff <= 4000)
/// interests    5 per shared tag, capped at 20
/// travel style 5 when equal ignoring case
pub fn calculate_match_score(
    query: &MatchQuery,
    trip: &TripListing,
    pattern: &SearchPattern,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    ScoreBreakdown {
        destination: destination_score(query, trip, pattern, weights),
        dates: date_score(query, trip, weights),
        budget: budget_score(query.budget, trip.budget, weights),
        interests: interest_score(&query.interests, &trip.interests, weights),
        travel_style: travel_style_score(
            query.travel_style.as_deref(),
            trip.travel_style.as_deref(),
            weights,
        ),
    }
}

#[inline]
fn destination_score(
    query: &MatchQuery,
    trip: &TripListing,
    pattern: &SearchPattern,
    weights: &ScoringWeights,
) -> u32 {
    match classify_destination(&query.destination, &trip.destination, pattern) {
        DestinationMatch::Exact => weights.destination_exact,
        DestinationMatch::Partial => weights.destination_partial,
        DestinationMatch::Pattern => weights.destination_pattern,
        DestinationMatch::None => 0,
    }
}

#[inline]
fn date_score(query: &MatchQuery, trip: &TripListing, weights: &ScoringWeights) -> u32 {
    let percent = overlap_percent(
        query.start_date,
        query.end_date,
        trip.start_date,
        trip.end_date,
    );

    if percent >= 0.99 {
        weights.dates_full
    } else if percent >= 0.70 {
        weights.dates_most
    } else if percent >= 0.40 {
        weights.dates_some
    } else {
        0
    }
}

#[inline]
fn budget_score(query_budget: Option<f64>, trip_budget: Option<f64>, weights: &ScoringWeights) -> u32 {
    let (Some(wanted), Some(offered)) = (query_budget, trip_budget) else {
        return 0;
    };

    let diff = (offered - wanted).abs();
    if diff <= BUDGET_CLOSE_DIFF {
        weights.budget_close
    } else if diff <= BUDGET_NEAR_DIFF {
        weights.budget_near
    } else {
        0
    }
}

/// Count distinct query tags present in the candidate's tags (case-sensitive)
pub fn shared_interests<'a>(query_interests: &'a [String], trip_interests: &[String]) -> Vec<&'a str> {
    let offered: HashSet<&str> = trip_interests.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();

    query_interests
        .iter()
        .map(String::as_str)
        .filter(|tag| offered.contains(tag) && seen.insert(*tag))
        .collect()
}

#[inline]
fn interest_score(query_interests: &[String], trip_interests: &[String], weights: &ScoringWeights) -> u32 {
    if query_interests.is_empty() || trip_interests.is_empty() {
        return 0;
    }

    let common = shared_interests(query_interests, trip_interests).len() as u32;
    common
        .saturating_mul(weights.per_interest)
        .min(weights.interests_max)
}

#[inline]
fn travel_style_score(query_style: Option<&str>, trip_style: Option<&str>, weights: &ScoringWeights) -> u32 {
    match (query_style, trip_style) {
        (Some(wanted), Some(offered)) if wanted.trim().to_lowercase() == offered.trim().to_lowercase() => {
            weights.travel_style
        }
        _ => 0,
    }
}
