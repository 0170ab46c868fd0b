use crate::core::{
    destination::SearchPattern,
    filters::{has_owner, is_open_listing, matches_candidate_query},
    scoring::calculate_match_score,
};
use crate::models::{MatchQuery, ScoredTrip, ScoringWeights, TripListing};

/// Number of ranked results returned for every query
pub const MAX_RESULTS: usize = 5;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredTrip>,
    pub total_candidates: usize,
}

/// Ranks candidate trips for a traveler's query
///
/// # Pipeline Stages
/// 1. Score every open candidate
/// 2. Drop results without an owner
/// 3. Stable sort by score, descending
/// 4. Keep the top [`MAX_RESULTS`]
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single candidate
    pub fn score(&self, query: &MatchQuery, trip: &TripListing, pattern: &SearchPattern) -> u32 {
        calculate_match_score(query, trip, pattern, &self.weights).total()
    }

    /// Rank pre-filtered candidates against a query
    ///
    /// Candidates are expected to be destination-filtered already. Cancelled
    /// trips are skipped here too, whatever the store returned. Ties keep
    /// their input order.
    ///
    /// # Arguments
    /// * `query` - The traveler's validated criteria
    /// * `pattern` - The search pattern the candidates were loaded with
    /// * `candidates` - Pre-filtered trip listings
    ///
    /// # Returns
    /// MatchResult with at most [`MAX_RESULTS`] scored trips
    pub fn rank(
        &self,
        query: &MatchQuery,
        pattern: &SearchPattern,
        candidates: Vec<TripListing>,
    ) -> MatchResult {
        let total_candidates = candidates.len();

        let mut matches: Vec<ScoredTrip> = candidates
            .into_iter()
            .filter(is_open_listing)
            .map(|trip| {
                let score = self.score(query, &trip, pattern);
                ScoredTrip { trip, score }
            })
            .filter(has_owner)
            .collect();

        // sort_by is stable, so equal scores keep candidate order
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(MAX_RESULTS);

        MatchResult {
            matches,
            total_candidates,
        }
    }

    /// Pre-filter an in-memory candidate set, then rank it
    ///
    /// Uses the query's destination as the search pattern and applies the
    /// same filter as the trip store: open trips whose destination contains
    /// the pattern.
    pub fn find_matches(&self, query: &MatchQuery, candidates: Vec<TripListing>) -> MatchResult {
        let pattern = SearchPattern::new(&query.destination);
        let candidates = candidates
            .into_iter()
            .filter(|trip| matches_candidate_query(trip, &pattern))
            .collect();

        self.rank(query, &pattern, candidates)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
