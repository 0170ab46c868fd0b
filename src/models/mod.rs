// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateQuery, MatchQuery, OwnerRef, Plan, ScoredTrip, ScoringWeights, TripListing,
    TripStatus, UsageAction, UsageCounters, UsageLimits, CANCELLED_STATUSES,
};
pub use requests::{FindTripMatchesRequest, RequestError};
pub use responses::{
    ErrorResponse, FindTripMatchesResponse, HealthResponse, RecordUsageResponse, UsageResponse,
};
