use serde::{Deserialize, Serialize};
use crate::models::domain::{Plan, ScoredTrip, UsageCounters, UsageLimits};

/// Response for the trip match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindTripMatchesResponse {
    pub matches: Vec<ScoredTrip>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Current usage for the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub plan: Plan,
    pub usage: UsageCounters,
    /// Absent for plans without limits
    pub limits: Option<UsageLimits>,
    #[serde(rename = "remainingTripsCreated")]
    pub remaining_trips_created: Option<u32>,
    #[serde(rename = "remainingTripsJoined")]
    pub remaining_trips_joined: Option<u32>,
}

/// Result of recording a quota-counted action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordUsageResponse {
    pub allowed: bool,
    pub usage: UsageCounters,
}
