use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle of a trip listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Planning,
    Active,
    Completed,
    Cancelled,
}

/// Stored status spellings that mean a trip was cancelled
///
/// Shared with the trip store's SQL filter so both sides skip the same rows.
pub const CANCELLED_STATUSES: &[&str] = &["cancelled", "canceled"];

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Planning => "planning",
            TripStatus::Active => "active",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a stored status, treating unknown values as `Planning`
    pub fn from_db(value: &str) -> Self {
        let value = value.trim().to_ascii_lowercase();
        if CANCELLED_STATUSES.contains(&value.as_str()) {
            return TripStatus::Cancelled;
        }

        match value.as_str() {
            "active" => TripStatus::Active,
            "completed" => TripStatus::Completed,
            _ => TripStatus::Planning,
        }
    }
}

/// The user who created a trip listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A trip listing being evaluated against a match query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripListing {
    pub id: String,
    pub destination: String,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "travelStyle", default)]
    pub travel_style: Option<String>,
    pub status: TripStatus,
    #[serde(rename = "createdBy", default)]
    pub owner: Option<OwnerRef>,
}

/// The searching traveler's criteria, built from a validated request
#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: Option<f64>,
    pub interests: Vec<String>,
    pub travel_style: Option<String>,
}

/// Scored match result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTrip {
    #[serde(flatten)]
    pub trip: TripListing,
    pub score: u32,
}

/// Parameters for the candidate pre-filter
#[derive(Debug, Clone)]
pub struct CandidateQuery {
    pub search_pattern: String,
    pub limit: usize,
}

/// Points awarded per factor
///
/// The defaults add up to 100 when every factor matches perfectly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub destination_exact: u32,
    pub destination_partial: u32,
    pub destination_pattern: u32,
    pub dates_full: u32,
    pub dates_most: u32,
    pub dates_some: u32,
    pub budget_close: u32,
    pub budget_near: u32,
    pub per_interest: u32,
    pub interests_max: u32,
    pub travel_style: u32,
}

impl ScoringWeights {
    /// Highest total a candidate can reach with these weights
    pub fn max_total(&self) -> u32 {
        self.destination_exact
            .max(self.destination_partial)
            .max(self.destination_pattern)
            + self.dates_full.max(self.dates_most).max(self.dates_some)
            + self.budget_close.max(self.budget_near)
            + self.interests_max
            + self.travel_style
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            destination_exact: 40,
            destination_partial: 30,
            destination_pattern: 15,
            dates_full: 25,
            dates_most: 20,
            dates_some: 10,
            budget_close: 10,
            budget_near: 5,
            per_interest: 5,
            interests_max: 20,
            travel_style: 5,
        }
    }
}

/// Billing plan carried in the session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Premium,
}

/// Actions counted against the free-tier quota
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageAction {
    CreateTrip,
    JoinTrip,
}

impl UsageAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageAction::CreateTrip => "create_trip",
            UsageAction::JoinTrip => "join_trip",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "create_trip" | "create" => Some(UsageAction::CreateTrip),
            "join_trip" | "join" => Some(UsageAction::JoinTrip),
            _ => None,
        }
    }
}

/// Per-user usage counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsageCounters {
    #[serde(rename = "tripsCreated")]
    pub trips_created: u32,
    #[serde(rename = "tripsJoined")]
    pub trips_joined: u32,
}

impl UsageCounters {
    pub fn get(&self, action: UsageAction) -> u32 {
        match action {
            UsageAction::CreateTrip => self.trips_created,
            UsageAction::JoinTrip => self.trips_joined,
        }
    }
}

/// Free-tier limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLimits {
    #[serde(rename = "maxTripsCreated")]
    pub max_trips_created: u32,
    #[serde(rename = "maxTripsJoined")]
    pub max_trips_joined: u32,
}

impl UsageLimits {
    pub fn get(&self, action: UsageAction) -> u32 {
        match action {
            UsageAction::CreateTrip => self.max_trips_created,
            UsageAction::JoinTrip => self.max_trips_joined,
        }
    }
}

impl Default for UsageLimits {
    fn default() -> Self {
        Self {
            max_trips_created: 3,
            max_trips_joined: 5,
        }
    }
}
