use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::models::domain::MatchQuery;

/// Errors raised while turning a request body into a match query
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Request to find matching trips
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindTripMatchesRequest {
    #[validate(length(min = 1, max = 200))]
    pub destination: String,
    #[serde(alias = "start_date", rename = "startDate")]
    pub start_date: String,
    #[serde(alias = "end_date", rename = "endDate")]
    pub end_date: String,
    #[serde(default)]
    pub budget: Option<f64>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(alias = "travel_style", rename = "travelStyle", default)]
    pub travel_style: Option<String>,
}

/// Parse a date given either as `YYYY-MM-DD` or as an RFC 3339 timestamp
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, RequestError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| RequestError::InvalidInput(format!("{} is not a valid date: {:?}", field, value)))
}

impl TryFrom<FindTripMatchesRequest> for MatchQuery {
    type Error = RequestError;

    fn try_from(req: FindTripMatchesRequest) -> Result<Self, Self::Error> {
        let destination = req.destination.trim().to_string();
        if destination.is_empty() {
            return Err(RequestError::InvalidInput("destination is required".into()));
        }

        let start_date = parse_date("startDate", &req.start_date)?;
        let end_date = parse_date("endDate", &req.end_date)?;

        if let Some(budget) = req.budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(RequestError::InvalidInput(format!(
                    "budget must be a non-negative number, got {}",
                    budget
                )));
            }
        }

        let interests = req
            .interests
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        let travel_style = req
            .travel_style
            .map(|style| style.trim().to_string())
            .filter(|style| !style.is_empty());

        Ok(MatchQuery {
            destination,
            start_date,
            end_date,
            budget: req.budget,
            interests,
            travel_style,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> FindTripMatchesRequest {
        FindTripMatchesRequest {
            destination: " Paris ".to_string(),
            start_date: "2025-06-01".to_string(),
            end_date: "2025-06-10T00:00:00Z".to_string(),
            budget: Some(3000.0),
            interests: vec!["Food".to_string(), " ".to_string()],
            travel_style: Some("".to_string()),
        }
    }

    #[test]
    fn test_request_into_query() {
        let query = MatchQuery::try_from(request()).unwrap();

        assert_eq!(query.destination, "Paris");
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(query.end_date, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(query.interests, vec!["Food"]);
        assert_eq!(query.travel_style, None);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let mut req = request();
        req.start_date = "next tuesday".to_string();

        let err = MatchQuery::try_from(req).unwrap_err();
        assert!(matches!(err, RequestError::InvalidInput(_)));
    }

    #[test]
    fn test_nan_budget_rejected() {
        let mut req = request();
        req.budget = Some(f64::NAN);

        assert!(MatchQuery::try_from(req).is_err());
    }

    #[test]
    fn test_blank_destination_rejected() {
        let mut req = request();
        req.destination = "   ".to_string();

        assert!(req.validate().is_ok());
        assert!(MatchQuery::try_from(req).is_err());
    }

    #[test]
    fn test_camel_case_body() {
        let body = r#"{"destination":"Rome","startDate":"2025-01-01","endDate":"2025-01-05"}"#;
        let req: FindTripMatchesRequest = serde_json::from_str(body).unwrap();

        assert!(req.validate().is_ok());
        assert!(req.budget.is_none());
        assert!(req.interests.is_empty());
    }
}
