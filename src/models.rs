//! Trip request and travel plan models

use crate::TripForgeError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Parameters for one travel plan request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripRequest {
    /// Destination name as entered by the traveller
    pub destination: String,
    /// Number of travellers
    pub party_size: u32,
    /// Trip length in days
    pub num_days: u32,
    /// Free-text trip preferences, may be empty
    #[serde(default)]
    pub description: String,
    /// Optional first travel day
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Optional last travel day
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl TripRequest {
    /// Create a request without dates or preferences
    #[must_use]
    pub fn new(destination: impl Into<String>, party_size: u32, num_days: u32) -> Self {
        Self {
            destination: destination.into(),
            party_size,
            num_days,
            description: String::new(),
            start_date: None,
            end_date: None,
        }
    }

    /// Check the request before it reaches the prompt builder
    pub fn validate(&self) -> crate::Result<()> {
        if self.destination.trim().is_empty() {
            return Err(TripForgeError::validation("Please enter a destination"));
        }
        if self.party_size == 0 {
            return Err(TripForgeError::validation(
                "Number of people must be at least 1",
            ));
        }
        if self.num_days == 0 {
            return Err(TripForgeError::validation(
                "Number of days must be at least 1",
            ));
        }
        Ok(())
    }

    /// Travel dates when both ends are present. Pairing is not enforced;
    /// a lone start or end date is simply ignored.
    #[must_use]
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// A generated travel plan after map-link post-processing
#[derive(Debug, Clone, Serialize)]
pub struct TravelPlan {
    /// Destination the plan was generated for
    pub destination: String,
    /// Linkified markdown returned to the page
    pub markdown: String,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_minimal_request() {
        let request = TripRequest::new("Tokyo, Japan", 2, 3);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_destination() {
        let request = TripRequest::new("", 2, 3);
        let err = request.validate().unwrap_err();
        assert!(matches!(err, TripForgeError::Validation { .. }));
        assert!(err.to_string().contains("destination"));

        let request = TripRequest::new("   ", 2, 3);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        assert!(TripRequest::new("Paris", 0, 3).validate().is_err());
        assert!(TripRequest::new("Paris", 2, 0).validate().is_err());
    }

    #[test]
    fn test_date_range_requires_both_ends() {
        let mut request = TripRequest::new("Paris", 2, 3);
        assert!(request.date_range().is_none());

        request.start_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        assert!(request.date_range().is_none());

        request.end_date = NaiveDate::from_ymd_opt(2025, 6, 4);
        let (start, end) = request.date_range().unwrap();
        assert_eq!(start.to_string(), "2025-06-01");
        assert_eq!(end.to_string(), "2025-06-04");
    }
}
