// src/analysis_request.rs

use chrono::{Duration as ChronoDuration, NaiveDate};
use serde::Deserialize;

use crate::error::ValidationError;

pub const MIN_RESULT_COUNT: u32 = 5;
pub const MAX_RESULT_COUNT: u32 = 50;
pub const DEFAULT_RESULT_COUNT: u32 = 20;
/// Default lookback for the creation-date window, roughly five years.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365 * 5;

/// A validated analysis request. Construct through [`AnalysisRequest::new`]
/// or [`AnalysisForm::validate`] so the bounds always hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub search_term: String,
    pub result_count: u32,
    pub created_from: NaiveDate,
    pub created_to: NaiveDate,
}

impl AnalysisRequest {
    pub fn new(
        search_term: &str,
        result_count: i64,
        created_from: NaiveDate,
        created_to: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let search_term = search_term.trim();
        if search_term.is_empty() {
            return Err(ValidationError::EmptySearchTerm);
        }
        if result_count < MIN_RESULT_COUNT as i64 || result_count > MAX_RESULT_COUNT as i64 {
            return Err(ValidationError::ResultCountOutOfRange(result_count));
        }
        if created_from > created_to {
            return Err(ValidationError::InvertedDateRange {
                from: created_from,
                to: created_to,
            });
        }

        Ok(AnalysisRequest {
            search_term: search_term.to_string(),
            result_count: result_count as u32,
            created_from,
            created_to,
        })
    }
}

/// Raw form fields as submitted. Everything is a string so malformed input
/// turns into a [`ValidationError`] instead of a rejected request.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AnalysisForm {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub result_count: String,
    #[serde(default)]
    pub created_from: String,
    #[serde(default)]
    pub created_to: String,
}

impl AnalysisForm {
    /// Form pre-filled with the dashboard defaults relative to `today`.
    pub fn with_defaults(today: NaiveDate) -> Self {
        AnalysisForm {
            search_term: String::new(),
            result_count: DEFAULT_RESULT_COUNT.to_string(),
            created_from: (today - ChronoDuration::days(DEFAULT_LOOKBACK_DAYS))
                .format("%Y-%m-%d")
                .to_string(),
            created_to: today.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn validate(&self) -> Result<AnalysisRequest, ValidationError> {
        if self.search_term.trim().is_empty() {
            return Err(ValidationError::EmptySearchTerm);
        }
        let result_count = self
            .result_count
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::MalformedField {
                field: "result_count",
                value: self.result_count.clone(),
            })?;
        let created_from = parse_form_date("created_from", &self.created_from)?;
        let created_to = parse_form_date("created_to", &self.created_to)?;

        AnalysisRequest::new(&self.search_term, result_count, created_from, created_to)
    }
}

fn parse_form_date(field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ValidationError::MalformedField {
        field,
        value: raw.to_string(),
    })
}
