// src/error.rs

use chrono::NaiveDate;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Failures talking to the YouTube Data API. None of these are retried.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("YouTube API key is missing")]
    MissingKey,

    #[error("YouTube API key is invalid: {0}")]
    InvalidKey(String),

    #[error("YouTube API quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("YouTube API returned HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("unexpected YouTube API payload: {0}")]
    Decode(String),
}

/// Rejected form input. Raised before any request leaves the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("search term must not be empty")]
    EmptySearchTerm,

    #[error("result count {0} is outside 5..=50")]
    ResultCountOutOfRange(i64),

    #[error("malformed {field}: {value:?}")]
    MalformedField { field: &'static str, value: String },

    #[error("creation date range is inverted: {from} is after {to}")]
    InvertedDateRange { from: NaiveDate, to: NaiveDate },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {message}")]
    InvalidVar { var: &'static str, message: String },
}

/// Everything that can abort a single analysis run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to build results table: {0}")]
    Table(#[from] PolarsError),

    #[error("failed to render chart: {0}")]
    Chart(String),
}
