// src/pipeline.rs

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::analysis_request::{AnalysisForm, AnalysisRequest};
use crate::channel_extractor::{ChannelSource, YouTubeChannelExtractor};
use crate::config::AppConfig;
use crate::error::{AnalysisError, ApiError};
use crate::growth::{AnalysisResult, GrowthCalculator};
use crate::processor::{CreationDateFilter, Processor};
use crate::session::YouTubeSession;
use crate::table::{GrowthSummary, ResultTable};

/// Number of channels listed in the "top growth" section.
pub const TOP_GROWTH_COUNT: usize = 5;

/// Output of one analysis run. Nothing in it outlives the request.
#[derive(Debug)]
pub struct AnalysisReport {
    pub request: AnalysisRequest,
    /// Channels returned by the API before the creation-date filter.
    pub fetched_count: usize,
    /// Ranked by growth rate, highest first.
    pub results: Vec<AnalysisResult>,
    /// `results` as a DataFrame, built once per run.
    pub table: ResultTable,
    pub summary: GrowthSummary,
}

impl AnalysisReport {
    pub fn top_growth(&self) -> &[AnalysisResult] {
        &self.results[..self.results.len().min(TOP_GROWTH_COUNT)]
    }
}

/// Runs validate -> fetch -> filter -> calculate for one request at a time.
/// Holds no per-request state, so one instance can serve every request.
pub struct ChannelGrowthAnalyzer {
    source: Arc<dyn ChannelSource>,
    timezone: Tz,
}

impl ChannelGrowthAnalyzer {
    pub fn new(source: Arc<dyn ChannelSource>, timezone: Tz) -> Self {
        ChannelGrowthAnalyzer { source, timezone }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let session = YouTubeSession::from_config(config)?;
        let extractor = YouTubeChannelExtractor::new(session);
        Ok(Self::new(Arc::new(extractor), config.timezone))
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Validates the raw form first; a rejected form never reaches the API.
    pub async fn analyze_form(&self, form: &AnalysisForm, now: DateTime<Utc>) -> Result<AnalysisReport, AnalysisError> {
        let request = form.validate()?;
        self.analyze(request, now).await
    }

    #[instrument(skip(self, request, now), fields(search_term = %request.search_term, result_count = request.result_count))]
    pub async fn analyze(&self, request: AnalysisRequest, now: DateTime<Utc>) -> Result<AnalysisReport, AnalysisError> {
        let channels = match self
            .source
            .fetch_channels(&request.search_term, request.result_count)
            .await
        {
            Ok(channels) => channels,
            Err(err) => {
                error!(error = %err, "channel fetch failed");
                return Err(err.into());
            }
        };
        let fetched_count = channels.len();

        let processor = Processor::new(
            CreationDateFilter::new(request.created_from, request.created_to, self.timezone),
            GrowthCalculator::new(now).with_timezone(self.timezone),
        );
        let results = processor.process(channels);
        let table = ResultTable::from_results(&results)?;
        let summary = table.summary()?;

        info!(fetched_count, analyzed = results.len(), "analysis complete");

        Ok(AnalysisReport {
            request,
            fetched_count,
            results,
            table,
            summary,
        })
    }
}
