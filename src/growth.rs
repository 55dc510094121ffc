// src/growth.rs

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::channel_record::ChannelRecord;

/// Lifetime averages for one channel.
///
/// These are total counts divided by channel age, not trends: only one
/// snapshot exists per run, so there is nothing to take a delta against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthMetrics {
    /// Whole days since creation, never below 1.
    pub elapsed_days: i64,
    pub avg_daily_subscriber_growth: f64,
    pub avg_daily_view_growth: f64,
    /// Average daily subscribers scaled by 100; the ranking score.
    pub growth_rate: f64,
}

/// A channel plus its derived metrics, as shown in the results table.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    /// 1-based position after ranking by growth rate.
    pub rank: usize,
    pub channel: ChannelRecord,
    /// Creation date in the analysis timezone; the date the window was
    /// checked against and the one every view prints.
    pub creation_date: NaiveDate,
    pub metrics: GrowthMetrics,
}

pub struct GrowthCalculator {
    now: DateTime<Utc>,
    timezone: Tz,
}

impl GrowthCalculator {
    pub fn new(now: DateTime<Utc>) -> Self {
        GrowthCalculator { now, timezone: Tz::UTC }
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn creation_date(&self, created_at: DateTime<Utc>) -> NaiveDate {
        created_at.with_timezone(&self.timezone).date_naive()
    }

    /// Floors to whole days and clamps to 1, so same-day and future-dated
    /// channels never divide by zero.
    pub fn elapsed_days(&self, created_at: DateTime<Utc>) -> i64 {
        (self.now - created_at).num_days().max(1)
    }

    pub fn metrics(&self, channel: &ChannelRecord) -> GrowthMetrics {
        let elapsed_days = self.elapsed_days(channel.created_at);
        let days = elapsed_days as f64;
        let avg_daily_subscriber_growth = channel.subscriber_count as f64 / days;

        GrowthMetrics {
            elapsed_days,
            avg_daily_subscriber_growth,
            avg_daily_view_growth: channel.view_count as f64 / days,
            growth_rate: avg_daily_subscriber_growth * 100.0,
        }
    }

    /// Attaches metrics to every channel and ranks by growth rate, highest
    /// first. Ties keep their input order.
    pub fn rank(&self, channels: Vec<ChannelRecord>) -> Vec<AnalysisResult> {
        let mut results: Vec<AnalysisResult> = channels
            .into_iter()
            .map(|channel| {
                let metrics = self.metrics(&channel);
                let creation_date = self.creation_date(channel.created_at);
                AnalysisResult { rank: 0, channel, creation_date, metrics }
            })
            .collect();

        results.sort_by(|a, b| b.metrics.growth_rate.total_cmp(&a.metrics.growth_rate));
        for (index, result) in results.iter_mut().enumerate() {
            result.rank = index + 1;
        }
        results
    }
}
