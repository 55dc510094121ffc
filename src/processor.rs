// src/processor.rs

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::info;

use crate::channel_record::ChannelRecord;
use crate::growth::{AnalysisResult, GrowthCalculator};

/// Keeps channels whose creation date falls in `[from, to]`, both ends inclusive.
/// Dates are compared in `timezone`, so a channel created late on the 31st UTC
/// may belong to the 1st elsewhere.
pub struct CreationDateFilter {
    from: NaiveDate,
    to: NaiveDate,
    timezone: Tz,
}

impl CreationDateFilter {
    pub fn new(from: NaiveDate, to: NaiveDate, timezone: Tz) -> Self {
        CreationDateFilter { from, to, timezone }
    }

    pub fn creation_date(&self, created_at: DateTime<Utc>) -> NaiveDate {
        created_at.with_timezone(&self.timezone).date_naive()
    }

    pub fn contains(&self, created_at: DateTime<Utc>) -> bool {
        let date = self.creation_date(created_at);
        date >= self.from && date <= self.to
    }

    /// Order-preserving; never reorders or duplicates.
    pub fn filter(&self, channels: Vec<ChannelRecord>) -> Vec<ChannelRecord> {
        channels
            .into_iter()
            .filter(|channel| self.contains(channel.created_at))
            .collect()
    }
}

/// Filter stage followed by the growth calculator.
pub struct Processor {
    filter: CreationDateFilter,
    calculator: GrowthCalculator,
}

impl Processor {
    pub fn new(filter: CreationDateFilter, calculator: GrowthCalculator) -> Self {
        Processor { filter, calculator }
    }

    pub fn process(&self, channels: Vec<ChannelRecord>) -> Vec<AnalysisResult> {
        let fetched = channels.len();
        let retained = self.filter.filter(channels);
        info!(
            fetched,
            retained = retained.len(),
            from = %self.filter.from,
            to = %self.filter.to,
            "filtered channels by creation date"
        );
        self.calculator.rank(retained)
    }
}
