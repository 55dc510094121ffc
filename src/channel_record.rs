// src/channel_record.rs

use chrono::{DateTime, NaiveDateTime, Utc};

pub const CHANNEL_URL_PREFIX: &str = "https://www.youtube.com/channel/";

/// One point-in-time read of a channel's statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelRecord {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub subscriber_count: u64,
    pub view_count: u64,
    pub video_count: u64,
    /// The channel hides its subscriber count; `subscriber_count` is then 0.
    pub hidden_subscriber_count: bool,
}

impl ChannelRecord {
    pub fn url(&self) -> String {
        channel_url(&self.id)
    }
}

pub fn channel_url(channel_id: &str) -> String {
    format!("{}{}", CHANNEL_URL_PREFIX, channel_id)
}

/// Parses a `publishedAt` value. The API is inconsistent about fractional seconds,
/// and older channels sometimes come back with an explicit offset instead of `Z`.
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    for format in ["%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%dT%H:%M:%SZ"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
