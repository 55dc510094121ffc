// src/channel_extractor.rs

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{info, warn};

use super::channel_record::{parse_published_at, ChannelRecord};
use super::session::YouTubeSession;
use crate::error::ApiError;

/// Anything that can turn a search term into ranked channel snapshots.
#[async_trait]
pub trait ChannelSource: Send + Sync {
    /// Returns at most `max_results` channels in relevance order.
    async fn fetch_channels(&self, search_term: &str, max_results: u32) -> Result<Vec<ChannelRecord>, ApiError>;
}

/// Pulls channels from the Data API: one `search` call, then one batched `channels` call.
pub struct YouTubeChannelExtractor {
    session: YouTubeSession,
}

impl YouTubeChannelExtractor {
    pub fn new(session: YouTubeSession) -> Self {
        YouTubeChannelExtractor { session }
    }
}

#[async_trait]
impl ChannelSource for YouTubeChannelExtractor {
    async fn fetch_channels(&self, search_term: &str, max_results: u32) -> Result<Vec<ChannelRecord>, ApiError> {
        let search = self
            .session
            .send_request("search", &QueryBuilder::search(search_term, max_results))
            .await?;
        let mut ids = ResponseProcessor::search_channel_ids(&search)?;
        ids.truncate(max_results as usize);
        info!(search_term, found = ids.len(), "channel search complete");

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let statistics = self
            .session
            .send_request("channels", &QueryBuilder::statistics(&ids))
            .await?;
        let records = ResponseProcessor::channel_records(&statistics)?;

        Ok(ResponseProcessor::in_search_order(&ids, records))
    }
}

/// Builds query parameters for the two request shapes.
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn search(search_term: &str, max_results: u32) -> Vec<(&'static str, String)> {
        vec![
            ("part", "snippet".to_string()),
            ("type", "channel".to_string()),
            ("q", search_term.to_string()),
            ("maxResults", max_results.to_string()),
        ]
    }

    pub fn statistics(channel_ids: &[String]) -> Vec<(&'static str, String)> {
        vec![
            ("part", "statistics,snippet".to_string()),
            ("id", channel_ids.join(",")),
        ]
    }
}

/// Turns Data API payloads into domain records.
pub struct ResponseProcessor;

impl ResponseProcessor {
    /// Channel ids from a `search.list` response, deduplicated, ranking preserved.
    pub fn search_channel_ids(json: &Value) -> Result<Vec<String>, ApiError> {
        let items = json["items"]
            .as_array()
            .ok_or_else(|| ApiError::Decode("search response has no items array".into()))?;

        let mut ids: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            let id = item["id"]["channelId"]
                .as_str()
                .or_else(|| item["snippet"]["channelId"].as_str());
            match id {
                Some(id) if !ids.iter().any(|seen| seen == id) => ids.push(id.to_string()),
                Some(_) => {}
                None => warn!("search result without a channel id, skipping"),
            }
        }
        Ok(ids)
    }

    /// Records from a `channels.list` response. Items missing a title or a
    /// parseable creation date, or carrying a count that is not a number, are
    /// dropped with a warning.
    pub fn channel_records(json: &Value) -> Result<Vec<ChannelRecord>, ApiError> {
        // An empty result set comes back without an `items` key at all.
        let items = match json.get("items") {
            None => return Ok(Vec::new()),
            Some(items) => items
                .as_array()
                .ok_or_else(|| ApiError::Decode("channels response items is not an array".into()))?,
        };

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match Self::channel_record(item) {
                Ok(record) => {
                    if record.hidden_subscriber_count {
                        warn!(channel_id = %record.id, "subscriber count hidden, treating as 0");
                    }
                    records.push(record);
                }
                Err(reason) => warn!(item = %item["id"], %reason, "unusable channel item, skipping"),
            }
        }
        Ok(records)
    }

    fn channel_record(item: &Value) -> Result<ChannelRecord, String> {
        let id = item["id"].as_str().ok_or("missing id")?.to_string();
        let snippet = &item["snippet"];
        let statistics = &item["statistics"];

        let title = snippet["title"].as_str().ok_or("missing title")?.to_string();
        let published_at = snippet["publishedAt"].as_str().ok_or("missing publishedAt")?;
        let created_at =
            parse_published_at(published_at).ok_or_else(|| format!("unparseable publishedAt {:?}", published_at))?;

        let subscriber_count = count_field(statistics, "subscriberCount")?;
        let hidden_subscriber_count =
            statistics["hiddenSubscriberCount"].as_bool().unwrap_or(false) || subscriber_count.is_none();

        Ok(ChannelRecord {
            id,
            title,
            created_at,
            subscriber_count: subscriber_count.unwrap_or(0),
            view_count: count_field(statistics, "viewCount")?.unwrap_or(0),
            video_count: count_field(statistics, "videoCount")?.unwrap_or(0),
            hidden_subscriber_count,
        })
    }

    /// Reorders `records` to follow `ids`; ids without a record are dropped.
    pub fn in_search_order(ids: &[String], records: Vec<ChannelRecord>) -> Vec<ChannelRecord> {
        let mut by_id: HashMap<String, ChannelRecord> =
            records.into_iter().map(|record| (record.id.clone(), record)).collect();

        ids.iter()
            .filter_map(|id| {
                let record = by_id.remove(id);
                if record.is_none() {
                    warn!(channel_id = %id, "no statistics returned for channel");
                }
                record
            })
            .collect()
    }
}

/// Counts are JSON strings in the Data API (`"viewCount": "1234"`); accept numbers too.
/// `Ok(None)` when the field is absent, `Err` when it is present but not a count.
fn count_field(statistics: &Value, name: &str) -> Result<Option<u64>, String> {
    let value = match statistics.get(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };
    value
        .as_str()
        .and_then(|raw| raw.parse::<u64>().ok())
        .or_else(|| value.as_u64())
        .map(Some)
        .ok_or_else(|| format!("{} is not a count: {}", name, value))
}
