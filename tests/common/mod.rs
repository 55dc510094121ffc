// tests/common/mod.rs

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use ytgrowth::{ApiError, ChannelRecord, ChannelSource};

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn channel(id: &str, created_at: DateTime<Utc>, subscribers: u64, views: u64) -> ChannelRecord {
    ChannelRecord {
        id: id.to_string(),
        title: format!("Channel {}", id),
        created_at,
        subscriber_count: subscribers,
        view_count: views,
        video_count: 10,
        hidden_subscriber_count: false,
    }
}

/// In-memory channel source that counts how often it was asked.
pub struct FakeSource {
    channels: Vec<ChannelRecord>,
    failure: Mutex<Option<ApiError>>,
    pub calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_channels(channels: Vec<ChannelRecord>) -> Self {
        FakeSource {
            channels,
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: ApiError) -> Self {
        FakeSource {
            channels: Vec::new(),
            failure: Mutex::new(Some(error)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChannelSource for FakeSource {
    async fn fetch_channels(&self, _search_term: &str, max_results: u32) -> Result<Vec<ChannelRecord>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failure.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.channels.iter().take(max_results as usize).cloned().collect())
    }
}
