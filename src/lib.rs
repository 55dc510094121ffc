// src/lib.rs

pub mod analysis_request;
pub mod channel_extractor;
pub mod channel_record;
pub mod chart;
pub mod config;
pub mod error;
pub mod growth;
pub mod logging;
pub mod page;
pub mod pipeline;
pub mod processor;
pub mod session;
pub mod table;
pub mod web;

pub use session::YouTubeSession;

pub use analysis_request::{AnalysisForm, AnalysisRequest};
pub use channel_extractor::{ChannelSource, YouTubeChannelExtractor};
pub use channel_record::ChannelRecord;
pub use config::AppConfig;
pub use error::{AnalysisError, ApiError, ConfigError, ValidationError};
pub use growth::{AnalysisResult, GrowthCalculator, GrowthMetrics};
pub use pipeline::{AnalysisReport, ChannelGrowthAnalyzer};
pub use processor::{CreationDateFilter, Processor};
pub use table::{GrowthSummary, ResultTable};
