// src/table.rs

use polars::prelude::*;
use std::fmt::Write as _;

use crate::growth::AnalysisResult;
use crate::page::escape_html;

/// Column names and their display headers, in table order.
pub const COLUMNS: &[(&str, &str)] = &[
    ("rank", "#"),
    ("channel_name", "Channel"),
    ("channel_id", "Channel ID"),
    ("channel_link", "Link"),
    ("published_at", "Created"),
    ("days_since_creation", "Days Since Creation"),
    ("current_subs", "Subscribers"),
    ("current_views", "Views"),
    ("video_count", "Videos"),
    ("daily_subs", "Avg Daily Subscribers"),
    ("daily_views", "Avg Daily Views"),
    ("growth_rate", "Growth Rate (per day)"),
];

/// Columns holding per-day averages; kept unrounded and rounded on output.
const AVERAGE_COLUMNS: [&str; 3] = ["daily_subs", "daily_views", "growth_rate"];

/// Ranked results as a DataFrame, one row per channel.
#[derive(Clone, Debug)]
pub struct ResultTable {
    df: DataFrame,
}

/// Aggregates across every row of a [`ResultTable`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GrowthSummary {
    pub channel_count: usize,
    pub total_subscribers: u64,
    pub mean_daily_subs: f64,
    pub median_daily_subs: f64,
    pub mean_daily_views: f64,
}

impl ResultTable {
    /// Builds the table in the order given. Averages keep full precision here;
    /// `to_html` and `to_csv` round them to 2 decimals.
    pub fn from_results(results: &[AnalysisResult]) -> Result<Self, PolarsError> {
        let rank: Vec<u32> = results.iter().map(|r| r.rank as u32).collect();
        let channel_name: Vec<&str> = results.iter().map(|r| r.channel.title.as_str()).collect();
        let channel_id: Vec<&str> = results.iter().map(|r| r.channel.id.as_str()).collect();
        let channel_link: Vec<String> = results.iter().map(|r| r.channel.url()).collect();
        let published_at: Vec<String> = results
            .iter()
            .map(|r| r.creation_date.format("%Y-%m-%d").to_string())
            .collect();
        let days: Vec<i64> = results.iter().map(|r| r.metrics.elapsed_days).collect();
        let subs: Vec<u64> = results.iter().map(|r| r.channel.subscriber_count).collect();
        let views: Vec<u64> = results.iter().map(|r| r.channel.view_count).collect();
        let videos: Vec<u64> = results.iter().map(|r| r.channel.video_count).collect();
        let daily_subs: Vec<f64> = results.iter().map(|r| r.metrics.avg_daily_subscriber_growth).collect();
        let daily_views: Vec<f64> = results.iter().map(|r| r.metrics.avg_daily_view_growth).collect();
        let growth_rate: Vec<f64> = results.iter().map(|r| r.metrics.growth_rate).collect();

        let df = DataFrame::new(vec![
            Series::new("rank", rank),
            Series::new("channel_name", channel_name),
            Series::new("channel_id", channel_id),
            Series::new("channel_link", channel_link),
            Series::new("published_at", published_at),
            Series::new("days_since_creation", days),
            Series::new("current_subs", subs),
            Series::new("current_views", views),
            Series::new("video_count", videos),
            Series::new("daily_subs", daily_subs),
            Series::new("daily_views", daily_views),
            Series::new("growth_rate", growth_rate),
        ])?;

        Ok(ResultTable { df })
    }

    pub fn data_frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn summary(&self) -> Result<GrowthSummary, PolarsError> {
        if self.df.height() == 0 {
            return Ok(GrowthSummary::default());
        }
        let daily_subs = self.df.column("daily_subs")?.f64()?;
        let daily_views = self.df.column("daily_views")?.f64()?;
        let subs = self.df.column("current_subs")?.u64()?;

        Ok(GrowthSummary {
            channel_count: self.df.height(),
            total_subscribers: subs.sum().unwrap_or_default(),
            mean_daily_subs: daily_subs.mean().unwrap_or_default(),
            median_daily_subs: daily_subs.median().unwrap_or_default(),
            mean_daily_views: daily_views.mean().unwrap_or_default(),
        })
    }

    /// Copy of the table with the averages rounded to 2 decimals, for printing.
    pub fn rounded_frame(&self) -> Result<DataFrame, PolarsError> {
        let mut df = self.df.clone();
        for name in AVERAGE_COLUMNS {
            let rounded: Vec<Option<f64>> = df.column(name)?.f64()?.into_iter().map(|v| v.map(round2)).collect();
            df.replace(name, Series::new(name, rounded))?;
        }
        Ok(df)
    }

    pub fn to_csv(&self) -> Result<String, PolarsError> {
        let mut df = self.rounded_frame()?;
        let mut buffer = Vec::new();
        CsvWriter::new(&mut buffer).finish(&mut df)?;
        String::from_utf8(buffer).map_err(|e| PolarsError::ComputeError(e.to_string().into()))
    }

    /// HTML table; the channel name links to the channel page and the id/link
    /// columns are folded into it.
    pub fn to_html(&self) -> Result<String, PolarsError> {
        let rank = self.df.column("rank")?.u32()?;
        let name = self.df.column("channel_name")?.str()?;
        let link = self.df.column("channel_link")?.str()?;
        let published = self.df.column("published_at")?.str()?;
        let days = self.df.column("days_since_creation")?.i64()?;
        let subs = self.df.column("current_subs")?.u64()?;
        let views = self.df.column("current_views")?.u64()?;
        let videos = self.df.column("video_count")?.u64()?;
        let daily_subs = self.df.column("daily_subs")?.f64()?;
        let daily_views = self.df.column("daily_views")?.f64()?;
        let growth = self.df.column("growth_rate")?.f64()?;

        let mut html = String::from("<table class=\"results\">\n<thead><tr>");
        for (column, header) in COLUMNS {
            if matches!(*column, "channel_id" | "channel_link") {
                continue;
            }
            let _ = write!(html, "<th>{}</th>", escape_html(header));
        }
        html.push_str("</tr></thead>\n<tbody>\n");

        for i in 0..self.df.height() {
            let _ = write!(
                html,
                "<tr><td>{}</td><td><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></td>\
                 <td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>\n",
                rank.get(i).unwrap_or_default(),
                escape_html(link.get(i).unwrap_or_default()),
                escape_html(name.get(i).unwrap_or_default()),
                escape_html(published.get(i).unwrap_or_default()),
                format_count(days.get(i).unwrap_or_default().max(0) as u64),
                format_count(subs.get(i).unwrap_or_default()),
                format_count(views.get(i).unwrap_or_default()),
                format_count(videos.get(i).unwrap_or_default()),
                daily_subs.get(i).unwrap_or_default(),
                daily_views.get(i).unwrap_or_default(),
                growth.get(i).unwrap_or_default(),
            );
        }
        html.push_str("</tbody>\n</table>\n");
        Ok(html)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `1234567` -> `1,234,567`
pub fn format_count(num: u64) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
