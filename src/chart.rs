// src/chart.rs

use plotters::prelude::*;
use std::fmt::Display;

use crate::error::AnalysisError;
use crate::growth::AnalysisResult;

pub const CHART_WIDTH: u32 = 960;
pub const CHART_HEIGHT: u32 = 420;
const MAX_LABEL_CHARS: usize = 16;

/// A per-channel value plotted as one bar chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartMetric {
    Subscribers,
    GrowthRate,
    ElapsedDays,
    DailyViews,
}

impl ChartMetric {
    pub const ALL: [ChartMetric; 4] = [
        ChartMetric::Subscribers,
        ChartMetric::GrowthRate,
        ChartMetric::ElapsedDays,
        ChartMetric::DailyViews,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartMetric::Subscribers => "Subscribers by Channel",
            ChartMetric::GrowthRate => "Growth Rate by Channel (per day)",
            ChartMetric::ElapsedDays => "Days Since Channel Creation",
            ChartMetric::DailyViews => "Average Daily Views by Channel",
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartMetric::Subscribers => "subscribers",
            ChartMetric::GrowthRate => "growth_rate",
            ChartMetric::ElapsedDays => "elapsed_days",
            ChartMetric::DailyViews => "daily_views",
        }
    }

    fn color(&self) -> RGBColor {
        match self {
            ChartMetric::Subscribers => RGBColor(31, 119, 180),
            ChartMetric::GrowthRate => RGBColor(255, 127, 14),
            ChartMetric::ElapsedDays => RGBColor(44, 160, 44),
            ChartMetric::DailyViews => RGBColor(148, 103, 189),
        }
    }

    pub fn value(&self, result: &AnalysisResult) -> f64 {
        match self {
            ChartMetric::Subscribers => result.channel.subscriber_count as f64,
            ChartMetric::GrowthRate => result.metrics.growth_rate,
            ChartMetric::ElapsedDays => result.metrics.elapsed_days as f64,
            ChartMetric::DailyViews => result.metrics.avg_daily_view_growth,
        }
    }
}

/// Renders one bar per channel, in the order given, as an SVG document.
pub fn render_svg(metric: ChartMetric, results: &[AnalysisResult]) -> Result<String, AnalysisError> {
    let labels: Vec<String> = results.iter().map(|r| short_label(&r.channel.title)).collect();
    let values: Vec<f64> = results.iter().map(|r| metric.value(r)).collect();
    let y_max = values.iter().cloned().fold(0.0_f64, f64::max).max(1.0) * 1.1;
    let bars = results.len().max(1);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(metric.title(), ("sans-serif", 20))
            .margin(12)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d((0..bars).into_segmented(), 0.0..y_max)
            .map_err(chart_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars)
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(metric.color().filled())
                    .margin(6)
                    .data(values.iter().enumerate().map(|(i, v)| (i, *v))),
            )
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
    }
    Ok(svg)
}

/// All comparison charts, paired with their metric.
pub fn render_all(results: &[AnalysisResult]) -> Result<Vec<(ChartMetric, String)>, AnalysisError> {
    ChartMetric::ALL
        .iter()
        .map(|metric| render_svg(*metric, results).map(|svg| (*metric, svg)))
        .collect()
}

fn short_label(title: &str) -> String {
    if title.chars().count() <= MAX_LABEL_CHARS {
        title.to_string()
    } else {
        let mut label: String = title.chars().take(MAX_LABEL_CHARS - 1).collect();
        label.push('…');
        label
    }
}

fn chart_error<E: Display>(error: E) -> AnalysisError {
    AnalysisError::Chart(error.to_string())
}
