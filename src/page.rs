// src/page.rs

use std::fmt::Write as _;

use crate::analysis_request::{AnalysisForm, MAX_RESULT_COUNT, MIN_RESULT_COUNT};
use crate::chart::ChartMetric;
use crate::pipeline::AnalysisReport;
use crate::table::format_count;

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex}\
aside{width:280px;padding:16px;background:#f4f4f6;min-height:100vh}\
main{flex:1;padding:16px 24px}\
label{display:block;margin-top:12px;font-size:14px}\
input{width:100%;box-sizing:border-box;padding:4px}\
button{margin-top:16px;padding:6px 16px}\
table.results{border-collapse:collapse;font-size:13px}\
table.results th,table.results td{border:1px solid #ccc;padding:4px 8px;text-align:right}\
table.results td:nth-child(2){text-align:left}\
.notice{padding:8px 12px;border-radius:4px;margin:12px 0}\
.success{background:#e6f4ea}.warning{background:#fff4e5}.error{background:#fdecea}\
.chart{margin:16px 0}";

/// What the main panel shows under the form.
pub enum PageBody<'a> {
    Empty,
    Report {
        report: &'a AnalysisReport,
        table_html: &'a str,
        charts: &'a [(ChartMetric, String)],
    },
    NoChannels,
    Warning(&'a str),
    Error(&'a str),
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_page(form: &AnalysisForm, body: PageBody<'_>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">\
         <title>YouTube Channel Growth Analysis</title><style>{STYLE}</style></head>\n<body>\n"
    );
    html.push_str(&render_form(form));
    html.push_str("<main>\n<h1>YouTube Channel Growth Analysis</h1>\n");

    match body {
        PageBody::Empty => {}
        PageBody::Report { report, table_html, charts } => {
            html.push_str(&render_report(report, table_html, charts));
        }
        PageBody::NoChannels => notice(&mut html, "error", "No channels were found."),
        PageBody::Warning(message) => notice(&mut html, "warning", message),
        PageBody::Error(message) => notice(&mut html, "error", message),
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_form(form: &AnalysisForm) -> String {
    format!(
        "<aside>\n<h2>Analysis Settings</h2>\n<form method=\"get\" action=\"/analyze\">\n\
         <label>Search term<input type=\"text\" name=\"search_term\" value=\"{}\"></label>\n\
         <label>Channels to fetch<input type=\"number\" name=\"result_count\" min=\"{}\" max=\"{}\" value=\"{}\"></label>\n\
         <h3>Channel creation date range</h3>\n\
         <label>From<input type=\"date\" name=\"created_from\" value=\"{}\"></label>\n\
         <label>To<input type=\"date\" name=\"created_to\" value=\"{}\"></label>\n\
         <button type=\"submit\">Analyze</button>\n</form>\n</aside>\n",
        escape_html(&form.search_term),
        MIN_RESULT_COUNT,
        MAX_RESULT_COUNT,
        escape_html(&form.result_count),
        escape_html(&form.created_from),
        escape_html(&form.created_to),
    )
}

fn render_report(report: &AnalysisReport, table_html: &str, charts: &[(ChartMetric, String)]) -> String {
    let mut html = String::new();
    notice(
        &mut html,
        "success",
        &format!(
            "Found {} channels ({} returned by the search).",
            report.results.len(),
            report.fetched_count
        ),
    );

    let summary = &report.summary;
    let _ = write!(
        html,
        "<p>Total subscribers: {} &middot; Mean daily subscribers: {:.2} &middot; \
         Median daily subscribers: {:.2} &middot; Mean daily views: {:.2}</p>\n",
        format_count(summary.total_subscribers),
        summary.mean_daily_subs,
        summary.median_daily_subs,
        summary.mean_daily_views,
    );

    html.push_str("<h2>Channel Growth Ranking</h2>\n");
    html.push_str(table_html);

    html.push_str("<h2>Growth Comparison</h2>\n");
    for (metric, svg) in charts {
        let _ = write!(html, "<div class=\"chart\" id=\"chart-{}\">{}</div>\n", metric.file_stem(), svg);
    }

    html.push_str("<h2>Fastest Growing Channels</h2>\n<ol>\n");
    for result in report.top_growth() {
        let _ = write!(
            html,
            "<li>&#128200; <a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>: growth rate {:.2}% \
             (created {}, {} days ago)</li>\n",
            escape_html(&result.channel.url()),
            escape_html(&result.channel.title),
            result.metrics.growth_rate,
            result.creation_date.format("%Y-%m-%d"),
            result.metrics.elapsed_days,
        );
    }
    html.push_str("</ol>\n");
    html
}

fn notice(html: &mut String, class: &str, message: &str) {
    let _ = write!(html, "<div class=\"notice {}\">{}</div>\n", class, escape_html(message));
}
