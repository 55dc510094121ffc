// src/web.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::analysis_request::AnalysisForm;
use crate::chart;
use crate::error::{AnalysisError, ValidationError};
use crate::page::{render_page, PageBody};
use crate::pipeline::ChannelGrowthAnalyzer;

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct DashboardState {
    pub analyzer: Arc<ChannelGrowthAnalyzer>,
    pub clock: Clock,
}

impl DashboardState {
    pub fn new(analyzer: ChannelGrowthAnalyzer) -> Self {
        DashboardState {
            analyzer: Arc::new(analyzer),
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(analyzer: ChannelGrowthAnalyzer, clock: Clock) -> Self {
        DashboardState {
            analyzer: Arc::new(analyzer),
            clock,
        }
    }

    fn default_form(&self) -> AnalysisForm {
        let today = (self.clock)().with_timezone(&self.analyzer.timezone()).date_naive();
        AnalysisForm::with_defaults(today)
    }
}

/// `GET /` shows the form and `GET /analyze` runs one analysis per submission.
/// Handlers share only the immutable analyzer.
pub fn create_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analyze", get(analyze))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: DashboardState, bind_addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(%bind_addr, "dashboard listening");
    axum::serve(listener, create_router(state)).await
}

async fn index(State(state): State<DashboardState>) -> Html<String> {
    Html(render_page(&state.default_form(), PageBody::Empty))
}

async fn health() -> &'static str {
    "ok"
}

async fn analyze(
    State(state): State<DashboardState>,
    Query(form): Query<AnalysisForm>,
) -> (StatusCode, Html<String>) {
    let now = (state.clock)();

    let report = match state.analyzer.analyze_form(&form, now).await {
        Ok(report) => report,
        Err(AnalysisError::Validation(ValidationError::EmptySearchTerm)) => {
            let page = render_page(&form, PageBody::Warning("Please enter a search term."));
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(page));
        }
        Err(err) => {
            warn!(error = %err, "analysis failed");
            let status = match err {
                AnalysisError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AnalysisError::Api(_) => StatusCode::BAD_GATEWAY,
                AnalysisError::Table(_) | AnalysisError::Chart(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let page = render_page(&form, PageBody::Error(&err.to_string()));
            return (status, Html(page));
        }
    };

    if report.results.is_empty() {
        return (StatusCode::OK, Html(render_page(&form, PageBody::NoChannels)));
    }

    let rendered = report
        .table
        .to_html()
        .map_err(AnalysisError::from)
        .and_then(|table_html| chart::render_all(&report.results).map(|charts| (table_html, charts)));

    match rendered {
        Ok((table_html, charts)) => {
            let body = PageBody::Report {
                report: &report,
                table_html: &table_html,
                charts: &charts,
            };
            (StatusCode::OK, Html(render_page(&form, body)))
        }
        Err(err) => {
            warn!(error = %err, "rendering failed");
            let page = render_page(&form, PageBody::Error(&err.to_string()));
            (StatusCode::INTERNAL_SERVER_ERROR, Html(page))
        }
    }
}
