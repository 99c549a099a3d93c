//! API 路由

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use salesgen_config::{ApiConfig, IndexFormat, ResponseStyle};
use tracing::info;

use super::responses::{EndpointIndex, RecordView, SalesEnvelope, SummaryEnvelope, index_html};
use crate::application::SalesService;

/// 路由共享状态，进程启动时构建
#[derive(Clone)]
pub struct AppState {
    service: Arc<SalesService>,
    api: ApiConfig,
}

impl AppState {
    pub fn new(service: Arc<SalesService>, api: ApiConfig) -> Self {
        Self { service, api }
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/sales", get(list_sales))
        .route("/api/sales/summary", get(sales_summary))
        .route("/api/sales/monthly", get(monthly_sales))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Response {
    match state.api.index {
        IndexFormat::Html => Html(index_html()).into_response(),
        IndexFormat::Json => Json(EndpointIndex::new()).into_response(),
    }
}

async fn list_sales(State(state): State<AppState>) -> Response {
    let records = state.service.records();
    info!(count = records.len(), "Serving sales records");

    let data: Vec<RecordView<'_>> = records
        .iter()
        .map(|record| RecordView::new(record, state.api.price_field))
        .collect();

    match state.api.style {
        ResponseStyle::Envelope => Json(SalesEnvelope::success(data)).into_response(),
        ResponseStyle::Bare => Json(data).into_response(),
    }
}

async fn sales_summary(State(state): State<AppState>) -> Response {
    let summary = state.service.summary();
    info!(
        transactions = summary.total_transactions,
        total = %summary.total_sales_amount,
        "Serving sales summary"
    );

    match state.api.style {
        ResponseStyle::Envelope => Json(SummaryEnvelope::success(summary)).into_response(),
        ResponseStyle::Bare => Json(summary).into_response(),
    }
}

async fn monthly_sales(State(state): State<AppState>) -> Response {
    let months = state.service.monthly();
    info!(months = months.len(), "Serving monthly rollup");

    Json(months).into_response()
}
