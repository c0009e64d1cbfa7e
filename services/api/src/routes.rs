use crate::infra::{parse_departments, AppState, DashboardHandle};
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use bolivia_stats::error::AppError;
use bolivia_stats::export::{combined_csv, text_report, workbook_bytes, ExportBundle, ExportFormat};
use bolivia_stats::sections::{section_view, MetricCard, Section, SectionError, SectionView};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/dashboard", get(dashboard_endpoint))
        .route("/api/v1/sections/:slug", get(section_endpoint))
        .route("/api/v1/export/csv", get(export_csv_endpoint))
        .route("/api/v1/export/workbook", get(export_workbook_endpoint))
        .route("/api/v1/export/report", get(export_report_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardResponse {
    pub(crate) title: &'static str,
    pub(crate) subtitle: &'static str,
    pub(crate) generated_on: NaiveDate,
    pub(crate) sections: Vec<DashboardSection>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardSection {
    pub(crate) section: Section,
    pub(crate) slug: &'static str,
    pub(crate) label: &'static str,
    pub(crate) metrics: Vec<MetricCard>,
}

pub(crate) async fn dashboard_endpoint(
    Extension(dashboard): Extension<DashboardHandle>,
) -> Json<DashboardResponse> {
    let sections = dashboard
        .sections
        .iter()
        .map(|&section| {
            let view = section_view(section, None, false);
            DashboardSection {
                section,
                slug: section.slug(),
                label: section.label(),
                metrics: view.metrics,
            }
        })
        .collect();

    Json(DashboardResponse {
        title: dashboard.title,
        subtitle: dashboard.subtitle,
        generated_on: Local::now().date_naive(),
        sections,
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct SectionQuery {
    #[serde(default)]
    pub(crate) departments: Option<String>,
    #[serde(default = "default_true")]
    pub(crate) include_tables: bool,
}

fn default_true() -> bool {
    true
}

pub(crate) async fn section_endpoint(
    Path(slug): Path<String>,
    Query(params): Query<SectionQuery>,
    Extension(dashboard): Extension<DashboardHandle>,
) -> Result<Json<SectionView>, AppError> {
    let section: Section = slug.parse()?;
    if !dashboard.is_enabled(section) {
        return Err(SectionError::Disabled { slug }.into());
    }

    let departments = params.departments.as_deref().map(parse_departments);
    let view = section_view(section, departments.as_deref(), params.include_tables);
    Ok(Json(view))
}

fn download(format: ExportFormat, date: NaiveDate, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name(date)),
            ),
        ],
        body,
    )
        .into_response()
}

pub(crate) async fn export_csv_endpoint(
    Extension(dashboard): Extension<DashboardHandle>,
) -> Result<Response, AppError> {
    let date = Local::now().date_naive();
    let bundle = ExportBundle::for_dashboard(&dashboard, date);
    let body = combined_csv(&bundle).map_err(AppError::from)?;
    Ok(download(ExportFormat::Csv, date, body.into_bytes()))
}

pub(crate) async fn export_workbook_endpoint(
    Extension(dashboard): Extension<DashboardHandle>,
) -> Result<Response, AppError> {
    let date = Local::now().date_naive();
    let bundle = ExportBundle::for_dashboard(&dashboard, date);
    let body = workbook_bytes(&bundle).map_err(AppError::from)?;
    Ok(download(ExportFormat::Workbook, date, body))
}

pub(crate) async fn export_report_endpoint(
    Extension(dashboard): Extension<DashboardHandle>,
) -> Result<Response, AppError> {
    let now = Local::now();
    let bundle = ExportBundle::for_dashboard(&dashboard, now.date_naive());
    let body = text_report(&bundle, &dashboard, now.naive_local());
    Ok(download(
        ExportFormat::Report,
        now.date_naive(),
        body.into_bytes(),
    ))
}
