use super::{ApiError, AppState};
use crate::libs::csv_io::{self, SkippedRow, CSV_CONTENT_TYPE, EXPORT_FILE_NAME};
use crate::libs::data_storage::APP_VERSION;
use crate::libs::engagement::{EngagementFilter, EngagementReport};
use crate::libs::error::NotFoundError;
use crate::libs::record::{parse_date, StoredRecord};
use crate::libs::source::RecordSource;
use axum::body::Bytes;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{FromRequest, Multipart, Path, Query, Request, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Query string shared by `/engagement` and `/engagement/export`.
///
/// Empty values (`?user_type=`) are treated as absent.
#[derive(Debug, Default, Deserialize)]
pub struct EngagementQuery {
    pub user_type: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl EngagementQuery {
    pub fn into_filter(self) -> Result<EngagementFilter, ApiError> {
        Ok(EngagementFilter::new(
            self.user_type,
            optional_date("from_date", self.from_date)?,
            optional_date("to_date", self.to_date)?,
        ))
    }
}

fn optional_date(name: &str, value: Option<String>) -> Result<Option<NaiveDate>, ApiError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date(raw)
            .map(Some)
            .map_err(|e| ApiError::BadRequest(format!("{}: {}", name, e))),
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub imported_count: usize,
    pub skipped_rows: Vec<SkippedRow>,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: APP_VERSION,
    })
}

/// GET /engagement
pub async fn get_engagement(
    State(state): State<AppState>,
    query: Result<Query<EngagementQuery>, QueryRejection>,
) -> Result<Json<EngagementReport>, ApiError> {
    let Query(params) = query?;
    let filter = params.into_filter()?;
    debug!(?filter, "Engagement query");

    let report = state.with_logs(move |logs| logs.query(&filter)).await?;
    Ok(Json(report))
}

/// GET /engagement/export
pub async fn export_engagement(
    State(state): State<AppState>,
    query: Result<Query<EngagementQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = query?;
    let filter = params.into_filter()?;
    let report = state.with_logs(move |logs| logs.query(&filter)).await?;
    let body = csv_io::export_to_string(&report.details)?;

    Ok((
        [
            (CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename={}", EXPORT_FILE_NAME)),
        ],
        body,
    ))
}

/// POST /engagement/import
///
/// Accepts either a raw CSV body or a `multipart/form-data` upload whose
/// `file` field carries the CSV.
pub async fn import_engagement(State(state): State<AppState>, request: Request) -> Result<Json<ImportResponse>, ApiError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    let body = if is_multipart {
        read_multipart_file(Multipart::from_request(request, &state).await?).await?
    } else {
        Bytes::from_request(request, &state).await?
    };

    let parsed = csv_io::parse_import(body.as_ref())?;
    let report = state.with_logs(move |logs| logs.import(parsed)).await?;

    Ok(Json(ImportResponse {
        message: report.message(),
        imported_count: report.imported_count,
        skipped_rows: report.skipped_rows,
    }))
}

async fn read_multipart_file(mut multipart: Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            return Ok(field.bytes().await?);
        }
    }
    Err(ApiError::BadRequest("multipart upload must contain a 'file' field".to_string()))
}

/// GET /engagement/logs/:id
pub async fn get_log(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<StoredRecord>, ApiError> {
    let Path(id) = path?;
    let stored = state.with_logs(move |logs| logs.get(id)).await?.ok_or(NotFoundError(id))?;
    Ok(Json(stored))
}

/// Any unrouted path.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::Rejected(StatusCode::NOT_FOUND, format!("no route for {}", uri.path()))
}
