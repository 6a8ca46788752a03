use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::location::{LoadState, TimezoneRecord};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /api/zones/{*identifier} ────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ZoneResponse {
    pub identifier: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub formatted_coords: String,
}

impl From<&TimezoneRecord> for ZoneResponse {
    fn from(r: &TimezoneRecord) -> Self {
        Self {
            identifier: r.identifier.clone(),
            latitude: r.latitude,
            longitude: r.longitude,
            country_code: r.country_code.clone(),
            comment: r.comment.clone(),
            formatted_coords: r.coordinate().to_string(),
        }
    }
}

pub(super) async fn zone(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Json<ZoneResponse>, ApiError> {
    let start = Instant::now();

    let record = state.resolver.record(&identifier).ok_or_else(|| {
        api_error(StatusCode::NOT_FOUND, format!("Unknown timezone: '{}'", identifier))
    })?;

    tracing::debug!(
        identifier = %identifier,
        country = %record.country_code,
        elapsed_us = start.elapsed().as_micros() as u64,
        "GET /api/zones"
    );

    Ok(Json(ZoneResponse::from(record)))
}

// ─── GET /api/zones ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ZonesQuery {
    pub country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CountryZonesResponse {
    pub country_code: String,
    pub identifiers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AllZonesResponse {
    pub count: usize,
    pub zones: Vec<ZoneResponse>,
}

pub(super) async fn zone_list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ZonesQuery>,
) -> Result<Response, ApiError> {
    let table = state.resolver.table().ok_or_else(|| {
        api_error(StatusCode::SERVICE_UNAVAILABLE, "Zone table failed to load")
    })?;

    match params.country.as_deref().map(str::trim) {
        Some(cc) if !cc.is_empty() => {
            let country_code = cc.to_ascii_uppercase();
            let identifiers = table
                .identifiers_for_country(&country_code)
                .into_iter()
                .map(str::to_string)
                .collect();
            Ok(Json(CountryZonesResponse { country_code, identifiers }).into_response())
        }
        _ => {
            let mut zones: Vec<ZoneResponse> = table.iter().map(ZoneResponse::from).collect();
            zones.sort_by(|a, b| a.identifier.cmp(&b.identifier));
            Ok(Json(AllZonesResponse { count: zones.len(), zones }).into_response())
        }
    }
}

// ─── GET /api/health ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: LoadState,
    pub zones: usize,
    pub source: String,
}

pub(super) async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let zones = state.resolver.table().map_or(0, |t| t.len());
    Json(HealthResponse {
        status: state.resolver.state().unwrap_or(LoadState::Failed),
        zones,
        source: state.resolver.source().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{DatasetSource, TimezoneResolver};

    const SAMPLE: &str = "\
DE\t+5230+01322\tEurope/Berlin\tmost of Germany
DE\t+4742+00841\tEurope/Busingen\tBusingen
US\t+404251-0740023\tAmerica/New_York\tEastern (most areas)
";

    fn test_state(source: DatasetSource) -> Arc<AppState> {
        Arc::new(AppState {
            resolver: TimezoneResolver::with_source(source),
        })
    }

    #[tokio::test]
    async fn test_zone_found() {
        let state = test_state(DatasetSource::Inline(SAMPLE.into()));
        let Json(resp) = zone(State(state), Path("Europe/Berlin".into())).await.unwrap();
        assert_eq!(resp.country_code, "DE");
        assert_eq!(resp.comment.as_deref(), Some("most of Germany"));
        assert!((resp.latitude - 52.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_zone_not_found() {
        let state = test_state(DatasetSource::Inline(SAMPLE.into()));
        let err = zone(State(state), Path("Etc/UTC".into())).await.unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_zone_list_by_country() {
        let state = test_state(DatasetSource::Inline(SAMPLE.into()));
        let resp = zone_list(State(state), Query(ZonesQuery { country: Some("de".into()) }))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["country_code"], "DE");
        assert_eq!(
            json["identifiers"],
            serde_json::json!(["Europe/Berlin", "Europe/Busingen"])
        );
    }

    #[tokio::test]
    async fn test_zone_list_failed_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = test_state(DatasetSource::File(dir.path().join("zone.tab")));
        let err = zone_list(State(state), Query(ZonesQuery { country: None }))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health() {
        let state = test_state(DatasetSource::Inline(SAMPLE.into()));
        let Json(resp) = health(State(state)).await;
        assert_eq!(resp.status, LoadState::Loaded);
        assert_eq!(resp.zones, 3);
        assert_eq!(resp.source, "inline table");
    }
}
