use axum::extract::{Path, RawQuery, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::ephemeris::{nearest_to, parse_epoch, range_report, slice_records, StateVector, Window};
use crate::location::{ground_fix, GroundFix};
use crate::web::server::AppState;

/// Index window over the stored records, read leniently off the query
/// string: duplicated keys keep their first value, unreadable strings
/// count as absent.
#[derive(Debug, Default, ToSchema)]
pub struct ListQuery {
    /// Start index of the returned window.
    pub limit: Option<String>,
    /// End index of the returned window.
    pub offset: Option<String>,
}

impl ListQuery {
    fn from_raw(raw: Option<&str>) -> Self {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(raw.unwrap_or("")).unwrap_or_default();
        let mut query = ListQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "limit" if query.limit.is_none() => query.limit = Some(value),
                "offset" if query.offset.is_none() => query.offset = Some(value),
                _ => {}
            }
        }
        query
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SpeedResponse {
    #[serde(rename = "Instantaneous Speed (km/s)")]
    pub speed_km_s: f64,
}

/// The record nearest to now, merged with its derived quantities.
#[derive(Debug, Serialize, ToSchema)]
pub struct NowResponse {
    #[serde(flatten)]
    pub record: StateVector,
    #[serde(rename = "Instantaneous Speed (km/s)")]
    pub speed_km_s: f64,
    #[serde(flatten)]
    pub location: GroundFix,
}

fn record_count(state: &AppState) -> usize {
    match state.store.count() {
        Ok(count) => count,
        Err(e) => {
            log::error!("record count unavailable: {}", e);
            0
        }
    }
}

#[utoipa::path(
    get,
    path = "/epochs",
    params(
        ("limit" = Option<String>, Query, description = "Start index of the returned window"),
        ("offset" = Option<String>, Query, description = "End index of the returned window")
    ),
    responses(
        (status = 200, description = "State vectors in the requested window", body = Vec<StateVector>)
    ),
    tag = "epochs"
)]
pub async fn list_epochs(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Json<Vec<StateVector>> {
    let query = ListQuery::from_raw(raw.as_deref());
    let count = record_count(&state);
    let window = Window::clamp(query.limit.as_deref(), query.offset.as_deref(), count);
    Json(slice_records(state.store.as_ref(), &window))
}

#[utoipa::path(
    get,
    path = "/epochs/{epoch}",
    params(
        ("epoch" = String, Path, description = "Timestamp in year-dayofyear form, e.g. 2025-032T12:00:00.000Z")
    ),
    responses(
        (status = 200, description = "The record nearest the requested epoch", body = StateVector)
    ),
    tag = "epochs"
)]
pub async fn epoch_detail(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> Json<StateVector> {
    let resolved = nearest_to(state.store.as_ref(), parse_epoch(&epoch));
    if let Some(degradation) = resolved.degraded {
        log::warn!("resolution for {:?} degraded: {}", epoch, degradation);
    }
    Json(resolved.record)
}

#[utoipa::path(
    get,
    path = "/epochs/{epoch}/speed",
    params(
        ("epoch" = String, Path, description = "Timestamp in year-dayofyear form")
    ),
    responses(
        (status = 200, description = "Instantaneous speed at the nearest record", body = SpeedResponse)
    ),
    tag = "epochs"
)]
pub async fn epoch_speed(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> Json<SpeedResponse> {
    let resolved = nearest_to(state.store.as_ref(), parse_epoch(&epoch));
    if let Some(degradation) = resolved.degraded {
        log::warn!("resolution for {:?} degraded: {}", epoch, degradation);
    }
    Json(SpeedResponse {
        speed_km_s: resolved.record.speed_km_s(),
    })
}

#[utoipa::path(
    get,
    path = "/epochs/{epoch}/location",
    params(
        ("epoch" = String, Path, description = "Timestamp in year-dayofyear form")
    ),
    responses(
        (status = 200, description = "Ground point under the nearest record", body = GroundFix)
    ),
    tag = "epochs"
)]
pub async fn epoch_location(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> Json<GroundFix> {
    let resolved = nearest_to(state.store.as_ref(), parse_epoch(&epoch));
    if let Some(degradation) = resolved.degraded {
        log::warn!("resolution for {:?} degraded: {}", epoch, degradation);
    }
    Json(ground_fix(&resolved.record, state.geocoder.as_ref()).await)
}

#[utoipa::path(
    get,
    path = "/epochs/range",
    responses(
        (status = 200, description = "Time span covered by the stored data", body = String, content_type = "text/plain")
    ),
    tag = "epochs"
)]
pub async fn list_range(State(state): State<AppState>) -> String {
    let mut report = range_report(state.store.as_ref());
    report.push('\n');
    report
}

#[utoipa::path(
    get,
    path = "/now",
    responses(
        (status = 200, description = "The record nearest the current time, with speed and location", body = NowResponse)
    ),
    tag = "status"
)]
pub async fn now(State(state): State<AppState>) -> Json<NowResponse> {
    let current = Utc::now().timestamp() as f64;
    let resolved = nearest_to(state.store.as_ref(), current);
    if let Some(degradation) = resolved.degraded {
        log::warn!("current-epoch resolution degraded: {}", degradation);
    }

    let record = resolved.record;
    let location = ground_fix(&record, state.geocoder.as_ref()).await;
    let speed_km_s = record.speed_km_s();

    Json(NowResponse {
        record,
        speed_km_s,
        location,
    })
}

#[utoipa::path(
    get,
    path = "/debug",
    responses(
        (status = 200, description = "Store length", body = String, content_type = "text/plain")
    ),
    tag = "status"
)]
pub async fn debug_info(State(state): State<AppState>) -> String {
    format!("store length: {}\n", record_count(&state))
}
