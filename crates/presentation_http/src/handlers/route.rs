//! Driving route handler

use application::AuthenticatedCaller;
use axum::{Extension, Json, extract::State};
use domain::{GeoPoint, RouteResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    error::{ApiError, RouteDebug},
    middleware::ApiJson,
    state::AppState,
};

/// Body of `POST /v1/route`
///
/// The points are kept as raw JSON so they can be echoed back verbatim when
/// the provider fails.
#[derive(Debug, Default, Deserialize)]
pub struct RouteRequest {
    #[serde(default)]
    pub from: Value,
    #[serde(default)]
    pub to: Value,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub route: RouteResult,
}

/// Compute a driving route between two points
#[instrument(skip(state, caller, request))]
pub async fn route(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedCaller>,
    ApiJson(request): ApiJson<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let (Some(from), Some(to)) = (parse_point(&request.from), parse_point(&request.to)) else {
        return Err(ApiError::validation("Invalid coordinates"));
    };
    debug!(
        from_lat = from.lat(),
        from_lng = from.lng(),
        to_lat = to.lat(),
        to_lng = to.lng(),
        "Route requested"
    );

    let route = state
        .route_planning
        .route(&caller, &from, &to)
        .await
        .map_err(|e| {
            ApiError::from(e).with_route_debug(RouteDebug {
                from: request.from.clone(),
                to: request.to.clone(),
            })
        })?;

    Ok(Json(RouteResponse { ok: true, route }))
}

/// Read `{lat, lng}` where each component is a JSON number or numeric string
fn parse_point(value: &Value) -> Option<GeoPoint> {
    let lat = coordinate(value.get("lat")?)?;
    let lng = coordinate(value.get("lng")?)?;
    GeoPoint::new(lat, lng).ok()
}

fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
