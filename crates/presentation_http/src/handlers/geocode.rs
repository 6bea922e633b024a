//! Address search handler

use application::AuthenticatedCaller;
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use domain::GeocodeCandidate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Query string of `GET /v1/geocode`
#[derive(Debug, Default, Deserialize)]
pub struct GeocodeQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub ok: bool,
    pub items: Vec<GeocodeCandidate>,
}

/// Resolve free text to address candidates
#[instrument(skip(state, caller, query), fields(query_len = query.q.len()))]
pub async fn geocode(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedCaller>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResponse>, ApiError> {
    let items = state.route_planning.geocode(&caller, &query.q).await?;

    Ok(Json(GeocodeResponse { ok: true, items }))
}
