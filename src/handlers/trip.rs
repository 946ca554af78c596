use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::{Location, LocationRole, LocationType};
use crate::error::AppResult;
use crate::form::TripRequest;
use crate::handlers::form::FormView;
use crate::services::PlaceFilter;
use crate::AppState;

/// Record a place picked for pickup or dropoff.
///
/// When both ends are known a distance estimate is started in the background;
/// its result shows up in `tripInfo` on a later read.
pub async fn select_location(
    State(state): State<AppState>,
    Path((id, role)): Path<(Uuid, LocationRole)>,
    Json(location): Json<Location>,
) -> AppResult<Json<FormView>> {
    let (request, view) = state
        .sessions
        .update(id, |session| {
            let request = session.record_location_selection(role, location);
            (request, FormView::new(id, session))
        })
        .await?;

    if let Some(request) = request {
        spawn_trip_estimate(state, id, request);
    }

    Ok(Json(view))
}

/// Fire-and-forget distance lookup. Failures leave the trip summary empty.
fn spawn_trip_estimate(state: AppState, id: Uuid, request: TripRequest) {
    tokio::spawn(async move {
        let info = match state.distance.estimate(&request.pickup, &request.dropoff).await {
            Ok(info) => info,
            Err(e) => {
                tracing::debug!(form_id = %id, error = %e, "Trip estimate unavailable");
                return;
            }
        };

        match state
            .sessions
            .update(id, |session| session.apply_trip_info(request.token, info))
            .await
        {
            Ok(true) => tracing::debug!(form_id = %id, "Trip estimate updated"),
            Ok(false) => tracing::debug!(form_id = %id, token = request.token, "Stale trip estimate dropped"),
            Err(_) => tracing::debug!(form_id = %id, "Form closed before trip estimate arrived"),
        }
    });
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceFilterQuery {
    pub location_type: LocationType,
}

/// Autocomplete options for a location type
pub async fn place_filter(
    State(state): State<AppState>,
    Query(query): Query<PlaceFilterQuery>,
) -> Json<PlaceFilter> {
    Json(PlaceFilter::for_location_type(
        query.location_type,
        &state.config.places_country,
    ))
}
