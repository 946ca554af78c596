use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{Draft, Location, TripInfo};
use crate::error::AppResult;
use crate::form::validation::FieldErrors;
use crate::form::{ContactPanel, FieldUpdate, FormSession, SubmitStatus};
use crate::AppState;

/// Everything the page needs to render one form session
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub id: Uuid,
    pub draft: Draft,
    pub errors: FieldErrors,
    pub trip_info: TripInfo,
    pub contact_panel: ContactPanel,
    pub submit_status: Option<SubmitStatus>,
    pub submitting: bool,
}

impl FormView {
    pub fn new(id: Uuid, session: &FormSession) -> Self {
        Self {
            id,
            draft: session.draft().clone(),
            errors: session.errors().clone(),
            trip_info: session.trip_info().clone(),
            contact_panel: session.contact_panel(),
            submit_status: session.submit_status(),
            submitting: session.is_submitting(),
        }
    }
}

/// Start a new form session
pub async fn create_form(State(state): State<AppState>) -> AppResult<Json<FormView>> {
    let (id, session) = state.sessions.create().await;
    tracing::debug!(form_id = %id, "Form session created");
    Ok(Json(FormView::new(id, &session)))
}

pub async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FormView>> {
    let session = state.sessions.get(id).await?;
    Ok(Json(FormView::new(id, &session)))
}

/// Discard a form session
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    state.sessions.remove(id).await?;
    tracing::debug!(form_id = %id, "Form session discarded");
    Ok(Json(serde_json::json!({ "message": "Form discarded" })))
}

/// Put the form back to its initial state
pub async fn reset_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FormView>> {
    let view = state
        .sessions
        .update(id, |session| {
            session.reset();
            FormView::new(id, session)
        })
        .await?;
    Ok(Json(view))
}

pub async fn update_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<FieldUpdate>,
) -> AppResult<Json<FormView>> {
    let view = state
        .sessions
        .update(id, |session| {
            session.update_field(update);
            FormView::new(id, session)
        })
        .await?;
    Ok(Json(view))
}

// ============ Stops ============

pub async fn add_stop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FormView>> {
    let view = state
        .sessions
        .update(id, |session| {
            session.add_stop();
            FormView::new(id, session)
        })
        .await?;
    Ok(Json(view))
}

pub async fn update_stop(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(location): Json<Location>,
) -> AppResult<Json<FormView>> {
    let view = state
        .sessions
        .update(id, |session| {
            session
                .update_stop(index, location)
                .map(|_| FormView::new(id, session))
        })
        .await??;
    Ok(Json(view))
}

pub async fn remove_stop(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> AppResult<Json<FormView>> {
    let view = state
        .sessions
        .update(id, |session| {
            session
                .remove_stop(index)
                .map(|_| FormView::new(id, session))
        })
        .await??;
    Ok(Json(view))
}

/// Liveness check
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
