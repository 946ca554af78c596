use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::entities::NormalizedBooking;
use crate::error::{AppError, AppResult};
use crate::form::{FormError, Validator};
use crate::AppState;

const SUBMISSION_FAILED: &str = "Something went wrong. Please try again.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub booking: NormalizedBooking,
    pub response: serde_json::Value,
}

/// Validate the draft and send it to the booking endpoint.
///
/// The draft is kept whatever the outcome so the user can fix and resubmit.
pub async fn submit_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmitResponse>> {
    let validator = Validator::new(Utc::now().date_naive());

    let booking = state
        .sessions
        .update(id, |session| -> AppResult<NormalizedBooking> {
            if session.is_submitting() {
                return Err(AppError::from(FormError::SubmitInProgress));
            }
            match validator.validate(session.draft()) {
                Ok(booking) => {
                    session.begin_submit()?;
                    Ok(booking)
                }
                Err(errors) => {
                    session.set_errors(errors.clone());
                    Err(AppError::Validation(errors))
                }
            }
        })
        .await?
        .inspect_err(|e| {
            if let AppError::Validation(errors) = e {
                tracing::debug!(form_id = %id, fields = errors.len(), "Submit rejected by validation");
            }
        })?;

    let outcome = state.submitter.submit(&booking).await;
    let succeeded = outcome.is_ok();

    if let Err(e) = state
        .sessions
        .update(id, |session| session.finish_submit(succeeded))
        .await
    {
        tracing::debug!(form_id = %id, error = %e, "Form closed during submission");
    }

    match outcome {
        Ok(response) => {
            tracing::info!(form_id = %id, passengers = booking.passengers, "Booking submitted");
            Ok(Json(SubmitResponse { booking, response }))
        }
        Err(e) => {
            tracing::warn!(form_id = %id, error = %e, "Booking submission failed");
            Err(AppError::Upstream(SUBMISSION_FAILED.to_string()))
        }
    }
}
