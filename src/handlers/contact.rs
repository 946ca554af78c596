use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::form::FormView;
use crate::AppState;

/// Look up the draft's current phone number in the customer directory.
/// Called when the phone input loses focus.
pub async fn lookup_phone(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FormView>> {
    let customers = state.customers.clone();
    let view = state
        .sessions
        .update(id, |session| {
            let phone = session.draft().phone.clone();
            if !phone.is_empty() {
                let found = session.lookup_phone(&phone, customers.as_ref());
                tracing::debug!(form_id = %id, recognized = found.is_some(), "Phone lookup");
            }
            FormView::new(id, session)
        })
        .await?;
    Ok(Json(view))
}
