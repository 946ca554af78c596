use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{contact, form, submit, trip};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Form session lifecycle and field edits
    let form_routes = Router::new()
        .route("/", post(form::create_form))
        .route("/{id}", get(form::get_form))
        .route("/{id}", delete(form::delete_form))
        .route("/{id}/reset", post(form::reset_form))
        .route("/{id}/fields", patch(form::update_field))
        // Stops between pickup and dropoff
        .route("/{id}/stops", post(form::add_stop))
        .route("/{id}/stops/{index}", put(form::update_stop))
        .route("/{id}/stops/{index}", delete(form::remove_stop))
        // Side effects
        .route("/{id}/phone-lookup", post(contact::lookup_phone))
        .route("/{id}/locations/{role}", put(trip::select_location))
        .route("/{id}/submit", post(submit::submit_form));

    let public_routes = Router::new()
        .route("/health", get(form::health))
        .route("/places/filter", get(trip::place_filter));

    // Combine all routes
    Router::new()
        .nest("/api/forms", form_routes)
        .nest("/api", public_routes)
        .with_state(state)
}
