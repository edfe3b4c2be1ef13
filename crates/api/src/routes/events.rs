//! Route definitions for events.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{delete_rejected, events};
use crate::state::AppState;

/// Event routes mounted at `/events`.
///
/// ```text
/// GET  /create        -> create_form
/// POST /create        -> create
/// GET  /{id}          -> detail
/// GET  /{id}/update   -> update_form
/// POST /{id}/update   -> update
/// POST /{id}/delete   -> delete (other methods -> delete_rejected)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", get(events::create_form).post(events::create))
        .route("/{id}", get(events::detail))
        .route(
            "/{id}/update",
            get(events::update_form).post(events::update),
        )
        .route(
            "/{id}/delete",
            post(events::delete).fallback(delete_rejected),
        )
}
