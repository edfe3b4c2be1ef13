//! Route definitions for participants.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{delete_rejected, participants};
use crate::state::AppState;

/// Participant routes mounted at `/participants`.
///
/// ```text
/// GET  /create        -> create_form
/// POST /create        -> create
/// GET  /{id}/update   -> update_form
/// POST /{id}/update   -> update
/// POST /{id}/delete   -> delete (other methods -> delete_rejected)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/create",
            get(participants::create_form).post(participants::create),
        )
        .route(
            "/{id}/update",
            get(participants::update_form).post(participants::update),
        )
        .route(
            "/{id}/delete",
            post(participants::delete).fallback(delete_rejected),
        )
}
