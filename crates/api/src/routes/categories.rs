//! Route definitions for categories.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{categories, delete_rejected};
use crate::state::AppState;

/// Category routes mounted at `/categories`.
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
            get(categories::create_form).post(categories::create),
        )
        .route(
            "/{id}/update",
            get(categories::update_form).post(categories::update),
        )
        .route(
            "/{id}/delete",
            post(categories::delete).fallback(delete_rejected),
        )
}
