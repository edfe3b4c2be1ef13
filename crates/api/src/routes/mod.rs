pub mod categories;
pub mod events;
pub mod health;
pub mod participants;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the site route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                  home listing (?category, ?q, ?start_date, ?end_date)
/// /dashboard                         dashboard summary (?type)
///
/// /events/create                     create form (GET), create (POST)
/// /events/{id}                       event details
/// /events/{id}/update                update form (GET), update (POST)
/// /events/{id}/delete                delete (POST)
///
/// /categories/create                 create form (GET), create (POST)
/// /categories/{id}/update            update form (GET), update (POST)
/// /categories/{id}/delete            delete (POST)
///
/// /participants/create               create form (GET), create (POST)
/// /participants/{id}/update          update form (GET), update (POST)
/// /participants/{id}/delete          delete (POST)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home::home))
        .route("/dashboard", get(handlers::dashboard::dashboard))
        .nest("/events", events::router())
        .nest("/categories", categories::router())
        .nest("/participants", participants::router())
}
