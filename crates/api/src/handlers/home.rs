//! Handler for the public event listing.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use eventdesk_core::listing::HomeFilter;
use eventdesk_core::types::DbId;
use eventdesk_db::models::category::Category;
use eventdesk_db::models::event::EventSummary;
use eventdesk_db::repositories::{CategoryRepo, EventRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::HomeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Context for the home page. Only the inputs of the filter that was
/// applied are echoed back.
#[derive(Debug, Serialize)]
pub struct HomeContext {
    pub categories: Vec<Category>,
    pub events: Vec<EventSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_category_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// GET /
///
/// List events filtered by exactly one of: category, text search, or date
/// range (in that priority order). With no filter every event is listed.
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<HomeParams>,
) -> AppResult<impl IntoResponse> {
    let filter = HomeFilter::resolve(
        params.category.as_deref(),
        params.q.as_deref(),
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )
    .map_err(AppError::BadRequest)?;

    if let HomeFilter::Category(id) = filter {
        CategoryRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Category", id))?;
    }

    let categories = CategoryRepo::list(&state.pool).await?;
    let events = EventRepo::search(&state.pool, &filter).await?;

    let mut context = HomeContext {
        categories,
        events,
        selected_category_id: None,
        query: None,
        start_date: None,
        end_date: None,
    };
    match filter {
        HomeFilter::Category(id) => context.selected_category_id = Some(id),
        HomeFilter::Search(text) => context.query = Some(text),
        HomeFilter::DateRange { start, end } => {
            context.start_date = Some(start);
            context.end_date = Some(end);
        }
        HomeFilter::All => {}
    }

    Ok(Json(DataResponse { data: context }))
}
