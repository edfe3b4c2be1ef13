//! Handler for the organizer dashboard.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use eventdesk_core::dashboard::DashboardView;
use eventdesk_db::models::category::{Category, CategoryWithEvents};
use eventdesk_db::models::dashboard::DashboardCounts;
use eventdesk_db::models::event::EventWithParticipants;
use eventdesk_db::models::participant::{Participant, ParticipantWithEventCount};
use eventdesk_db::repositories::{CategoryRepo, DashboardRepo, EventRepo, ParticipantRepo};
use serde::Serialize;

use super::local_today;
use crate::error::AppResult;
use crate::query::DashboardParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Participants as listed on the dashboard. The `total_participants` view
/// adds each participant's event count.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ParticipantListing {
    Plain(Vec<Participant>),
    WithEventCounts(Vec<ParticipantWithEventCount>),
}

/// Categories as listed on the dashboard. The `category` view nests each
/// category's events.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CategoryListing {
    Plain(Vec<Category>),
    WithEvents(Vec<CategoryWithEvents>),
}

#[derive(Debug, Serialize)]
pub struct DashboardContext {
    #[serde(rename = "type")]
    pub view: DashboardView,
    pub counts: DashboardCounts,
    pub events: Vec<EventWithParticipants>,
    pub participants: ParticipantListing,
    pub categories: CategoryListing,
}

/// GET /dashboard
///
/// Summary counts plus the event list selected by `?type=`. A missing or
/// unknown type shows today's events.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> AppResult<impl IntoResponse> {
    let view = DashboardView::from_param(params.view.as_deref());
    let today = local_today();

    let counts = DashboardRepo::counts(&state.pool, today).await?;
    let events = EventRepo::list_for_dashboard(&state.pool, view.event_scope(today)).await?;

    let participants = match view {
        DashboardView::TotalParticipants => ParticipantListing::WithEventCounts(
            ParticipantRepo::list_with_event_counts(&state.pool).await?,
        ),
        _ => ParticipantListing::Plain(ParticipantRepo::list(&state.pool).await?),
    };

    let categories = match view {
        DashboardView::Category => {
            CategoryListing::WithEvents(CategoryRepo::list_with_events(&state.pool).await?)
        }
        _ => CategoryListing::Plain(CategoryRepo::list(&state.pool).await?),
    };

    tracing::debug!(view = view.as_str(), events = events.len(), "Dashboard built");

    Ok(Json(DataResponse {
        data: DashboardContext {
            view,
            counts,
            events,
            participants,
            categories,
        },
    }))
}
