//! Handlers for event details and event create/update/delete.
//!
//! Event forms are returned together with the selectable categories and
//! participants. A submitted category or participant id that does not exist
//! is reported as an invalid choice on the matching field.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use eventdesk_core::forms::{ChoiceId, EventForm, FormErrors, MSG_INVALID_CHOICE, TIME_FORMAT};
use eventdesk_core::listing::DATE_FORMAT;
use eventdesk_core::types::DbId;
use eventdesk_db::models::category::Category;
use eventdesk_db::models::event::Event;
use eventdesk_db::models::participant::Participant;
use eventdesk_db::repositories::{CategoryRepo, EventRepo, ParticipantRepo};
use serde::Serialize;
use sqlx::PgPool;

use super::{unreadable_body, DASHBOARD_PATH};
use crate::error::{AppError, AppResult};
use crate::response::{form_invalid, form_ok, DataResponse, Notice, NoticeRedirect};
use crate::state::AppState;

pub const CREATE_PATH: &str = "/events/create";

pub fn update_path(id: DbId) -> String {
    format!("/events/{id}/update")
}

/// Event form payload, including the choices for `category` and `participants`.
#[derive(Debug, Serialize)]
pub struct EventFormPage {
    pub form: EventForm,
    pub errors: FormErrors,
    pub categories: Vec<Category>,
    pub participants: Vec<Participant>,
}

impl EventFormPage {
    async fn load(pool: &PgPool, form: EventForm, errors: FormErrors) -> AppResult<Self> {
        Ok(Self {
            form,
            errors,
            categories: CategoryRepo::list(pool).await?,
            participants: ParticipantRepo::list(pool).await?,
        })
    }
}

async fn prefill(pool: &PgPool, event: Event) -> AppResult<EventForm> {
    let participants = EventRepo::participant_ids(pool, event.id).await?;
    Ok(EventForm {
        name: event.name,
        description: event.description,
        date: event.date.format(DATE_FORMAT).to_string(),
        time: event.time.format(TIME_FORMAT).to_string(),
        location: event.location,
        category: event.category_id.map(ChoiceId::Id),
        participants: participants.into_iter().map(ChoiceId::Id).collect(),
    })
}

/// Check that the referenced category and participants exist.
async fn check_references(pool: &PgPool, form: &EventForm) -> AppResult<FormErrors> {
    let mut errors = FormErrors::new();

    if let Some(category_id) = form.category_id() {
        if CategoryRepo::find_by_id(pool, category_id).await?.is_none() {
            errors.add("category", MSG_INVALID_CHOICE);
        }
    }

    let requested = form.participant_ids();
    let existing = ParticipantRepo::existing_ids(pool, &requested).await?;
    for id in requested.iter().filter(|id| !existing.contains(*id)) {
        errors.add(
            "participants",
            format!("Select a valid choice. {id} is not one of the available choices."),
        );
    }

    Ok(errors)
}

/// GET /events/{id}
///
/// The event with its category and participants.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;

    Ok(Json(DataResponse { data: event }))
}

/// GET /events/create
pub async fn create_form(State(state): State<AppState>) -> AppResult<Response> {
    let page = EventFormPage::load(&state.pool, EventForm::default(), FormErrors::new()).await?;
    Ok(form_ok(page))
}

/// POST /events/create
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<EventForm>, JsonRejection>,
) -> AppResult<Response> {
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            return invalid(&state.pool, EventForm::default(), unreadable_body(rejection)).await
        }
    };

    let cleaned = form.clean();
    let mut errors = check_references(&state.pool, &form).await?;
    let input = match cleaned {
        Ok(input) if errors.is_empty() => input,
        Ok(_) => return invalid(&state.pool, form, errors).await,
        Err(field_errors) => {
            errors.merge(field_errors);
            return invalid(&state.pool, form, errors).await;
        }
    };

    let event = EventRepo::create(&state.pool, &input).await?;
    tracing::info!(
        event_id = event.id,
        participants = input.participant_ids.len(),
        "Event created",
    );

    Ok(NoticeRedirect::new(Notice::success("Event Created Successfully"), CREATE_PATH)
        .into_response())
}

/// GET /events/{id}/update
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;

    let form = prefill(&state.pool, event).await?;
    let page = EventFormPage::load(&state.pool, form, FormErrors::new()).await?;
    Ok(form_ok(page))
}

/// POST /events/{id}/update
///
/// Replaces every field, including the participant set.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<EventForm>, JsonRejection>,
) -> AppResult<Response> {
    EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;

    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            return invalid(&state.pool, EventForm::default(), unreadable_body(rejection)).await
        }
    };

    let cleaned = form.clean();
    let mut errors = check_references(&state.pool, &form).await?;
    let input = match cleaned {
        Ok(input) if errors.is_empty() => input,
        Ok(_) => return invalid(&state.pool, form, errors).await,
        Err(field_errors) => {
            errors.merge(field_errors);
            return invalid(&state.pool, form, errors).await;
        }
    };

    EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;
    tracing::info!(event_id = id, "Event updated");

    Ok(
        NoticeRedirect::new(Notice::success("Event Updated Successfully"), update_path(id))
            .into_response(),
    )
}

/// POST /events/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<NoticeRedirect> {
    if !EventRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Event", id));
    }
    tracing::info!(event_id = id, "Event deleted");

    Ok(NoticeRedirect::new(
        Notice::success("Event Deleted Successfully"),
        DASHBOARD_PATH,
    ))
}

async fn invalid(pool: &PgPool, form: EventForm, errors: FormErrors) -> AppResult<Response> {
    tracing::debug!(?errors, "Event form rejected");
    Ok(form_invalid(EventFormPage::load(pool, form, errors).await?))
}
