//! Handlers for creating, editing and deleting participants.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use eventdesk_core::forms::{FormErrors, ParticipantForm, ParticipantInput, MSG_DUPLICATE_EMAIL};
use eventdesk_core::types::DbId;
use eventdesk_db::models::participant::Participant;
use eventdesk_db::repositories::ParticipantRepo;
use sqlx::PgPool;

use super::{unreadable_body, DASHBOARD_PATH};
use crate::error::{AppError, AppResult};
use crate::response::{form_invalid, form_ok, FormPage, Notice, NoticeRedirect};
use crate::state::AppState;

pub const CREATE_PATH: &str = "/participants/create";

pub fn update_path(id: DbId) -> String {
    format!("/participants/{id}/update")
}

fn prefill(participant: Participant) -> ParticipantForm {
    ParticipantForm {
        name: participant.name,
        email: participant.email,
    }
}

/// Clean the form and check email uniqueness against everyone but `editing`.
async fn validate(
    pool: &PgPool,
    form: &ParticipantForm,
    editing: Option<DbId>,
) -> AppResult<Result<ParticipantInput, FormErrors>> {
    let input = match form.clean() {
        Ok(input) => input,
        Err(errors) => return Ok(Err(errors)),
    };

    if ParticipantRepo::email_taken(pool, &input.email, editing).await? {
        let mut errors = FormErrors::new();
        errors.add("email", MSG_DUPLICATE_EMAIL);
        return Ok(Err(errors));
    }

    Ok(Ok(input))
}

/// GET /participants/create
pub async fn create_form() -> Response {
    form_ok(FormPage::blank(ParticipantForm::default()))
}

/// POST /participants/create
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ParticipantForm>, JsonRejection>,
) -> AppResult<Response> {
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            let page = FormPage {
                form: ParticipantForm::default(),
                errors: unreadable_body(rejection),
            };
            return Ok(form_invalid(page));
        }
    };

    let input = match validate(&state.pool, &form, None).await? {
        Ok(input) => input,
        Err(errors) => return Ok(form_invalid(FormPage { form, errors })),
    };

    let participant = ParticipantRepo::create(&state.pool, &input).await?;
    tracing::info!(participant_id = participant.id, "Participant created");

    Ok(
        NoticeRedirect::new(Notice::success("Participant Created Successfully"), CREATE_PATH)
            .into_response(),
    )
}

/// GET /participants/{id}/update
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let participant = ParticipantRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Participant", id))?;

    Ok(form_ok(FormPage::blank(prefill(participant))))
}

/// POST /participants/{id}/update
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<ParticipantForm>, JsonRejection>,
) -> AppResult<Response> {
    ParticipantRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Participant", id))?;

    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            let page = FormPage {
                form: ParticipantForm::default(),
                errors: unreadable_body(rejection),
            };
            return Ok(form_invalid(page));
        }
    };

    let input = match validate(&state.pool, &form, Some(id)).await? {
        Ok(input) => input,
        Err(errors) => return Ok(form_invalid(FormPage { form, errors })),
    };

    ParticipantRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Participant", id))?;
    tracing::info!(participant_id = id, "Participant updated");

    Ok(NoticeRedirect::new(
        Notice::success("Participant Updated Successfully"),
        update_path(id),
    )
    .into_response())
}

/// POST /participants/{id}/delete
///
/// Removes the participant from every event; the events stay.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<NoticeRedirect> {
    if !ParticipantRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Participant", id));
    }
    tracing::info!(participant_id = id, "Participant deleted");

    Ok(NoticeRedirect::new(
        Notice::success("Participant Deleted Successfully"),
        DASHBOARD_PATH,
    ))
}
