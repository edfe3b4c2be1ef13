//! Handlers for creating, editing and deleting categories.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use eventdesk_core::forms::CategoryForm;
use eventdesk_core::types::DbId;
use eventdesk_db::models::category::Category;
use eventdesk_db::repositories::CategoryRepo;

use super::{unreadable_body, DASHBOARD_PATH};
use crate::error::{AppError, AppResult};
use crate::response::{form_invalid, form_ok, FormPage, Notice, NoticeRedirect};
use crate::state::AppState;

pub const CREATE_PATH: &str = "/categories/create";

pub fn update_path(id: DbId) -> String {
    format!("/categories/{id}/update")
}

fn prefill(category: Category) -> CategoryForm {
    CategoryForm {
        name: category.name,
        description: category.description,
    }
}

/// GET /categories/create
pub async fn create_form() -> Response {
    form_ok(FormPage::blank(CategoryForm::default()))
}

/// POST /categories/create
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CategoryForm>, JsonRejection>,
) -> AppResult<Response> {
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            let page = FormPage {
                form: CategoryForm::default(),
                errors: unreadable_body(rejection),
            };
            return Ok(form_invalid(page));
        }
    };

    let input = match form.clean() {
        Ok(input) => input,
        Err(errors) => return Ok(form_invalid(FormPage { form, errors })),
    };

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, name = %category.name, "Category created");

    Ok(NoticeRedirect::new(Notice::success("Category Created Successfully"), CREATE_PATH)
        .into_response())
}

/// GET /categories/{id}/update
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Category", id))?;

    Ok(form_ok(FormPage::blank(prefill(category))))
}

/// POST /categories/{id}/update
///
/// Replaces every field. The category must exist before the form is checked.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<CategoryForm>, JsonRejection>,
) -> AppResult<Response> {
    CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Category", id))?;

    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            let page = FormPage {
                form: CategoryForm::default(),
                errors: unreadable_body(rejection),
            };
            return Ok(form_invalid(page));
        }
    };

    let input = match form.clean() {
        Ok(input) => input,
        Err(errors) => return Ok(form_invalid(FormPage { form, errors })),
    };

    CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Category", id))?;
    tracing::info!(category_id = id, "Category updated");

    Ok(
        NoticeRedirect::new(Notice::success("Category Updated Successfully"), update_path(id))
            .into_response(),
    )
}

/// POST /categories/{id}/delete
///
/// Events in the category are kept and become uncategorised.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<NoticeRedirect> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Category", id));
    }
    tracing::info!(category_id = id, "Category deleted");

    Ok(NoticeRedirect::new(
        Notice::success("Category Deleted Successfully"),
        DASHBOARD_PATH,
    ))
}
