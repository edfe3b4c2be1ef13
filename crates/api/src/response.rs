//! Shared response types for API handlers.
//!
//! Every JSON body uses a `{ "data": ... }` envelope. Mutations answer with a
//! [`NoticeRedirect`] (303 + `Location` + a flash-style notice), and forms
//! answer with a [`FormPage`] payload carrying the submitted values and any
//! field errors.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use eventdesk_core::forms::FormErrors;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One-shot user message shown after a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RedirectBody {
    notice: Notice,
    redirect_to: String,
}

/// `303 See Other` to `location`, carrying a notice in the body.
#[derive(Debug)]
pub struct NoticeRedirect {
    notice: Notice,
    location: String,
}

impl NoticeRedirect {
    pub fn new(notice: Notice, location: impl Into<String>) -> Self {
        Self {
            notice,
            location: location.into(),
        }
    }
}

impl IntoResponse for NoticeRedirect {
    fn into_response(self) -> Response {
        let body = DataResponse {
            data: RedirectBody {
                notice: self.notice,
                redirect_to: self.location.clone(),
            },
        };
        (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, self.location)],
            Json(body),
        )
            .into_response()
    }
}

/// Form payload: the (pre-filled or submitted) values and field errors.
#[derive(Debug, Serialize)]
pub struct FormPage<F: Serialize> {
    pub form: F,
    pub errors: FormErrors,
}

impl<F: Serialize> FormPage<F> {
    /// An untouched form.
    pub fn blank(form: F) -> Self {
        Self {
            form,
            errors: FormErrors::new(),
        }
    }
}

/// `200 OK` for a form being displayed.
pub fn form_ok<T: Serialize>(page: T) -> Response {
    (StatusCode::OK, Json(DataResponse { data: page })).into_response()
}

/// `422 Unprocessable Entity` for a rejected submission. Nothing was saved.
pub fn form_invalid<T: Serialize>(page: T) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(DataResponse { data: page }),
    )
        .into_response()
}
