pub mod categories;
pub mod dashboard;
pub mod events;
pub mod home;
pub mod participants;

use axum::extract::rejection::JsonRejection;
use eventdesk_core::forms::FormErrors;

use crate::response::{Notice, NoticeRedirect};

/// Where deletions (successful or not) send the user.
pub const DASHBOARD_PATH: &str = "/dashboard";

pub const MSG_SOMETHING_WENT_WRONG: &str = "Something Went Wrong!";

/// Error key for problems that belong to no single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Form errors for a request body that could not be read as the form.
pub(crate) fn unreadable_body(rejection: JsonRejection) -> FormErrors {
    tracing::debug!(error = %rejection, "Form body rejected");
    let mut errors = FormErrors::new();
    errors.add(NON_FIELD_ERRORS, rejection.body_text());
    errors
}

/// Any non-POST request to a delete path. Nothing is deleted.
pub async fn delete_rejected() -> NoticeRedirect {
    tracing::warn!("Delete requested with a method other than POST");
    NoticeRedirect::new(Notice::error(MSG_SOMETHING_WENT_WRONG), DASHBOARD_PATH)
}

/// `today` for date comparisons: the server's local calendar date.
pub(crate) fn local_today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
