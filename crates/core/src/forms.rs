//! Form schemas and validation for categories, participants and events.
//!
//! Each form deserializes leniently (missing fields become empty) and is
//! turned into a typed input by `clean()`, which either succeeds with the
//! normalized values or fails with a [`FormErrors`] map keyed by field name.
//! Checks that need the database (email uniqueness, referenced ids) are
//! appended by the caller with [`FormErrors::add`].

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";
pub const MSG_INVALID_DATE: &str = "Enter a valid date.";
pub const MSG_INVALID_TIME: &str = "Enter a valid time.";
pub const MSG_INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";
pub const MSG_DUPLICATE_EMAIL: &str = "Participant with this Email already exists.";

/// Accepted input formats for event times, tried in order.
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Canonical format used when pre-filling an event form.
pub const TIME_FORMAT: &str = "%H:%M:%S";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Field-level validation failures, `field -> [messages]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for one field (empty if none).
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// `Ok(())` when no errors were recorded.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Append every message of `other`.
    pub fn merge(&mut self, other: FormErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FormErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                out.add(&field.to_string(), message);
            }
        }
        out
    }
}

fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some(Cow::Borrowed(MSG_REQUIRED));
        return Err(err);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Submitted category fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CategoryForm {
    #[validate(
        custom(function = "validate_required"),
        length(max = 100, message = "Ensure this value has at most 100 characters.")
    )]
    pub name: String,
    #[validate(length(max = 2000, message = "Ensure this value has at most 2000 characters."))]
    pub description: String,
}

/// Validated category values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn clean(&self) -> Result<CategoryInput, FormErrors> {
        let form = Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        };
        form.validate()?;
        Ok(CategoryInput {
            name: form.name,
            description: form.description,
        })
    }
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// Submitted participant fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ParticipantForm {
    #[validate(
        custom(function = "validate_required"),
        length(max = 100, message = "Ensure this value has at most 100 characters.")
    )]
    pub name: String,
    #[validate(
        custom(function = "validate_required"),
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this value has at most 254 characters.")
    )]
    pub email: String,
}

/// Validated participant values. Uniqueness of `email` is not checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantInput {
    pub name: String,
    pub email: String,
}

impl ParticipantForm {
    pub fn clean(&self) -> Result<ParticipantInput, FormErrors> {
        let form = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        };
        let mut errors = match form.validate() {
            Ok(()) => FormErrors::new(),
            Err(e) => FormErrors::from(e),
        };
        // An empty email only needs the "required" message.
        if form.email.is_empty() {
            errors.0.insert("email".into(), vec![MSG_REQUIRED.into()]);
        }
        errors.into_result()?;
        Ok(ParticipantInput {
            name: form.name,
            email: form.email,
        })
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A submitted choice id. Accepts a JSON number or its text form, so a value
/// of the wrong shape is reported on its field instead of failing the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceId {
    Id(DbId),
    Text(String),
}

impl ChoiceId {
    /// The id, if the value is one.
    pub fn id(&self) -> Option<DbId> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Text(raw) => raw.trim().parse().ok(),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(raw) if raw.trim().is_empty())
    }
}

impl From<DbId> for ChoiceId {
    fn from(id: DbId) -> Self {
        Self::Id(id)
    }
}

impl std::fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Text(raw) => f.write_str(raw),
        }
    }
}

/// Submitted event fields. `date` and `time` arrive as text and are parsed
/// during cleaning so bad values surface as field errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EventForm {
    #[validate(
        custom(function = "validate_required"),
        length(max = 200, message = "Ensure this value has at most 200 characters.")
    )]
    pub name: String,
    #[validate(length(max = 2000, message = "Ensure this value has at most 2000 characters."))]
    pub description: String,
    pub date: String,
    pub time: String,
    #[validate(
        custom(function = "validate_required"),
        length(max = 255, message = "Ensure this value has at most 255 characters.")
    )]
    pub location: String,
    pub category: Option<ChoiceId>,
    pub participants: Vec<ChoiceId>,
}

/// Validated event values. Referenced ids are not checked for existence here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInput {
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub category_id: Option<DbId>,
    /// Distinct participant ids, ascending.
    pub participant_ids: Vec<DbId>,
}

impl EventForm {
    /// The submitted category, when it is a well-formed id.
    pub fn category_id(&self) -> Option<DbId> {
        self.category.as_ref().and_then(ChoiceId::id)
    }

    /// Distinct well-formed participant ids, ascending.
    pub fn participant_ids(&self) -> Vec<DbId> {
        let ids: BTreeSet<DbId> = self.participants.iter().filter_map(ChoiceId::id).collect();
        ids.into_iter().collect()
    }

    pub fn clean(&self) -> Result<EventInput, FormErrors> {
        let form = Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            location: self.location.trim().to_string(),
            category: self.category.clone(),
            participants: self.participants.clone(),
        };

        let mut errors = FormErrors::new();
        if let Err(e) = form.validate() {
            errors.merge(e.into());
        }

        match &form.category {
            Some(choice) if !choice.is_blank() && choice.id().is_none() => {
                errors.add("category", MSG_INVALID_CHOICE);
            }
            _ => {}
        }
        for choice in form.participants.iter().filter(|c| c.id().is_none()) {
            errors.add("participants", format!("\"{choice}\" is not a valid value."));
        }

        let date = parse_field(&form.date, MSG_INVALID_DATE, |s| {
            NaiveDate::parse_from_str(s, crate::listing::DATE_FORMAT).ok()
        });
        let time = parse_field(&form.time, MSG_INVALID_TIME, parse_time);

        match (date, time) {
            (Ok(date), Ok(time)) => {
                errors.into_result()?;
                Ok(EventInput {
                    category_id: form.category_id(),
                    participant_ids: form.participant_ids(),
                    name: form.name,
                    description: form.description,
                    date,
                    time,
                    location: form.location,
                })
            }
            (date, time) => {
                if let Err(message) = date {
                    errors.add("date", message);
                }
                if let Err(message) = time {
                    errors.add("time", message);
                }
                Err(errors)
            }
        }
    }
}

/// Parse `HH:MM:SS` or `HH:MM`.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

/// A required text field: missing, unparsable, or the parsed value.
fn parse_field<T>(
    raw: &str,
    invalid: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, &'static str> {
    if raw.is_empty() {
        return Err(MSG_REQUIRED);
    }
    parse(raw).ok_or(invalid)
}
