//! Dashboard view selection.
//!
//! The dashboard always shows the same aggregate counts; the `type` query
//! parameter only picks which secondary listing accompanies them.

use chrono::NaiveDate;
use serde::Serialize;

/// The secondary listing shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardView {
    /// Every event.
    Total,
    /// Events dated before today.
    PastEvents,
    /// Events dated after today.
    FutureEvents,
    /// Events dated today. This is the default view.
    #[serde(rename = "all")]
    Today,
    /// Every participant with the number of events they attend.
    TotalParticipants,
    /// Every category with its events.
    Category,
}

impl DashboardView {
    /// Resolve the `type` query parameter. Missing or unrecognised values
    /// fall back to [`DashboardView::Today`].
    pub fn from_param(value: Option<&str>) -> Self {
        match value.unwrap_or("all") {
            "total" => Self::Total,
            "past_events" => Self::PastEvents,
            "future_events" => Self::FutureEvents,
            "total_participants" => Self::TotalParticipants,
            "category" => Self::Category,
            _ => Self::Today,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::PastEvents => "past_events",
            Self::FutureEvents => "future_events",
            Self::Today => "all",
            Self::TotalParticipants => "total_participants",
            Self::Category => "category",
        }
    }

    /// Which events accompany this view, relative to `today`.
    ///
    /// The participant and category views leave the event listing unfiltered.
    pub fn event_scope(self, today: NaiveDate) -> EventScope {
        match self {
            Self::Total | Self::TotalParticipants | Self::Category => EventScope::All,
            Self::PastEvents => EventScope::Before(today),
            Self::FutureEvents => EventScope::After(today),
            Self::Today => EventScope::On(today),
        }
    }
}

/// Date restriction applied to a dashboard event listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventScope {
    All,
    /// Strictly before the date.
    Before(NaiveDate),
    /// Strictly after the date.
    After(NaiveDate),
    /// Exactly on the date.
    On(NaiveDate),
}
