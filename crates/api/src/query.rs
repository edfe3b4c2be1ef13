//! Query parameter types for the listing endpoints.
//!
//! Values are kept as raw strings: an empty parameter counts as absent, and
//! parsing happens in `eventdesk_core` so bad input becomes a 400 with a
//! useful message instead of an extractor rejection.

use serde::Deserialize;

/// `GET /?category=&q=&start_date=&end_date=`
#[derive(Debug, Default, Deserialize)]
pub struct HomeParams {
    pub category: Option<String>,
    pub q: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// `GET /dashboard?type=`
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    #[serde(rename = "type")]
    pub view: Option<String>,
}
