//! Home listing filter resolution.
//!
//! The landing page accepts four optional query inputs (`category`, `q`,
//! `start_date`, `end_date`). They never combine: the first branch that
//! applies wins, in this order:
//!
//! 1. `category` -> events of that category (search and dates are ignored)
//! 2. `q`        -> events whose name or location contains the text
//! 3. `start_date` + `end_date` -> events dated inside the inclusive range
//! 4. nothing    -> every event
//!
//! A parameter only counts as present when it is non-empty.

use chrono::NaiveDate;

use crate::types::DbId;

/// Accepted format for `start_date` / `end_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The single filter applied to the home listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeFilter {
    /// Events belonging to one category.
    Category(DbId),
    /// Case-insensitive substring match on name or location.
    Search(String),
    /// Events dated within `[start, end]`, both bounds inclusive.
    DateRange { start: NaiveDate, end: NaiveDate },
    /// No filtering.
    All,
}

impl HomeFilter {
    /// Resolve the raw query inputs into exactly one filter.
    ///
    /// Returns an error message for a non-integer `category` or an
    /// unparsable date. A range with `start > end` is accepted and simply
    /// matches nothing.
    pub fn resolve(
        category: Option<&str>,
        q: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self, String> {
        if let Some(raw) = present(category) {
            let id = raw
                .trim()
                .parse::<DbId>()
                .map_err(|_| format!("Invalid category id '{raw}'"))?;
            return Ok(Self::Category(id));
        }

        if let Some(query) = present(q) {
            return Ok(Self::Search(query.to_string()));
        }

        if let (Some(start), Some(end)) = (present(start_date), present(end_date)) {
            return Ok(Self::DateRange {
                start: parse_date("start_date", start)?,
                end: parse_date("end_date", end)?,
            });
        }

        Ok(Self::All)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| format!("Invalid {field} '{raw}', expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_inputs_resolves_to_all() {
        assert_eq!(HomeFilter::resolve(None, None, None, None), Ok(HomeFilter::All));
    }

    #[test]
    fn category_wins_over_search_and_dates() {
        let filter = HomeFilter::resolve(
            Some("3"),
            Some("concert"),
            Some("2024-01-01"),
            Some("2024-01-31"),
        );
        assert_eq!(filter, Ok(HomeFilter::Category(3)));
    }

    #[test]
    fn category_tolerates_surrounding_whitespace() {
        assert_eq!(
            HomeFilter::resolve(Some(" 12 "), None, None, None),
            Ok(HomeFilter::Category(12))
        );
    }

    #[test]
    fn non_integer_category_is_rejected() {
        let err = HomeFilter::resolve(Some("music"), None, None, None).unwrap_err();
        assert!(err.contains("Invalid category id"));
    }

    #[test]
    fn empty_category_falls_through_to_search() {
        assert_eq!(
            HomeFilter::resolve(Some(""), Some("park"), None, None),
            Ok(HomeFilter::Search("park".into()))
        );
    }

    #[test]
    fn search_wins_over_dates() {
        assert_matches!(
            HomeFilter::resolve(None, Some("hall"), Some("2024-01-01"), Some("2024-01-31")),
            Ok(HomeFilter::Search(q)) if q == "hall"
        );
    }

    #[test]
    fn both_dates_produce_a_range() {
        assert_eq!(
            HomeFilter::resolve(None, Some(""), Some("2024-01-01"), Some("2024-01-31")),
            Ok(HomeFilter::DateRange {
                start: date(2024, 1, 1),
                end: date(2024, 1, 31),
            })
        );
    }

    #[test]
    fn a_single_date_bound_is_ignored() {
        assert_eq!(
            HomeFilter::resolve(None, None, Some("2024-01-01"), None),
            Ok(HomeFilter::All)
        );
        assert_eq!(
            HomeFilter::resolve(None, None, Some("2024-01-01"), Some("")),
            Ok(HomeFilter::All)
        );
    }

    #[test]
    fn malformed_date_is_rejected() {
        let err = HomeFilter::resolve(None, None, Some("01/02/2024"), Some("2024-01-31"))
            .unwrap_err();
        assert!(err.contains("start_date"));
    }
}
