//! Integration tests for the listing and dashboard queries.
//!
//! Exercises the repository layer against a real database:
//! - Home listing branches (category, search, date range, unfiltered)
//! - Participant totals on listing rows
//! - Dashboard counts and date scopes around "today"
//! - Participant event counts

use chrono::{Duration, NaiveDate, NaiveTime};
use eventdesk_core::dashboard::{DashboardView, EventScope};
use eventdesk_core::forms::{CategoryInput, EventInput, ParticipantInput};
use eventdesk_core::listing::HomeFilter;
use eventdesk_core::types::DbId;
use eventdesk_db::repositories::{CategoryRepo, DashboardRepo, EventRepo, ParticipantRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn category(pool: &PgPool, name: &str) -> DbId {
    CategoryRepo::create(
        pool,
        &CategoryInput {
            name: name.to_string(),
            description: String::new(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn participant(pool: &PgPool, name: &str) -> DbId {
    ParticipantRepo::create(
        pool,
        &ParticipantInput {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        },
    )
    .await
    .unwrap()
    .id
}

fn event_input(
    name: &str,
    location: &str,
    date: NaiveDate,
    category_id: Option<DbId>,
    participant_ids: Vec<DbId>,
) -> EventInput {
    EventInput {
        name: name.to_string(),
        description: String::new(),
        date,
        time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        location: location.to_string(),
        category_id,
        participant_ids,
    }
}

async fn event(
    pool: &PgPool,
    name: &str,
    location: &str,
    date: NaiveDate,
    category_id: Option<DbId>,
    participant_ids: Vec<DbId>,
) -> DbId {
    EventRepo::create(
        pool,
        &event_input(name, location, date, category_id, participant_ids),
    )
    .await
    .unwrap()
    .id
}

fn names<T>(rows: &[T], name: impl Fn(&T) -> &str) -> Vec<String> {
    let mut out: Vec<String> = rows.iter().map(|r| name(r).to_string()).collect();
    out.sort();
    out
}

// ---------------------------------------------------------------------------
// Home listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_all_returns_every_event_with_totals(pool: PgPool) {
    let ada = participant(&pool, "Ada").await;
    let alan = participant(&pool, "Alan").await;
    event(&pool, "Gala", "Hall", ymd(2024, 1, 5), None, vec![ada, alan]).await;
    event(&pool, "Picnic", "Park", ymd(2024, 1, 6), None, vec![]).await;

    let rows = EventRepo::search(&pool, &HomeFilter::All).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].event.name, "Gala");
    assert_eq!(rows[0].total, 2);
    assert_eq!(rows[1].event.name, "Picnic");
    assert_eq!(rows[1].total, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_by_category_returns_only_that_category(pool: PgPool) {
    let music = category(&pool, "Music").await;
    let sport = category(&pool, "Sport").await;
    event(&pool, "Concert", "Arena", ymd(2024, 3, 1), Some(music), vec![]).await;
    event(&pool, "Recital", "Chapel", ymd(2024, 3, 2), Some(music), vec![]).await;
    event(&pool, "Derby", "Arena", ymd(2024, 3, 3), Some(sport), vec![]).await;
    event(&pool, "Loose", "Arena", ymd(2024, 3, 4), None, vec![]).await;

    let rows = EventRepo::search(&pool, &HomeFilter::Category(music))
        .await
        .unwrap();

    assert_eq!(names(&rows, |r| r.event.name.as_str()), ["Concert", "Recital"]);
    assert!(rows.iter().all(|r| r.event.category_id == Some(music)));
    assert!(rows.iter().all(|r| r.category_name.as_deref() == Some("Music")));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_text_matches_name_or_location_ignoring_case(pool: PgPool) {
    event(&pool, "Jazz Night", "Cellar", ymd(2024, 4, 1), None, vec![]).await;
    event(&pool, "Open Mic", "The JAZZ Club", ymd(2024, 4, 2), None, vec![]).await;
    event(&pool, "Book Fair", "Library", ymd(2024, 4, 3), None, vec![]).await;

    let filter = HomeFilter::Search("jazz".into());
    let rows = EventRepo::search(&pool, &filter).await.unwrap();

    assert_eq!(names(&rows, |r| r.event.name.as_str()), ["Jazz Night", "Open Mic"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_text_treats_wildcards_literally(pool: PgPool) {
    event(&pool, "100% Fun", "Hall", ymd(2024, 4, 1), None, vec![]).await;
    event(&pool, "Quiet Evening", "Hall", ymd(2024, 4, 2), None, vec![]).await;

    let rows = EventRepo::search(&pool, &HomeFilter::Search("%".into()))
        .await
        .unwrap();

    assert_eq!(names(&rows, |r| r.event.name.as_str()), ["100% Fun"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_date_range_is_inclusive(pool: PgPool) {
    event(&pool, "Before", "X", ymd(2023, 12, 31), None, vec![]).await;
    event(&pool, "First", "X", ymd(2024, 1, 1), None, vec![]).await;
    event(&pool, "Middle", "X", ymd(2024, 1, 15), None, vec![]).await;
    event(&pool, "Last", "X", ymd(2024, 1, 31), None, vec![]).await;
    event(&pool, "After", "X", ymd(2024, 2, 1), None, vec![]).await;

    let filter = HomeFilter::DateRange {
        start: ymd(2024, 1, 1),
        end: ymd(2024, 1, 31),
    };
    let rows = EventRepo::search(&pool, &filter).await.unwrap();

    assert_eq!(names(&rows, |r| r.event.name.as_str()), ["First", "Last", "Middle"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_inverted_date_range_returns_nothing(pool: PgPool) {
    event(&pool, "Middle", "X", ymd(2024, 1, 15), None, vec![]).await;

    let filter = HomeFilter::DateRange {
        start: ymd(2024, 1, 31),
        end: ymd(2024, 1, 1),
    };
    let rows = EventRepo::search(&pool, &filter).await.unwrap();

    assert!(rows.is_empty());
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_counts_split_around_today(pool: PgPool) {
    let today = ymd(2024, 6, 15);
    category(&pool, "Music").await;
    category(&pool, "Sport").await;
    participant(&pool, "Ada").await;
    event(&pool, "Past 1", "X", today - Duration::days(10), None, vec![]).await;
    event(&pool, "Past 2", "X", today - Duration::days(1), None, vec![]).await;
    event(&pool, "Today", "X", today, None, vec![]).await;
    event(&pool, "Future", "X", today + Duration::days(3), None, vec![]).await;

    let counts = DashboardRepo::counts(&pool, today).await.unwrap();

    assert_eq!(counts.total, 4);
    assert_eq!(counts.past_events, 2);
    assert_eq!(counts.future_events, 1);
    assert_eq!(counts.today_event, 1);
    assert_eq!(counts.unique_participants, 1);
    assert_eq!(counts.total_categories, 2);
    assert_eq!(
        counts.total,
        counts.past_events + counts.future_events + counts.today_event
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_counts_on_empty_store_are_zero(pool: PgPool) {
    let counts = DashboardRepo::counts(&pool, ymd(2024, 6, 15)).await.unwrap();

    assert_eq!(counts.total, 0);
    assert_eq!(counts.past_events, 0);
    assert_eq!(counts.unique_participants, 0);
    assert_eq!(counts.total_categories, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_scopes_select_expected_events(pool: PgPool) {
    let today = ymd(2024, 6, 15);
    let ada = participant(&pool, "Ada").await;
    event(&pool, "Past", "X", today - Duration::days(1), None, vec![ada]).await;
    event(&pool, "Today", "X", today, None, vec![]).await;
    event(&pool, "Future", "X", today + Duration::days(1), None, vec![]).await;

    let cases = [
        (DashboardView::Total, vec!["Future", "Past", "Today"]),
        (DashboardView::PastEvents, vec!["Past"]),
        (DashboardView::FutureEvents, vec!["Future"]),
        (DashboardView::Today, vec!["Today"]),
        (DashboardView::TotalParticipants, vec!["Future", "Past", "Today"]),
        (DashboardView::Category, vec!["Future", "Past", "Today"]),
    ];
    for (view, expected) in cases {
        let rows = EventRepo::list_for_dashboard(&pool, view.event_scope(today))
            .await
            .unwrap();
        assert_eq!(names(&rows, |r| r.event.name.as_str()), expected, "view {view:?}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_rows_carry_their_participants(pool: PgPool) {
    let ada = participant(&pool, "Ada").await;
    let alan = participant(&pool, "Alan").await;
    event(&pool, "Gala", "X", ymd(2024, 1, 1), None, vec![alan, ada]).await;
    event(&pool, "Solo", "X", ymd(2024, 1, 2), None, vec![]).await;

    let rows = EventRepo::list_for_dashboard(&pool, EventScope::All)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    let gala_people: Vec<&str> = rows[0].participants.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(gala_people, ["Ada", "Alan"]);
    assert!(rows[1].participants.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn participant_event_counts_include_zero_totals(pool: PgPool) {
    let busy = participant(&pool, "Busy").await;
    participant(&pool, "Idle").await;
    participant(&pool, "Quiet").await;
    event(&pool, "A", "X", ymd(2024, 1, 1), None, vec![busy]).await;
    event(&pool, "B", "X", ymd(2024, 1, 2), None, vec![busy]).await;

    let rows = ParticipantRepo::list_with_event_counts(&pool).await.unwrap();

    assert_eq!(rows.len(), 3);
    let mut totals: Vec<i64> = rows.iter().map(|r| r.total).collect();
    totals.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(totals, [2, 0, 0]);
    assert_eq!(totals.iter().sum::<i64>(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn categories_with_events_group_events_per_category(pool: PgPool) {
    let music = category(&pool, "Music").await;
    category(&pool, "Empty").await;
    event(&pool, "Concert", "X", ymd(2024, 1, 1), Some(music), vec![]).await;
    event(&pool, "Recital", "X", ymd(2024, 1, 2), Some(music), vec![]).await;
    event(&pool, "Orphan", "X", ymd(2024, 1, 3), None, vec![]).await;

    let rows = CategoryRepo::list_with_events(&pool).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category.name, "Empty");
    assert!(rows[0].events.is_empty());
    assert_eq!(rows[1].category.name, "Music");
    assert_eq!(names(&rows[1].events, |e| e.name.as_str()), ["Concert", "Recital"]);
}
