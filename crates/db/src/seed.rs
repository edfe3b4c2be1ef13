//! Demo data generation.
//!
//! Populates the store with random categories, participants and events so the
//! listing and dashboard have something to show. Text is assembled from small
//! built-in word lists; every random choice goes through the caller's RNG, so
//! a seeded RNG reproduces the same data set.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use eventdesk_core::forms::{CategoryInput, EventInput, ParticipantInput};
use eventdesk_core::types::DbId;
use rand::seq::IndexedRandom;
use rand::Rng;
use sqlx::PgPool;

use crate::repositories::{CategoryRepo, EventRepo, ParticipantRepo};

pub const CATEGORY_COUNT: usize = 5;
pub const PARTICIPANT_COUNT: usize = 10;
pub const EVENT_COUNT: usize = 20;

/// Participants attached to each generated event, inclusive bounds.
pub const MIN_PARTICIPANTS_PER_EVENT: usize = 1;
pub const MAX_PARTICIPANTS_PER_EVENT: usize = 3;

/// What a [`populate`] run created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub participants: usize,
    pub events: usize,
}

// ---------------------------------------------------------------------------
// Word lists
// ---------------------------------------------------------------------------

const BS_VERBS: &[&str] = &[
    "empower", "streamline", "orchestrate", "incubate", "synergize", "reinvent",
    "harness", "cultivate", "deliver", "engage",
];
const BS_ADJECTIVES: &[&str] = &[
    "scalable", "holistic", "cross-platform", "vertical", "dynamic", "sticky",
    "seamless", "real-time", "end-to-end", "collaborative",
];
const BS_NOUNS: &[&str] = &[
    "communities", "platforms", "networks", "experiences", "paradigms",
    "workshops", "initiatives", "partnerships", "channels", "meetups",
];
const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Linus", "Margaret", "Dennis", "Barbara", "Ken",
    "Radia", "Edsger", "Frances", "Niklaus", "Hedy", "Tim", "Katherine",
];
const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Torvalds", "Hamilton", "Ritchie",
    "Liskov", "Thompson", "Perlman", "Dijkstra", "Allen", "Wirth", "Lamarr",
    "Berners-Lee", "Johnson",
];
const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];
const EMAIL_SUFFIX_MAX: u32 = 99_999;
const STREETS: &[&str] = &[
    "Maple Avenue", "Harbor Road", "Mill Lane", "Station Street", "Park Drive",
    "Church Road", "Bridge Street", "Elm Court", "Market Square", "Hill View",
];
const CITIES: &[&str] = &[
    "Springfield", "Riverton", "Lakeside", "Fairview", "Greenville",
    "Oakridge", "Brookfield", "Westbury",
];
const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing",
    "elit", "sed", "do", "eiusmod", "tempor", "incididunt", "labore", "dolore",
    "magna", "aliqua", "enim", "minim", "veniam", "quis", "nostrud",
    "exercitation", "ullamco", "laboris", "nisi", "aliquip", "commodo",
];

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Insert the demo data set: [`CATEGORY_COUNT`] categories,
/// [`PARTICIPANT_COUNT`] participants and [`EVENT_COUNT`] events dated within
/// `today`'s calendar year up to `today`.
///
/// Runs in a single transaction: a failed run leaves no partial data behind.
/// Emails already present in the store are re-rolled, so the routine can be
/// run again against a populated database.
pub async fn populate<R>(
    pool: &PgPool,
    rng: &mut R,
    today: NaiveDate,
) -> Result<SeedReport, sqlx::Error>
where
    R: Rng + ?Sized,
{
    let mut tx = pool.begin().await?;

    let mut category_ids: Vec<DbId> = Vec::with_capacity(CATEGORY_COUNT);
    for _ in 0..CATEGORY_COUNT {
        let input = CategoryInput {
            name: catch_phrase(rng),
            description: paragraph(rng),
        };
        category_ids.push(CategoryRepo::create(&mut *tx, &input).await?.id);
    }
    tracing::info!(count = category_ids.len(), "Created categories");

    let mut participant_ids: Vec<DbId> = Vec::with_capacity(PARTICIPANT_COUNT);
    for _ in 0..PARTICIPANT_COUNT {
        let (first, last) = person_name(rng);
        let mut email = random_email(rng, first, last);
        while ParticipantRepo::email_taken(&mut *tx, &email, None).await? {
            email = random_email(rng, first, last);
        }
        let input = ParticipantInput {
            email,
            name: format!("{first} {last}"),
        };
        participant_ids.push(ParticipantRepo::create(&mut *tx, &input).await?.id);
    }
    tracing::info!(count = participant_ids.len(), "Created participants");

    let mut events = 0;
    for _ in 0..EVENT_COUNT {
        let attendee_count =
            rng.random_range(MIN_PARTICIPANTS_PER_EVENT..=MAX_PARTICIPANTS_PER_EVENT);
        let mut attendees: Vec<DbId> = participant_ids
            .choose_multiple(&mut *rng, attendee_count)
            .copied()
            .collect();
        attendees.sort_unstable();

        let input = EventInput {
            name: sentence(rng, 4),
            description: paragraph(rng),
            date: date_this_year(rng, today),
            time: random_time(rng),
            location: address(rng),
            category_id: category_ids.choose(&mut *rng).copied(),
            participant_ids: attendees,
        };
        EventRepo::create_inner(&mut tx, &input).await?;
        events += 1;
    }
    tracing::info!(count = events, "Created events");

    tx.commit().await?;

    Ok(SeedReport {
        categories: category_ids.len(),
        participants: participant_ids.len(),
        events,
    })
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// e.g. "Orchestrate seamless communities".
fn catch_phrase<R: Rng + ?Sized>(rng: &mut R) -> String {
    let phrase = format!(
        "{} {} {}",
        pick(rng, BS_VERBS),
        pick(rng, BS_ADJECTIVES),
        pick(rng, BS_NOUNS)
    );
    capitalize(&phrase)
}

fn person_name<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str) {
    (pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

/// e.g. "ada.lovelace4821@example.org".
fn random_email<R: Rng + ?Sized>(rng: &mut R, first: &str, last: &str) -> String {
    let suffix = rng.random_range(1..=EMAIL_SUFFIX_MAX);
    format!(
        "{}.{}{suffix}@{}",
        first.to_lowercase(),
        last.to_lowercase(),
        pick(rng, EMAIL_DOMAINS)
    )
}

fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
    let body: Vec<&str> = (0..words).map(|_| pick(rng, LOREM)).collect();
    format!("{}.", capitalize(&body.join(" ")))
}

fn paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    let sentences = rng.random_range(3..=5);
    (0..sentences)
        .map(|_| {
            let words = rng.random_range(6..=12);
            sentence(rng, words)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let number = rng.random_range(1..=999);
    let postcode = rng.random_range(10000..=99999);
    format!(
        "{number} {}, {} {postcode}",
        pick(rng, STREETS),
        pick(rng, CITIES)
    )
}

/// A day between January 1st of `today`'s year and `today`, inclusive.
fn date_this_year<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> NaiveDate {
    let start = today.with_ordinal(1).unwrap_or(today);
    let span = (today - start).num_days();
    start + Duration::days(rng.random_range(0..=span))
}

fn random_time<R: Rng + ?Sized>(rng: &mut R) -> NaiveTime {
    let seconds = rng.random_range(0..86_400u32);
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or_default()
}
