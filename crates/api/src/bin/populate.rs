//! Fill the database with demo categories, participants and events.
//!
//! Reads `DATABASE_URL` (a `.env` file is honoured), applies pending
//! migrations, then inserts the demo data set. Set `SEED` to an integer for a
//! reproducible run.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventdesk_populate=info,eventdesk_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = eventdesk_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    eventdesk_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let mut rng = match std::env::var("SEED") {
        Ok(raw) => {
            let seed: u64 = raw.parse().expect("SEED must be a valid u64");
            tracing::info!(seed, "Using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        Err(_) => StdRng::from_os_rng(),
    };
    let today = chrono::Local::now().date_naive();

    match eventdesk_db::seed::populate(&pool, &mut rng, today).await {
        Ok(report) => {
            tracing::info!(
                categories = report.categories,
                participants = report.participants,
                events = report.events,
                "Database populated successfully",
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Populating the database failed");
            pool.close().await;
            std::process::exit(1);
        }
    }

    pool.close().await;
}
