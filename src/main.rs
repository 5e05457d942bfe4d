// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Parkplan application shell.
//!
//! Wires configuration, session, and the HTTP store together, runs the
//! baseline seeding routine, and loads the initial collections.

use std::sync::Arc;

use parkplan::{
    auth::{AuthProvider, GuestAuth, StaticAuth},
    config::Config,
    store::HttpStore,
    views, AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(endpoint = %config.data_api_url, "Starting parkplan");

    let store = Arc::new(HttpStore::new(&config.data_api_url, &config.data_api_key));
    let auth: Arc<dyn AuthProvider> = match &config.local_user {
        Some(user) => Arc::new(StaticAuth::new(user.clone())),
        None => Arc::new(GuestAuth),
    };
    let state = AppState::new(config, store, auth);

    if state.config.seed_on_start {
        match state.seed().await {
            Ok(outcome) => tracing::info!(?outcome, "Seeding finished"),
            Err(error) => tracing::error!(error = %error, "Seeding failed"),
        }
    }

    state.parks.fetch_all().await?;
    let parks = state.parks.items().await;
    let labels = views::activity_labels(&parks);
    tracing::info!(
        parks = parks.len(),
        activity_labels = labels.len(),
        "Park catalog loaded"
    );

    state.trips.fetch_all().await?;
    let trips = state.trips.items().await;
    let today = chrono::Utc::now().date_naive();
    let buckets = views::bucket_trips(&trips, today);
    tracing::info!(
        current = buckets.current.len(),
        upcoming = buckets.upcoming.len(),
        past = buckets.past.len(),
        "Trips loaded"
    );

    Ok(())
}

/// Initialize structured logging with env-filter overrides.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("parkplan=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
