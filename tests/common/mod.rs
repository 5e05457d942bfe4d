// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;

use chrono::NaiveDate;
use parkplan::auth::{GuestAuth, StaticAuth};
use parkplan::config::Config;
use parkplan::models::{CreateActivity, CreatePark, CreateTrip};
use parkplan::store::MemoryStore;
use parkplan::AppState;

/// App state over an in-memory store with a signed-in test user.
#[allow(dead_code)]
pub fn test_state() -> AppState<MemoryStore> {
    AppState::new(
        Config::default(),
        Arc::new(MemoryStore::new()),
        Arc::new(StaticAuth::new("user-1")),
    )
}

/// App state with no session (read-only guest).
#[allow(dead_code)]
pub fn guest_state() -> AppState<MemoryStore> {
    AppState::new(Config::default(), Arc::new(MemoryStore::new()), Arc::new(GuestAuth))
}

#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

#[allow(dead_code)]
pub fn park_input(name: &str, location: &str) -> CreatePark {
    CreatePark {
        name: name.to_string(),
        location: location.to_string(),
        description: None,
        activities: vec!["Hiking".to_string()],
        image_url: None,
    }
}

#[allow(dead_code)]
pub fn trip_input(park_id: &str, start: &str, end: &str) -> CreateTrip {
    CreateTrip {
        title: "Summer trip".to_string(),
        start_date: date(start),
        end_date: date(end),
        notes: None,
        user_id: None,
        park_id: park_id.to_string(),
    }
}

#[allow(dead_code)]
pub fn activity_input(trip_id: &str, day: &str) -> CreateActivity {
    CreateActivity {
        name: "Morning hike".to_string(),
        date: date(day),
        location: None,
        notes: None,
        completed: false,
        trip_id: trip_id.to_string(),
    }
}
