// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Controller cache semantics: read-after-write without re-fetching,
//! failure isolation, scope filters, and stale-fetch handling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parkplan::auth::StaticAuth;
use parkplan::controller::EntityController;
use parkplan::error::{DataError, ErrorKind};
use parkplan::gateway::EntityGateway;
use parkplan::models::{Entity, Park, UpdateActivity, UpdateTrip};
use parkplan::store::{DataStore, ListQuery, MemoryStore};
use tokio::sync::Notify;

mod common;
use common::{activity_input, date, park_input, test_state, trip_input};

/// Store whose first `list` takes its snapshot immediately but does not
/// return it until `release` is called. Lets a test hold one fetch in
/// flight while a later fetch completes.
struct GatedListStore {
    inner: MemoryStore,
    gate: Notify,
    hold_next_list: AtomicBool,
}

impl GatedListStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            gate: Notify::new(),
            hold_next_list: AtomicBool::new(true),
        }
    }

    fn release(&self) {
        self.gate.notify_one();
    }
}

impl DataStore for GatedListStore {
    async fn list<E: Entity>(&self, query: ListQuery) -> Result<Vec<E>, DataError> {
        let snapshot = self.inner.list(query).await;
        if self.hold_next_list.swap(false, Ordering::SeqCst) {
            self.gate.notified().await;
        }
        snapshot
    }

    async fn get<E: Entity>(&self, id: &str) -> Result<Option<E>, DataError> {
        self.inner.get(id).await
    }

    async fn create<E: Entity>(&self, input: &E::Create) -> Result<E, DataError> {
        self.inner.create(input).await
    }

    async fn update<E: Entity>(&self, update: &E::Update) -> Result<E, DataError> {
        self.inner.update(update).await
    }

    async fn delete<E: Entity>(&self, id: &str) -> Result<(), DataError> {
        self.inner.delete::<E>(id).await
    }
}

#[tokio::test]
async fn test_fetch_all_replaces_collection_wholesale() {
    let state = test_state();
    state.parks.add(park_input("Zion", "Utah")).await.unwrap();
    state.parks.add(park_input("Acadia", "Maine")).await.unwrap();

    // A different view of the same store starts empty until it fetches
    let fresh = parkplan::AppState::new(
        state.config.clone(),
        state.store.clone(),
        state.auth.clone(),
    );
    assert!(fresh.parks.items().await.is_empty());

    fresh.parks.fetch_all().await.unwrap();
    let items = fresh.parks.items().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Zion");
    assert!(!fresh.parks.loading().await);
    assert!(fresh.parks.last_error().await.is_none());
}

#[tokio::test]
async fn test_add_appends_without_refetch() {
    let state = test_state();
    state.parks.fetch_all().await.unwrap();
    assert!(state.parks.items().await.is_empty());

    let created = state.parks.add(park_input("Zion", "Utah")).await.unwrap();
    let items = state.parks.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, created.id);
}

#[tokio::test]
async fn test_add_failure_leaves_collection_untouched_and_records_error() {
    let state = test_state();
    state.parks.add(park_input("Zion", "Utah")).await.unwrap();
    let before = state.parks.items().await;

    state.store.fail_next("create", 1);
    let error = state
        .parks
        .add(park_input("Acadia", "Maine"))
        .await
        .expect_err("injected create failure");
    assert_eq!(error.kind, ErrorKind::Transport);

    assert_eq!(state.parks.items().await.len(), before.len());
    let recorded = state.parks.last_error().await.expect("error recorded");
    assert_eq!(recorded.kind, ErrorKind::Transport);
    assert!(!state.parks.loading().await);
}

#[tokio::test]
async fn test_edit_replaces_matching_entry_only() {
    let state = test_state();
    let park = state.parks.add(park_input("Zion", "Utah")).await.unwrap();
    let trip_a = state
        .trips
        .add(trip_input(&park.id, "2026-09-01", "2026-09-05"))
        .await
        .unwrap();
    let trip_b = state
        .trips
        .add(trip_input(&park.id, "2026-10-01", "2026-10-05"))
        .await
        .unwrap();

    state
        .trips
        .edit(UpdateTrip {
            id: trip_b.id.clone(),
            title: Some("Fall colors".to_string()),
            start_date: None,
            end_date: None,
            notes: None,
        })
        .await
        .unwrap();

    let items = state.trips.items().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, trip_a.title);
    assert_eq!(items[1].title, "Fall colors");
    // Unspecified fields are unchanged
    assert_eq!(items[1].start_date, trip_b.start_date);
    assert_eq!(items[1].end_date, trip_b.end_date);
}

#[tokio::test]
async fn test_edit_completed_flag_leaves_other_fields_unchanged() {
    let state = test_state();
    let park = state.parks.add(park_input("Zion", "Utah")).await.unwrap();
    let trip = state
        .trips
        .add(trip_input(&park.id, "2026-09-01", "2026-09-05"))
        .await
        .unwrap();
    let activities = state.trip_activities(&trip.id);
    let mut input = activity_input(&trip.id, "2026-09-02");
    input.location = Some("Angels Landing".to_string());
    let activity = activities.add(input).await.unwrap();

    let updated = activities
        .edit(UpdateActivity {
            id: activity.id.clone(),
            name: None,
            date: None,
            location: None,
            notes: None,
            completed: Some(true),
        })
        .await
        .unwrap();

    assert!(updated.completed);
    assert_eq!(updated.name, activity.name);
    assert_eq!(updated.date, activity.date);
    assert_eq!(updated.location, activity.location);

    let items = activities.items().await;
    assert_eq!(items.len(), 1);
    assert!(items[0].completed);
}

#[tokio::test]
async fn test_edit_failure_leaves_collection_untouched() {
    let state = test_state();
    let park = state.parks.add(park_input("Zion", "Utah")).await.unwrap();

    state.store.fail_next("update", 1);
    let error = state
        .parks
        .edit(parkplan::models::UpdatePark {
            id: park.id.clone(),
            name: Some("Renamed".to_string()),
            location: None,
            description: None,
            activities: None,
            image_url: None,
        })
        .await
        .expect_err("injected update failure");
    assert_eq!(error.kind, ErrorKind::Transport);
    assert_eq!(state.parks.items().await[0].name, "Zion");
}

#[tokio::test]
async fn test_remove_drops_matching_entry() {
    let state = test_state();
    let zion = state.parks.add(park_input("Zion", "Utah")).await.unwrap();
    state.parks.add(park_input("Acadia", "Maine")).await.unwrap();

    state.parks.remove(&zion.id).await.unwrap();
    let items = state.parks.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Acadia");
}

#[tokio::test]
async fn test_remove_failure_leaves_collection_untouched() {
    let state = test_state();
    let park = state.parks.add(park_input("Zion", "Utah")).await.unwrap();

    state.store.fail_next("delete", 1);
    state
        .parks
        .remove(&park.id)
        .await
        .expect_err("injected delete failure");
    assert_eq!(state.parks.items().await.len(), 1);
}

#[tokio::test]
async fn test_fetch_one_does_not_mutate_collection() {
    let state = test_state();
    let park = state.parks.add(park_input("Zion", "Utah")).await.unwrap();

    let fresh = parkplan::AppState::new(
        state.config.clone(),
        state.store.clone(),
        state.auth.clone(),
    );
    let fetched = fresh.parks.fetch_one(&park.id).await.unwrap();
    assert_eq!(fetched.id, park.id);
    assert!(fresh.parks.items().await.is_empty());

    let error = fresh.parks.fetch_one("park-999").await.expect_err("absent");
    assert_eq!(error.kind, ErrorKind::NotFound);
    assert_eq!(fresh.parks.last_error().await, Some(error));
}

#[tokio::test]
async fn test_scoped_activity_controller_sees_only_its_trip() {
    let state = test_state();
    let park = state.parks.add(park_input("Zion", "Utah")).await.unwrap();
    let trip_a = state
        .trips
        .add(trip_input(&park.id, "2026-09-01", "2026-09-05"))
        .await
        .unwrap();
    let trip_b = state
        .trips
        .add(trip_input(&park.id, "2026-10-01", "2026-10-05"))
        .await
        .unwrap();

    let activities_a = state.trip_activities(&trip_a.id);
    let activities_b = state.trip_activities(&trip_b.id);
    activities_a
        .add(activity_input(&trip_a.id, "2026-09-02"))
        .await
        .unwrap();
    activities_a
        .add(activity_input(&trip_a.id, "2026-09-03"))
        .await
        .unwrap();
    activities_b
        .add(activity_input(&trip_b.id, "2026-10-02"))
        .await
        .unwrap();

    activities_a.fetch_all().await.unwrap();
    activities_b.fetch_all().await.unwrap();
    assert_eq!(activities_a.items().await.len(), 2);
    assert_eq!(activities_b.items().await.len(), 1);
    assert_eq!(activities_b.items().await[0].date, date("2026-10-02"));
}

#[tokio::test]
async fn test_scoped_add_does_not_cache_out_of_scope_entity() {
    let state = test_state();
    let park = state.parks.add(park_input("Zion", "Utah")).await.unwrap();
    let trip_a = state
        .trips
        .add(trip_input(&park.id, "2026-09-01", "2026-09-05"))
        .await
        .unwrap();
    let trip_b = state
        .trips
        .add(trip_input(&park.id, "2026-10-01", "2026-10-05"))
        .await
        .unwrap();

    let activities_a = state.trip_activities(&trip_a.id);
    activities_a
        .add(activity_input(&trip_a.id, "2026-09-02"))
        .await
        .unwrap();

    // Creating through the wrong controller still reaches the store...
    let stray = activities_a
        .add(activity_input(&trip_b.id, "2026-10-02"))
        .await
        .unwrap();
    assert_eq!(stray.trip_id, trip_b.id);
    assert_eq!(state.store.count("Activity"), 2);

    // ...but the scoped collection only holds its own trip's activities
    let items = activities_a.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].trip_id, trip_a.id);
}

#[tokio::test]
async fn test_stale_fetch_response_is_discarded() {
    let store = Arc::new(GatedListStore::new());
    let auth = Arc::new(StaticAuth::new("user-1"));
    let gateway = EntityGateway::<Park, GatedListStore>::new(store.clone(), auth.clone());
    let parks: EntityController<Park, GatedListStore> =
        EntityController::new(EntityGateway::new(store.clone(), auth));
    gateway.create(park_input("Zion", "Utah")).await.unwrap();

    // The first fetch snapshots one park, then parks at the gate. The
    // second fetch starts later, sees two parks, and finishes first.
    let stale_fetch = parks.fetch_all();
    let newer_fetch = async {
        gateway.create(park_input("Acadia", "Maine")).await.unwrap();
        parks.fetch_all().await.unwrap();
        store.release();
    };
    let (stale_result, ()) = tokio::join!(stale_fetch, newer_fetch);
    stale_result.unwrap();

    // The held-back one-park response must not replace the newer collection
    let items = parks.items().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].name, "Acadia");
    assert!(!parks.loading().await);
    assert!(parks.last_error().await.is_none());
}

#[tokio::test]
async fn test_overlapping_fetches_converge_on_store_state() {
    let state = test_state();
    state.parks.add(park_input("Zion", "Utah")).await.unwrap();
    state.parks.add(park_input("Acadia", "Maine")).await.unwrap();

    // Two overlapping fetches; whichever response is applied, the result
    // must be the store's collection, applied at most once.
    let (a, b) = tokio::join!(state.parks.fetch_all(), state.parks.fetch_all());
    a.unwrap();
    b.unwrap();
    assert_eq!(state.parks.items().await.len(), 2);
    assert!(!state.parks.loading().await);
}
