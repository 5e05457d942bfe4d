// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Parkplan: plan trips to national parks.
//!
//! This crate provides the data-model core of a trip planner: typed models
//! with write-time invariants, a generic CRUD gateway over a managed data
//! API, local-cache entity controllers, pure view derivations, and a
//! one-shot seeding routine.

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod models;
pub mod seed;
pub mod store;
pub mod views;

use std::sync::Arc;

use auth::AuthProvider;
use config::Config;
use controller::EntityController;
use error::Result;
use gateway::EntityGateway;
use models::{Activity, Park, Trip};
use seed::{SeedOutcome, Seeder};
use store::{DataStore, FieldFilter};

/// Shared application state: the root that owns config, session, store
/// handle, controllers, and the seeding gate.
pub struct AppState<S: DataStore> {
    pub config: Config,
    pub auth: Arc<dyn AuthProvider>,
    pub store: Arc<S>,
    pub parks: EntityController<Park, S>,
    pub trips: EntityController<Trip, S>,
    seeder: tokio::sync::Mutex<Seeder>,
}

impl<S: DataStore> AppState<S> {
    pub fn new(config: Config, store: Arc<S>, auth: Arc<dyn AuthProvider>) -> Self {
        let parks = EntityController::new(EntityGateway::new(store.clone(), auth.clone()));
        let trips = EntityController::new(EntityGateway::new(store.clone(), auth.clone()));
        Self {
            config,
            auth,
            store,
            parks,
            trips,
            seeder: tokio::sync::Mutex::new(Seeder::new()),
        }
    }

    /// Controller over the activities of a single trip.
    pub fn trip_activities(&self, trip_id: &str) -> EntityController<Activity, S> {
        EntityController::scoped(
            EntityGateway::new(self.store.clone(), self.auth.clone()),
            FieldFilter {
                field: "tripId",
                value: trip_id.to_string(),
            },
        )
    }

    /// Run the one-shot seeding routine behind its session gate.
    pub async fn seed(&self) -> Result<SeedOutcome> {
        let parks = EntityGateway::<Park, S>::new(self.store.clone(), self.auth.clone());
        self.seeder.lock().await.run(&parks).await
    }
}
