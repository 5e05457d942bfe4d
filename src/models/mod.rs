// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models and the entity descriptor trait.
//!
//! Each model mirrors the wire contract of the managed data API (camelCase
//! field names). The `Entity` trait is what lets the store, gateway, and
//! controller collapse the three per-entity CRUD stacks into one generic one.

pub mod activity;
pub mod park;
pub mod trip;

pub use activity::{Activity, CreateActivity, UpdateActivity};
pub use park::{CreatePark, Park, UpdatePark};
pub use trip::{CreateTrip, Trip, UpdateTrip};

use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::auth::UserIdentity;
use crate::error::DataError;
use crate::store::DataStore;

/// Descriptor for a model served by the managed data API.
///
/// Creation inputs exclude the identifier (store-assigned); update inputs
/// carry a required id plus optional fields only. Foreign keys are fixed at
/// creation and not updatable.
#[allow(async_fn_in_trait)]
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Wire model name, e.g. `"Park"`.
    const MODEL: &'static str;
    /// Plural form used by list operations, e.g. `"Parks"`.
    const MODEL_PLURAL: &'static str;
    /// Field selection set for queries.
    const FIELDS: &'static [&'static str];

    type Create: Serialize + Validate + Clone + Send + Sync + 'static;
    type Update: Serialize + Validate + Clone + Send + Sync + 'static;

    /// Store-assigned identifier, immutable once assigned.
    fn id(&self) -> &str;

    /// The id addressed by a partial update.
    fn update_id(update: &Self::Update) -> &str;

    /// Stamp the session identity onto a create input. No-op unless the
    /// entity carries an owner field.
    fn stamp_owner(_input: &mut Self::Create, _owner: &UserIdentity) {}

    /// Referential and range checks before a create reaches the store.
    async fn check_create<S: DataStore>(
        _store: &S,
        _input: &Self::Create,
    ) -> Result<(), DataError> {
        Ok(())
    }

    /// Referential and range checks before an update reaches the store.
    /// Partial updates are checked against the current stored state.
    async fn check_update<S: DataStore>(
        _store: &S,
        _update: &Self::Update,
    ) -> Result<(), DataError> {
        Ok(())
    }

    /// Deletion policy hook, run before the delete itself. Used to block a
    /// delete that would orphan referencing entities, or to cascade.
    async fn prepare_delete<S: DataStore>(_store: &S, _id: &str) -> Result<(), DataError> {
        Ok(())
    }
}
