// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Entity state controllers.
//!
//! A controller holds the fetched collection for one entity type and keeps
//! it in sync from mutation responses instead of re-fetching. State lives
//! behind an async lock that is only held between suspension points;
//! overlapping operations interleave, and for mutations the last gateway
//! response wins. Fetches carry a monotonic generation so a response that
//! has been superseded by a newer fetch is discarded rather than clobbering
//! newer state.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::DataError;
use crate::gateway::EntityGateway;
use crate::models::Entity;
use crate::store::{DataStore, FieldFilter, ListQuery};

struct ControllerState<E> {
    items: Vec<E>,
    loading: bool,
    last_error: Option<DataError>,
}

impl<E> Default for ControllerState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            last_error: None,
        }
    }
}

/// Local cache plus mutation surface for one entity type.
pub struct EntityController<E: Entity, S: DataStore> {
    gateway: EntityGateway<E, S>,
    /// Optional scope filter applied to every `fetch_all`, e.g. the
    /// activities of a single trip.
    scope: Option<FieldFilter>,
    state: RwLock<ControllerState<E>>,
    fetch_generation: AtomicU64,
}

impl<E: Entity, S: DataStore> EntityController<E, S> {
    pub fn new(gateway: EntityGateway<E, S>) -> Self {
        Self {
            gateway,
            scope: None,
            state: RwLock::new(ControllerState::default()),
            fetch_generation: AtomicU64::new(0),
        }
    }

    /// A controller whose collection is the subset matching `scope`.
    pub fn scoped(gateway: EntityGateway<E, S>, scope: FieldFilter) -> Self {
        Self {
            scope: Some(scope),
            ..Self::new(gateway)
        }
    }

    /// Snapshot of the fetched collection, in fetch/insertion order.
    pub async fn items(&self) -> Vec<E> {
        self.state.read().await.items.clone()
    }

    /// Whether an operation is currently in flight.
    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// The error recorded by the most recent operation, if any.
    pub async fn last_error(&self) -> Option<DataError> {
        self.state.read().await.last_error.clone()
    }

    /// Fetch the whole collection and replace the local one wholesale.
    ///
    /// If a newer `fetch_all` started while this one was in flight, the
    /// stale response is discarded and the local collection is untouched.
    pub async fn fetch_all(&self) -> Result<(), DataError> {
        let generation = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.loading = true;

        let query = match &self.scope {
            Some(filter) => ListQuery::all().with_filter(filter.clone()),
            None => ListQuery::all(),
        };
        let result = self.gateway.list(query).await;

        let mut state = self.state.write().await;
        if generation != self.fetch_generation.load(Ordering::SeqCst) {
            tracing::debug!(model = E::MODEL, generation, "Discarding stale fetch response");
            return result.map(|_| ());
        }
        state.loading = false;
        match result {
            Ok(items) => {
                state.items = items;
                state.last_error = None;
                Ok(())
            }
            Err(error) => {
                state.last_error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Fetch a single entity without touching the local collection.
    pub async fn fetch_one(&self, id: &str) -> Result<E, DataError> {
        self.state.write().await.loading = true;
        let result = self.gateway.get(id).await;
        self.settle(result).await
    }

    /// Create an entity; on success it is appended to the local collection,
    /// unless it falls outside the controller's scope.
    pub async fn add(&self, input: E::Create) -> Result<E, DataError> {
        self.state.write().await.loading = true;
        let result = self.gateway.create(input).await;
        let entity = self.settle(result).await?;
        if self.in_scope(&entity) {
            self.state.write().await.items.push(entity.clone());
        }
        Ok(entity)
    }

    /// Apply a partial update; on success the matching local entry is
    /// replaced by id equality.
    pub async fn edit(&self, update: E::Update) -> Result<E, DataError> {
        self.state.write().await.loading = true;
        let result = self.gateway.update(update).await;
        let entity = self.settle(result).await?;
        let mut state = self.state.write().await;
        if let Some(slot) = state.items.iter_mut().find(|item| item.id() == entity.id()) {
            *slot = entity.clone();
        }
        Ok(entity)
    }

    /// Delete an entity; on success the matching local entry is removed.
    pub async fn remove(&self, id: &str) -> Result<(), DataError> {
        self.state.write().await.loading = true;
        let result = self.gateway.delete(id).await;
        self.settle(result).await?;
        self.state.write().await.items.retain(|item| item.id() != id);
        Ok(())
    }

    /// Whether an entity belongs in this controller's collection. The scope
    /// filter addresses a wire field, so the check goes through the same
    /// serialized form the store filters on.
    fn in_scope(&self, entity: &E) -> bool {
        let Some(filter) = &self.scope else {
            return true;
        };
        match serde_json::to_value(entity) {
            Ok(value) => {
                value.get(filter.field).and_then(Value::as_str) == Some(filter.value.as_str())
            }
            Err(_) => false,
        }
    }

    /// Clear the in-flight flag and record the operation's outcome.
    async fn settle<T>(&self, result: Result<T, DataError>) -> Result<T, DataError> {
        let mut state = self.state.write().await;
        state.loading = false;
        match &result {
            Ok(_) => state.last_error = None,
            Err(error) => state.last_error = Some(error.clone()),
        }
        result
    }
}
