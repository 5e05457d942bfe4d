// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed per-entity gateway over the remote store.
//!
//! One generic façade covers Park, Trip, and Activity. It validates inputs,
//! requires a session for every mutation, stamps the owner identity, runs
//! the entity's referential checks, and translates absence into a
//! `NotFound` error so callers can tell it apart from a transport failure.

use std::marker::PhantomData;
use std::sync::Arc;

use validator::Validate;

use crate::auth::{AuthProvider, UserIdentity};
use crate::error::DataError;
use crate::models::Entity;
use crate::store::{DataStore, ListQuery};

/// CRUD façade for one entity type.
pub struct EntityGateway<E: Entity, S: DataStore> {
    store: Arc<S>,
    auth: Arc<dyn AuthProvider>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity, S: DataStore> Clone for EntityGateway<E, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            auth: self.auth.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity, S: DataStore> EntityGateway<E, S> {
    pub fn new(store: Arc<S>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            store,
            auth,
            _entity: PhantomData,
        }
    }

    /// All entities visible to the caller, optionally filtered.
    pub async fn list(&self, query: ListQuery) -> Result<Vec<E>, DataError> {
        self.store
            .list::<E>(query)
            .await
            .map_err(|e| self.logged("list", e))
    }

    /// A single entity; absence is reported as `NotFound`.
    pub async fn get(&self, id: &str) -> Result<E, DataError> {
        match self.store.get::<E>(id).await {
            Ok(Some(entity)) => Ok(entity),
            Ok(None) => Err(DataError::not_found(format!(
                "{} {id} not found",
                E::MODEL
            ))),
            Err(e) => Err(self.logged("get", e)),
        }
    }

    /// Create an entity. Requires a session; the owner identity is stamped
    /// here and never taken from the input.
    pub async fn create(&self, mut input: E::Create) -> Result<E, DataError> {
        let owner = self.require_session()?;
        validate(&input)?;
        E::stamp_owner(&mut input, &owner);
        E::check_create(&*self.store, &input).await?;
        self.store
            .create::<E>(&input)
            .await
            .map_err(|e| self.logged("create", e))
    }

    /// Apply a partial update. Fields absent from the input are unchanged.
    pub async fn update(&self, update: E::Update) -> Result<E, DataError> {
        self.require_session()?;
        validate(&update)?;
        E::check_update(&*self.store, &update).await?;
        self.store
            .update::<E>(&update)
            .await
            .map_err(|e| self.logged("update", e))
    }

    /// Delete by id, after the entity's deletion-policy hook has run.
    pub async fn delete(&self, id: &str) -> Result<(), DataError> {
        self.require_session()?;
        E::prepare_delete(&*self.store, id).await?;
        self.store
            .delete::<E>(id)
            .await
            .map_err(|e| self.logged("delete", e))
    }

    fn require_session(&self) -> Result<UserIdentity, DataError> {
        self.auth.current_user().ok_or_else(|| {
            tracing::debug!(model = E::MODEL, "Mutation attempted without a session");
            DataError::unauthorized()
        })
    }

    fn logged(&self, op: &str, error: DataError) -> DataError {
        tracing::warn!(
            model = E::MODEL,
            op,
            kind = %error.kind,
            error = %error.message,
            "Data operation failed"
        );
        error
    }
}

fn validate<T: Validate>(input: &T) -> Result<(), DataError> {
    input
        .validate()
        .map_err(|e| DataError::validation(e.to_string()))
}
