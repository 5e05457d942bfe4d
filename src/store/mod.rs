// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Remote CRUD store boundary.
//!
//! The managed data API is an external collaborator; `DataStore` is its
//! local seam. `HttpStore` speaks the real wire protocol, `MemoryStore`
//! serves tests and offline runs.

pub mod http;
pub mod memory;

pub use http::HttpStore;
pub use memory::MemoryStore;

use crate::error::DataError;
use crate::models::Entity;

/// Equality filter on a single wire field, e.g. `tripId == "trip-3"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: &'static str,
    pub value: String,
}

/// Constraints for a list operation.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filter: Option<FieldFilter>,
    pub limit: Option<u32>,
}

impl ListQuery {
    /// All entities visible to the caller.
    pub fn all() -> Self {
        Self::default()
    }

    /// Entities whose `field` equals `value`.
    pub fn filtered(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            filter: Some(FieldFilter {
                field,
                value: value.into(),
            }),
            limit: None,
        }
    }

    pub fn with_filter(mut self, filter: FieldFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The five CRUD operations of the managed store, generic over the entity.
///
/// Every operation is an async suspension point. Implementations do not
/// retry; the transport is treated as already reliable at this boundary.
#[allow(async_fn_in_trait)]
pub trait DataStore: Send + Sync + 'static {
    /// All entities of type `E` visible under the store's authorization
    /// rules, optionally constrained by an equality filter and a limit.
    async fn list<E: Entity>(&self, query: ListQuery) -> Result<Vec<E>, DataError>;

    /// A single entity, or `Ok(None)` when absent.
    async fn get<E: Entity>(&self, id: &str) -> Result<Option<E>, DataError>;

    /// Create an entity; the store assigns the identifier.
    async fn create<E: Entity>(&self, input: &E::Create) -> Result<E, DataError>;

    /// Partial update; fields absent from the input are left unchanged.
    async fn update<E: Entity>(&self, update: &E::Update) -> Result<E, DataError>;

    /// Delete by id.
    async fn delete<E: Entity>(&self, id: &str) -> Result<(), DataError>;
}
