// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for tests and offline/local runs.
//!
//! Documents are kept as JSON objects keyed by (model, id), with a global
//! sequence number preserving insertion order for lists. Failures can be
//! injected per operation to exercise error paths.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde_json::Value;

use crate::error::DataError;
use crate::models::Entity;
use crate::store::{DataStore, ListQuery};

struct StoredDoc {
    seq: u64,
    body: Value,
}

struct FailurePlan {
    /// Invocations to let through before failing.
    skip: u32,
    remaining: u32,
}

/// DashMap-backed document store with store-assigned sequential ids.
#[derive(Default)]
pub struct MemoryStore {
    documents: DashMap<(&'static str, String), StoredDoc>,
    next_seq: AtomicU64,
    /// Pending forced failures per operation name.
    failures: DashMap<&'static str, FailurePlan>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the next `count` invocations of `op` ("list", "get", "create",
    /// "update", "delete") to fail with a transport error.
    pub fn fail_next(&self, op: &'static str, count: u32) {
        self.fail_after(op, 0, count);
    }

    /// Let `skip` invocations of `op` through, then fail the next `count`.
    pub fn fail_after(&self, op: &'static str, skip: u32, count: u32) {
        self.failures.insert(
            op,
            FailurePlan {
                skip,
                remaining: count,
            },
        );
    }

    fn take_failure(&self, op: &'static str) -> Option<DataError> {
        let mut plan = self.failures.get_mut(op)?;
        if plan.skip > 0 {
            plan.skip -= 1;
            return None;
        }
        if plan.remaining == 0 {
            return None;
        }
        plan.remaining -= 1;
        Some(DataError::transport(format!("injected {op} failure")))
    }

    /// Number of stored documents for a model, regardless of filters.
    pub fn count(&self, model: &str) -> usize {
        self.documents
            .iter()
            .filter(|entry| entry.key().0 == model)
            .count()
    }

    fn decode<E: Entity>(body: Value) -> Result<E, DataError> {
        serde_json::from_value(body).map_err(|e| {
            DataError::transport(format!("stored document does not match {}: {e}", E::MODEL))
        })
    }
}

impl DataStore for MemoryStore {
    async fn list<E: Entity>(&self, query: ListQuery) -> Result<Vec<E>, DataError> {
        if let Some(error) = self.take_failure("list") {
            return Err(error);
        }

        let mut docs: Vec<(u64, Value)> = self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == E::MODEL)
            .map(|entry| (entry.value().seq, entry.value().body.clone()))
            .collect();
        docs.sort_by_key(|(seq, _)| *seq);

        let mut items = Vec::new();
        for (_, body) in docs {
            if let Some(filter) = &query.filter {
                let matches = body.get(filter.field).and_then(Value::as_str)
                    == Some(filter.value.as_str());
                if !matches {
                    continue;
                }
            }
            items.push(Self::decode::<E>(body)?);
            if let Some(limit) = query.limit {
                if items.len() as u32 >= limit {
                    break;
                }
            }
        }
        Ok(items)
    }

    async fn get<E: Entity>(&self, id: &str) -> Result<Option<E>, DataError> {
        if let Some(error) = self.take_failure("get") {
            return Err(error);
        }

        match self.documents.get(&(E::MODEL, id.to_string())) {
            Some(entry) => Ok(Some(Self::decode::<E>(entry.value().body.clone())?)),
            None => Ok(None),
        }
    }

    async fn create<E: Entity>(&self, input: &E::Create) -> Result<E, DataError> {
        if let Some(error) = self.take_failure("create") {
            return Err(error);
        }

        let mut body = serde_json::to_value(input)
            .map_err(|e| DataError::rejected(format!("unserializable create input: {e}")))?;
        let object = body
            .as_object_mut()
            .ok_or_else(|| DataError::rejected("create input must be an object"))?;

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("{}-{seq}", E::MODEL.to_lowercase());
        object.insert("id".to_string(), Value::String(id.clone()));

        let entity = Self::decode::<E>(body.clone())?;
        self.documents.insert((E::MODEL, id), StoredDoc { seq, body });
        Ok(entity)
    }

    async fn update<E: Entity>(&self, update: &E::Update) -> Result<E, DataError> {
        if let Some(error) = self.take_failure("update") {
            return Err(error);
        }

        let patch = serde_json::to_value(update)
            .map_err(|e| DataError::rejected(format!("unserializable update input: {e}")))?;
        let patch = match patch {
            Value::Object(map) => map,
            _ => return Err(DataError::rejected("update input must be an object")),
        };

        let id = E::update_id(update).to_string();
        let mut entry = self
            .documents
            .get_mut(&(E::MODEL, id.clone()))
            .ok_or_else(|| DataError::not_found(format!("{} {id} not found", E::MODEL)))?;
        let body = entry
            .value_mut()
            .body
            .as_object_mut()
            .ok_or_else(|| DataError::transport("stored document is not an object"))?;

        for (field, value) in patch {
            if field == "id" || value.is_null() {
                continue;
            }
            body.insert(field, value);
        }

        Self::decode::<E>(Value::Object(body.clone()))
    }

    async fn delete<E: Entity>(&self, id: &str) -> Result<(), DataError> {
        if let Some(error) = self.take_failure("delete") {
            return Err(error);
        }

        self.documents
            .remove(&(E::MODEL, id.to_string()))
            .map(|_| ())
            .ok_or_else(|| DataError::not_found(format!("{} {id} not found", E::MODEL)))
    }
}
