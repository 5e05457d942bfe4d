// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP adapter for the managed data API.
//!
//! The API speaks a GraphQL-style protocol: one POST endpoint, a
//! `{data, errors}` response envelope, and per-model operations named
//! `list{Plural}` / `get{Model}` / `create{Model}` / `update{Model}` /
//! `delete{Model}`. Transport failures and envelope errors are classified
//! into `DataError` kinds; no retrying happens here.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::{DataError, ErrorKind};
use crate::models::Entity;
use crate::store::{DataStore, ListQuery};

/// Client for the managed data API.
#[derive(Clone)]
pub struct HttpStore {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

/// Response envelope of the data API.
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<WireError>>,
}

#[derive(Deserialize)]
struct WireError {
    message: String,
}

impl HttpStore {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    async fn execute(&self, document: String, variables: Value) -> Result<Value, DataError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await
            .map_err(|e| DataError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::transport(format!(
                "data API returned HTTP {status}"
            )));
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| DataError::transport(format!("invalid response envelope: {e}")))?;

        if let Some(first) = envelope.errors.iter().flatten().next() {
            return Err(classify(&first.message));
        }

        envelope
            .data
            .ok_or_else(|| DataError::transport("response envelope carried no data"))
    }

    fn selection<E: Entity>() -> String {
        E::FIELDS.join(" ")
    }
}

/// The store reports authorization failures as plain messages; everything
/// else it refuses is a store-side rejection.
fn classify(message: &str) -> DataError {
    if message.contains("Unauthorized") || message.contains("Not Authorized") {
        DataError::new(ErrorKind::Unauthorized, message)
    } else {
        DataError::rejected(message)
    }
}

fn extract(data: &Value, field: &str) -> Value {
    data.get(field).cloned().unwrap_or(Value::Null)
}

impl DataStore for HttpStore {
    async fn list<E: Entity>(&self, query: ListQuery) -> Result<Vec<E>, DataError> {
        let field = format!("list{}", E::MODEL_PLURAL);
        let document = format!(
            "query List{plural}($filter: Model{model}FilterInput, $limit: Int) {{ \
             {field}(filter: $filter, limit: $limit) {{ items {{ {selection} }} }} }}",
            plural = E::MODEL_PLURAL,
            model = E::MODEL,
            selection = Self::selection::<E>(),
        );

        let filter = query.filter.as_ref().map(|f| {
            let mut eq = Map::new();
            eq.insert("eq".to_string(), Value::String(f.value.clone()));
            let mut obj = Map::new();
            obj.insert(f.field.to_string(), Value::Object(eq));
            Value::Object(obj)
        });

        let data = self
            .execute(document, json!({ "filter": filter, "limit": query.limit }))
            .await?;
        let items = extract(&data, &field)
            .get("items")
            .cloned()
            .ok_or_else(|| {
                DataError::transport(format!("{field} response carried no items"))
            })?;
        serde_json::from_value(items)
            .map_err(|e| DataError::transport(format!("malformed {} list payload: {e}", E::MODEL)))
    }

    async fn get<E: Entity>(&self, id: &str) -> Result<Option<E>, DataError> {
        let field = format!("get{}", E::MODEL);
        let document = format!(
            "query Get{model}($id: ID!) {{ {field}(id: $id) {{ {selection} }} }}",
            model = E::MODEL,
            selection = Self::selection::<E>(),
        );

        let data = self.execute(document, json!({ "id": id })).await?;
        match extract(&data, &field) {
            Value::Null => Ok(None),
            value => serde_json::from_value(value).map(Some).map_err(|e| {
                DataError::transport(format!("malformed {} payload: {e}", E::MODEL))
            }),
        }
    }

    async fn create<E: Entity>(&self, input: &E::Create) -> Result<E, DataError> {
        let field = format!("create{}", E::MODEL);
        let document = format!(
            "mutation Create{model}($input: Create{model}Input!) {{ \
             {field}(input: $input) {{ {selection} }} }}",
            model = E::MODEL,
            selection = Self::selection::<E>(),
        );

        let input = serde_json::to_value(input)
            .map_err(|e| DataError::rejected(format!("unserializable create input: {e}")))?;
        let data = self.execute(document, json!({ "input": input })).await?;
        match extract(&data, &field) {
            Value::Null => Err(DataError::rejected(format!(
                "store returned no object for create{}",
                E::MODEL
            ))),
            value => serde_json::from_value(value).map_err(|e| {
                DataError::transport(format!("malformed {} payload: {e}", E::MODEL))
            }),
        }
    }

    async fn update<E: Entity>(&self, update: &E::Update) -> Result<E, DataError> {
        let field = format!("update{}", E::MODEL);
        let document = format!(
            "mutation Update{model}($input: Update{model}Input!) {{ \
             {field}(input: $input) {{ {selection} }} }}",
            model = E::MODEL,
            selection = Self::selection::<E>(),
        );

        let input = serde_json::to_value(update)
            .map_err(|e| DataError::rejected(format!("unserializable update input: {e}")))?;
        let data = self.execute(document, json!({ "input": input })).await?;
        match extract(&data, &field) {
            Value::Null => Err(DataError::not_found(format!(
                "{} {} not found",
                E::MODEL,
                E::update_id(update)
            ))),
            value => serde_json::from_value(value).map_err(|e| {
                DataError::transport(format!("malformed {} payload: {e}", E::MODEL))
            }),
        }
    }

    async fn delete<E: Entity>(&self, id: &str) -> Result<(), DataError> {
        let field = format!("delete{}", E::MODEL);
        let document = format!(
            "mutation Delete{model}($input: Delete{model}Input!) {{ \
             {field}(input: $input) {{ id }} }}",
            model = E::MODEL,
        );

        let data = self.execute(document, json!({ "input": { "id": id } })).await?;
        match extract(&data, &field) {
            Value::Null => Err(DataError::not_found(format!("{} {id} not found", E::MODEL))),
            _ => Ok(()),
        }
    }
}
