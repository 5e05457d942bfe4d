// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Park model: a national park users can browse and plan trips to.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::error::DataError;
use crate::models::{Entity, Trip};
use crate::store::{DataStore, ListQuery};

/// A national park.
///
/// Readable by guests; mutable only by an authenticated owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Park {
    /// Store-assigned identifier
    pub id: String,
    /// Park name
    pub name: String,
    /// Location, e.g. "Wyoming, Montana, Idaho"
    pub location: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Activity labels offered by the park, in catalog order
    #[serde(default)]
    pub activities: Vec<String>,
    /// Optional image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Creation input for a park. The identifier is assigned by the store.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePark {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<String>,
    #[validate(url(message = "imageUrl must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Partial update for a park. Absent fields are left unchanged by the store.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePark {
    pub id: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "location must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<String>>,
    #[validate(url(message = "imageUrl must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Entity for Park {
    const MODEL: &'static str = "Park";
    const MODEL_PLURAL: &'static str = "Parks";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "location",
        "description",
        "activities",
        "imageUrl",
    ];

    type Create = CreatePark;
    type Update = UpdatePark;

    fn id(&self) -> &str {
        &self.id
    }

    fn update_id(update: &Self::Update) -> &str {
        &update.id
    }

    /// A park that still has trips cannot be deleted; the caller must remove
    /// the trips first.
    async fn prepare_delete<S: DataStore>(store: &S, id: &str) -> Result<(), DataError> {
        let referencing: Vec<Trip> = store
            .list(ListQuery::filtered("parkId", id).with_limit(1))
            .await?;
        if !referencing.is_empty() {
            return Err(DataError::rejected(format!(
                "park {id} is still referenced by at least one trip"
            )));
        }
        Ok(())
    }
}
