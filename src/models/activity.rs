// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity model: a single planned action within a trip.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::error::DataError;
use crate::models::{Entity, Trip};
use crate::store::DataStore;

/// A planned action within a trip, e.g. a hike on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Store-assigned identifier
    pub id: String,
    /// Activity name
    pub name: String,
    /// Day the activity is planned for, within the trip's date range
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    /// Optional location within the park
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Whether the activity has been completed
    #[serde(default)]
    pub completed: bool,
    /// The trip this activity belongs to
    pub trip_id: String,
}

/// Creation input for an activity.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivity {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
    /// Must reference an existing trip.
    pub trip_id: String,
}

/// Partial update for an activity. The trip reference is fixed at creation;
/// `completed` toggles independently of the other fields.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivity {
    pub id: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

fn check_date_in_range(date: NaiveDate, trip: &Trip) -> Result<(), DataError> {
    if date < trip.start_date || date > trip.end_date {
        return Err(DataError::validation(format!(
            "activity date {date} falls outside trip range {}..={}",
            trip.start_date, trip.end_date
        )));
    }
    Ok(())
}

impl Entity for Activity {
    const MODEL: &'static str = "Activity";
    const MODEL_PLURAL: &'static str = "Activities";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "date",
        "location",
        "notes",
        "completed",
        "tripId",
    ];

    type Create = CreateActivity;
    type Update = UpdateActivity;

    fn id(&self) -> &str {
        &self.id
    }

    fn update_id(update: &Self::Update) -> &str {
        &update.id
    }

    async fn check_create<S: DataStore>(store: &S, input: &Self::Create) -> Result<(), DataError> {
        let trip = store.get::<Trip>(&input.trip_id).await?.ok_or_else(|| {
            DataError::rejected(format!(
                "tripId {} does not reference an existing trip",
                input.trip_id
            ))
        })?;
        check_date_in_range(input.date, &trip)
    }

    async fn check_update<S: DataStore>(store: &S, update: &Self::Update) -> Result<(), DataError> {
        let Some(date) = update.date else {
            return Ok(());
        };
        let current = store
            .get::<Activity>(&update.id)
            .await?
            .ok_or_else(|| DataError::not_found(format!("activity {} not found", update.id)))?;
        let trip = store.get::<Trip>(&current.trip_id).await?.ok_or_else(|| {
            DataError::rejected(format!("trip {} no longer exists", current.trip_id))
        })?;
        check_date_in_range(date, &trip)
    }
}
