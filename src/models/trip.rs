// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip model: one user's planned visit to exactly one park.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

use crate::auth::UserIdentity;
use crate::error::DataError;
use crate::models::{Activity, Entity, Park};
use crate::store::{DataStore, ListQuery};

/// A planned visit to a park.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Store-assigned identifier
    pub id: String,
    /// Trip title
    pub title: String,
    /// First day of the trip
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub start_date: NaiveDate,
    /// Last day of the trip, never before `start_date`
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub end_date: NaiveDate,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Owner identity, stamped from the session at creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// The park this trip visits
    pub park_id: String,
}

/// Creation input for a trip.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_create_range))]
pub struct CreateTrip {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Overwritten with the session identity by the gateway; never trusted
    /// from input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Must reference an existing park.
    pub park_id: String,
}

/// Partial update for a trip. The park reference is fixed at creation.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_update_range))]
pub struct UpdateTrip {
    pub id: String,
    #[validate(length(min = 1, message = "title must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn date_range_error() -> ValidationError {
    let mut error = ValidationError::new("start_after_end");
    error.message = Some("startDate must not be after endDate".into());
    error
}

fn validate_create_range(trip: &CreateTrip) -> Result<(), ValidationError> {
    if trip.start_date > trip.end_date {
        return Err(date_range_error());
    }
    Ok(())
}

/// Only checks when both bounds are present; a single-bound update is
/// checked against current state in `check_update`.
fn validate_update_range(update: &UpdateTrip) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (update.start_date, update.end_date) {
        if start > end {
            return Err(date_range_error());
        }
    }
    Ok(())
}

impl Entity for Trip {
    const MODEL: &'static str = "Trip";
    const MODEL_PLURAL: &'static str = "Trips";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "startDate",
        "endDate",
        "notes",
        "userId",
        "parkId",
    ];

    type Create = CreateTrip;
    type Update = UpdateTrip;

    fn id(&self) -> &str {
        &self.id
    }

    fn update_id(update: &Self::Update) -> &str {
        &update.id
    }

    fn stamp_owner(input: &mut Self::Create, owner: &UserIdentity) {
        input.user_id = Some(owner.as_str().to_owned());
    }

    async fn check_create<S: DataStore>(store: &S, input: &Self::Create) -> Result<(), DataError> {
        if store.get::<Park>(&input.park_id).await?.is_none() {
            return Err(DataError::rejected(format!(
                "parkId {} does not reference an existing park",
                input.park_id
            )));
        }
        Ok(())
    }

    async fn check_update<S: DataStore>(store: &S, update: &Self::Update) -> Result<(), DataError> {
        if update.start_date.is_none() && update.end_date.is_none() {
            return Ok(());
        }
        let current = store
            .get::<Trip>(&update.id)
            .await?
            .ok_or_else(|| DataError::not_found(format!("trip {} not found", update.id)))?;
        let start = update.start_date.unwrap_or(current.start_date);
        let end = update.end_date.unwrap_or(current.end_date);
        if start > end {
            return Err(DataError::validation("startDate must not be after endDate"));
        }
        Ok(())
    }

    /// Deleting a trip cascades to its activities, so no orphans remain.
    async fn prepare_delete<S: DataStore>(store: &S, id: &str) -> Result<(), DataError> {
        let activities: Vec<Activity> = store.list(ListQuery::filtered("tripId", id)).await?;
        let count = activities.len();
        for activity in &activities {
            store.delete::<Activity>(activity.id()).await?;
        }
        if count > 0 {
            tracing::debug!(trip_id = id, count, "Cascade-deleted trip activities");
        }
        Ok(())
    }
}
