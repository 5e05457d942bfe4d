// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pure projections over fetched collections.
//!
//! Nothing here touches the store; these are synchronous, side-effect-free
//! functions the presentation layer applies to already-fetched data.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::{Activity, Park, Trip};

/// Parks matching a search text and an activity selection.
///
/// A park is kept iff its name or location contains `search`
/// case-insensitively, and `selected` is empty or intersects the park's
/// activity labels.
pub fn filter_parks<'a>(parks: &'a [Park], search: &str, selected: &[String]) -> Vec<&'a Park> {
    let needle = search.to_lowercase();
    parks
        .iter()
        .filter(|park| {
            let matches_search = park.name.to_lowercase().contains(&needle)
                || park.location.to_lowercase().contains(&needle);
            let matches_activities = selected.is_empty()
                || park.activities.iter().any(|label| selected.contains(label));
            matches_search && matches_activities
        })
        .collect()
}

/// The label universe for the activity filter: deduplicated,
/// lexicographically sorted union of all activities across all parks.
pub fn activity_labels(parks: &[Park]) -> Vec<String> {
    parks
        .iter()
        .flat_map(|park| park.activities.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Trips partitioned by where `today` falls relative to their date range.
#[derive(Debug, Default)]
pub struct TripBuckets<'a> {
    /// start ≤ today ≤ end
    pub current: Vec<&'a Trip>,
    /// start > today
    pub upcoming: Vec<&'a Trip>,
    /// end < today
    pub past: Vec<&'a Trip>,
}

/// Partition trips into current / upcoming / past relative to `today`.
///
/// Each trip lands in exactly one bucket; for well-formed trips
/// (start ≤ end) the buckets match the three predicates above.
pub fn bucket_trips(trips: &[Trip], today: NaiveDate) -> TripBuckets<'_> {
    let mut buckets = TripBuckets::default();
    for trip in trips {
        if trip.start_date > today {
            buckets.upcoming.push(trip);
        } else if trip.end_date < today {
            buckets.past.push(trip);
        } else {
            buckets.current.push(trip);
        }
    }
    buckets
}

/// Activities in ascending date order. The sort is stable: activities
/// sharing a date keep their relative input order.
pub fn chronological(activities: &[Activity]) -> Vec<&Activity> {
    let mut sorted: Vec<&Activity> = activities.iter().collect();
    sorted.sort_by_key(|activity| activity.date);
    sorted
}
