// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-shot baseline seeding.
//!
//! Populates the store with six baseline parks unless it already holds any.
//! The gate is explicit state owned by the application root, not ambient
//! storage: within one process lifetime a second run is a no-op, and even a
//! fresh process is protected by the existing-data check.

use crate::error::AppError;
use crate::gateway::EntityGateway;
use crate::models::{CreatePark, Park};
use crate::store::{DataStore, ListQuery};

/// Seeding progress for this process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedState {
    #[default]
    Unchecked,
    Seeding,
    Done,
    Failed,
}

/// What a `run` invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The gate was already set; nothing was queried or written.
    AlreadySeeded,
    /// The store already held parks; nothing was written.
    ExistingData,
    /// Baseline parks were created.
    Seeded(usize),
}

/// Session-scoped seeding gate and driver.
#[derive(Debug, Default)]
pub struct Seeder {
    state: SeedState,
}

impl Seeder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SeedState {
        self.state
    }

    /// Run the seeding routine. Idempotent per session via the state gate,
    /// and idempotent across sessions via the existing-data check.
    ///
    /// Creations are sequential; the first failure aborts the rest and
    /// leaves earlier writes in place (no rollback). A re-run after a
    /// partial failure is safe: the existing-data check then skips seeding.
    pub async fn run<S: DataStore>(
        &mut self,
        parks: &EntityGateway<Park, S>,
    ) -> Result<SeedOutcome, AppError> {
        if self.state == SeedState::Done {
            tracing::debug!("Store already seeded in this session");
            return Ok(SeedOutcome::AlreadySeeded);
        }
        self.state = SeedState::Seeding;

        let existing = parks.list(ListQuery::all().with_limit(1)).await.map_err(|e| {
            self.state = SeedState::Failed;
            AppError::Seed {
                created: 0,
                source: e,
            }
        })?;
        if !existing.is_empty() {
            tracing::info!("Store already has parks, skipping seed");
            self.state = SeedState::Done;
            return Ok(SeedOutcome::ExistingData);
        }

        let baseline = baseline_parks();
        let total = baseline.len();
        for (created, park) in baseline.into_iter().enumerate() {
            if let Err(error) = parks.create(park).await {
                tracing::error!(created, error = %error, "Seeding aborted");
                self.state = SeedState::Failed;
                return Err(AppError::Seed {
                    created,
                    source: error,
                });
            }
        }

        tracing::info!(count = total, "Seeded store with baseline parks");
        self.state = SeedState::Done;
        Ok(SeedOutcome::Seeded(total))
    }
}

fn park(
    name: &str,
    location: &str,
    description: &str,
    activities: &[&str],
    image_url: &str,
) -> CreatePark {
    CreatePark {
        name: name.to_string(),
        location: location.to_string(),
        description: Some(description.to_string()),
        activities: activities.iter().map(|a| a.to_string()).collect(),
        image_url: Some(image_url.to_string()),
    }
}

/// The six baseline parks written by an initial seed.
pub fn baseline_parks() -> Vec<CreatePark> {
    vec![
        park(
            "Yellowstone National Park",
            "Wyoming, Montana, Idaho",
            "America's first national park, known for its wildlife and geothermal features, especially Old Faithful geyser.",
            &["Hiking", "Wildlife Viewing", "Camping", "Fishing", "Geothermal Features"],
            "https://images.unsplash.com/photo-1533423996375-f914df98a0cb?q=80&w=1000",
        ),
        park(
            "Grand Canyon National Park",
            "Arizona",
            "A steep-sided canyon carved by the Colorado River, known for its visually overwhelming size and intricate landscape.",
            &["Hiking", "Rafting", "Camping", "Photography", "Stargazing"],
            "https://images.unsplash.com/photo-1615551043360-33de8b5f410c?q=80&w=1000",
        ),
        park(
            "Yosemite National Park",
            "California",
            "Known for its waterfalls, giant sequoias, and spectacular granite cliffs like El Capitan and Half Dome.",
            &["Rock Climbing", "Hiking", "Camping", "Photography", "Waterfall Viewing"],
            "https://images.unsplash.com/photo-1562310503-a918c4c61e38?q=80&w=1000",
        ),
        park(
            "Zion National Park",
            "Utah",
            "Known for its steep red cliffs, emerald pools, and the Virgin River that runs through the Zion Canyon.",
            &["Hiking", "Canyoneering", "Rock Climbing", "Photography", "River Wading"],
            "https://images.unsplash.com/photo-1635361242099-a6c76c4c7e4f?q=80&w=1000",
        ),
        park(
            "Acadia National Park",
            "Maine",
            "The oldest national park east of the Mississippi River, featuring the highest rocky headlands along the Atlantic coastline.",
            &["Hiking", "Biking", "Tidepooling", "Bird Watching", "Scenic Drives"],
            "https://images.unsplash.com/photo-1601924582970-9238bcb495d9?q=80&w=1000",
        ),
        park(
            "Olympic National Park",
            "Washington",
            "Diverse ecosystems from glacier-capped mountains to old-growth temperate rainforests to over 70 miles of wild coastline.",
            &["Hiking", "Backpacking", "Kayaking", "Wildlife Viewing", "Beachcombing"],
            "https://images.unsplash.com/photo-1504280390367-361c6d9f38f4?q=80&w=1000",
        ),
    ]
}
