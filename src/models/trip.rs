// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip model: a named collection of destinations bounded by dates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Destination;

/// A named trip. Destinations point at their trip through `trip_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    /// Trip name (e.g., "2025-10 Qinghai-Gansu loop")
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Trip {
    /// Length of the trip in days, counting both ends.
    pub fn duration_days(&self) -> i64 {
        let days = self
            .end_date
            .date_naive()
            .signed_duration_since(self.start_date.date_naive())
            .num_days();
        (days + 1).max(1)
    }

    /// Whether the destination belongs to this trip.
    pub fn contains(&self, destination: &Destination) -> bool {
        destination.trip_id == Some(self.id)
    }
}
