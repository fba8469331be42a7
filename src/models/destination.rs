// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Destination model: a single recorded visited place.

use chrono::{DateTime, Datelike, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// A validated (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoreError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::InvalidCoordinate(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::InvalidCoordinate(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Convert to a `geo` point (x = longitude, y = latitude).
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// A recorded visited place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    /// Stable unique identifier
    pub id: Uuid,
    /// Place name (e.g., "West Lake")
    pub name: String,
    /// Where the place is
    pub coordinate: Coordinate,
    /// Country as entered or geocoded, in any accepted script or alias
    #[serde(default)]
    pub country: String,
    /// Province, only meaningful inside the province-tracked country
    #[serde(default)]
    pub province: String,
    /// When the place was visited
    pub visit_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_favorite: bool,
    /// Owning trip, if any
    #[serde(default)]
    pub trip_id: Option<Uuid>,
    /// Opaque photo payload, only used for marker rendering
    #[serde(skip)]
    pub photo: Option<Arc<[u8]>>,
}

impl Destination {
    /// Create a destination with a fresh id and no trip, notes or photo.
    pub fn new(
        name: impl Into<String>,
        coordinate: Coordinate,
        country: impl Into<String>,
        province: impl Into<String>,
        visit_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            coordinate,
            country: country.into(),
            province: province.into(),
            visit_date,
            notes: String::new(),
            is_favorite: false,
            trip_id: None,
            photo: None,
        }
    }

    /// Calendar year of the visit, evaluated at the given offset.
    pub fn visit_year(&self, offset: FixedOffset) -> i32 {
        self.visit_date.with_timezone(&offset).year()
    }
}
