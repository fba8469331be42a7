// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Map cluster annotations derived from destinations.

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Coordinate, Destination, Language};

/// Minimum span (degrees) when zooming into a cluster.
const MIN_REGION_SPAN: f64 = 0.01;

/// Padding factor applied to a cluster's extent when zooming into it.
const REGION_PADDING: f64 = 1.5;

/// Share of domestic members above which a mixed cluster is drawn as domestic.
const DOMESTIC_RATIO_HIGH: f64 = 0.7;
/// Share of domestic members below which a mixed cluster is drawn as international.
const DOMESTIC_RATIO_LOW: f64 = 0.3;

/// Marker color handed to the map rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Blue,
    Purple,
}

/// A rectangular map region (center plus span in degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// A group of destinations rendered as one map marker.
///
/// Clusters are rebuilt on every recomputation. Their only identity is
/// `id()`, which depends on the member set alone.
#[derive(Debug, Clone)]
pub struct ClusterAnnotation {
    destinations: Vec<Destination>,
}

impl ClusterAnnotation {
    /// Build a cluster from its members. Returns `None` for an empty list.
    pub fn new(destinations: Vec<Destination>) -> Option<Self> {
        if destinations.is_empty() {
            None
        } else {
            Some(Self { destinations })
        }
    }

    pub(crate) fn single(destination: Destination) -> Self {
        Self {
            destinations: vec![destination],
        }
    }

    pub(crate) fn push(&mut self, destination: Destination) {
        self.destinations.push(destination);
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.destinations.len() == 1
    }

    /// Stable id: member ids sorted and joined with `-`.
    pub fn id(&self) -> String {
        let mut ids: Vec<String> = self
            .destinations
            .iter()
            .map(|d| d.id.hyphenated().to_string())
            .collect();
        ids.sort();
        ids.join("-")
    }

    /// Centroid of the member coordinates.
    pub fn coordinate(&self) -> Coordinate {
        let n = self.destinations.len() as f64;
        let (lat_sum, lon_sum) = self
            .destinations
            .iter()
            .fold((0.0, 0.0), |(lat, lon), d| {
                (lat + d.coordinate.latitude, lon + d.coordinate.longitude)
            });
        // Means of in-range values stay in range.
        Coordinate {
            latitude: lat_sum / n,
            longitude: lon_sum / n,
        }
    }

    /// Marker title: the member name for a singleton, else a count label.
    pub fn title(&self, language: Language) -> String {
        match (self.destinations.as_slice(), language) {
            ([only], _) => only.name.clone(),
            (members, Language::English) => format!("{} places", members.len()),
            (members, Language::Chinese) => format!("{} 个地点", members.len()),
        }
    }

    /// Region to animate to when the cluster is tapped.
    pub fn zoom_region(&self) -> MapRegion {
        let first = self.destinations[0].coordinate;
        let (mut min_lat, mut max_lat) = (first.latitude, first.latitude);
        let (mut min_lon, mut max_lon) = (first.longitude, first.longitude);

        for d in &self.destinations[1..] {
            min_lat = min_lat.min(d.coordinate.latitude);
            max_lat = max_lat.max(d.coordinate.latitude);
            min_lon = min_lon.min(d.coordinate.longitude);
            max_lon = max_lon.max(d.coordinate.longitude);
        }

        MapRegion {
            center: Coordinate {
                latitude: (min_lat + max_lat) / 2.0,
                longitude: (min_lon + max_lon) / 2.0,
            },
            latitude_delta: ((max_lat - min_lat) * REGION_PADDING).max(MIN_REGION_SPAN),
            longitude_delta: ((max_lon - min_lon) * REGION_PADDING).max(MIN_REGION_SPAN),
        }
    }

    pub fn has_favorite(&self) -> bool {
        self.destinations.iter().any(|d| d.is_favorite)
    }

    pub fn has_trip_destinations(&self) -> bool {
        self.destinations.iter().any(|d| d.trip_id.is_some())
    }

    /// Marker color for this cluster.
    ///
    /// `is_domestic` decides whether a member lies in the reference country.
    pub fn marker_color<F>(&self, is_domestic: F) -> MarkerColor
    where
        F: Fn(&Destination) -> bool,
    {
        if let [only] = self.destinations.as_slice() {
            return match only.trip_id {
                Some(trip_id) => trip_color(trip_id),
                None if is_domestic(only) => MarkerColor::Red,
                None => MarkerColor::Blue,
            };
        }

        if let Some(trip_id) = self.destinations.iter().find_map(|d| d.trip_id) {
            return trip_color(trip_id);
        }

        let domestic = self.destinations.iter().filter(|&d| is_domestic(d)).count();
        let ratio = domestic as f64 / self.destinations.len() as f64;
        if ratio > DOMESTIC_RATIO_HIGH {
            MarkerColor::Red
        } else if ratio < DOMESTIC_RATIO_LOW {
            MarkerColor::Blue
        } else {
            MarkerColor::Purple
        }
    }
}

impl PartialEq for ClusterAnnotation {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Display color for a trip. All trips share one color.
pub fn trip_color(_trip_id: Uuid) -> MarkerColor {
    MarkerColor::Blue
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn dest(name: &str, lat: f64, lon: f64, country: &str) -> Destination {
        Destination::new(
            name,
            Coordinate::new(lat, lon).unwrap(),
            country,
            "",
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        )
    }

    fn domestic(d: &Destination) -> bool {
        d.country == "China"
    }

    #[test]
    fn test_empty_cluster_rejected() {
        assert!(ClusterAnnotation::new(vec![]).is_none());
    }

    #[test]
    fn test_id_independent_of_member_order() {
        let a = dest("A", 30.0, 120.0, "China");
        let b = dest("B", 31.0, 121.0, "China");

        let ab = ClusterAnnotation::new(vec![a.clone(), b.clone()]).unwrap();
        let ba = ClusterAnnotation::new(vec![b, a]).unwrap();

        assert_eq!(ab.id(), ba.id());
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_centroid_and_title() {
        let cluster = ClusterAnnotation::new(vec![
            dest("A", 30.0, 120.0, "China"),
            dest("B", 32.0, 122.0, "China"),
        ])
        .unwrap();

        let center = cluster.coordinate();
        assert!((center.latitude - 31.0).abs() < 1e-9);
        assert!((center.longitude - 121.0).abs() < 1e-9);
        assert_eq!(cluster.title(Language::English), "2 places");
        assert_eq!(cluster.title(Language::Chinese), "2 个地点");

        let single = ClusterAnnotation::single(dest("West Lake", 30.0, 120.0, "China"));
        assert_eq!(single.title(Language::English), "West Lake");
    }

    #[test]
    fn test_zoom_region_pads_and_clamps() {
        let cluster = ClusterAnnotation::new(vec![
            dest("A", 30.0, 120.0, "China"),
            dest("B", 32.0, 120.0, "China"),
        ])
        .unwrap();

        let region = cluster.zoom_region();
        assert!((region.center.latitude - 31.0).abs() < 1e-9);
        assert!((region.latitude_delta - 3.0).abs() < 1e-9);
        assert_eq!(region.longitude_delta, MIN_REGION_SPAN);
    }

    #[test]
    fn test_marker_color_single() {
        let mut home = dest("Home", 30.0, 120.0, "China");
        let abroad = dest("Abroad", 35.0, 139.0, "Japan");

        assert_eq!(
            ClusterAnnotation::single(home.clone()).marker_color(domestic),
            MarkerColor::Red
        );
        assert_eq!(
            ClusterAnnotation::single(abroad).marker_color(domestic),
            MarkerColor::Blue
        );

        home.trip_id = Some(Uuid::new_v4());
        assert_eq!(
            ClusterAnnotation::single(home).marker_color(domestic),
            MarkerColor::Blue
        );
    }

    #[test]
    fn test_marker_color_mixed_ratio() {
        let members = |domestic_count: usize, total: usize| {
            (0..total)
                .map(|i| {
                    let country = if i < domestic_count { "China" } else { "Japan" };
                    dest("P", 30.0, 120.0, country)
                })
                .collect::<Vec<_>>()
        };

        let mostly_home = ClusterAnnotation::new(members(8, 10)).unwrap();
        let mostly_abroad = ClusterAnnotation::new(members(2, 10)).unwrap();
        let mixed = ClusterAnnotation::new(members(5, 10)).unwrap();

        assert_eq!(mostly_home.marker_color(domestic), MarkerColor::Red);
        assert_eq!(mostly_abroad.marker_color(domestic), MarkerColor::Blue);
        assert_eq!(mixed.marker_color(domestic), MarkerColor::Purple);
    }

    #[test]
    fn test_marker_color_trip_wins_for_groups() {
        let mut members = vec![
            dest("A", 30.0, 120.0, "China"),
            dest("B", 30.0, 120.0, "China"),
        ];
        members[1].trip_id = Some(Uuid::new_v4());
        let cluster = ClusterAnnotation::new(members).unwrap();

        assert!(cluster.has_trip_destinations());
        assert_eq!(cluster.marker_color(domestic), MarkerColor::Blue);
    }
}
