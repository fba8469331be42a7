// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zoom-dependent spatial clustering of destinations.
//!
//! Clustering is greedy and seed-order dependent: each unassigned
//! destination, in input order, seeds a cluster that absorbs every other
//! unassigned destination closer to the seed than the threshold. Two members
//! of one cluster may therefore be further apart than the threshold.

use geo::{Distance, Haversine};

use crate::models::{ClusterAnnotation, Coordinate, Destination};

/// Highest zoom level produced from a viewport span.
pub const MAX_ZOOM_LEVEL: f64 = 20.0;

/// Zoom level and threshold steps: below `zoom`, points closer than
/// `meters` are grouped.
const THRESHOLD_STEPS: [(f64, f64); 5] = [
    (4.0, 250_000.0),  // world / continent
    (6.0, 100_000.0),  // country
    (8.0, 50_000.0),   // province
    (10.0, 25_000.0),  // metro area
    (12.0, 5_000.0),   // city
];

/// Zoom level derived from a viewport's longitude span.
///
/// `clamp(log2(360 / span), 0, 20)`. Degenerate spans count as fully
/// zoomed in.
pub fn zoom_level_for_span(longitude_span_degrees: f64) -> f64 {
    if !longitude_span_degrees.is_finite() || longitude_span_degrees <= 0.0 {
        return MAX_ZOOM_LEVEL;
    }
    (360.0 / longitude_span_degrees)
        .log2()
        .clamp(0.0, MAX_ZOOM_LEVEL)
}

/// Clustering distance for a zoom level, in meters. 0 disables clustering.
pub fn cluster_threshold_meters(zoom_level: f64) -> f64 {
    THRESHOLD_STEPS
        .iter()
        .find(|(max_zoom, _)| zoom_level < *max_zoom)
        .map(|(_, meters)| *meters)
        .unwrap_or(0.0)
}

/// Great-circle distance between two coordinates, in meters.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    Haversine.distance(a.to_point(), b.to_point())
}

/// Group destinations into clusters for a zoom level.
pub fn compute_clusters(destinations: &[Destination], zoom_level: f64) -> Vec<ClusterAnnotation> {
    cluster_with_threshold(destinations, cluster_threshold_meters(zoom_level))
}

/// Group destinations whose distance to a seed is below `threshold_meters`.
pub fn cluster_with_threshold(
    destinations: &[Destination],
    threshold_meters: f64,
) -> Vec<ClusterAnnotation> {
    if threshold_meters <= 0.0 {
        return destinations
            .iter()
            .cloned()
            .map(ClusterAnnotation::single)
            .collect();
    }

    let mut assigned = vec![false; destinations.len()];
    let mut clusters = Vec::new();

    for (i, seed) in destinations.iter().enumerate() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let mut cluster = ClusterAnnotation::single(seed.clone());

        for (j, other) in destinations.iter().enumerate().skip(i + 1) {
            if assigned[j] {
                continue;
            }
            if distance_meters(seed.coordinate, other.coordinate) < threshold_meters {
                assigned[j] = true;
                cluster.push(other.clone());
            }
        }

        clusters.push(cluster);
    }

    tracing::trace!(
        destinations = destinations.len(),
        clusters = clusters.len(),
        threshold_meters,
        "Computed clusters"
    );
    clusters
}
