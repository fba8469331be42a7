// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - clustering and badge engines.

pub mod badge_store;
pub mod badges;
pub mod catalog;
pub mod clustering;
pub mod map;
pub mod normalize;

pub use badge_store::{destinations_signature, BadgeSnapshot, BadgeStore};
pub use badges::{compute_badges, BadgeOptions};
pub use catalog::BadgeCatalog;
pub use clustering::{
    cluster_threshold_meters, cluster_with_threshold, compute_clusters, distance_meters,
    zoom_level_for_span,
};
pub use map::{clusters_to_geojson, ClusterSet, MapService, Viewport};
pub use normalize::{AliasTable, PlaceNormalizer};
