// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map-facing clustering service.
//!
//! Caches cluster lists per distance threshold, debounces viewport changes
//! and exports clusters as GeoJSON for the rendering layer.

use dashmap::DashMap;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::models::{ClusterAnnotation, Coordinate, Destination, Language};
use crate::services::clustering::{cluster_threshold_meters, cluster_with_threshold, zoom_level_for_span};

/// Visible map rectangle (center plus span in degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Viewport {
    pub fn zoom_level(&self) -> f64 {
        zoom_level_for_span(self.longitude_delta)
    }
}

/// Cluster lists that are ready to render.
pub type ClusterSet = Arc<Vec<ClusterAnnotation>>;

/// (destination version, threshold bits)
type CacheKey = (u64, u64);

/// Cached clustering over the current destination list.
pub struct MapService {
    destinations: RwLock<Arc<Vec<Destination>>>,
    version: AtomicU64,
    cache: DashMap<CacheKey, ClusterSet>,
    computations: AtomicU64,
}

impl MapService {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self {
            destinations: RwLock::new(Arc::new(destinations)),
            version: AtomicU64::new(0),
            cache: DashMap::new(),
            computations: AtomicU64::new(0),
        }
    }

    /// Replace the destination list and drop every cached cluster set.
    pub fn set_destinations(&self, destinations: Vec<Destination>) {
        let count = destinations.len();
        {
            let mut current = self
                .destinations
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *current = Arc::new(destinations);
            self.version.fetch_add(1, Ordering::SeqCst);
            self.cache.clear();
        }
        tracing::debug!(count, "Map destinations replaced");
    }

    pub fn destinations(&self) -> Arc<Vec<Destination>> {
        Arc::clone(
            &self
                .destinations
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Number of clustering passes actually run (cache misses).
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    /// Clusters for a zoom level. Zoom levels sharing a threshold share
    /// one cached result.
    pub fn clusters_for_zoom(&self, zoom_level: f64) -> ClusterSet {
        let threshold = cluster_threshold_meters(zoom_level);

        let (version, destinations) = {
            let guard = self
                .destinations
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            (self.version.load(Ordering::SeqCst), Arc::clone(&guard))
        };
        let key = (version, threshold.to_bits());

        if let Some(hit) = self.cache.get(&key) {
            return Arc::clone(hit.value());
        }

        self.computations.fetch_add(1, Ordering::Relaxed);
        let clusters = Arc::new(cluster_with_threshold(&destinations, threshold));
        tracing::debug!(
            zoom_level,
            threshold_meters = threshold,
            clusters = clusters.len(),
            "Clustered destinations"
        );

        self.store_if_current(key, &clusters);
        clusters
    }

    /// Cache a result unless the destinations were replaced while it was
    /// being computed. Holding the read lock excludes `set_destinations`.
    fn store_if_current(&self, key: CacheKey, clusters: &ClusterSet) -> bool {
        let _guard = self
            .destinations
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if self.version.load(Ordering::SeqCst) != key.0 {
            tracing::trace!(version = key.0, "Dropping clusters for replaced destinations");
            return false;
        }
        self.cache.insert(key, Arc::clone(clusters));
        true
    }

    pub fn clusters_for_viewport(&self, viewport: &Viewport) -> ClusterSet {
        self.clusters_for_zoom(viewport.zoom_level())
    }

    /// Debounce viewport changes and publish clusters for the last one.
    ///
    /// A burst of viewports where each arrives within `window` of the
    /// previous yields a single recomputation. The worker stops when the
    /// viewport sender is dropped or nobody watches the output.
    pub fn spawn_viewport_worker(
        self: Arc<Self>,
        mut viewports: mpsc::Receiver<Viewport>,
        window: Duration,
    ) -> (watch::Receiver<ClusterSet>, JoinHandle<()>) {
        let (tx, rx) = watch::channel(Arc::new(Vec::new()));

        let handle = tokio::spawn(async move {
            while let Some(mut latest) = viewports.recv().await {
                let mut coalesced = 1usize;
                let mut closed = false;

                loop {
                    match tokio::time::timeout(window, viewports.recv()).await {
                        Ok(Some(viewport)) => {
                            latest = viewport;
                            coalesced += 1;
                        }
                        Ok(None) => {
                            closed = true;
                            break;
                        }
                        Err(_) => break,
                    }
                }

                let clusters = self.clusters_for_viewport(&latest);
                tracing::trace!(
                    coalesced,
                    zoom_level = latest.zoom_level(),
                    "Viewport settled"
                );

                if tx.send(clusters).is_err() || closed {
                    break;
                }
            }
            tracing::debug!("Viewport worker stopped");
        });

        (rx, handle)
    }
}

/// Export cluster centroids as a GeoJSON FeatureCollection.
///
/// Each feature carries `id`, `title` and `count` properties.
pub fn clusters_to_geojson(clusters: &[ClusterAnnotation], language: Language) -> FeatureCollection {
    let features = clusters
        .iter()
        .map(|cluster| {
            let center = cluster.coordinate();
            let id = cluster.id();

            let mut properties = JsonObject::new();
            properties.insert("id".to_string(), serde_json::json!(id));
            properties.insert("title".to_string(), serde_json::json!(cluster.title(language)));
            properties.insert("count".to_string(), serde_json::json!(cluster.len()));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![
                    center.longitude,
                    center.latitude,
                ]))),
                id: Some(geojson::feature::Id::String(id)),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
