// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Footprint core: map clustering and badge engines for a travel journal.
//!
//! This crate groups visited destinations into zoom-dependent map clusters
//! and derives country/province achievement badges from them.

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod time_utils;

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use config::Config;
use db::DestinationSource;
use error::Result;
use events::{CoreEvent, EventBus};
use models::{BadgeResult, ClusterAnnotation, Destination, MarkerColor};
use services::{
    compute_clusters, AliasTable, BadgeCatalog, BadgeOptions, BadgeStore, MapService,
    PlaceNormalizer,
};

/// Shared engine state, built once at startup.
pub struct FootprintCore {
    config: Config,
    normalizer: Arc<PlaceNormalizer>,
    catalog: Arc<BadgeCatalog>,
    badge_store: Arc<BadgeStore>,
    events: EventBus,
    /// Single source of truth for the reference country (normalized key)
    reference_country: watch::Sender<String>,
}

impl FootprintCore {
    /// Load reference data and wire up the services.
    pub fn new(config: Config) -> Result<Self> {
        let table = match &config.alias_table_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading alias table");
                AliasTable::load_from_file(path)?
            }
            None => AliasTable::bundled()?,
        };

        let normalizer = Arc::new(PlaceNormalizer::new(&table)?);
        let catalog = Arc::new(BadgeCatalog::from_aliases(&table));
        let badge_store = Arc::new(BadgeStore::new(
            Arc::clone(&catalog),
            Arc::clone(&normalizer),
            BadgeOptions {
                language: config.language,
                utc_offset: config.utc_offset(),
            },
        ));
        let reference_country = normalizer.normalize_country(&config.reference_country);

        tracing::info!(
            countries = catalog.countries().len(),
            provinces = catalog.provinces().len(),
            reference_country = %reference_country,
            "Footprint core ready"
        );

        Ok(Self {
            config,
            normalizer,
            catalog,
            badge_store,
            events: EventBus::new(),
            reference_country: watch::Sender::new(reference_country),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn normalizer(&self) -> &Arc<PlaceNormalizer> {
        &self.normalizer
    }

    pub fn catalog(&self) -> &Arc<BadgeCatalog> {
        &self.catalog
    }

    pub fn badge_store(&self) -> &Arc<BadgeStore> {
        &self.badge_store
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Current reference country (normalized key).
    pub fn reference_country(&self) -> String {
        self.reference_country.borrow().clone()
    }

    /// Change the reference country. Publishes an event when it changes.
    pub fn set_reference_country(&self, country: &str) -> String {
        let normalized = self.normalizer.normalize_country(country);
        let changed = self.reference_country.send_if_modified(|current| {
            if *current == normalized {
                return false;
            }
            current.clone_from(&normalized);
            true
        });
        if !changed {
            return normalized;
        }

        tracing::info!(reference_country = %normalized, "Reference country updated");
        self.events
            .publish(CoreEvent::ReferenceCountryChanged(normalized.clone()));
        normalized
    }

    /// Province badges apply only when the reference country is the
    /// province-tracked one.
    pub fn province_badges_active(&self) -> bool {
        self.reference_country() == self.catalog.province_country()
    }

    /// Badge results for a destination list, cached across calls.
    pub fn badges(&self, destinations: &[Destination]) -> Arc<BadgeResult> {
        self.badge_store
            .get_or_recompute(destinations, &self.reference_country())
    }

    /// Clusters for a zoom level, without caching.
    pub fn clusters(&self, destinations: &[Destination], zoom_level: f64) -> Vec<ClusterAnnotation> {
        compute_clusters(destinations, zoom_level)
    }

    /// A cached map service over a destination list.
    pub fn map_service(&self, destinations: Vec<Destination>) -> Arc<MapService> {
        Arc::new(MapService::new(destinations))
    }

    /// Marker color for a cluster relative to the current reference country.
    pub fn marker_color(&self, cluster: &ClusterAnnotation) -> MarkerColor {
        let reference = self.reference_country();
        cluster.marker_color(|d| self.normalizer.is_domestic(&d.country, &reference))
    }

    /// Keep badge results fresh as `source` changes.
    pub fn spawn_badge_listener(&self, source: Arc<dyn DestinationSource>) -> JoinHandle<()> {
        self.badge_store.spawn_invalidation_listener(
            self.events.subscribe(),
            source,
            self.reference_country.subscribe(),
        )
    }
}
