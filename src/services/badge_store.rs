// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cached, observable badge results.
//!
//! `BadgeStore` owns the last computed `BadgeResult` and publishes it on a
//! `watch` channel. Background refreshes run on the blocking pool; each one
//! carries a generation number and only the newest finished generation is
//! ever published.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::db::DestinationSource;
use crate::error::{CoreError, Result};
use crate::events::CoreEvent;
use crate::models::{BadgeKind, BadgeResult, BadgeStats, Destination};
use crate::services::badges::{compute_badges, BadgeOptions};
use crate::services::catalog::BadgeCatalog;
use crate::services::normalize::PlaceNormalizer;

/// What observers see.
#[derive(Debug, Clone)]
pub struct BadgeSnapshot {
    /// A computation is outstanding
    pub loading: bool,
    /// Latest published result, `None` before the first computation
    pub result: Option<Arc<BadgeResult>>,
    /// Generation of `result`, 0 before the first computation
    pub generation: u64,
}

impl Default for BadgeSnapshot {
    fn default() -> Self {
        Self {
            loading: true,
            result: None,
            generation: 0,
        }
    }
}

impl BadgeSnapshot {
    pub fn stats(&self, kind: BadgeKind) -> BadgeStats {
        self.result
            .as_ref()
            .map(|r| r.stats(kind))
            .unwrap_or_default()
    }
}

/// Order-insensitive fingerprint of the fields badges depend on.
///
/// Only country and province affect which badges unlock, so edits to other
/// fields (notes, favorites) keep the cache valid.
pub fn destinations_signature(destinations: &[Destination]) -> String {
    let mut parts: Vec<String> = destinations
        .iter()
        .map(|d| format!("{}|{}", d.country.trim(), d.province.trim()))
        .collect();
    parts.sort_unstable();
    parts.join(";")
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    signature: String,
    count: usize,
    province_badges_active: bool,
}

impl CacheKey {
    fn new(destinations: &[Destination], province_badges_active: bool) -> Self {
        Self {
            signature: destinations_signature(destinations),
            count: destinations.len(),
            province_badges_active,
        }
    }
}

#[derive(Debug, Default)]
struct CacheState {
    key: Option<CacheKey>,
    result: Option<Arc<BadgeResult>>,
    /// Latest requested generation when `invalidate` was last called
    invalidated_at: u64,
    /// Generation of `result`
    published: u64,
    /// Highest generation that finished, successfully or not
    settled: u64,
}

/// Badge computation service with a result cache and change notifications.
pub struct BadgeStore {
    catalog: Arc<BadgeCatalog>,
    normalizer: Arc<PlaceNormalizer>,
    options: BadgeOptions,
    cache: Mutex<CacheState>,
    next_generation: AtomicU64,
    computations: AtomicU64,
    tx: watch::Sender<BadgeSnapshot>,
}

impl BadgeStore {
    pub fn new(
        catalog: Arc<BadgeCatalog>,
        normalizer: Arc<PlaceNormalizer>,
        options: BadgeOptions,
    ) -> Self {
        let (tx, _) = watch::channel(BadgeSnapshot::default());
        Self {
            catalog,
            normalizer,
            options,
            cache: Mutex::new(CacheState::default()),
            next_generation: AtomicU64::new(0),
            computations: AtomicU64::new(0),
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<BadgeSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> BadgeSnapshot {
        self.tx.borrow().clone()
    }

    /// Number of times the badge pipeline has run.
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    /// Whether province badges apply for a reference country.
    pub fn province_badges_active(&self, reference_country: &str) -> bool {
        self.normalizer.normalize_country(reference_country) == self.catalog.province_country()
    }

    /// Return the cached result if still valid, otherwise compute and
    /// publish a new one.
    pub fn get_or_recompute(
        &self,
        destinations: &[Destination],
        reference_country: &str,
    ) -> Arc<BadgeResult> {
        let key = CacheKey::new(destinations, self.province_badges_active(reference_country));

        {
            let state = self.lock_cache();
            if let Some(result) = state.result.as_ref() {
                if state.published > state.invalidated_at && state.key.as_ref() == Some(&key) {
                    tracing::trace!(generation = state.published, "Badge cache hit");
                    return Arc::clone(result);
                }
            }
        }

        let generation = self.begin_generation();
        let result = Arc::new(self.compute(destinations, key.province_badges_active));
        self.finish(generation, key, Some(Arc::clone(&result)));
        result
    }

    /// Force the next `get_or_recompute` to recompute.
    pub fn invalidate(&self) {
        let mut state = self.lock_cache();
        state.invalidated_at = self.next_generation.load(Ordering::SeqCst);
        tracing::debug!(generation = state.invalidated_at, "Badge cache invalidated");
    }

    /// Recompute on the blocking pool and publish when done.
    ///
    /// Observers see `loading = true` immediately. If a newer refresh
    /// finishes first, this one's result is discarded.
    pub fn refresh(
        self: &Arc<Self>,
        destinations: Vec<Destination>,
        reference_country: String,
    ) -> JoinHandle<Result<Arc<BadgeResult>>> {
        let generation = self.begin_generation();
        self.tx.send_modify(|snapshot| snapshot.loading = true);

        let store = Arc::clone(self);
        tokio::spawn(async move {
            let active = store.province_badges_active(&reference_country);
            let key = CacheKey::new(&destinations, active);

            let worker = Arc::clone(&store);
            let outcome = tokio::task::spawn_blocking(move || {
                Arc::new(worker.compute(&destinations, active))
            })
            .await
            .map_err(|e| {
                tracing::error!(generation, error = %e, "Badge computation failed");
                CoreError::Worker(e.to_string())
            });

            store.finish(generation, key, outcome.as_ref().ok().cloned());
            outcome
        })
    }

    /// Listen for change events and refresh from `source` on each.
    ///
    /// The reference country is read from `reference_country` at every
    /// refresh, so events dropped by a lagging receiver lose nothing.
    pub fn spawn_invalidation_listener(
        self: &Arc<Self>,
        mut events: broadcast::Receiver<CoreEvent>,
        source: Arc<dyn DestinationSource>,
        reference_country: watch::Receiver<String>,
    ) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(CoreEvent::ReferenceCountryChanged(code)) => {
                        tracing::debug!(reference_country = %code, "Reference country changed");
                    }
                    Ok(event) => {
                        tracing::debug!(?event, "Destinations changed");
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Badge listener lagged, recomputing");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }

                let reference = reference_country.borrow().clone();
                store.invalidate();
                let refresh = store.refresh(source.destinations(), reference);
                match refresh.await {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => tracing::warn!(error = %e, "Badge refresh failed"),
                    Err(e) => tracing::error!(error = %e, "Badge refresh task failed"),
                }
            }
            tracing::debug!("Badge listener stopped");
        })
    }

    fn compute(&self, destinations: &[Destination], province_badges_active: bool) -> BadgeResult {
        self.computations.fetch_add(1, Ordering::Relaxed);
        compute_badges(
            destinations,
            &self.catalog,
            &self.normalizer,
            province_badges_active,
            &self.options,
        )
    }

    fn begin_generation(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Record a finished generation and publish if it is the newest result.
    fn finish(&self, generation: u64, key: CacheKey, result: Option<Arc<BadgeResult>>) {
        let mut state = self.lock_cache();
        state.settled = state.settled.max(generation);

        match result {
            Some(result) if generation > state.published => {
                state.published = generation;
                state.key = Some(key);
                state.result = Some(result);
            }
            Some(_) => {
                tracing::debug!(
                    generation,
                    published = state.published,
                    "Discarding stale badge result"
                );
            }
            None => {}
        }

        let loading = self.next_generation.load(Ordering::SeqCst) > state.settled;
        self.tx.send_replace(BadgeSnapshot {
            loading,
            result: state.result.clone(),
            generation: state.published,
        });
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
