// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory destination store.
//!
//! Stands in for the on-device database: it holds the live lists, loads
//! JSON snapshots, and announces every mutation on the `EventBus`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

use crate::db::DestinationSource;
use crate::error::{CoreError, Result};
use crate::events::{CoreEvent, EventBus};
use crate::models::{Destination, Trip};

/// Serialized form of a store.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub trips: Vec<Trip>,
}

#[derive(Default)]
struct Inner {
    destinations: Vec<Destination>,
    trips: Vec<Trip>,
}

/// Destination store backed by process memory.
pub struct MemoryStore {
    inner: RwLock<Inner>,
    events: EventBus,
}

impl MemoryStore {
    pub fn new(events: EventBus) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            events,
        }
    }

    /// Load a store from a JSON snapshot file.
    pub fn load_from_file<P: AsRef<Path>>(path: P, events: EventBus) -> Result<Self> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CoreError::Io(e.to_string()))?;
        Self::load_from_json(&json_data, events)
    }

    /// Load a store from a JSON snapshot string.
    pub fn load_from_json(json_data: &str, events: EventBus) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json_data)
            .map_err(|e| CoreError::Parse(format!("destination snapshot: {e}")))?;

        tracing::info!(
            destinations = snapshot.destinations.len(),
            trips = snapshot.trips.len(),
            "Loaded destination snapshot"
        );

        Ok(Self {
            inner: RwLock::new(Inner {
                destinations: snapshot.destinations,
                trips: snapshot.trips,
            }),
            events,
        })
    }

    /// Serialize the current contents.
    pub fn to_json(&self) -> Result<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let snapshot = Snapshot {
            destinations: inner.destinations.clone(),
            trips: inner.trips.clone(),
        };
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| CoreError::Internal(anyhow::anyhow!("Snapshot encoding failed: {e}")))
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .destinations
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: Uuid) -> Option<Destination> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .destinations
            .iter()
            .find(|d| d.id == id)
            .cloned()
    }

    /// Insert a destination, replacing none. Returns false on a duplicate id.
    pub fn add(&self, destination: Destination) -> bool {
        let id = destination.id;
        {
            let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            if inner.destinations.iter().any(|d| d.id == id) {
                return false;
            }
            inner.destinations.push(destination);
        }
        self.events.publish(CoreEvent::DestinationAdded(id));
        true
    }

    /// Replace an existing destination. Returns false if the id is unknown.
    pub fn update(&self, destination: Destination) -> bool {
        let id = destination.id;
        {
            let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            match inner.destinations.iter_mut().find(|d| d.id == id) {
                Some(slot) => *slot = destination,
                None => return false,
            }
        }
        self.events.publish(CoreEvent::DestinationUpdated(id));
        true
    }

    /// Remove a destination. Returns the removed record.
    pub fn delete(&self, id: Uuid) -> Option<Destination> {
        let removed = {
            let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            let pos = inner.destinations.iter().position(|d| d.id == id)?;
            inner.destinations.remove(pos)
        };
        self.events.publish(CoreEvent::DestinationDeleted(id));
        Some(removed)
    }

    pub fn add_trip(&self, trip: Trip) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .trips
            .push(trip);
    }

    /// Destinations that belong to a trip, by visit date.
    pub fn trip_destinations(&self, trip: &Trip) -> Vec<Destination> {
        let mut members: Vec<Destination> = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .destinations
            .iter()
            .filter(|d| trip.contains(d))
            .cloned()
            .collect();
        members.sort_by_key(|d| d.visit_date);
        members
    }
}

impl DestinationSource for MemoryStore {
    fn destinations(&self) -> Vec<Destination> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .destinations
            .clone()
    }

    fn trips(&self) -> Vec<Trip> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .trips
            .clone()
    }
}
