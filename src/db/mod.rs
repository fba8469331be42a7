//! Persistence boundary.
//!
//! The engines never talk to storage directly; they read snapshots through
//! `DestinationSource`.

pub mod memory;

pub use memory::MemoryStore;

use crate::models::{Destination, Trip};

/// Read-only access to the live destination and trip lists.
pub trait DestinationSource: Send + Sync {
    /// Snapshot of all destinations.
    fn destinations(&self) -> Vec<Destination>;

    /// Snapshot of all trips.
    fn trips(&self) -> Vec<Trip>;
}
