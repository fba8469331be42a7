// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod badge;
pub mod cluster;
pub mod destination;
pub mod language;
pub mod trip;

pub use badge::{BadgeCatalogEntry, BadgeKind, BadgeResult, BadgeStats, BadgeStatus};
pub use cluster::{ClusterAnnotation, MapRegion, MarkerColor};
pub use destination::{Coordinate, Destination};
pub use language::Language;
pub use trip::Trip;
