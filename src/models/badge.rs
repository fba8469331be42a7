// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Badge catalog entries and computed badge results.

use serde::Serialize;

use crate::models::{Destination, Language};

/// Which badge collection an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeKind {
    Country,
    Province,
}

/// One collectible badge: a country or a province.
#[derive(Debug, Clone, Serialize)]
pub struct BadgeCatalogEntry {
    pub kind: BadgeKind,
    /// Canonical key: ISO code for countries, short name for provinces
    pub key: String,
    /// Chinese display name (e.g., "日本", "新疆维吾尔自治区")
    pub name: String,
    /// English display name
    pub english_name: String,
    /// Asset name of the badge artwork
    pub image_name: String,
    /// Every string a destination may be indexed under for this badge
    #[serde(skip)]
    pub match_keys: Vec<String>,
}

impl BadgeCatalogEntry {
    /// Display name in the requested language.
    pub fn display_name(&self, language: Language) -> &str {
        match language {
            Language::English => &self.english_name,
            Language::Chinese => &self.name,
        }
    }
}

/// Computed state of one badge.
#[derive(Debug, Clone)]
pub struct BadgeStatus {
    pub entry: BadgeCatalogEntry,
    pub unlocked: bool,
    /// Destinations that unlock this badge, deduplicated by id
    pub destinations: Vec<Destination>,
    /// Earliest visit year, `None` when locked
    pub earliest_year: Option<i32>,
    /// "2019" or "2019～2023", `None` when locked
    pub year_range: Option<String>,
}

impl BadgeStatus {
    pub fn destination_count(&self) -> usize {
        self.destinations.len()
    }
}

/// Unlocked/total counts for one badge collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BadgeStats {
    pub unlocked: usize,
    pub total: usize,
}

impl BadgeStats {
    /// Share of the collection unlocked, 0-100.
    pub fn progress_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.unlocked as f64 / self.total as f64 * 100.0
    }
}

/// Sorted badge lists for both collections.
#[derive(Debug, Clone, Default)]
pub struct BadgeResult {
    pub countries: Vec<BadgeStatus>,
    /// Empty unless province badges are active for the reference country
    pub provinces: Vec<BadgeStatus>,
    pub province_badges_active: bool,
}

impl BadgeResult {
    /// Badges of one kind, in display order.
    pub fn badges(&self, kind: BadgeKind) -> &[BadgeStatus] {
        match kind {
            BadgeKind::Country => &self.countries,
            BadgeKind::Province => &self.provinces,
        }
    }

    /// Unlocked badges of one kind, in display order.
    pub fn unlocked(&self, kind: BadgeKind) -> impl Iterator<Item = &BadgeStatus> {
        self.badges(kind).iter().filter(|b| b.unlocked)
    }

    pub fn get(&self, kind: BadgeKind, key: &str) -> Option<&BadgeStatus> {
        self.badges(kind).iter().find(|b| b.entry.key == key)
    }

    /// Unlocked/total counts. Provinces report (0, 0) when inactive.
    pub fn stats(&self, kind: BadgeKind) -> BadgeStats {
        if kind == BadgeKind::Province && !self.province_badges_active {
            return BadgeStats::default();
        }
        let badges = self.badges(kind);
        BadgeStats {
            unlocked: badges.iter().filter(|b| b.unlocked).count(),
            total: badges.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percentage() {
        let stats = BadgeStats {
            unlocked: 1,
            total: 4,
        };
        assert_eq!(stats.progress_percentage(), 25.0);
        assert_eq!(BadgeStats::default().progress_percentage(), 0.0);
    }

    #[test]
    fn test_inactive_provinces_report_zero() {
        let result = BadgeResult {
            province_badges_active: false,
            ..Default::default()
        };
        assert_eq!(result.stats(BadgeKind::Province), BadgeStats::default());
    }
}
