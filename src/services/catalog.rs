// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fixed badge catalog built from the alias table.

use crate::models::{BadgeCatalogEntry, BadgeKind};
use crate::services::normalize::AliasTable;

/// All collectible badges, in catalog order.
#[derive(Debug, Clone)]
pub struct BadgeCatalog {
    countries: Vec<BadgeCatalogEntry>,
    provinces: Vec<BadgeCatalogEntry>,
    province_country: String,
}

impl BadgeCatalog {
    /// Build the catalog: one country badge per country, one province badge
    /// per province of the province-tracked country.
    pub fn from_aliases(table: &AliasTable) -> Self {
        let countries = table
            .countries
            .iter()
            .map(|c| BadgeCatalogEntry {
                kind: BadgeKind::Country,
                key: c.code.clone(),
                name: c.name.clone(),
                english_name: c.english_name.clone(),
                image_name: format!("CountryBadge_{}", c.code),
                match_keys: c.spellings().map(str::to_string).collect(),
            })
            .collect();

        // Province badges display the short canonical name.
        let provinces = table
            .provinces
            .iter()
            .map(|p| BadgeCatalogEntry {
                kind: BadgeKind::Province,
                key: p.key.clone(),
                name: p.key.clone(),
                english_name: p.english_name.clone(),
                image_name: format!("ProvinceBadge_{}", p.key),
                match_keys: vec![p.key.clone()],
            })
            .collect();

        Self {
            countries,
            provinces,
            province_country: table.province_country.clone(),
        }
    }

    pub fn entries(&self, kind: BadgeKind) -> &[BadgeCatalogEntry] {
        match kind {
            BadgeKind::Country => &self.countries,
            BadgeKind::Province => &self.provinces,
        }
    }

    pub fn countries(&self) -> &[BadgeCatalogEntry] {
        &self.countries
    }

    pub fn provinces(&self) -> &[BadgeCatalogEntry] {
        &self.provinces
    }

    /// ISO code of the country whose provinces have badges.
    pub fn province_country(&self) -> &str {
        &self.province_country
    }

    pub fn len(&self) -> usize {
        self.countries.len() + self.provinces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
