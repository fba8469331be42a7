// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Country and province name normalization.
//!
//! Destinations store places as free text in mixed scripts ("日本", "Japan",
//! "JP"; "新疆", "Xinjiang Uyghur Autonomous Region"). Matching against the
//! badge catalog goes through a canonical key looked up in a versioned alias
//! table (`data/place_aliases.json`).

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{CoreError, Result};

/// Alias table shipped with the crate.
pub const BUNDLED_ALIAS_TABLE: &str = include_str!("../../data/place_aliases.json");

/// Versioned alias/reference data for countries and provinces.
#[derive(Debug, Clone, Deserialize)]
pub struct AliasTable {
    pub version: u32,
    /// ISO code of the country whose provinces are badge-tracked
    pub province_country: String,
    /// Suffixes stripped from province names, tried in order
    #[serde(default)]
    pub province_suffixes: Vec<String>,
    pub countries: Vec<CountryAliases>,
    #[serde(default)]
    pub provinces: Vec<ProvinceAliases>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryAliases {
    /// ISO 3166-1 alpha-2 code
    pub code: String,
    /// Chinese name
    pub name: String,
    pub english_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvinceAliases {
    /// Canonical short name (e.g., "新疆")
    pub key: String,
    /// Full Chinese name (e.g., "新疆维吾尔自治区")
    pub name: String,
    pub english_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl CountryAliases {
    /// Every spelling that identifies this country.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        [self.code.as_str(), self.name.as_str(), self.english_name.as_str()]
            .into_iter()
            .chain(self.aliases.iter().map(String::as_str))
    }
}

impl ProvinceAliases {
    /// Every spelling that identifies this province.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        [self.key.as_str(), self.name.as_str(), self.english_name.as_str()]
            .into_iter()
            .chain(self.aliases.iter().map(String::as_str))
    }
}

impl AliasTable {
    /// The table bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Self::load_from_json(BUNDLED_ALIAS_TABLE)
    }

    /// Load an alias table from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CoreError::Io(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load an alias table from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self> {
        let table: AliasTable = serde_json::from_str(json_data)
            .map_err(|e| CoreError::Parse(format!("alias table: {e}")))?;

        if table.countries.is_empty() {
            return Err(CoreError::AliasTable("no countries".to_string()));
        }
        if !table
            .countries
            .iter()
            .any(|c| c.code == table.province_country)
        {
            return Err(CoreError::AliasTable(format!(
                "province country {} is not in the country list",
                table.province_country
            )));
        }

        tracing::info!(
            version = table.version,
            countries = table.countries.len(),
            provinces = table.provinces.len(),
            "Loaded alias table"
        );
        Ok(table)
    }
}

/// Case-fold a place name for lookups.
fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Insert every spelling into a lookup, rejecting spellings claimed twice.
fn insert_spellings<'a>(
    lookup: &mut HashMap<String, String>,
    canonical: &str,
    spellings: impl Iterator<Item = &'a str>,
) -> Result<()> {
    for spelling in spellings {
        let folded = fold(spelling);
        if folded.is_empty() {
            continue;
        }
        if let Some(existing) = lookup.insert(folded, canonical.to_string()) {
            if existing != canonical {
                return Err(CoreError::AliasTable(format!(
                    "\"{spelling}\" maps to both {existing} and {canonical}"
                )));
            }
        }
    }
    Ok(())
}

/// Maps free-text country and province names to canonical keys.
#[derive(Debug, Clone)]
pub struct PlaceNormalizer {
    countries: HashMap<String, String>,
    provinces: HashMap<String, String>,
    province_suffixes: Vec<String>,
    province_country: String,
}

impl PlaceNormalizer {
    /// Build lookups from an alias table.
    pub fn new(table: &AliasTable) -> Result<Self> {
        let mut countries = HashMap::new();
        for country in &table.countries {
            insert_spellings(&mut countries, &country.code, country.spellings())?;
        }

        let mut provinces = HashMap::new();
        for province in &table.provinces {
            insert_spellings(&mut provinces, &province.key, province.spellings())?;
        }

        Ok(Self {
            countries,
            provinces,
            province_suffixes: table
                .province_suffixes
                .iter()
                .map(|s| s.to_lowercase())
                .filter(|s| !s.trim().is_empty())
                .collect(),
            province_country: table.province_country.clone(),
        })
    }

    /// Normalizer over the bundled alias table.
    pub fn bundled() -> Result<Self> {
        Self::new(&AliasTable::bundled()?)
    }

    /// ISO code of the province-tracked country.
    pub fn province_country(&self) -> &str {
        &self.province_country
    }

    /// Canonical country key (ISO code).
    ///
    /// Unknown names come back trimmed and lowercased so that they never
    /// collide with a catalog key.
    pub fn normalize_country(&self, country: &str) -> String {
        let folded = fold(country);
        match self.countries.get(&folded) {
            Some(code) => code.clone(),
            None => folded,
        }
    }

    /// Whether the name is a known country spelling.
    pub fn is_known_country(&self, country: &str) -> bool {
        self.countries.contains_key(&fold(country))
    }

    /// Canonical province key (short name, e.g. "新疆").
    ///
    /// A full spelling is looked up first, then one administrative suffix
    /// ("省", "自治区", " Province", ...) is stripped and the lookup retried.
    pub fn normalize_province(&self, province: &str) -> String {
        let folded = fold(province);
        if folded.is_empty() {
            return folded;
        }
        if let Some(key) = self.provinces.get(&folded) {
            return key.clone();
        }

        let stripped = self.strip_province_suffix(&folded);
        match self.provinces.get(stripped) {
            Some(key) => key.clone(),
            None => stripped.to_string(),
        }
    }

    /// Whether the name is a known province spelling (with or without suffix).
    pub fn is_known_province(&self, province: &str) -> bool {
        let folded = fold(province);
        self.provinces.contains_key(&folded)
            || self
                .provinces
                .contains_key(self.strip_province_suffix(&folded))
    }

    fn strip_province_suffix<'a>(&self, folded: &'a str) -> &'a str {
        for suffix in &self.province_suffixes {
            if let Some(rest) = folded.strip_suffix(suffix.as_str()) {
                let rest = rest.trim_end();
                // Only one suffix is ever removed, and never down to nothing.
                if !rest.is_empty() {
                    return rest;
                }
            }
        }
        folded
    }

    /// Whether the country is the province-tracked one.
    pub fn is_province_country(&self, country: &str) -> bool {
        self.normalize_country(country) == self.province_country
    }

    /// Whether a destination country counts as domestic for a reference country.
    pub fn is_domestic(&self, country: &str, reference_country: &str) -> bool {
        let normalized = self.normalize_country(country);
        !normalized.is_empty() && normalized == self.normalize_country(reference_country)
    }
}
