// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Badge unlock computation.
//!
//! Handles the core workflow:
//! 1. Index destinations by country (raw and normalized) and by province
//! 2. Gather supporting destinations for every catalog entry
//! 3. Derive earliest visit year and year-range label
//! 4. Sort: unlocked by earliest year, then locked by display name

use chrono::{FixedOffset, Offset};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::{
    BadgeCatalogEntry, BadgeKind, BadgeResult, BadgeStatus, Destination, Language,
};
use crate::services::catalog::BadgeCatalog;
use crate::services::normalize::PlaceNormalizer;
use crate::time_utils::{format_year_range, year_bounds};

/// Presentation inputs for badge computation.
#[derive(Debug, Clone, Copy)]
pub struct BadgeOptions {
    /// Language whose display names order the locked badges
    pub language: Language,
    /// Offset used to extract calendar years from visit dates
    pub utc_offset: FixedOffset,
}

impl Default for BadgeOptions {
    fn default() -> Self {
        Self {
            language: Language::English,
            utc_offset: chrono::Utc.fix(),
        }
    }
}

/// Destination indices keyed by lookup string.
type DestinationIndex = HashMap<String, Vec<usize>>;

/// Compute unlock state, supporting destinations and ordering for every badge.
///
/// Province badges are only computed when `province_badges_active` is set;
/// otherwise the province list is empty.
pub fn compute_badges(
    destinations: &[Destination],
    catalog: &BadgeCatalog,
    normalizer: &PlaceNormalizer,
    province_badges_active: bool,
    options: &BadgeOptions,
) -> BadgeResult {
    let (country_index, province_index) =
        build_indices(destinations, normalizer, province_badges_active);

    let countries = sorted_statuses(
        catalog.countries(),
        &country_index,
        destinations,
        options,
    );

    let provinces = if province_badges_active {
        sorted_statuses(catalog.provinces(), &province_index, destinations, options)
    } else {
        Vec::new()
    };

    log_unmatched(destinations, normalizer, province_badges_active);

    let result = BadgeResult {
        countries,
        provinces,
        province_badges_active,
    };

    tracing::debug!(
        destinations = destinations.len(),
        countries_unlocked = result.stats(BadgeKind::Country).unlocked,
        provinces_unlocked = result.stats(BadgeKind::Province).unlocked,
        province_badges_active,
        "Computed badges"
    );
    result
}

/// One pass over destinations building the country and province indices.
///
/// Countries are indexed under both the raw (trimmed) string and the
/// normalized key. Provinces are indexed only for destinations in the
/// province-tracked country.
fn build_indices(
    destinations: &[Destination],
    normalizer: &PlaceNormalizer,
    with_provinces: bool,
) -> (DestinationIndex, DestinationIndex) {
    let mut countries: DestinationIndex = HashMap::new();
    let mut provinces: DestinationIndex = HashMap::new();

    for (i, destination) in destinations.iter().enumerate() {
        let raw = destination.country.trim();
        let normalized = normalizer.normalize_country(raw);

        if !raw.is_empty() {
            countries.entry(raw.to_string()).or_default().push(i);
        }
        if !normalized.is_empty() && normalized != raw {
            countries.entry(normalized.clone()).or_default().push(i);
        }

        if with_provinces && normalized == normalizer.province_country() {
            let province = normalizer.normalize_province(&destination.province);
            if !province.is_empty() {
                provinces.entry(province).or_default().push(i);
            }
        }
    }

    (countries, provinces)
}

fn sorted_statuses(
    entries: &[BadgeCatalogEntry],
    index: &DestinationIndex,
    destinations: &[Destination],
    options: &BadgeOptions,
) -> Vec<BadgeStatus> {
    let mut statuses: Vec<BadgeStatus> = entries
        .iter()
        .map(|entry| badge_status(entry, index, destinations, options.utc_offset))
        .collect();

    statuses.sort_by(|a, b| compare_badges(a, b, options.language));
    statuses
}

fn badge_status(
    entry: &BadgeCatalogEntry,
    index: &DestinationIndex,
    destinations: &[Destination],
    utc_offset: FixedOffset,
) -> BadgeStatus {
    let mut seen = HashSet::new();
    let supporting: Vec<Destination> = entry
        .match_keys
        .iter()
        .filter_map(|key| index.get(key))
        .flatten()
        .map(|&i| &destinations[i])
        .filter(|d| seen.insert(d.id))
        .cloned()
        .collect();

    let bounds = year_bounds(supporting.iter().map(|d| d.visit_year(utc_offset)));

    BadgeStatus {
        entry: entry.clone(),
        unlocked: !supporting.is_empty(),
        destinations: supporting,
        earliest_year: bounds.map(|(min, _)| min),
        year_range: bounds.map(|(min, max)| format_year_range(min, max)),
    }
}

/// Unlocked first (earliest year ascending), then locked (display name,
/// case-insensitive). A missing year sorts after every real year.
fn compare_badges(a: &BadgeStatus, b: &BadgeStatus, language: Language) -> Ordering {
    match (a.unlocked, b.unlocked) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => a
            .earliest_year
            .unwrap_or(i32::MAX)
            .cmp(&b.earliest_year.unwrap_or(i32::MAX)),
        (false, false) => a
            .entry
            .display_name(language)
            .to_lowercase()
            .cmp(&b.entry.display_name(language).to_lowercase()),
    }
}

/// Report place names that match no catalog entry.
///
/// These leave badges locked without any user-facing signal, so they are
/// only surfaced in debug logs.
fn log_unmatched(
    destinations: &[Destination],
    normalizer: &PlaceNormalizer,
    with_provinces: bool,
) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let mut countries = BTreeSet::new();
    let mut provinces = BTreeSet::new();
    for destination in destinations {
        let country = destination.country.trim();
        if !country.is_empty() && !normalizer.is_known_country(country) {
            countries.insert(country);
        }

        let province = destination.province.trim();
        if with_provinces
            && !province.is_empty()
            && normalizer.is_province_country(country)
            && !normalizer.is_known_province(province)
        {
            provinces.insert(province);
        }
    }

    if !countries.is_empty() || !provinces.is_empty() {
        tracing::debug!(
            countries = ?countries,
            provinces = ?provinces,
            "Place names without a matching badge"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use crate::services::normalize::AliasTable;
    use chrono::{TimeZone, Utc};

    fn fixtures() -> (BadgeCatalog, PlaceNormalizer) {
        let table = AliasTable::bundled().unwrap();
        (
            BadgeCatalog::from_aliases(&table),
            PlaceNormalizer::new(&table).unwrap(),
        )
    }

    fn visit(country: &str, province: &str, year: i32) -> Destination {
        Destination::new(
            format!("{country} {province} {year}"),
            Coordinate::new(30.0, 120.0).unwrap(),
            country,
            province,
            Utc.with_ymd_and_hms(year, 6, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_raw_and_normalized_spellings_dedup() {
        let (catalog, normalizer) = fixtures();
        let d = visit("Japan", "", 2020);

        let result = compute_badges(
            &[d.clone()],
            &catalog,
            &normalizer,
            false,
            &BadgeOptions::default(),
        );

        // Indexed under "Japan" and "JP", but counted once.
        let japan = result.get(BadgeKind::Country, "JP").unwrap();
        assert!(japan.unlocked);
        assert_eq!(japan.destination_count(), 1);
        assert_eq!(japan.destinations[0].id, d.id);
    }

    #[test]
    fn test_mixed_scripts_unlock_same_badge() {
        let (catalog, normalizer) = fixtures();
        let visits = [visit("日本", "", 2018), visit("jp", "", 2022)];

        let result = compute_badges(
            &visits,
            &catalog,
            &normalizer,
            false,
            &BadgeOptions::default(),
        );
        let japan = result.get(BadgeKind::Country, "JP").unwrap();

        assert_eq!(japan.destination_count(), 2);
        assert_eq!(japan.earliest_year, Some(2018));
        assert_eq!(japan.year_range.as_deref(), Some("2018～2022"));
    }

    #[test]
    fn test_provinces_require_province_country() {
        let (catalog, normalizer) = fixtures();
        // A "Zhejiang" province on a non-Chinese destination does not count.
        let visits = [visit("Japan", "Zhejiang", 2020), visit("中国", "浙江省", 2021)];

        let result = compute_badges(
            &visits,
            &catalog,
            &normalizer,
            true,
            &BadgeOptions::default(),
        );
        let zhejiang = result
            .get(BadgeKind::Province, "浙江")
            .unwrap();

        assert_eq!(zhejiang.destination_count(), 1);
        assert_eq!(zhejiang.year_range.as_deref(), Some("2021"));
    }

    #[test]
    fn test_locked_sorted_case_insensitive() {
        let (catalog, normalizer) = fixtures();
        let result = compute_badges(&[], &catalog, &normalizer, false, &BadgeOptions::default());

        let names: Vec<String> = result
            .countries
            .iter()
            .map(|b| b.entry.english_name.to_lowercase())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(result.countries.iter().all(|b| !b.unlocked));
    }
}
