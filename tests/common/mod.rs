// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{TimeZone, Utc};
use footprint_core::models::{Coordinate, Destination};
use footprint_core::services::{AliasTable, BadgeCatalog, BadgeOptions, BadgeStore, PlaceNormalizer};
use std::sync::Arc;

/// A destination visited on June 1st of `year`.
#[allow(dead_code)]
pub fn destination(
    name: &str,
    latitude: f64,
    longitude: f64,
    country: &str,
    province: &str,
    year: i32,
) -> Destination {
    Destination::new(
        name,
        Coordinate::new(latitude, longitude).expect("valid test coordinate"),
        country,
        province,
        Utc.with_ymd_and_hms(year, 6, 1, 12, 0, 0).unwrap(),
    )
}

/// A destination where only the place names matter.
#[allow(dead_code)]
pub fn visit(country: &str, province: &str, year: i32) -> Destination {
    destination(
        &format!("{country} {province}"),
        30.0,
        120.0,
        country,
        province,
        year,
    )
}

/// A spread of real cities across China, Japan and Europe.
#[allow(dead_code)]
pub fn sample_destinations() -> Vec<Destination> {
    vec![
        destination("Beijing", 39.9042, 116.4074, "中国", "北京市", 2019),
        destination("Tianjin", 39.3434, 117.3616, "China", "Tianjin", 2020),
        destination("Shanghai", 31.2304, 121.4737, "中国", "上海", 2021),
        destination("Hangzhou", 30.2741, 120.1551, "中国", "浙江省", 2021),
        destination("Suzhou", 31.2989, 120.5853, "中国", "江苏", 2022),
        destination("Urumqi", 43.8256, 87.6168, "中国", "新疆维吾尔自治区", 2023),
        destination("Tokyo", 35.6762, 139.6503, "日本", "", 2018),
        destination("Yokohama", 35.4437, 139.6380, "Japan", "", 2023),
        destination("Paris", 48.8566, 2.3522, "France", "", 2017),
        destination("London", 51.5072, -0.1276, "United Kingdom", "", 2016),
    ]
}

/// Catalog and normalizer over the bundled alias table.
#[allow(dead_code)]
pub fn bundled_reference() -> (BadgeCatalog, PlaceNormalizer) {
    let table = AliasTable::bundled().expect("bundled alias table loads");
    (
        BadgeCatalog::from_aliases(&table),
        PlaceNormalizer::new(&table).expect("bundled alias table is consistent"),
    )
}

/// A fresh badge store over the bundled alias table.
#[allow(dead_code)]
pub fn bundled_store() -> Arc<BadgeStore> {
    let (catalog, normalizer) = bundled_reference();
    Arc::new(BadgeStore::new(
        Arc::new(catalog),
        Arc::new(normalizer),
        BadgeOptions::default(),
    ))
}
