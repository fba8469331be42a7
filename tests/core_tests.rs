// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Facade construction and reference-country handling.

use footprint_core::config::Config;
use footprint_core::db::{DestinationSource, MemoryStore};
use footprint_core::error::CoreError;
use footprint_core::events::{CoreEvent, EventBus};
use footprint_core::models::BadgeKind;
use footprint_core::FootprintCore;
use std::path::PathBuf;

mod common;
use common::sample_destinations;

#[test]
fn test_default_config_uses_bundled_table() {
    let core = FootprintCore::new(Config::default()).unwrap();
    assert_eq!(core.reference_country(), "CN");
    assert!(core.province_badges_active());
    assert_eq!(core.catalog().province_country(), "CN");
    assert!(!core.catalog().is_empty());
}

#[test]
fn test_missing_alias_table_is_io_error() {
    let config = Config {
        alias_table_path: Some(PathBuf::from("data/does-not-exist.json")),
        ..Config::default()
    };
    let err = FootprintCore::new(config).err().unwrap();
    assert!(matches!(err, CoreError::Io(_)));
}

#[test]
fn test_alias_table_override_from_file() {
    let config = Config {
        alias_table_path: Some(PathBuf::from("data/place_aliases.json")),
        reference_country: "  china ".to_string(),
        ..Config::default()
    };
    let core = FootprintCore::new(config).unwrap();
    assert_eq!(core.reference_country(), "CN");
}

#[tokio::test]
async fn test_reference_country_change_publishes_once() {
    let core = FootprintCore::new(Config::default()).unwrap();
    let mut events = core.events().subscribe();

    assert_eq!(core.set_reference_country("中国"), "CN");
    assert_eq!(core.set_reference_country("jp"), "JP");

    assert_eq!(
        events.recv().await.unwrap(),
        CoreEvent::ReferenceCountryChanged("JP".to_string())
    );
    assert!(events.try_recv().is_err());
}

#[test]
fn test_badges_use_current_reference_country() {
    let core = FootprintCore::new(Config::default()).unwrap();
    let destinations = sample_destinations();

    let domestic = core.badges(&destinations);
    assert_eq!(domestic.stats(BadgeKind::Province).unlocked, 6);

    core.set_reference_country("France");
    let abroad = core.badges(&destinations);
    assert!(abroad.provinces.is_empty());
    assert_eq!(core.badge_store().computations(), 2);
}

#[test]
fn test_memory_store_snapshot_file() {
    let path = std::env::temp_dir().join(format!(
        "footprint-snapshot-{}.json",
        uuid::Uuid::new_v4()
    ));

    let store = MemoryStore::new(EventBus::new());
    for destination in sample_destinations() {
        store.add(destination);
    }
    std::fs::write(&path, store.to_json().unwrap()).unwrap();

    let reloaded = MemoryStore::load_from_file(&path, EventBus::new()).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(reloaded.destinations().len(), 10);
    let core = FootprintCore::new(Config::default()).unwrap();
    let result = core.badges(&reloaded.destinations());
    assert_eq!(result.stats(BadgeKind::Country).unlocked, 4);
}
