use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use footprint_core::models::{Coordinate, Destination};
use footprint_core::services::{compute_badges, compute_clusters, BadgeOptions};
use footprint_core::services::{AliasTable, BadgeCatalog, PlaceNormalizer};

/// Deterministic grid of destinations around eastern China.
fn grid_destinations(n: usize) -> Vec<Destination> {
    let side = (n as f64).sqrt().ceil() as usize;
    (0..n)
        .map(|i| {
            let latitude = 22.0 + (i / side) as f64 * 0.25;
            let longitude = 105.0 + (i % side) as f64 * 0.25;
            Destination::new(
                format!("Place {i}"),
                Coordinate::new(latitude, longitude).expect("grid stays in range"),
                if i % 5 == 0 { "Japan" } else { "中国" },
                if i % 3 == 0 { "浙江省" } else { "Sichuan" },
                Utc.with_ymd_and_hms(2015 + (i % 10) as i32, 1, 1, 0, 0, 0)
                    .unwrap(),
            )
        })
        .collect()
}

fn benchmark_clustering(c: &mut Criterion) {
    let destinations = grid_destinations(500);

    let mut group = c.benchmark_group("clustering");

    // World view clusters heavily
    group.bench_function("500_world_zoom", |b| {
        b.iter(|| compute_clusters(black_box(&destinations), black_box(2.0)))
    });

    // City view leaves most points alone: worst case for the greedy scan
    group.bench_function("500_city_zoom", |b| {
        b.iter(|| compute_clusters(black_box(&destinations), black_box(11.0)))
    });

    group.finish();
}

fn benchmark_badges(c: &mut Criterion) {
    let table = AliasTable::bundled().expect("Failed to load alias table");
    let catalog = BadgeCatalog::from_aliases(&table);
    let normalizer = PlaceNormalizer::new(&table).expect("Failed to build normalizer");
    let destinations = grid_destinations(500);
    let options = BadgeOptions::default();

    c.bench_function("badges_500", |b| {
        b.iter(|| {
            compute_badges(
                black_box(&destinations),
                &catalog,
                &normalizer,
                true,
                &options,
            )
        })
    });
}

criterion_group!(benches, benchmark_clustering, benchmark_badges);
criterion_main!(benches);
