//! Performance benchmarks for sectormap.
//!
//! Run with: `cargo bench --features synthetic`
//!
//! Inventories come from the seeded synthetic generator, so runs are
//! comparable across machines and commits.

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sectormap::geojson::write_geojson;
use sectormap::kml::write_kmz;
use sectormap::synthetic::SyntheticInventory;
use sectormap::{
    build_sector_map, build_wedge, generate_circle, read_inventory, GeoPoint, SectorConfig,
};

fn bench_primitives(c: &mut Criterion) {
    let station = GeoPoint::new(-23.5505, -46.6333);

    c.bench_function("build_wedge", |b| {
        b.iter(|| build_wedge(black_box(&station), black_box(120.0), 30.0, 0.7))
    });

    c.bench_function("generate_circle_36", |b| {
        b.iter(|| generate_circle(black_box(&station), black_box(20.0), 36))
    });
}

fn bench_read_inventory(c: &mut Criterion) {
    let csv = SyntheticInventory::metro_area().to_csv();

    c.bench_function("read_inventory_500_stations", |b| {
        b.iter(|| read_inventory(black_box(csv.as_bytes()), b','))
    });
}

fn bench_build_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_sector_map");
    group.sample_size(10);
    let config = SectorConfig::default();

    for stations in [100, 1_000, 10_000] {
        let records = SyntheticInventory::with_station_count(stations).generate();
        group.bench_with_input(BenchmarkId::from_parameter(stations), &records, |b, records| {
            b.iter(|| build_sector_map(black_box(records), &config))
        });
    }

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let records = SyntheticInventory::metro_area().generate();
    let map = match build_sector_map(&records, &SectorConfig::default()) {
        Ok(map) => map,
        Err(e) => panic!("synthetic inventory failed to build: {e}"),
    };

    let mut group = c.benchmark_group("serialize");
    group.sample_size(10);
    group.bench_function("kmz", |b| {
        b.iter(|| write_kmz(black_box(&map.document), Cursor::new(Vec::new())))
    });
    group.bench_function("geojson", |b| {
        b.iter(|| {
            let mut buf = Vec::new();
            write_geojson(black_box(&map.features), &mut buf).map(|_| buf.len())
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_primitives,
    bench_read_inventory,
    bench_build_scaling,
    bench_serialize
);
criterion_main!(benches);
