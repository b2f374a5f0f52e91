//! Criterion benchmarks for sector construction and containment.
//! Focus sizes: arc_resolution in {5, 21, 81, 321}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use searchgeo::containment::contains_with_buffer;
use searchgeo::sector::{build_sector_polygon, SectorSpec};
use searchgeo::units::offset;
use searchgeo::GeoPoint;

fn random_spec(rng: &mut StdRng, arc_resolution: usize) -> SectorSpec {
    let center = GeoPoint::new(rng.gen_range(35.0..45.0), rng.gen_range(-80.0..-70.0));
    let direction = offset(center, rng.gen_range(0.0..360.0), 1.0).unwrap();
    let min_r = rng.gen_range(0.0..10.0);
    SectorSpec::new(
        center,
        direction,
        rng.gen_range(5.0..120.0),
        min_r,
        min_r + rng.gen_range(1.0..30.0),
    )
    .with_arc_resolution(arc_resolution)
}

fn bench_sector(c: &mut Criterion) {
    let mut group = c.benchmark_group("sector");
    for &n in &[5usize, 21, 81, 321] {
        group.bench_with_input(BenchmarkId::new("build_sector_polygon", n), &n, |b, &n| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter_batched(
                || random_spec(&mut rng, n),
                |spec| {
                    let _poly = build_sector_polygon(&spec).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("contains_with_buffer", n), &n, |b, &n| {
            let mut rng = StdRng::seed_from_u64(43);
            let spec = random_spec(&mut rng, n);
            let poly = build_sector_polygon(&spec).unwrap();
            b.iter_batched(
                || {
                    GeoPoint::new(
                        spec.center.latitude + rng.gen_range(-0.5..0.5),
                        spec.center.longitude + rng.gen_range(-0.5..0.5),
                    )
                },
                |p| {
                    let _inside = contains_with_buffer(p, &poly, 0.5);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sector);
criterion_main!(benches);
