//! Benchmarks for binary morphology

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use poremet_algorithms::morphology::{
    closing, dilate, erode, opening, remove_small_objects, StructuringElement,
};
use poremet_core::{BinaryMask, Connectivity, Grid};

/// Checkerboard-of-blobs mask with structure at several scales
fn create_test_mask(size: usize) -> BinaryMask {
    let mut mask: BinaryMask = Grid::new(size, size);
    for row in 0..size {
        for col in 0..size {
            let blob = (row / 7 + col / 11) % 3 == 0;
            let speckle = (row * 31 + col * 17) % 97 == 0;
            if blob || speckle {
                mask.set(row, col, true).unwrap();
            }
        }
    }
    mask
}

fn bench_erode(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/erode");
    let se = StructuringElement::Square(1);
    for size in [256, 512, 1024, 2048] {
        let mask = create_test_mask(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| erode(black_box(&mask), &se).unwrap())
        });
    }
    group.finish();
}

fn bench_dilate(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/dilate");
    let se = StructuringElement::Square(1);
    for size in [256, 512, 1024, 2048] {
        let mask = create_test_mask(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| dilate(black_box(&mask), &se).unwrap())
        });
    }
    group.finish();
}

fn bench_open_close(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/open_close");
    let se = StructuringElement::Square(1);
    let mask = create_test_mask(1024);
    group.bench_function("opening", |b| {
        b.iter(|| opening(black_box(&mask), &se).unwrap())
    });
    group.bench_function("closing", |b| {
        b.iter(|| closing(black_box(&mask), &se).unwrap())
    });
    group.finish();
}

fn bench_small_object_removal(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/remove_small_objects");
    for size in [256, 512, 1024] {
        let mask = create_test_mask(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| remove_small_objects(black_box(&mask), 16, Connectivity::Eight).unwrap())
        });
    }
    group.finish();
}

fn bench_se_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("morphology/erode_shapes");
    let mask = create_test_mask(1024);
    let shapes: Vec<(&str, StructuringElement)> = vec![
        ("square_3", StructuringElement::Square(1)),
        ("cross_3", StructuringElement::Cross(1)),
        ("disk_3", StructuringElement::Disk(1)),
        ("square_5", StructuringElement::Square(2)),
        ("disk_5", StructuringElement::Disk(2)),
    ];
    for (name, se) in &shapes {
        group.bench_with_input(BenchmarkId::new("shape", name), name, |b, _| {
            b.iter(|| erode(black_box(&mask), se).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_erode,
    bench_dilate,
    bench_open_close,
    bench_small_object_removal,
    bench_se_shapes,
);
criterion_main!(benches);
