#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use latbox::math::GridBox;
use latbox::{BoxList, complement_in};

/// A checkerboard of `n`×`n` patches of 8 cells, every other one present.
fn checkerboard(n: i32) -> BoxList<2> {
    let mut list = BoxList::new();
    for y in 0..n {
        for x in 0..n {
            if (x + y) % 2 == 0 {
                list.push(GridBox::cell([x * 8, y * 8], [x * 8 + 7, y * 8 + 7]));
            }
        }
    }
    list
}

pub fn complement_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("complement");
    for n in [4, 16, 32] {
        let patches = checkerboard(n);
        let domain = GridBox::cell([0, 0], [n * 8 - 1, n * 8 - 1]);
        group.bench_with_input(BenchmarkId::new("sequential", n), &patches, |b, patches| {
            b.iter(|| complement_in(domain, patches))
        });
        group.bench_with_input(BenchmarkId::new("parallel", n), &patches, |b, patches| {
            b.iter(|| {
                let mut out = BoxList::new();
                out.parallel_complement_in(domain, patches);
                out
            })
        });
    }
    group.finish();
}

pub fn simplify_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify");
    let tiles = BoxList::tiles(GridBox::cell([0, 0, 0], [63, 63, 63]), 4);
    for best in [false, true] {
        group.bench_function(BenchmarkId::new("tiles", best), |b| {
            b.iter_batched_ref(
                || tiles.clone(),
                |list| list.simplify(best),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

pub fn chop_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("chop");
    let b = GridBox::cell([0, 0, 0], [255, 255, 255]);
    for n in [8, 97, 1000] {
        group.bench_function(BenchmarkId::from_parameter(n), |bencher| {
            bencher.iter(|| BoxList::chop(b, n))
        });
    }
    group.bench_function("max_size", |bencher| {
        bencher.iter_batched_ref(
            || BoxList::from_box(b),
            |list| {
                list.max_size(32);
            },
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, complement_bench, simplify_bench, chop_bench);
criterion_main!(benches);
