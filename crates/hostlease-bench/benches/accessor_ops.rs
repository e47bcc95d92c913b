//! Criterion micro-benchmarks for scoped accessor construct+drop on
//! both storage paths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hostlease::{ArrayRo, ArrayRw};
use hostlease_bench::{bracketing_lengths, host_with_array};

fn bench_ro_inline(c: &mut Criterion) {
    let [below, at, _, _] = bracketing_lengths::<i32>();
    for len in [below, at] {
        let (host, array) = host_with_array(len);
        c.bench_function(&format!("ro_inline_{len}"), |b| {
            b.iter(|| {
                let view = ArrayRo::new(&host, Some(array));
                black_box(view[len - 1])
            });
        });
    }
}

fn bench_ro_checked_out(c: &mut Criterion) {
    let [_, _, just_above, well_above] = bracketing_lengths::<i32>();
    for len in [just_above, well_above] {
        let (host, array) = host_with_array(len);
        c.bench_function(&format!("ro_checked_out_{len}"), |b| {
            b.iter(|| {
                let view = ArrayRo::new(&host, Some(array));
                black_box(view[len - 1])
            });
        });
    }
}

fn bench_rw_commit(c: &mut Criterion) {
    let [below, _, _, well_above] = bracketing_lengths::<i32>();
    for len in [below, well_above] {
        let (host, array) = host_with_array(len);
        c.bench_function(&format!("rw_commit_{len}"), |b| {
            b.iter(|| {
                let mut view = ArrayRw::new(&host, Some(array));
                view[0] = black_box(1);
            });
        });
    }
}

fn bench_ro_copying_host(c: &mut Criterion) {
    let [_, _, _, well_above] = bracketing_lengths::<i32>();
    let (host, array) = host_with_array(well_above);
    host.serve_copies(true);
    c.bench_function("ro_checked_out_copying_host", |b| {
        b.iter(|| {
            let view = ArrayRo::new(&host, Some(array));
            black_box(view[0])
        });
    });
}

criterion_group!(
    benches,
    bench_ro_inline,
    bench_ro_checked_out,
    bench_rw_commit,
    bench_ro_copying_host
);
criterion_main!(benches);
