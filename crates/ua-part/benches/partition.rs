use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ua_part::Partition;

fn partition_bench(c: &mut Criterion) {
    let n = 512;
    let mut left = Partition::zero(n);
    let mut right = Partition::zero(n);
    for x in 0..n / 2 {
        left.union(2 * x, 2 * x + 1);
    }
    for x in 0..n - 3 {
        if x % 3 == 0 {
            right.union(x, x + 3);
        }
    }

    c.bench_function("partition_join", |b| {
        b.iter(|| black_box(left.join(&right).unwrap()));
    });

    c.bench_function("partition_meet", |b| {
        b.iter(|| black_box(left.meet(&right).unwrap()));
    });

    c.bench_function("partition_roundtrip", |b| {
        b.iter(|| {
            let array = black_box(&left).to_array();
            black_box(Partition::from_array(array).unwrap());
        });
    });
}

criterion_group!(benches, partition_bench);
criterion_main!(benches);
