use criterion::{black_box, criterion_group, criterion_main, Criterion};
use capmatch::{Feature, FeatureTable, Location, Statement};

/// Build an `Or` of `n` leaves where only the last feature is present, so the
/// short-circuit path still has to walk every child.
fn build_wide(n: i64) -> (Statement, FeatureTable) {
    let children = (0..n).map(|i| Statement::leaf(Feature::Number(i))).collect();
    let stmt = Statement::or(children).unwrap();
    let table = FeatureTable::new().set(n - 1, [Location::Absolute(0x401000)]);
    (stmt, table)
}

/// Build an `And` whose first child already fails: the best case for
/// short-circuiting and the worst case for exhaustive evaluation.
fn build_early_fail(n: i64) -> (Statement, FeatureTable) {
    let children = (0..n).map(|i| Statement::leaf(Feature::Number(i))).collect();
    let stmt = Statement::and(children).unwrap();
    let table: FeatureTable = (1..n)
        .map(|i| (Feature::Number(i), [Location::Absolute(0x401000 + i as u64)]))
        .collect();
    (stmt, table)
}

/// Build a chain of `depth` nested `And`/`Some` nodes, each with a leaf sibling.
fn build_deep(depth: usize) -> (Statement, FeatureTable) {
    let mut stmt = Statement::count(Feature::Mnemonic("xor".into()));
    for i in 0..depth {
        let leaf = Statement::leaf(Feature::Number(i as i64));
        stmt = if i % 2 == 0 {
            Statement::and(vec![leaf, stmt]).unwrap()
        } else {
            Statement::some(1, vec![leaf, stmt]).unwrap()
        };
    }
    let table: FeatureTable = (0..depth as i64)
        .map(|i| (Feature::Number(i), [Location::Relative(i as u64 * 4)]))
        .collect();
    (stmt, table)
}

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_or");

    for &n in &[8, 64, 512] {
        let (stmt, table) = build_wide(n);
        group.bench_function(&format!("{n}_children_short_circuit"), |b| {
            b.iter(|| stmt.evaluate_with(black_box(&table), true).success());
        });
        group.bench_function(&format!("{n}_children_exhaustive"), |b| {
            b.iter(|| stmt.evaluate_with(black_box(&table), false).success());
        });
    }

    group.finish();
}

fn bench_early_fail(c: &mut Criterion) {
    let mut group = c.benchmark_group("early_fail_and");

    for &n in &[8, 64, 512] {
        let (stmt, table) = build_early_fail(n);
        group.bench_function(&format!("{n}_children_short_circuit"), |b| {
            b.iter(|| stmt.evaluate_with(black_box(&table), true).success());
        });
        group.bench_function(&format!("{n}_children_exhaustive"), |b| {
            b.iter(|| stmt.evaluate_with(black_box(&table), false).success());
        });
    }

    group.finish();
}

fn bench_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_tree");

    for &depth in &[4, 32, 256] {
        let (stmt, table) = build_deep(depth);
        group.bench_function(&format!("depth_{depth}"), |b| {
            b.iter(|| stmt.evaluate(black_box(&table)).success());
        });
    }

    group.finish();
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for &depth in &[4, 32, 256] {
        group.bench_function(&format!("depth_{depth}"), |b| {
            b.iter(|| black_box(build_deep(depth)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_wide,
    bench_early_fail,
    bench_deep,
    bench_construction
);
criterion_main!(benches);
