use adad::{Operand, Product, Quantity, UnitRegistry};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn hubble() -> Quantity {
    Quantity::new(67.26, &[0.98], &[("km", 1), ("Mpc", -1), ("s", -1)]).unwrap()
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    group.bench_function("base_units", |b| {
        b.iter(|| Quantity::new(black_box(67.26), &[0.98], &[("km", 1), ("Mpc", -1), ("s", -1)]));
    });

    group.bench_function("derived_units", |b| {
        b.iter(|| Quantity::new(black_box(1.0), &[], &[("kPa", 1), ("W", -1)]));
    });

    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    let h0 = hubble();

    group.bench_function("to_per_gyr", |b| {
        b.iter(|| black_box(&h0).to(&[("Gyr", -1)]));
    });

    group.bench_function("simplify", |b| {
        b.iter(|| black_box(&h0).simplified());
    });

    let registry = UnitRegistry::builtin();
    for symbol in ["m", "Mpc", "kPa", "erg"] {
        group.bench_with_input(BenchmarkId::new("expand", symbol), &symbol, |b, s| {
            b.iter(|| registry.expand(black_box(s), 2));
        });
    }

    group.finish();
}

fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");
    let a = hubble();
    let b = hubble().pow(-1);

    group.bench_function("multiply", |bench| {
        bench.iter(|| black_box(&a) * black_box(&b));
    });

    group.bench_function("divide_operand", |bench| {
        let operand = Operand::from(&b);
        bench.iter(|| black_box(&a).product(black_box(&operand), Product::Divide));
    });

    group.bench_function("add", |bench| {
        bench.iter(|| black_box(&a).try_add(black_box(&a)));
    });

    group.bench_function("pow", |bench| {
        bench.iter(|| black_box(&a).pow(black_box(3)));
    });

    group.finish();
}

criterion_group!(benches, bench_construction, bench_conversion, bench_arithmetic);
criterion_main!(benches);
