// [benches/secp256k1_bench.rs]
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use secp256k1_core_math::fast;
use secp256k1_core_math::generator_mul::generator_mul;
use secp256k1_core_math::point::{AffinePoint, JacobianPoint};
use secp256k1_core_math::scalar::Scalar;
use secp256k1_core_math::scalar_mul::scalar_mul;

fn bench_generator_mul(c: &mut Criterion) {
    let k = Scalar::from_bytes(&[0x7A; 32]);
    c.bench_function("generator_mul (fixed-base, constant-time)", |b| {
        b.iter(|| generator_mul(black_box(&k)))
    });
}

fn bench_scalar_mul(c: &mut Criterion) {
    let g = JacobianPoint::generator();
    let k = Scalar::from_bytes(&[0x7A; 32]);
    c.bench_function("scalar_mul (variable-base, GLV+Strauss, constant-time)", |b| {
        b.iter(|| scalar_mul(black_box(&g), black_box(&k)))
    });
}

fn bench_fast_scalar_mul(c: &mut Criterion) {
    let g = AffinePoint::generator();
    let k = Scalar::from_bytes(&[0x7A; 32]);
    c.bench_function("fast::scalar_mul (double-and-add, non constant-time)", |b| {
        b.iter(|| fast::scalar_mul(black_box(&g), black_box(&k)))
    });
}

fn bench_complete_add(c: &mut Criterion) {
    let g = JacobianPoint::generator();
    let two_g = fast::double(&g);
    c.bench_function("complete_add (branchless Jacobian addition)", |b| {
        b.iter(|| secp256k1_core_math::complete_add::complete_add(black_box(&g), black_box(&two_g)))
    });
}

criterion_group!(benches, bench_generator_mul, bench_scalar_mul, bench_fast_scalar_mul, bench_complete_add);
criterion_main!(benches);
