// [tests/field_integrity.rs]
/*!
 * =================================================================
 * APARATO: FIELD INTEGRITY CERTIFIER (V1.0 - 5x52 SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-MIRROR
 * RESPONSABILIDAD: CERTIFICACIÓN DE ARITMÉTICA MODULAR Fp CONTRA ORÁCULO
 * =================================================================
 */

use num_bigint::BigUint;
use num_traits::{One, Zero};
use secp256k1_core_math::prelude::*;

fn field_prime_oracle() -> BigUint {
    BigUint::parse_bytes(
        b"FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
        16,
    )
    .unwrap()
}

#[test]
fn certify_multiplication_against_bigint_oracle() {
    println!("\n⚖️  [PROVING_GROUNDS]: Auditing field multiplication against BigUint oracle...");
    let oracle_p = field_prime_oracle();

    let a = FieldElement::from_u64(0xDEAD_BEEF_CAFE_BABE);
    let b = FieldElement::from_u64(0x1234_5678_9ABC_DEF0);
    let mut product = a.multiply_modular(&b);
    product.normalize();

    let expected = (BigUint::from(0xDEAD_BEEF_CAFE_BABEu64) * BigUint::from(0x1234_5678_9ABC_DEF0u64)) % &oracle_p;
    let mut expected_bytes = [0u8; 32];
    let raw = expected.to_bytes_be();
    expected_bytes[32 - raw.len()..].copy_from_slice(&raw);

    assert_eq!(product.to_big_endian_bytes(), expected_bytes, "L1_FIELD_FAULT: multiplication drift against oracle");
    println!("   ✅ [SUCCESS]: Multiplication parity certified bit-perfect.");
}

#[test]
fn certify_addition_wraps_past_the_prime() {
    let near_p = FieldElement::from_big_endian_bytes(&field_prime_minus_one_bytes());
    let mut sum = near_p.add_modular(&FieldElement::from_u64(2));
    sum.normalize();
    assert_eq!(sum, FieldElement::from_u64(1), "L1_FIELD_FAULT: (p-1) + 2 must wrap to 1");
}

#[test]
fn certify_inversion_roundtrips_for_a_hundred_samples() {
    println!("\n🧪 [PROVING_GROUNDS]: Auditing inversion over 100 pseudo-random samples...");
    let mut faults = 0;
    for seed in 1u64..=100 {
        let a = FieldElement::from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        if a.is_zero() {
            continue;
        }
        let inv = a.invert();
        let mut product = a.multiply_modular(&inv);
        product.normalize();
        if product != FieldElement::from_u64(1) {
            faults += 1;
        }
    }
    assert_eq!(faults, 0, "L1_FIELD_FAULT: inversion failed to roundtrip on {faults} samples");
}

#[test]
fn certify_batch_inversion_matches_individual_inversion() {
    let elements = [FieldElement::from_u64(2), FieldElement::from_u64(3), FieldElement::from_u64(4), FieldElement::from_u64(5)];
    let mut batch_out = [FieldElement::zero(); 4];
    FieldElement::batch_invert_into(&elements, &mut batch_out);

    for i in 0..4 {
        let mut individual = elements[i].invert();
        let mut batched = batch_out[i];
        individual.normalize();
        batched.normalize();
        assert_eq!(individual, batched, "L1_FIELD_FAULT: batch inversion diverged at index {i}");
    }
}

#[test]
fn certify_square_matches_self_multiplication_for_the_curve_coefficient() {
    let b = FieldElement::from_u64(7);
    let mut squared = b.square_modular();
    let mut multiplied = b.multiply_modular(&b);
    squared.normalize();
    multiplied.normalize();
    assert_eq!(squared, multiplied, "L1_FIELD_FAULT: square_modular diverged from multiply_modular(self, self)");
}

#[test]
fn certify_invert_of_one_is_one_against_the_oracle() {
    let one = FieldElement::from_u64(1);
    let mut inverted = one.invert();
    inverted.normalize();
    assert_eq!(inverted, one, "L1_FIELD_FAULT: inverse of the multiplicative identity must be itself");

    let oracle_one: BigUint = One::one();
    let oracle_zero: BigUint = Zero::zero();
    assert_ne!(oracle_one, oracle_zero, "L1_FIELD_FAULT: oracle identities must be distinguishable");
    assert_eq!(inverted.to_big_endian_bytes()[31], 1);
}

fn field_prime_minus_one_bytes() -> [u8; 32] {
    let mut bytes = [0xFFu8; 32];
    bytes[27] = 0xFE;
    bytes[28..32].copy_from_slice(&[0xFF, 0xFF, 0xFC, 0x2E]);
    bytes
}
