// [tests/scalar_integrity.rs]
/*!
 * =================================================================
 * APARATO: SCALAR INTEGRITY CERTIFIER (V1.0 - BARRETT SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-MIRROR
 * RESPONSABILIDAD: CERTIFICACIÓN DE REDUCCIÓN MODULO N Y SEGURIDAD
 * =================================================================
 */

use secp256k1_core_math::prelude::*;
use secp256k1_core_math::scalar::Scalar;

#[test]
fn certify_order_plus_one_reduces_to_one() {
    println!("\n⚖️  [PROVING_GROUNDS]: Auditing scalar reduction at the curve order boundary...");
    let n_bytes = curve_order_bytes();
    let mut n_plus_one = n_bytes;
    n_plus_one[31] = n_plus_one[31].wrapping_add(1);

    let reduced = Scalar::from_bytes(&n_plus_one);
    assert_eq!(reduced, Scalar::from_u64(1), "L1_SCALAR_FAULT: n + 1 must reduce to 1");
    println!("   ✅ [SUCCESS]: Boundary reduction certified bit-perfect.");
}

#[test]
fn certify_checked_deserialization_rejects_out_of_range_scalar() {
    let n_bytes = curve_order_bytes();
    assert!(Scalar::from_bytes_checked(&n_bytes).is_err(), "L1_SCALAR_FAULT: n itself must be rejected by the strict constructor");
}

#[test]
fn certify_checked_deserialization_rejects_zero() {
    assert!(Scalar::from_bytes_checked(&[0u8; 32]).is_err(), "L1_SCALAR_FAULT: the strict constructor must reject zero");
}

#[test]
fn certify_inversion_and_multiplication_form_a_group() {
    println!("\n🧪 [PROVING_GROUNDS]: Auditing scalar inversion over a spread of samples...");
    let mut faults = 0;
    for seed in 1u64..=64 {
        let a = Scalar::from_u64(seed.wrapping_mul(0x2545_F491_4F6C_DD1D));
        if a.is_zero() {
            continue;
        }
        let inv = a.invert();
        if a.multiply(&inv) != Scalar::from_u64(1) {
            faults += 1;
        }
    }
    assert_eq!(faults, 0, "L1_SCALAR_FAULT: inversion failed to roundtrip on {faults} samples");
}

#[test]
fn certify_halving_is_the_inverse_of_doubling() {
    for value in [1u64, 2, 3, 999_999_937, 0xDEAD_BEEF] {
        let a = Scalar::from_u64(value);
        let halved = a.halve();
        assert_eq!(halved.add(&halved), a, "L1_SCALAR_FAULT: halve-then-double diverged for k = {value}");
    }
}

#[test]
fn certify_is_high_agrees_with_the_half_order_threshold() {
    let one = Scalar::from_u64(1);
    assert!(!one.is_high(), "L1_SCALAR_FAULT: 1 must not be classified high");

    let order_minus_one = Scalar { limbs: curve_order_limbs() }.subtract(&one);
    assert!(order_minus_one.is_high(), "L1_SCALAR_FAULT: n - 1 must be classified high");
}

fn curve_order_bytes() -> [u8; 32] {
    let limbs = curve_order_limbs();
    let mut bytes = [0u8; 32];
    for (index, &limb) in limbs.iter().enumerate() {
        let offset = (3 - index) * 8;
        bytes[offset..offset + 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

fn curve_order_limbs() -> [u64; 4] {
    [0xBFD25E8CD0364141, 0xBAAEDCE6AF48A03B, 0xFFFFFFFFFFFFFFFE, 0xFFFFFFFFFFFFFFFF]
}
