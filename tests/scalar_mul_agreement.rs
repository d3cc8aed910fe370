// [tests/scalar_mul_agreement.rs]
/*!
 * =================================================================
 * APARATO: SCALAR MULTIPLICATION AGREEMENT CERTIFIER (V1.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-MIRROR
 * RESPONSABILIDAD: PARIDAD ENTRE LOS PLANOS CT, FAST Y BASE FIJA
 * =================================================================
 */

use secp256k1_core_math::fast;
use secp256k1_core_math::generator_mul::generator_mul;
use secp256k1_core_math::prelude::*;
use secp256k1_core_math::scalar::Scalar;
use secp256k1_core_math::scalar_mul::scalar_mul;

const NAMED_TEST_VECTOR_K: [u8; 32] = [
    0x47, 0x27, 0xda, 0xf2, 0x98, 0x6a, 0x98, 0x04, 0xb1, 0x11, 0x7f, 0x82, 0x61, 0xab, 0xa6, 0x45,
    0xc3, 0x45, 0x37, 0xe4, 0x47, 0x4e, 0x19, 0xbe, 0x58, 0x70, 0x07, 0x92, 0xd5, 0x01, 0xa5, 0x91,
];

#[test]
fn certify_variable_base_matches_fixed_base_on_the_named_vector() {
    println!("\n⚖️  [PROVING_GROUNDS]: Auditing scalar_mul against generator_mul on the named vector...");
    let k = Scalar::from_bytes(&NAMED_TEST_VECTOR_K);

    let via_variable_base = scalar_mul(&JacobianPoint::generator(), &k);
    let via_fixed_base = generator_mul(&k);

    assert_eq!(via_variable_base, via_fixed_base, "L1_SCALARMUL_FAULT: variable-base engine diverged from fixed-base engine on the named vector");
    println!("   ✅ [SUCCESS]: scalar_mul(G, k) == generator_mul(k) certified on the named vector.");
}

#[test]
fn certify_variable_base_matches_the_fast_plane_for_a_spread_of_scalars() {
    println!("\n🧪 [PROVING_GROUNDS]: Auditing scalar_mul against the fast plane over a spread of scalars...");
    let g_affine = AffinePoint::generator();
    let g = JacobianPoint::generator();
    let mut faults = 0;
    for value in [1u64, 2, 3, 17, 255, 65537, 123_456_789, 999_999_937] {
        let k = Scalar::from_u64(value);
        let via_ct = scalar_mul(&g, &k);
        let via_fast = fast::scalar_mul(&g_affine, &k);
        if via_ct != via_fast {
            faults += 1;
        }
    }
    assert_eq!(faults, 0, "L1_SCALARMUL_FAULT: scalar_mul diverged from fast::scalar_mul on {faults} values");
    println!("   ✅ [SUCCESS]: CT and fast planes agree across the sampled scalar range.");
}

#[test]
fn certify_ecdh_style_commutativity() {
    println!("\n🤝 [PROVING_GROUNDS]: Auditing ECDH-style shared-secret commutativity...");
    let g = JacobianPoint::generator();
    let a = Scalar::from_u64(0xDEAD_BEEF_CAFE_1234);
    let b = Scalar::from_u64(0x1357_9BDF_2468_ACE0);

    let a_g = scalar_mul(&g, &a);
    let b_g = scalar_mul(&g, &b);

    let shared_via_a = scalar_mul(&b_g, &a).to_affine().unwrap();
    let shared_via_b = scalar_mul(&a_g, &b).to_affine().unwrap();

    assert_eq!(shared_via_a, shared_via_b, "L1_SCALARMUL_FAULT: a*(b*G) must equal b*(a*G)");
    println!("   ✅ [SUCCESS]: shared secret agreement certified.");
}

#[test]
fn certify_scalar_mul_on_an_arbitrary_point_stays_on_curve() {
    let g = JacobianPoint::generator();
    let p = scalar_mul(&g, &Scalar::from_u64(12345));
    let result = scalar_mul(&p, &Scalar::from_u64(999)).to_affine().unwrap();
    assert!(result.is_on_curve(), "L1_SCALARMUL_FAULT: result of scalar_mul on a derived point left the curve");
}

#[test]
fn certify_scalar_mul_by_the_curve_order_collapses_to_infinity() {
    let n_bytes: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
        0x41, 0x41,
    ];
    let n = Scalar::from_bytes(&n_bytes);
    assert!(n.is_zero(), "L1_SCALARMUL_FAULT: n must reduce to zero modulo itself");
    assert!(generator_mul(&n).is_infinity(), "L1_SCALARMUL_FAULT: n*G must collapse to infinity");
}
