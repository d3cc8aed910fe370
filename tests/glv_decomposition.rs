// [tests/glv_decomposition.rs]
/*!
 * =================================================================
 * APARATO: GLV DECOMPOSITION CERTIFIER (V1.0 - LATTICE SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-MIRROR
 * RESPONSABILIDAD: CERTIFICACIÓN DE k = k1 + k2*lambda (mod n)
 * =================================================================
 */

use secp256k1_core_math::glv;
use secp256k1_core_math::scalar::Scalar;

const LAMBDA_LIMBS: [u64; 4] =
    [0xDF02967C1B23BD72, 0x122E22EA20816678, 0xA5261C028812645A, 0x5363AD4CC05C30E0];

fn recombine(decomposition: &glv::GlvDecomposition) -> Scalar {
    let lambda = Scalar { limbs: LAMBDA_LIMBS };
    let k1 = decomposition.k1.cneg(decomposition.sign1);
    let k2 = decomposition.k2.cneg(decomposition.sign2);
    k1.add(&k2.multiply(&lambda))
}

#[test]
fn certify_decomposition_recombines_to_the_original_scalar() {
    println!("\n⚖️  [PROVING_GROUNDS]: Auditing GLV decomposition recombination...");
    let samples = [
        Scalar::from_u64(1),
        Scalar::from_u64(0xDEAD_BEEF_CAFE_1234),
        Scalar::from_bytes(&[0x7A; 32]),
        Scalar::from_bytes(&[
            0x4A, 0x2E, 0x19, 0x88, 0x03, 0xAF, 0x12, 0x77, 0xBB, 0xCC, 0x0D, 0xEE, 0x55, 0x66,
            0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x01, 0x23, 0x45, 0x67, 0x89,
            0xAB, 0xCD, 0xEF, 0x01,
        ]),
    ];

    let mut faults = 0;
    for k in samples.iter() {
        let decomposition = glv::decompose(k);
        if recombine(&decomposition) != *k {
            faults += 1;
        }
    }
    assert_eq!(faults, 0, "L1_GLV_FAULT: recombination diverged from the original scalar on {faults} samples");
    println!("   ✅ [SUCCESS]: k1 + k2*lambda == k certified across all samples.");
}

#[test]
fn certify_decomposition_halves_stay_within_128_bits() {
    let k = Scalar::from_bytes(&[0xFE; 32]);
    let decomposition = glv::decompose(&k);

    assert_eq!(decomposition.k1.limbs[2], 0, "L1_GLV_FAULT: k1 exceeded 128 bits (limb 2)");
    assert_eq!(decomposition.k1.limbs[3], 0, "L1_GLV_FAULT: k1 exceeded 128 bits (limb 3)");
    assert_eq!(decomposition.k2.limbs[2], 0, "L1_GLV_FAULT: k2 exceeded 128 bits (limb 2)");
    assert_eq!(decomposition.k2.limbs[3], 0, "L1_GLV_FAULT: k2 exceeded 128 bits (limb 3)");
}

#[test]
fn certify_decomposition_of_zero_is_zero() {
    let decomposition = glv::decompose(&Scalar::zero());
    assert!(decomposition.k1.is_zero(), "L1_GLV_FAULT: k1 must be zero when k is zero");
    assert!(decomposition.k2.is_zero(), "L1_GLV_FAULT: k2 must be zero when k is zero");
}
