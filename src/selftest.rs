// [src/selftest.rs]
/*!
 * =================================================================
 * APARATO: AUTOPRUEBA DE ARRANQUE (V1.0 - VECTORES FIJOS)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: VERIFICACIÓN DE VECTORES DE PRUEBA EN INICIALIZACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SIN ESTADO COMPARTIDO: Cada llamada recomputa todo desde cero —
 *    apta para invocarse una vez al arranque del proceso o bajo demanda
 *    en diagnóstico, sin depender de ningún singleton salvo la tabla
 *    de precómputo del generador (ya perezosa por sí misma).
 * 2. UNA SOLA BANDERA: Todas las comprobaciones se combinan con `&&`
 *    booleano — basta un fallo para que el conjunto completo falle.
 * =================================================================
 */

use crate::constants::{BETA_BYTES_BE, CURVE_ORDER_N};
use crate::fast;
use crate::field::FieldElement;
use crate::generator_mul::generator_mul;
use crate::point::{AffinePoint, JacobianPoint};
use crate::scalar::Scalar;
use crate::scalar_mul::scalar_mul;

/// Ejecuta la batería de vectores de prueba fijos descrita para el
/// arranque del motor: `1·G`, `2·G`, `(n−1)·G`, la identidad del
/// endomorfismo GLV, asociatividad/distributividad de campo sobre tres
/// muestras, `(p−1)² ≡ 1`, y la concordancia entre `scalar_mul` y
/// `generator_mul` sobre un escalar arbitrario. Retorna una única
/// bandera de éxito/fallo; con `verbose = true` emite un registro por
/// cada comprobación vía `tracing`.
#[must_use]
pub fn selftest(verbose: bool) -> bool {
    let checks: [(&str, bool); 7] = [
        ("one_times_g", check_one_times_g()),
        ("two_times_g", check_two_times_g()),
        ("order_minus_one_times_g", check_order_minus_one_times_g()),
        ("glv_endomorphism_identity", check_glv_endomorphism_identity()),
        ("field_associativity_distributivity", check_field_laws()),
        ("prime_minus_one_squared_is_one", check_prime_minus_one_squared()),
        ("scalar_mul_matches_generator_mul", check_scalar_mul_matches_generator_mul()),
    ];

    let mut all_passed = true;
    for (name, passed) in checks.iter() {
        if verbose {
            if *passed {
                tracing::info!(check = name, "selftest check passed");
            } else {
                tracing::error!(check = name, "selftest check FAILED");
            }
        }
        all_passed &= passed;
    }
    all_passed
}

/// `1·G == G`.
fn check_one_times_g() -> bool {
    let g = AffinePoint::generator();
    generator_mul(&Scalar::from_u64(1)).to_affine().map(|p| p == g).unwrap_or(false)
}

/// `2·G` coincide entre el plano de base fija y la duplicación directa
/// del plano rápido.
fn check_two_times_g() -> bool {
    let expected = fast::double(&JacobianPoint::generator());
    generator_mul(&Scalar::from_u64(2)) == expected
}

/// `(n−1)·G == −G`: el último múltiplo antes de envolver al infinito.
fn check_order_minus_one_times_g() -> bool {
    let order_minus_one = Scalar { limbs: CURVE_ORDER_N }.subtract(&Scalar::from_u64(1));
    let result = generator_mul(&order_minus_one);
    let expected = JacobianPoint::generator().negate();
    result == expected
}

/// `λ·G == φ(G)`: la identidad que ancla la descomposición GLV —
/// aplicar el endomorfismo al generador debe coincidir con multiplicar
/// por el valor propio `λ` módulo `n`.
fn check_glv_endomorphism_identity() -> bool {
    let lambda = Scalar { limbs: crate::constants::LAMBDA_LIMBS };
    let via_scalar = generator_mul(&lambda);
    let beta = FieldElement::from_big_endian_bytes(&BETA_BYTES_BE);
    let via_endomorphism = JacobianPoint::from_affine(&AffinePoint::generator().apply_endomorphism(&beta));
    via_scalar == via_endomorphism
}

/// Asociatividad de la suma y distributividad de la multiplicación
/// sobre la suma, verificadas sobre tres muestras de campo fijas.
fn check_field_laws() -> bool {
    let samples = [
        FieldElement::from_u64(3),
        FieldElement::from_u64(5_000_000_007),
        FieldElement::from_big_endian_bytes(&[0x42; 32]),
    ];
    let a = samples[0];
    let b = samples[1];
    let c = samples[2];

    let mut lhs_assoc = a.add_modular(&b).add_modular(&c);
    let mut rhs_assoc = a.add_modular(&b.add_modular(&c));
    lhs_assoc.normalize();
    rhs_assoc.normalize();
    let associative = lhs_assoc == rhs_assoc;

    let mut lhs_distrib = a.multiply_modular(&b.add_modular(&c));
    let mut rhs_distrib = a.multiply_modular(&b).add_modular(&a.multiply_modular(&c));
    lhs_distrib.normalize();
    rhs_distrib.normalize();
    let distributive = lhs_distrib == rhs_distrib;

    associative && distributive
}

/// `(p−1)² ≡ 1 (mod p)`.
fn check_prime_minus_one_squared() -> bool {
    let p = crate::constants::FIELD_PRIME_LIMBS_52;
    let mut p_minus_one = FieldElement::from_limbs_52(p);
    p_minus_one = p_minus_one.subtract_modular(&FieldElement::from_u64(1));
    let mut squared = p_minus_one.square_modular();
    squared.normalize();
    squared == FieldElement::from_u64(1)
}

/// `scalar_mul(G, k) == generator_mul(k)` para un escalar arbitrario
/// (no trivial, no perteneciente a ningún vector fijo anterior).
fn check_scalar_mul_matches_generator_mul() -> bool {
    let k = Scalar::from_bytes(&[
        0x4A, 0x2E, 0x19, 0x88, 0x03, 0xAF, 0x12, 0x77, 0xBB, 0xCC, 0x0D, 0xEE, 0x55, 0x66, 0x77,
        0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD,
        0xEF, 0x01,
    ]);
    let via_variable_base = scalar_mul(&JacobianPoint::generator(), &k);
    let via_fixed_base = generator_mul(&k);
    via_variable_base == via_fixed_base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selftest_passes_quietly() {
        assert!(selftest(false));
    }

    #[test]
    fn selftest_passes_verbosely() {
        assert!(selftest(true));
    }

    #[test]
    fn individual_checks_all_pass() {
        assert!(check_one_times_g());
        assert!(check_two_times_g());
        assert!(check_order_minus_one_times_g());
        assert!(check_glv_endomorphism_identity());
        assert!(check_field_laws());
        assert!(check_prime_minus_one_squared());
        assert!(check_scalar_mul_matches_generator_mul());
    }
}
