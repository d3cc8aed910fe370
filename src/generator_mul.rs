// [src/generator_mul.rs]
/*!
 * =================================================================
 * APARATO: MULTIPLICACIÓN DE BASE FIJA (V1.0 - VENTANA CT SOBERANA)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: `k·G` CONSTANTE EN TIEMPO VÍA TABLA PRECOMPUTADA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ESCANEO COMPLETO: Cada una de las 64 ventanas recorre sus 16
 *    entradas vía `ct::ct_lookup_limbs` — nunca una carga indexada
 *    directamente por el dígito secreto.
 * 2. SUMA MIXTA COMPLETA: Cada paso usa `complete_add_mixed`, que ya
 *    absorbe el caso de dígito nulo (entrada = infinito) sin rama.
 * =================================================================
 */

use crate::complete_add::complete_add_mixed;
use crate::generator_table;
use crate::point::{AffinePoint, JacobianPoint};
use crate::scalar::Scalar;
use tracing::instrument;

/// Calcula `k·G` en tiempo constante, usando la tabla de precómputo de
/// 64 ventanas de 4 bits. Ninguna rama de este cómputo examina un bit
/// de `k`.
#[instrument(level = "trace", skip_all)]
#[must_use]
pub fn generator_mul(k: &Scalar) -> JacobianPoint {
    let table = generator_table::table();
    let mut accumulator = JacobianPoint::infinity();

    for (window_index, window) in table.iter().enumerate() {
        let digit = k.window((window_index * 4) as u32, 4);
        let entry = AffinePoint::ct_select(window, digit);
        accumulator = complete_add_mixed(&accumulator, &entry);
    }

    accumulator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fast;

    #[test]
    fn generator_mul_by_zero_is_infinity() {
        assert!(generator_mul(&Scalar::zero()).is_infinity());
    }

    #[test]
    fn generator_mul_by_one_is_generator() {
        let result = generator_mul(&Scalar::from_u64(1)).to_affine().unwrap();
        assert_eq!(result, AffinePoint::generator());
    }

    #[test]
    fn generator_mul_matches_fast_scalar_mul_for_small_values() {
        let g_affine = AffinePoint::generator();
        for value in [2u64, 3, 17, 255, 65536, 123_456_789] {
            let k = Scalar::from_u64(value);
            let via_table = generator_mul(&k);
            let via_fast = fast::scalar_mul(&g_affine, &k);
            assert_eq!(via_table, via_fast, "mismatch for k = {value}");
        }
    }

    #[test]
    fn generator_mul_matches_known_test_vector() {
        // k = 4727daf2986a9804b1117f8261aba645c34537e4474e19be58700792d501a591
        let k_bytes: [u8; 32] = [
            0x47, 0x27, 0xda, 0xf2, 0x98, 0x6a, 0x98, 0x04, 0xb1, 0x11, 0x7f, 0x82, 0x61, 0xab,
            0xa6, 0x45, 0xc3, 0x45, 0x37, 0xe4, 0x47, 0x4e, 0x19, 0xbe, 0x58, 0x70, 0x07, 0x92,
            0xd5, 0x01, 0xa5, 0x91,
        ];
        let k = Scalar::from_bytes(&k_bytes);
        let via_table = generator_mul(&k).to_affine().unwrap();
        let g_affine = AffinePoint::generator();
        let via_fast = fast::scalar_mul(&g_affine, &k).to_affine().unwrap();
        assert_eq!(via_table, via_fast);
    }
}
