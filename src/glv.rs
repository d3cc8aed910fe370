// [src/glv.rs]
/*!
 * =================================================================
 * APARATO: DESCOMPOSICIÓN GLV (V1.0 - LATTICE SOBERANO)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: PARTIR UN ESCALAR k EN (k1, k2) DE ~128 BITS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. RETÍCULA PRECOMPUTADA: g1/g2/−b1/−b2/λ son constantes públicas de
 *    curva; la única entrada secreta es k, y el cómputo entero es CT.
 * 2. REDONDEO CT: el redondeo de `(k·g) >> 384` a el entero más cercano
 *    se resuelve con una selección `cmov`, nunca con un `if` sobre el
 *    bit de redondeo (que depende de k).
 * 3. SIGNOS SEPARADOS: k1/k2 se normalizan a su representante de menor
 *    magnitud (`cneg` si `is_high`), devolviendo el signo aparte — el
 *    motor de multiplicación escalar aplica el signo negando el punto
 *    correspondiente, nunca el escalar ya usado en la tabla de ventana.
 *
 * # Mathematical Proof
 * `λ² + λ + 1 ≡ 0 (mod n)`. Dado `k`, se calculan enteros pequeños
 * `c1 = round(k·g1 / 2³⁸⁴)`, `c2 = round(k·g2 / 2³⁸⁴)`, y se forma
 * `k2 = c1·(−b1) + c2·(−b2) (mod n)`, `k1 = k − k2·λ (mod n)`. La
 * construcción de la base reticular garantiza `|k1|, |k2| < 2¹²⁸`
 * tras normalizar signo.
 * =================================================================
 */

use crate::constants::{GLV_G1_LIMBS, GLV_G2_LIMBS, LAMBDA_LIMBS, MINUS_B1_LIMBS, MINUS_B2_LIMBS};
use crate::ct::{self, Mask64};
use crate::scalar::{mul_wide, Scalar};

/// Resultado de partir un escalar secreto `k` vía la descomposición GLV:
/// `k ≡ k1 + sign2'·k2·λ (mod n)` con `k1`, `k2` de ~128 bits.
///
/// Los signos se representan como máscaras CT (todo-unos = negar el
/// punto asociado antes de sumarlo al acumulador de Strauss).
#[derive(Debug, Clone, Copy)]
pub struct GlvDecomposition {
    /// Magnitud de `k1`, ya normalizada a su representante de menor valor.
    pub k1: Scalar,
    /// Máscara CT: todo-unos sii el punto `P` debe negarse antes de sumar.
    pub sign1: Mask64,
    /// Magnitud de `k2`, ya normalizada a su representante de menor valor.
    pub k2: Scalar,
    /// Máscara CT: todo-unos sii el punto `φ(P)` debe negarse antes de sumar.
    pub sign2: Mask64,
}

/// Parte `k` en `(k1, k2, sign1, sign2)` vía la retícula GLV precomputada.
/// Constante en tiempo: ninguna rama examina un bit de `k`.
#[must_use]
pub fn decompose(k: &Scalar) -> GlvDecomposition {
    let c1 = mul_shift_384(k, &GLV_G1_LIMBS);
    let c2 = mul_shift_384(k, &GLV_G2_LIMBS);

    let minus_b1 = Scalar { limbs: [MINUS_B1_LIMBS[0], MINUS_B1_LIMBS[1], 0, 0] };
    let minus_b2 = Scalar { limbs: MINUS_B2_LIMBS };
    let lambda = Scalar { limbs: LAMBDA_LIMBS };

    let k2_raw = c1.multiply(&minus_b1).add(&c2.multiply(&minus_b2));
    let k1_raw = k.subtract(&k2_raw.multiply(&lambda));

    let (k1, sign1) = normalize_sign(&k1_raw);
    let (k2, sign2) = normalize_sign(&k2_raw);

    GlvDecomposition { k1, sign1, k2, sign2 }
}

/// Si `value` excede `n/2`, retorna `(n − value, todo-unos)`; de lo
/// contrario `(value, 0)` — sin ramificar sobre el bit de signo.
fn normalize_sign(value: &Scalar) -> (Scalar, Mask64) {
    let high_mask = value.is_high_mask();
    let negated = value.negate();
    let mut limbs = value.limbs;
    ct::cmov_limbs(&mut limbs, &negated.limbs, high_mask);
    (Scalar { limbs }, high_mask)
}

/// Calcula `round((k · g) / 2³⁸⁴)` mediante una multiplicación ancha de
/// 512 bits seguida de un desplazamiento y redondeo al entero más
/// cercano — el bit de redondeo depende de `k` (secreto), por lo que la
/// suma condicional de 1 se resuelve con `cmov`, no con un `if`.
fn mul_shift_384(k: &Scalar, g: &[u64; 4]) -> Scalar {
    let wide = mul_wide(&k.limbs, g);
    let truncated = Scalar { limbs: [wide[6], wide[7], 0, 0] };
    let round_bit = (wide[5] >> 63) & 1;
    let round_up_mask = ct::is_zero_mask_u64(round_bit ^ 1);
    let plus_one = truncated.add(&Scalar::from_u64(1));
    let mut limbs = truncated.limbs;
    ct::cmov_limbs(&mut limbs, &plus_one.limbs, round_up_mask);
    Scalar { limbs }
}
