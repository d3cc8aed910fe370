// [src/errors.rs]
/*!
 * =================================================================
 * APARATO: CATÁLOGO DE FALLOS MATEMÁTICOS (V1.0 - TAXONOMÍA SOBERANA)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: TIPIFICACIÓN DE ERRORES DEL MOTOR ARITMÉTICO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NOMINAL PURITY: Cada variante documenta la condición exacta que
 *    la dispara — cero ambigüedad para los estratos L2/L3.
 * 2. NO-PANIC DISCIPLINE: El núcleo nunca aborta; estos errores son
 *    devueltos, nunca usados como control de flujo excepcional interno.
 * =================================================================
 */

use thiserror::Error;

/// Catálogo abstracto de fallos del motor matemático de secp256k1.
///
/// El núcleo de campo/escalar/punto nunca entra en pánico por datos de
/// entrada malformados; estos errores son la única superficie de fallo
/// visible al invocador.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Un escalar deserializado, tras la reducción módulo `n`, resultó cero.
    #[error("scalar collapsed to zero after reduction modulo the curve order")]
    InvalidScalar,

    /// Bytes comprimidos o no comprimidos no satisfacen la ecuación de curva.
    #[error("point bytes fail the curve equation y^2 = x^3 + b")]
    InvalidPoint,

    /// `AffinePoint::from_affine` fue invocado con un par `(x, y)` fuera de curva.
    #[error("affine coordinates do not lie on the secp256k1 curve")]
    NotOnCurve,

    /// `scalar_mul`/`generator_mul` produjo el punto al infinito donde se
    /// esperaba un resultado no-identidad (p. ej. `k = n`).
    #[error("scalar multiplication collapsed to the point at infinity")]
    InfinityResult,
}
