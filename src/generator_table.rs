// [src/generator_table.rs]
/*!
 * =================================================================
 * APARATO: TABLA DE PRECÓMPUTO DEL GENERADOR (V1.0 - LAZY SOBERANO)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: TABLA 64×16 PARA MULTIPLICACIÓN DE BASE FIJA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CONSTRUCCIÓN DIFERIDA: La tabla se construye una única vez, la
 *    primera vez que se invoca `table()`, protegida por `once_cell`
 *    — ningún hilo paga el coste de construcción más de una vez.
 * 2. TODO PÚBLICO: G es una constante pública; la construcción usa el
 *    plano aritmético rápido (`fast`), no el motor constante en tiempo
 *    — no hay nada secreto que proteger aquí.
 * 3. VENTANAS DE 4 BITS: 64 ventanas × 16 dígitos cubren los 256 bits
 *    del escalar; `table[w][0]` es siempre el infinito (dígito nulo).
 * =================================================================
 */

use crate::fast;
use crate::point::{AffinePoint, JacobianPoint};
use once_cell::sync::Lazy;

/// Tabla de precómputo 64×16: `table[w][v] = v · 16^w · G`.
static GENERATOR_TABLE: Lazy<[[AffinePoint; 16]; 64]> = Lazy::new(build_table);

/// Retorna la tabla de precómputo del generador, construyéndola en el
/// primer acceso.
#[must_use]
pub fn table() -> &'static [[AffinePoint; 16]; 64] {
    &GENERATOR_TABLE
}

/// Construye la tabla completa a partir de `G` mediante el plano rápido
/// no-CT: para cada ventana `w`, calcula `1·base .. 15·base` por adición
/// repetida, luego deriva `base' = 16·base` para la siguiente ventana.
fn build_table() -> [[AffinePoint; 16]; 64] {
    let mut table = [[AffinePoint::infinity(); 16]; 64];
    let mut base = AffinePoint::generator();

    for window in table.iter_mut() {
        let mut accumulator = JacobianPoint::from_affine(&base);
        window[1] = base;
        for v in 2..16 {
            accumulator = fast::add_mixed(&accumulator, &base);
            window[v] =
                accumulator.to_affine().expect("nonzero multiple of the generator cannot be infinity");
        }
        let next_base = fast::add_mixed(&accumulator, &base);
        base = next_base.to_affine().expect("16x multiple of the generator cannot be infinity");
    }

    table
}
