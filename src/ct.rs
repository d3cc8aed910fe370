// [src/ct.rs]
/*!
 * =================================================================
 * APARATO: PRIMITIVAS DE TIEMPO CONSTANTE (V1.0 - MASKING SOBERANO)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ENMASCARADO, SELECCIÓN Y ESCANEO SIN RAMIFICACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CERO RAMAS SECRETAS: Todas las rutinas de este aparato deben
 *    compilar a un trazo de instrucciones independiente del valor de
 *    su entrada — ningún `if` debe depender de un bit secreto.
 * 2. BARRERA DE VALOR: `core::hint::black_box` se usa como barrera de
 *    optimización para impedir que el compilador reintroduzca una
 *    rama tras observar que una máscara es siempre 0 o `u64::MAX`.
 * 3. DECLASSIFY: Marcador de no-operación para analizadores externos
 *    de flujo de información — documenta, no aplica, un cambio de
 *    clasificación de secreto a público.
 * =================================================================
 */

/// Máscara de 64 bits: todo-ceros (`false`) o todo-unos (`true`), nunca
/// un valor intermedio. El resto de este aparato opera exclusivamente
/// sobre este invariante.
pub type Mask64 = u64;

/// Opaca el valor de entrada frente al optimizador sin alterarlo.
///
/// Usada para impedir que el compilador observe que una máscara
/// calculada a partir de un secreto es constante en un camino de
/// ejecución dado y reintroduzca una rama condicional equivalente.
#[inline(always)]
#[must_use]
pub fn value_barrier_u64(value: u64) -> u64 {
    core::hint::black_box(value)
}

/// Construye una máscara todo-unos si `value == 0`, todo-ceros en caso
/// contrario — sin ramificación.
#[inline(always)]
#[must_use]
pub fn is_zero_mask_u64(value: u64) -> Mask64 {
    let v = value_barrier_u64(value);
    // (v | -v) tiene el bit de signo puesto a 1 sii v != 0.
    let negated_or = v | v.wrapping_neg();
    value_barrier_u64(!(negated_or >> 63).wrapping_neg())
}

/// Construye una máscara todo-unos si `a == b`, todo-ceros en caso
/// contrario — sin ramificación.
#[inline(always)]
#[must_use]
pub fn eq_mask_u64(a: u64, b: u64) -> Mask64 {
    is_zero_mask_u64(a ^ b)
}

/// Selección en tiempo constante: retorna `a` si `mask` es todo-unos,
/// `b` si `mask` es todo-ceros.
///
/// # Invariantes del invocador
/// `mask` debe ser exactamente `0` o `u64::MAX`; cualquier otro valor
/// produce una mezcla sin sentido (no un pánico).
#[inline(always)]
#[must_use]
pub fn cmov_u64(a: u64, b: u64, mask: Mask64) -> u64 {
    let mask = value_barrier_u64(mask);
    b ^ (mask & (a ^ b))
}

/// Selección en tiempo constante sobre arreglos de limbs de igual longitud.
#[inline(always)]
pub fn cmov_limbs<const N: usize>(dest: &mut [u64; N], src: &[u64; N], mask: Mask64) {
    for i in 0..N {
        dest[i] = cmov_u64(src[i], dest[i], mask);
    }
}

/// Escaneo de tabla en tiempo constante: recorre **todas** las entradas
/// de `table`, acumula por máscara de igualdad de índice y retorna la
/// entrada seleccionada. Nunca emite una carga indexada por `index`.
///
/// # Mathematical Proof
/// Para cada `i`, `mask_i = eq_mask_u64(i as u64, index as u64)`; el
/// acumulador resultante satisface `result = table[index]` por
/// construcción, ya que exactamente un `mask_i` es todo-unos.
#[inline(always)]
#[must_use]
pub fn ct_lookup_limbs<const N: usize>(table: &[[u64; N]], index: u32) -> [u64; N] {
    let mut result = [0u64; N];
    for (i, entry) in table.iter().enumerate() {
        let mask = eq_mask_u64(i as u64, index as u64);
        for limb in 0..N {
            result[limb] = cmov_u64(entry[limb], result[limb], mask);
        }
    }
    result
}

/// Marcador de no-operación que documenta, para analizadores externos
/// de rastreo de secretos, que la región referenciada ya no contiene
/// información dependiente de un bit secreto (p. ej. una tabla de
/// precómputo tras aplicar el signo GLV).
///
/// Esta función es semánticamente un no-op; existe únicamente como
/// anotación legible por herramientas de análisis estático.
#[inline(always)]
pub fn declassify<T>(value: T) -> T {
    value
}
