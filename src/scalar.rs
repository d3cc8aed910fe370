// [src/scalar.rs]
/*!
 * =================================================================
 * APARATO: MOTOR ESCALAR MODULO N (V14.0 - BARRETT SOBERANO)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ARITMÉTICA DE ESCALARES MODULO EL ORDEN DE CURVA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BARRETT FIJO: `mul`/`invert` reducen contra `n` usando una μ
 *    precomputada — ninguna división en tiempo de ejecución.
 * 2. CERO RAMAS SECRETAS: Toda comparación/selección sobre un escalar
 *    secreto pasa por `ct::cmov_u64`; los únicos `if` del aparato
 *    recorren exponentes PÚBLICOS (bits de `n − 2`) o bucles de ancho
 *    fijo (recorren siempre el mismo número de limbs).
 * 3. NOMINAL PURITY: Cuatro limbs de 64 bits, orden little-endian.
 * =================================================================
 */

use crate::constants::{BARRETT_MU_N, CURVE_ORDER_N};
use crate::ct::{self, Mask64};
use crate::errors::MathError;
use tracing::instrument;

/// Elemento de ℤ/n, n = orden de la curva secp256k1, representado como
/// cuatro limbs de 64 bits little-endian. Invariante: valor en `[0, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scalar {
    /// Limbs de 64 bits, little-endian (limb 0 es el menos significativo).
    pub limbs: [u64; 4],
}

impl Scalar {
    /// El escalar cero.
    #[inline(always)]
    #[must_use]
    pub fn zero() -> Self {
        Self { limbs: [0; 4] }
    }

    /// Construye un escalar a partir de un `u64` (siempre `< n`, sin reducción).
    #[inline(always)]
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self { limbs: [value, 0, 0, 0] }
    }

    /// Deserializa 32 bytes big-endian. Sigue la política documentada en
    /// §6.2: un valor `>= n` se reduce silenciosamente en lugar de
    /// rechazarse. Ver `from_bytes_checked` para la variante estricta.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for (index, limb) in limbs.iter_mut().enumerate() {
            let offset = (3 - index) * 8;
            *limb = u64::from_be_bytes(bytes[offset..offset + 8].try_into().unwrap());
        }
        let mut scalar = Self { limbs };
        scalar.reduce_once_if_ge_order();
        scalar
    }

    /// Variante estricta: error si el escalar deserializado es `>= n`
    /// (nunca reduce silenciosamente) o si colapsa a cero tras reducir.
    pub fn from_bytes_checked(bytes: &[u8; 32]) -> Result<Self, MathError> {
        let candidate = Self::from_bytes(bytes);
        if &candidate.to_bytes() != bytes {
            return Err(MathError::InvalidScalar);
        }
        if candidate.is_zero() {
            return Err(MathError::InvalidScalar);
        }
        Ok(candidate)
    }

    /// Serializa el escalar a 32 bytes big-endian.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (index, &limb) in self.limbs.iter().enumerate() {
            let offset = (3 - index) * 8;
            bytes[offset..offset + 8].copy_from_slice(&limb.to_be_bytes());
        }
        bytes
    }

    /// Serializa este escalar como una cadena hexadecimal de 64
    /// caracteres, para trazos de diagnóstico y mensajes de `tracing`.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// `true` sii el escalar es cero.
    #[inline(always)]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&limb| limb == 0)
    }

    /// Máscara CT: todo-unos sii el escalar es cero.
    #[must_use]
    pub fn is_zero_mask(&self) -> Mask64 {
        let folded = self.limbs.iter().fold(0u64, |acc, &limb| acc | limb);
        ct::is_zero_mask_u64(folded)
    }

    /// Reduce `self` una vez si `self >= n` (usado tras deserializar, donde
    /// el exceso sobre `n` es como mucho `2^256 − n`, menor que `n`).
    fn reduce_once_if_ge_order(&mut self) {
        let (diff, borrow) = sub_limbs(&self.limbs, &CURVE_ORDER_N);
        let ge_mask = ct::is_zero_mask_u64(borrow);
        ct::cmov_limbs(&mut self.limbs, &diff, ge_mask);
    }

    /// Suma modular: `(self + other) mod n`, constante en tiempo.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self { limbs: add_mod_n(&self.limbs, &other.limbs) }
    }

    /// Negación modular: `n − self` si `self != 0`, de lo contrario `0`.
    #[must_use]
    pub fn negate(&self) -> Self {
        let (diff, _borrow) = sub_limbs(&CURVE_ORDER_N, &self.limbs);
        let zero = [0u64; 4];
        let mut result = diff;
        ct::cmov_limbs(&mut result, &zero, self.is_zero_mask());
        Self { limbs: result }
    }

    /// Resta modular: `(self − other) mod n`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    /// Negación condicional en tiempo constante: retorna `−self` si `mask`
    /// es todo-unos, `self` en caso contrario.
    #[must_use]
    pub fn cneg(&self, mask: Mask64) -> Self {
        let negated = self.negate();
        let mut result = self.limbs;
        ct::cmov_limbs(&mut result, &negated.limbs, mask);
        Self { limbs: result }
    }

    /// Multiplicación modular: reducción de Barrett de ancho fijo, sin
    /// ninguna división en tiempo de ejecución.
    #[instrument(level = "trace", skip_all)]
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let wide = mul_wide(&self.limbs, &other.limbs);
        Self { limbs: barrett_reduce(&wide) }
    }

    /// Inversión multiplicativa módulo `n` vía el Pequeño Teorema de Fermat:
    /// `self^(n-2) mod n`. El exponente es una constante pública (`n` es
    /// un parámetro de curva público); únicamente la BASE es secreta.
    #[instrument(level = "trace", skip_all)]
    #[must_use]
    pub fn invert(&self) -> Self {
        let exponent_bits = order_minus_two_bits();
        let mut result = Self::from_u64(1);
        for &bit in exponent_bits.iter() {
            result = result.multiply(&result);
            let multiplied = result.multiply(self);
            let mask: Mask64 = if bit { u64::MAX } else { 0 };
            ct::cmov_limbs(&mut result.limbs, &multiplied.limbs, mask);
        }
        result
    }

    /// Division por dos módulo n: si `self` es par, desplaza a la derecha;
    /// si es impar, calcula `(self + n) >> 1` (par, ya que `n` es impar).
    #[must_use]
    pub fn halve(&self) -> Self {
        let is_odd_mask = ct::is_zero_mask_u64((self.limbs[0] & 1) ^ 1);
        let (sum, carry) = add_limbs(&self.limbs, &CURVE_ORDER_N);
        let shifted_even = shift_right_one(&self.limbs, 0);
        let shifted_odd = shift_right_one(&sum, carry);
        let mut result = shifted_even;
        ct::cmov_limbs(&mut result, &shifted_odd, is_odd_mask);
        Self { limbs: result }
    }

    /// `true` sii `self > n/2` — usado para la normalización low-S de
    /// ECDSA y para la extracción de signo en la descomposición GLV.
    #[must_use]
    pub fn is_high(&self) -> bool {
        self.is_high_mask() == u64::MAX
    }

    /// Máscara CT equivalente a `is_high`.
    #[must_use]
    pub fn is_high_mask(&self) -> Mask64 {
        let half_n = shift_right_one(&CURVE_ORDER_N, 0);
        let (_diff, borrow) = sub_limbs(&half_n, &self.limbs);
        // borrow == 1 sii half_n < self, i.e. self > n/2.
        !ct::is_zero_mask_u64(borrow)
    }

    /// Extrae los bits `[offset, offset + width)` del escalar como un
    /// entero en `[0, 2^width)`. `offset`/`width` son índices PÚBLICOS
    /// (posición de ventana del bucle de Strauss) — únicamente el valor
    /// extraído es secreto; la extracción en sí (desplazamientos y
    /// máscaras) no ramifica sobre ese valor.
    #[must_use]
    pub fn window(&self, offset: u32, width: u32) -> u32 {
        debug_assert!(width <= 32);
        let limb_index = (offset / 64) as usize;
        let bit_in_limb = offset % 64;
        let mut value = (self.limbs[limb_index] >> bit_in_limb) as u128;
        if bit_in_limb + width > 64 && limb_index + 1 < 4 {
            value |= (self.limbs[limb_index + 1] as u128) << (64 - bit_in_limb);
        }
        (value as u32) & ((1u32 << width) - 1)
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::zero()
    }
}

/// Bits de `n − 2`, de más a menos significativo — exponente público.
fn order_minus_two_bits() -> [bool; 256] {
    let mut words = CURVE_ORDER_N;
    words[0] -= 2;
    let mut bits = [false; 256];
    for (word_index, &word) in words.iter().enumerate() {
        for bit_index in 0..64 {
            let position = word_index * 64 + bit_index;
            bits[255 - position] = (word >> bit_index) & 1 == 1;
        }
    }
    bits
}

/// Suma de dos arreglos de 4 limbs con acarreo de salida.
fn add_limbs(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let mut result = [0u64; 4];
    let mut carry: u128 = 0;
    for i in 0..4 {
        let sum = a[i] as u128 + b[i] as u128 + carry;
        result[i] = sum as u64;
        carry = sum >> 64;
    }
    (result, carry as u64)
}

/// Resta de dos arreglos de 4 limbs (`a − b`), con préstamo de salida
/// (`1` sii `a < b`, calculado sobre la aritmética módulo `2^256`).
fn sub_limbs(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let mut result = [0u64; 4];
    let mut borrow: u64 = 0;
    for i in 0..4 {
        let (d1, b1) = a[i].overflowing_sub(b[i]);
        let (d2, b2) = d1.overflowing_sub(borrow);
        result[i] = d2;
        borrow = (b1 as u64) | (b2 as u64);
    }
    (result, borrow)
}

/// Desplaza un arreglo de 4 limbs un bit a la derecha, inyectando `carry_in`
/// (`0` o `1`) como el bit más significativo del resultado.
fn shift_right_one(limbs: &[u64; 4], carry_in: u64) -> [u64; 4] {
    let mut result = [0u64; 4];
    for i in 0..4 {
        let low = limbs[i] >> 1;
        let high_bit = if i + 1 < 4 { (limbs[i + 1] & 1) << 63 } else { (carry_in & 1) << 63 };
        result[i] = low | high_bit;
    }
    result
}

/// Suma modular de ancho fijo: `(a + b) mod n`, sin ninguna rama
/// dependiente del valor de `a`/`b` (sólo del acarreo de la suma cruda,
/// que se combina en una única selección CT).
fn add_mod_n(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    let (sum, carry) = add_limbs(a, b);
    let (diff, borrow) = sub_limbs(&sum, &CURVE_ORDER_N);
    let ge_sum_n_mask = ct::is_zero_mask_u64(borrow);
    let carry_nonzero_mask = !ct::is_zero_mask_u64(carry);
    let ge_mask = ct::cmov_u64(u64::MAX, ge_sum_n_mask, carry_nonzero_mask);
    let mut result = sum;
    ct::cmov_limbs(&mut result, &diff, ge_mask);
    result
}

/// Multiplicación de ancho fijo de dos números de 4 limbs, produciendo un
/// producto de 8 limbs. Esquema escolar (schoolbook) con propagación de
/// acarreo de ancho FIJO — el número de pasos depende sólo del tamaño de
/// los arreglos (público), nunca del valor de los limbs.
pub(crate) fn mul_wide(a: &[u64; 4], b: &[u64; 4]) -> [u64; 8] {
    let mut result = [0u64; 8];
    for i in 0..4 {
        let mut carry: u128 = 0;
        for j in 0..4 {
            let idx = i + j;
            let sum = result[idx] as u128 + (a[i] as u128) * (b[j] as u128) + carry;
            result[idx] = sum as u64;
            carry = sum >> 64;
        }
        let mut idx = i + 4;
        let mut residual = carry;
        while idx < 8 {
            let sum = result[idx] as u128 + residual;
            result[idx] = sum as u64;
            residual = sum >> 64;
            idx += 1;
        }
    }
    result
}

/// Multiplicación de ancho fijo de un arreglo de 5 limbs por otro de 5
/// limbs, produciendo un producto de 10 limbs. Misma disciplina de
/// acarreo de ancho fijo que `mul_wide`.
fn mul_wide_5x5(a: &[u64; 5], b: &[u64; 5]) -> [u64; 10] {
    let mut result = [0u64; 10];
    for i in 0..5 {
        let mut carry: u128 = 0;
        for j in 0..5 {
            let idx = i + j;
            let sum = result[idx] as u128 + (a[i] as u128) * (b[j] as u128) + carry;
            result[idx] = sum as u64;
            carry = sum >> 64;
        }
        let mut idx = i + 5;
        let mut residual = carry;
        while idx < 10 {
            let sum = result[idx] as u128 + residual;
            result[idx] = sum as u64;
            residual = sum >> 64;
            idx += 1;
        }
    }
    result
}

/// Multiplicación de ancho fijo de un arreglo de 5 limbs por otro de 4
/// limbs, produciendo un producto de 9 limbs.
fn mul_wide_5x4(a: &[u64; 5], b: &[u64; 4]) -> [u64; 9] {
    let mut result = [0u64; 9];
    for i in 0..5 {
        let mut carry: u128 = 0;
        for j in 0..4 {
            let idx = i + j;
            let sum = result[idx] as u128 + (a[i] as u128) * (b[j] as u128) + carry;
            result[idx] = sum as u64;
            carry = sum >> 64;
        }
        let mut idx = i + 4;
        let mut residual = carry;
        while idx < 9 {
            let sum = result[idx] as u128 + residual;
            result[idx] = sum as u64;
            residual = sum >> 64;
            idx += 1;
        }
    }
    result
}

/// Resta de ancho fijo de dos arreglos de 5 limbs, con préstamo de salida.
fn sub_limbs_5(a: &[u64; 5], b: &[u64; 5]) -> ([u64; 5], u64) {
    let mut result = [0u64; 5];
    let mut borrow: u64 = 0;
    for i in 0..5 {
        let (d1, b1) = a[i].overflowing_sub(b[i]);
        let (d2, b2) = d1.overflowing_sub(borrow);
        result[i] = d2;
        borrow = (b1 as u64) | (b2 as u64);
    }
    (result, borrow)
}

/// Reducción de Barrett de un producto de 8 limbs módulo `n`, usando la
/// `μ` precomputada de 5 limbs (`μ = ⌊2⁵¹²/n⌋`).
///
/// # Mathematical Proof
/// Con `b = 2⁶⁴`, `k = 4` (n ocupa 4 limbs): `q1 = ⌊x / b^(k-1)⌋`,
/// `q2 = q1·μ`, `q3 = ⌊q2 / b^(k+1)⌋`, `r = (x mod b^(k+1)) − (q3·n mod
/// b^(k+1))`, seguido de una cantidad FIJA de sustracciones condicionales
/// de `n` (Barrett garantiza `r < 3n` tras la resta inicial; tres rondas
/// de sustracción condicional cubren el peor caso con margen).
fn barrett_reduce(x: &[u64; 8]) -> [u64; 4] {
    // q1 = x >> (k-1)*64 = x >> 192: limbs [3, 4, 5, 6, 7], cinco limbs.
    let q1: [u64; 5] = [x[3], x[4], x[5], x[6], x[7]];

    // q2 = q1 * mu (10 limbs).
    let q2 = mul_wide_5x5(&q1, &BARRETT_MU_N);

    // q3 = q2 >> (k+1)*64 = q2 >> 320: limbs [5..10], cinco limbs.
    let q3: [u64; 5] = [q2[5], q2[6], q2[7], q2[8], q2[9]];

    // r1 = (q3 * n) mod b^(k+1): los cinco limbs bajos del producto.
    let q3n = mul_wide_5x4(&q3, &CURVE_ORDER_N);
    let r1: [u64; 5] = [q3n[0], q3n[1], q3n[2], q3n[3], q3n[4]];

    // r2 = x mod b^(k+1): los cinco limbs bajos de x.
    let r2: [u64; 5] = [x[0], x[1], x[2], x[3], x[4]];

    // r = r2 - r1 (mod b^(k+1)); la resta de ancho fijo ya envuelve
    // correctamente si hubo préstamo, dado que ambos son residuos mod b^5.
    let (mut r, _borrow) = sub_limbs_5(&r2, &r1);

    // Sustracción condicional de n (extendido a 5 limbs con 0 en la cima),
    // repetida un número FIJO de veces — nunca dependiente del valor de r.
    let n_extended: [u64; 5] = [CURVE_ORDER_N[0], CURVE_ORDER_N[1], CURVE_ORDER_N[2], CURVE_ORDER_N[3], 0];
    for _ in 0..3 {
        let (diff, borrow) = sub_limbs_5(&r, &n_extended);
        let ge_mask = ct::is_zero_mask_u64(borrow);
        ct::cmov_limbs(&mut r, &diff, ge_mask);
    }

    debug_assert_eq!(r[4], 0, "barrett reduction left residual above 256 bits");
    [r[0], r[1], r[2], r[3]]
}
