// [src/constants.rs]
/*!
 * =================================================================
 * APARATO: CONSTANTES SOBERANAS DE LA CURVA (V1.0 - GLV HARDENED)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ALMACENAMIENTO BIT-EXACTO DE PARÁMETROS DE CURVA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NOMINAL PURITY: Cada constante documenta su rol algebraico exacto.
 * 2. SINGLE SOURCE: Todos los estratos (field, scalar, glv, generator)
 *    importan de aquí — cero literales mágicos dispersos.
 * =================================================================
 */

/// El coeficiente `b` de la ecuación de curva `y² = x³ + b` para secp256k1.
pub const CURVE_B: u64 = 7;

/// El primo de campo `p = 2²⁵⁶ − 2³² − 977`, limbs de 52 bits (bajo a alto).
pub const FIELD_PRIME_LIMBS_52: [u64; 5] = [
    0xFFFFEFFFFFC2F,
    0xFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFF,
    0x0FFFFFFFFFFFF,
];

/// Constante de reducción pseudo-Mersenne: `R = 2³² + 977`.
///
/// `2²⁵⁶ ≡ R (mod p)`; usada para plegar los limbs altos de un producto
/// de 512 bits de vuelta a la representación de 5 limbs.
pub const FIELD_REDUCTION_CONSTANT_R: u64 = 0x1000003D1;

/// El orden `n` de la curva secp256k1, limbs de 64 bits (bajo a alto).
///
/// n = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141
pub const CURVE_ORDER_N: [u64; 4] = [
    0xBFD25E8CD0364141,
    0xBAAEDCE6AF48A03B,
    0xFFFFFFFFFFFFFFFE,
    0xFFFFFFFFFFFFFFFF,
];

/// Barrett `μ = ⌊2⁵¹²/n⌋`, cinco limbs de 64 bits (bajo a alto); el limb
/// más alto vale 1 (μ tiene 257 bits).
pub const BARRETT_MU_N: [u64; 5] = [
    0x402DA1732FC9BEC0,
    0x4551231950B75FC4,
    0x0000000000000001,
    0x0000000000000000,
    0x0000000000000001,
];

/// Coordenada X del generador `G`, limbs de 64 bits (bajo a alto).
pub const GENERATOR_X_LIMBS: [u64; 4] = [
    0x59F2815B16F81798,
    0x029BFCDB2DCE28D9,
    0x55A06295CE870B07,
    0x79BE667EF9DCBBAC,
];

/// Coordenada Y del generador `G`, limbs de 64 bits (bajo a alto).
pub const GENERATOR_Y_LIMBS: [u64; 4] = [
    0x9C47D08FFB10D4B8,
    0xFD17B448A6855419,
    0x5DA4FBFC0E1108A8,
    0x483ADA7726A3C465,
];

/// El valor propio `λ` del endomorfismo `φ`, módulo `n`, limbs de 64 bits.
///
/// Satisface `λ² + λ + 1 ≡ 0 (mod n)`.
pub const LAMBDA_LIMBS: [u64; 4] = [
    0xDF02967C1B23BD72,
    0x122E22EA20816678,
    0xA5261C028812645A,
    0x5363AD4CC05C30E0,
];

/// La raíz cúbica primitiva de la unidad `β`, módulo `p`, bytes big-endian.
///
/// `φ(x, y) = (β·x, y)` es un automorfismo de la curva; satisface
/// `β² + β + 1 ≡ 0 (mod p)`.
pub const BETA_BYTES_BE: [u8; 32] = [
    0x7A, 0xE9, 0x6A, 0x2B, 0x65, 0x7C, 0x07, 0x10, 0x6E, 0x64, 0x47, 0x9E, 0xAC, 0x34, 0x34, 0xE9,
    0x9C, 0xF0, 0x49, 0x75, 0x12, 0xF5, 0x89, 0x95, 0xC1, 0x39, 0x6C, 0x28, 0x71, 0x95, 0x01, 0xEE,
];

/// `−b₁`, la primera constante de la base reticular GLV (128 bits, limbs bajos).
pub const MINUS_B1_LIMBS: [u64; 2] = [0x6F547FA90ABFE4C3, 0xE4437ED6010E8828];

/// `−b₂`, la segunda constante de la base reticular GLV, limbs de 64 bits.
pub const MINUS_B2_LIMBS: [u64; 4] = [
    0xD765CDA83DB1562C,
    0x8A280AC50774346D,
    0xFFFFFFFFFFFFFFFE,
    0xFFFFFFFFFFFFFFFF,
];

/// `g₁ = round(2³⁸⁴ · b₂ / n)`, precomputado para la descomposición GLV.
pub const GLV_G1_LIMBS: [u64; 4] = [
    0xE893209A45DBB031,
    0x3DAA8A1471E8CA7F,
    0xE86C90E49284EB15,
    0x3086D221A7D46BCD,
];

/// `g₂ = round(2³⁸⁴ · (−b₁) / n)`, precomputado para la descomposición GLV.
pub const GLV_G2_LIMBS: [u64; 4] = [
    0x1571B4AE8AC47F71,
    0x221208AC9DF506C6,
    0x6F547FA90ABFE4C4,
    0xE4437ED6010E8828,
];
