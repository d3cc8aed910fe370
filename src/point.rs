// [src/point.rs]
/*!
 * =================================================================
 * APARATO: MOTOR GEOMÉTRICO DE PUNTOS (V64.0 - JACOBIAN COMPLETO)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: REPRESENTACIÓN AFÍN Y JACOBIANA, SERIALIZACIÓN SEC1
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. INFINITO CANÓNICO: El punto al infinito Jacobiano se representa
 *    tanto por una máscara de 64 bits todo-unos como por el triplete
 *    canónico `(X=0, Y=1, Z=0)`, manteniendo la aritmética bien
 *    definida incluso cuando el invocador ignora la máscara.
 * 2. SEC1: Serialización comprimida (33 bytes) y no comprimida (65
 *    bytes); el infinito nunca se serializa (error del invocador).
 * =================================================================
 */

use crate::constants::{CURVE_B, GENERATOR_X_LIMBS, GENERATOR_Y_LIMBS};
use crate::ct::{self, Mask64};
use crate::errors::MathError;
use crate::field::FieldElement;

/// Un punto de la curva secp256k1 en representación afín `(x, y)`.
///
/// Apto como entrada de tabla de precómputo (3 elementos de campo en
/// vez de los 4 que exige Jacobiano, ya que `Z` es implícitamente 1).
#[derive(Debug, Clone, Copy)]
pub struct AffinePoint {
    /// Coordenada x.
    pub x: FieldElement,
    /// Coordenada y.
    pub y: FieldElement,
    /// `true` sii este es el punto al infinito (identidad del grupo).
    pub infinity: bool,
}

impl AffinePoint {
    /// El punto al infinito en representación afín.
    #[inline(always)]
    #[must_use]
    pub fn infinity() -> Self {
        Self { x: FieldElement::zero(), y: FieldElement::zero(), infinity: true }
    }

    /// El generador `G` de secp256k1.
    #[must_use]
    pub fn generator() -> Self {
        Self {
            x: FieldElement::from_big_endian_bytes(&u256_limbs_to_be_bytes(&GENERATOR_X_LIMBS)),
            y: FieldElement::from_big_endian_bytes(&u256_limbs_to_be_bytes(&GENERATOR_Y_LIMBS)),
            infinity: false,
        }
    }

    /// Construye un punto afín a partir de coordenadas, verificando que
    /// satisfaga `y² = x³ + b`. Error `NotOnCurve` si no.
    pub fn from_affine(x: FieldElement, y: FieldElement) -> Result<Self, MathError> {
        let candidate = Self { x, y, infinity: false };
        if !candidate.is_on_curve() {
            return Err(MathError::NotOnCurve);
        }
        Ok(candidate)
    }

    /// `true` sii el punto (no-infinito) satisface `y² = x³ + b`.
    #[must_use]
    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        let mut lhs = self.y.square_modular();
        let x_cubed = self.x.square_modular().multiply_modular(&self.x);
        let b = FieldElement::from_u64(CURVE_B);
        let mut rhs = x_cubed.add_modular(&b);
        lhs.normalize();
        rhs.normalize();
        lhs == rhs
    }

    /// Negación afín: `(x, p − y)`. El infinito es su propio negativo.
    ///
    /// No ramifica sobre `self.infinity`: negar la coordenada `y = 0`
    /// del infinito produce de nuevo `0` tras normalizar, así que la
    /// bandera se copia directamente — apto para operandos cuyo estado
    /// de infinito depende de un bit secreto (p.ej. una entrada de tabla
    /// seleccionada en tiempo constante).
    #[must_use]
    pub fn negate(&self) -> Self {
        let mut negated_y = self.y.negate(1);
        negated_y.normalize();
        Self { x: self.x, y: negated_y, infinity: self.infinity }
    }

    /// Aplica el endomorfismo `φ(x, y) = (β·x, y)`. Barata: sólo
    /// multiplica la coordenada x por la constante de campo `β`. Igual
    /// que `negate`, no ramifica sobre `self.infinity`.
    #[must_use]
    pub fn apply_endomorphism(&self, beta: &FieldElement) -> Self {
        Self { x: self.x.multiply_modular(beta), y: self.y, infinity: self.infinity }
    }

    /// Serializa a 33 bytes SEC1 comprimidos. El infinito no tiene
    /// representación comprimida — error.
    pub fn to_compressed_bytes(&self) -> Result<[u8; 33], MathError> {
        if self.infinity {
            return Err(MathError::InfinityResult);
        }
        let mut out = [0u8; 33];
        out[0] = if self.y.is_odd() { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&self.x.to_big_endian_bytes());
        Ok(out)
    }

    /// Deserializa 33 bytes SEC1 comprimidos, recuperando `y` vía
    /// `sqrt(x³ + b)` y seleccionando la paridad indicada por el prefijo.
    ///
    /// # Mathematical Proof
    /// Sigue el algoritmo del original: calcula la raíz candidata, y si
    /// su paridad no coincide con el prefijo solicitado, la niega —
    /// resuelto a partir de `original_source/bindings/c_api` (ver §9 de
    /// SPEC_FULL.md).
    pub fn from_compressed_bytes(bytes: &[u8; 33]) -> Result<Self, MathError> {
        let prefix = bytes[0];
        if prefix != 0x02 && prefix != 0x03 {
            return Err(MathError::InvalidPoint);
        }
        let x_bytes: [u8; 32] = bytes[1..33].try_into().unwrap();
        let x = FieldElement::from_big_endian_bytes(&x_bytes);

        let rhs = x.square_modular().multiply_modular(&x).add_modular(&FieldElement::from_u64(CURVE_B));
        let mut candidate_y = rhs.sqrt();
        candidate_y.normalize();

        let mut check = candidate_y.square_modular();
        let mut rhs_normalized = rhs;
        check.normalize();
        rhs_normalized.normalize();
        if check != rhs_normalized {
            return Err(MathError::InvalidPoint);
        }

        let want_odd = prefix == 0x03;
        if candidate_y.is_odd() != want_odd {
            candidate_y = candidate_y.negate(1);
            candidate_y.normalize();
        }

        Ok(Self { x, y: candidate_y, infinity: false })
    }

    /// Serializa a 65 bytes SEC1 no comprimidos.
    pub fn to_uncompressed_bytes(&self) -> Result<[u8; 65], MathError> {
        if self.infinity {
            return Err(MathError::InfinityResult);
        }
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x.to_big_endian_bytes());
        out[33..65].copy_from_slice(&self.y.to_big_endian_bytes());
        Ok(out)
    }

    /// Deserializa 65 bytes SEC1 no comprimidos, verificando la curva.
    pub fn from_uncompressed_bytes(bytes: &[u8; 65]) -> Result<Self, MathError> {
        if bytes[0] != 0x04 {
            return Err(MathError::InvalidPoint);
        }
        let x = FieldElement::from_big_endian_bytes(&bytes[1..33].try_into().unwrap());
        let y = FieldElement::from_big_endian_bytes(&bytes[33..65].try_into().unwrap());
        Self::from_affine(x, y).map_err(|_| MathError::InvalidPoint)
    }

    /// Selecciona `table[index]` en tiempo constante, recorriendo las 16
    /// entradas completas de la ventana — nunca indexa directamente por
    /// `index`. Usada por los motores de multiplicación de base fija y
    /// de base variable para leer sus tablas de precómputo.
    #[must_use]
    pub fn ct_select(table: &[Self; 16], index: u32) -> Self {
        let mut x_table = [[0u64; 5]; 16];
        let mut y_table = [[0u64; 5]; 16];
        let mut infinity_table = [[0u64; 1]; 16];
        for (i, point) in table.iter().enumerate() {
            x_table[i] = point.x.internal_limbs;
            y_table[i] = point.y.internal_limbs;
            infinity_table[i] = [point.infinity as u64];
        }
        let x_limbs = ct::ct_lookup_limbs(&x_table, index);
        let y_limbs = ct::ct_lookup_limbs(&y_table, index);
        let infinity_limb = ct::ct_lookup_limbs(&infinity_table, index)[0];
        Self {
            x: FieldElement::from_limbs_52(x_limbs),
            y: FieldElement::from_limbs_52(y_limbs),
            infinity: infinity_limb == 1,
        }
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        if self.infinity || other.infinity {
            return self.infinity == other.infinity;
        }
        self.x == other.x && self.y == other.y
    }
}
impl Eq for AffinePoint {}

/// Un punto de la curva secp256k1 en coordenadas Jacobianas proyectivas
/// `(X : Y : Z)`, mapeando al punto afín `(X/Z², Y/Z³)`.
///
/// El infinito se representa con una máscara todo-unos en `infinity_mask`
/// **y** con el triplete canónico `(X=0, Y=1, Z=0)` — ambas formas se
/// mantienen sincronizadas por cada constructor de este aparato.
#[derive(Debug, Clone, Copy)]
pub struct JacobianPoint {
    /// Coordenada X proyectiva.
    pub x: FieldElement,
    /// Coordenada Y proyectiva.
    pub y: FieldElement,
    /// Coordenada Z proyectiva (denominador compartido).
    pub z: FieldElement,
    /// Máscara de 64 bits: todo-unos sii este es el punto al infinito.
    pub infinity_mask: Mask64,
}

impl JacobianPoint {
    /// El punto al infinito, en su representación canónica `(0:1:0)`.
    #[inline(always)]
    #[must_use]
    pub fn infinity() -> Self {
        Self {
            x: FieldElement::zero(),
            y: FieldElement::from_u64(1),
            z: FieldElement::zero(),
            infinity_mask: u64::MAX,
        }
    }

    /// Eleva un punto afín al espacio Jacobiano (`Z = 1`).
    #[inline(always)]
    #[must_use]
    pub fn from_affine(point: &AffinePoint) -> Self {
        if point.infinity {
            return Self::infinity();
        }
        Self { x: point.x, y: point.y, z: FieldElement::from_u64(1), infinity_mask: 0 }
    }

    /// El generador `G`, en coordenadas Jacobianas.
    #[must_use]
    pub fn generator() -> Self {
        Self::from_affine(&AffinePoint::generator())
    }

    /// `true` sii `self` es el punto al infinito (consulta no-CT; sólo
    /// apta sobre datos públicos o al final de un cómputo CT, nunca
    /// dentro de una rama que dependa de un bit secreto).
    #[inline(always)]
    #[must_use]
    pub fn is_infinity(&self) -> bool {
        self.infinity_mask == u64::MAX
    }

    /// Proyecta al plano afín: `x = X/Z²`, `y = Y/Z³`. Requiere una
    /// inversión modular (vía `FieldElement::invert`, en sí misma CT).
    ///
    /// # Errors
    /// `InfinityResult` si el punto es el infinito.
    pub fn to_affine(&self) -> Result<AffinePoint, MathError> {
        if self.is_infinity() {
            return Err(MathError::InfinityResult);
        }
        let z_inv = self.z.invert();
        let z_inv_sq = z_inv.square_modular();
        let z_inv_cubed = z_inv_sq.multiply_modular(&z_inv);
        let mut x = self.x.multiply_modular(&z_inv_sq);
        let mut y = self.y.multiply_modular(&z_inv_cubed);
        x.normalize();
        y.normalize();
        Ok(AffinePoint { x, y, infinity: false })
    }

    /// Negación Jacobiana: `(X : p−Y : Z)`.
    #[must_use]
    pub fn negate(&self) -> Self {
        let mut negated_y = self.y.negate(1);
        negated_y.normalize();
        Self { x: self.x, y: negated_y, z: self.z, infinity_mask: self.infinity_mask }
    }
}

impl PartialEq for JacobianPoint {
    fn eq(&self, other: &Self) -> bool {
        match (self.to_affine(), other.to_affine()) {
            (Ok(a), Ok(b)) => a == b,
            (Err(_), Err(_)) => true,
            _ => false,
        }
    }
}

/// Reempaqueta cuatro limbs de 64 bits (orden lógico big-endian,
/// arreglo little-endian) en 32 bytes big-endian.
fn u256_limbs_to_be_bytes(limbs: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (index, &limb) in limbs.iter().enumerate() {
        let offset = (3 - index) * 8;
        bytes[offset..offset + 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_is_on_curve() {
        assert!(AffinePoint::generator().is_on_curve());
    }

    #[test]
    fn affine_jacobian_roundtrip() {
        let g = AffinePoint::generator();
        let jac = JacobianPoint::from_affine(&g);
        let back = jac.to_affine().unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn compressed_roundtrip_recovers_generator() {
        let g = AffinePoint::generator();
        let bytes = g.to_compressed_bytes().unwrap();
        let recovered = AffinePoint::from_compressed_bytes(&bytes).unwrap();
        assert_eq!(recovered, g);
    }

    #[test]
    fn uncompressed_roundtrip_recovers_generator() {
        let g = AffinePoint::generator();
        let bytes = g.to_uncompressed_bytes().unwrap();
        let recovered = AffinePoint::from_uncompressed_bytes(&bytes).unwrap();
        assert_eq!(recovered, g);
    }

    #[test]
    fn infinity_has_no_compressed_form() {
        assert!(AffinePoint::infinity().to_compressed_bytes().is_err());
    }

    #[test]
    fn negate_then_negate_recovers_point() {
        let g = AffinePoint::generator();
        assert_eq!(g.negate().negate(), g);
    }

    #[test]
    fn jacobian_infinity_round_trips_through_affine_error() {
        assert!(JacobianPoint::infinity().to_affine().is_err());
    }
}
