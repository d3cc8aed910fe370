// [src/complete_add.rs]
/*!
 * =================================================================
 * APARATO: LEY DE ADICIÓN JACOBIANA COMPLETA (V1.0 - BRANCHLESS)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ADICIÓN/DUPLICACIÓN JACOBIANA SIN RAMAS SECRETAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. COBERTURA TOTAL: Una sola rutina cubre P+Q, P+P, P+O, O+P y
 *    P+(−P)=O sin examinar ningún bit secreto en una condicional.
 * 2. DOBLE CÓMPUTO + SELECCIÓN: Siempre se calculan el resultado
 *    genérico Y el de duplicación; se seleccionan por máscara.
 * 3. VARIANTE MIXTA: Cuando el segundo operando es afín (Z=1), se
 *    ahorran tres multiplicaciones — usada en cada paso de los
 *    motores de multiplicación escalar.
 * =================================================================
 */

use crate::field::FieldElement;
use crate::point::{AffinePoint, JacobianPoint};

/// Adición Jacobiana + Jacobiana, completa y constante en tiempo.
///
/// Cubre todos los casos de §4.4: cómputo genérico y de duplicación en
/// paralelo, selección por máscara, y manejo de infinito por operando
/// vía `FieldElement::select` — ninguna rama examina un bit secreto.
#[must_use]
pub fn complete_add(p: &JacobianPoint, q: &JacobianPoint) -> JacobianPoint {
    // --- 1. Resultado genérico (asume ambos finitos, H != 0) ---
    let z1_sq = p.z.square_modular();
    let z2_sq = q.z.square_modular();
    let u1 = p.x.multiply_modular(&z2_sq);
    let u2 = q.x.multiply_modular(&z1_sq);
    let z1_cubed = p.z.multiply_modular(&z1_sq);
    let z2_cubed = q.z.multiply_modular(&z2_sq);
    let s1 = p.y.multiply_modular(&z2_cubed);
    let s2 = q.y.multiply_modular(&z1_cubed);

    let mut h = u2.subtract_modular(&u1);
    let mut r = s2.subtract_modular(&s1);
    h.normalize_weak();
    r.normalize_weak();

    let is_double = h.is_zero_mask() & r.is_zero_mask();
    let is_inverse = h.is_zero_mask() & !r.is_zero_mask();

    let h_sq = h.square_modular();
    let h_cubed = h_sq.multiply_modular(&h);
    let v = u1.multiply_modular(&h_sq);
    let r_sq = r.square_modular();
    let two_v = v.add_modular(&v);
    let mut generic_x = r_sq.subtract_modular(&h_cubed).subtract_modular(&two_v);
    let v_minus_x = v.subtract_modular(&generic_x);
    let s1_h_cubed = s1.multiply_modular(&h_cubed);
    let mut generic_y = r.multiply_modular(&v_minus_x).subtract_modular(&s1_h_cubed);
    let mut generic_z = p.z.multiply_modular(&q.z).multiply_modular(&h);
    generic_x.normalize_weak();
    generic_y.normalize_weak();
    generic_z.normalize_weak();

    // --- 2. Resultado de duplicación (a partir de P únicamente) ---
    let (mut double_x, mut double_y, mut double_z) = double_coordinates(p);
    double_x.normalize_weak();
    double_y.normalize_weak();
    double_z.normalize_weak();

    // --- 3. Selección por máscara: genérico vs. duplicación ---
    let mut result_x = FieldElement::select(&double_x, &generic_x, is_double);
    let mut result_y = FieldElement::select(&double_y, &generic_y, is_double);
    let mut result_z = FieldElement::select(&double_z, &generic_z, is_double);

    // --- 4. Sobrescribe con el infinito canónico si es el caso inverso ---
    let infinity = JacobianPoint::infinity();
    result_x = FieldElement::select(&infinity.x, &result_x, is_inverse);
    result_y = FieldElement::select(&infinity.y, &result_y, is_inverse);
    result_z = FieldElement::select(&infinity.z, &result_z, is_inverse);

    let result_infinity_mask = is_inverse & !p.infinity_mask & !q.infinity_mask;

    let combined = JacobianPoint {
        x: result_x,
        y: result_y,
        z: result_z,
        infinity_mask: result_infinity_mask,
    };

    // --- 5. Manejo de infinito por operando: copia completa, sin rama ---
    let handled_q_infinite = select_point(p, &combined, q.infinity_mask);
    select_point(q, &handled_q_infinite, p.infinity_mask)
}

/// Adición mixta: Jacobiana + Afín (Z implícita = 1). Ahorra tres
/// multiplicaciones frente a `complete_add` al evitar potencias de `Z2`.
#[must_use]
pub fn complete_add_mixed(p: &JacobianPoint, q: &AffinePoint) -> JacobianPoint {
    let q_jacobian = JacobianPoint::from_affine(q);

    let z1_sq = p.z.square_modular();
    let u1 = p.x;
    let u2 = q.x.multiply_modular(&z1_sq);
    let z1_cubed = p.z.multiply_modular(&z1_sq);
    let s1 = p.y;
    let s2 = q.y.multiply_modular(&z1_cubed);

    let mut h = u2.subtract_modular(&u1);
    let mut r = s2.subtract_modular(&s1);
    h.normalize_weak();
    r.normalize_weak();

    let is_double = h.is_zero_mask() & r.is_zero_mask();
    let is_inverse = h.is_zero_mask() & !r.is_zero_mask();

    let h_sq = h.square_modular();
    let h_cubed = h_sq.multiply_modular(&h);
    let v = u1.multiply_modular(&h_sq);
    let r_sq = r.square_modular();
    let two_v = v.add_modular(&v);
    let mut generic_x = r_sq.subtract_modular(&h_cubed).subtract_modular(&two_v);
    let v_minus_x = v.subtract_modular(&generic_x);
    let s1_h_cubed = s1.multiply_modular(&h_cubed);
    let mut generic_y = r.multiply_modular(&v_minus_x).subtract_modular(&s1_h_cubed);
    let mut generic_z = p.z.multiply_modular(&h);
    generic_x.normalize_weak();
    generic_y.normalize_weak();
    generic_z.normalize_weak();

    let (mut double_x, mut double_y, mut double_z) = double_coordinates(p);
    double_x.normalize_weak();
    double_y.normalize_weak();
    double_z.normalize_weak();

    let mut result_x = FieldElement::select(&double_x, &generic_x, is_double);
    let mut result_y = FieldElement::select(&double_y, &generic_y, is_double);
    let mut result_z = FieldElement::select(&double_z, &generic_z, is_double);

    let infinity = JacobianPoint::infinity();
    result_x = FieldElement::select(&infinity.x, &result_x, is_inverse);
    result_y = FieldElement::select(&infinity.y, &result_y, is_inverse);
    result_z = FieldElement::select(&infinity.z, &result_z, is_inverse);

    // Conversión sin rama: `q.infinity as u64` es 0 o 1; `wrapping_neg`
    // lo extiende a máscara todo-ceros/todo-unos. `q.infinity` puede
    // depender de un bit secreto (p.ej. dígito nulo en una tabla
    // seleccionada en tiempo constante), por lo que un `if` aquí sería
    // una fuga de canal lateral.
    let q_infinity_mask: u64 = (q.infinity as u64).wrapping_neg();
    let result_infinity_mask = is_inverse & !p.infinity_mask & !q_infinity_mask;

    let combined =
        JacobianPoint { x: result_x, y: result_y, z: result_z, infinity_mask: result_infinity_mask };

    let handled_q_infinite = select_point(p, &combined, q_infinity_mask);
    select_point(&q_jacobian, &handled_q_infinite, p.infinity_mask)
}

/// Duplicación Jacobiana especializada para `a = 0` (coste 3M + 4S),
/// calculada incondicionalmente a partir de `p` — parte del doble
/// cómputo de `complete_add`. No maneja por sí misma el caso `p` al
/// infinito; el invocador combina vía máscara.
fn double_coordinates(p: &JacobianPoint) -> (FieldElement, FieldElement, FieldElement) {
    let x_sq = p.x.square_modular();
    let m = x_sq.add_modular(&x_sq).add_modular(&x_sq);
    let y_sq = p.y.square_modular();
    let xy_sq = p.x.multiply_modular(&y_sq);
    let s = xy_sq.add_modular(&xy_sq).add_modular(&xy_sq).add_modular(&xy_sq);

    let m_sq = m.square_modular();
    let two_s = s.add_modular(&s);
    let mut x3 = m_sq.subtract_modular(&two_s);
    x3.normalize_weak();

    let y_z = p.y.multiply_modular(&p.z);
    let z3 = y_z.add_modular(&y_z);

    let y_fourth = y_sq.square_modular();
    let eight_y_fourth = y_fourth.multiply_by_small_constant(8);
    let s_minus_x3 = s.subtract_modular(&x3);
    let y3 = m.multiply_modular(&s_minus_x3).subtract_modular(&eight_y_fourth);

    (x3, y3, z3)
}

/// Selecciona entre dos puntos Jacobianos completos en tiempo constante:
/// retorna `a` si `mask` es todo-unos, `b` en caso contrario.
fn select_point(a: &JacobianPoint, b: &JacobianPoint, mask: u64) -> JacobianPoint {
    JacobianPoint {
        x: FieldElement::select(&a.x, &b.x, mask),
        y: FieldElement::select(&a.y, &b.y, mask),
        z: FieldElement::select(&a.z, &b.z, mask),
        infinity_mask: (mask & a.infinity_mask) | (!mask & b.infinity_mask),
    }
}
