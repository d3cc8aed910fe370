// [src/fast.rs]
/*!
 * =================================================================
 * APARATO: PLANO ARITMÉTICO RÁPIDO NO-CT (V1.0)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ARITMÉTICA JACOBIANA CON RAMAS, PARA DATOS PÚBLICOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SÓLO DATOS PÚBLICOS: Este aparato ramifica sobre el valor de sus
 *    entradas (H == 0, R == 0, bits del escalar). Apto únicamente
 *    cuando ni el punto ni el escalar son secretos — verificación de
 *    firmas, autotest cruzado contra el motor CT, construcción de
 *    tablas de precómputo a partir del generador público.
 * 2. NOMINAL PURITY: Misma nomenclatura descriptiva (H, R, S, M) que
 *    el resto del estrato L1.
 * =================================================================
 */

use crate::point::{AffinePoint, JacobianPoint};
use tracing::instrument;

/// Duplica un punto Jacobiano (fórmula 3M + 4S, especializada `a = 0`).
/// Rama explícita sobre el infinito y sobre `Y = 0` — sólo apta para
/// datos públicos.
#[inline(always)]
#[instrument(level = "trace", skip_all)]
#[must_use]
pub fn double(point: &JacobianPoint) -> JacobianPoint {
    if point.is_infinity() || point.y.is_zero() {
        return JacobianPoint::infinity();
    }

    let x_squared = point.x.square_modular();
    let slope_m = x_squared.add_modular(&x_squared).add_modular(&x_squared);

    let y_squared = point.y.square_modular();
    let x_times_y_squared = point.x.multiply_modular(&y_squared);
    let term_s = x_times_y_squared
        .add_modular(&x_times_y_squared)
        .add_modular(&x_times_y_squared)
        .add_modular(&x_times_y_squared);

    let slope_m_squared = slope_m.square_modular();
    let term_s_doubled = term_s.add_modular(&term_s);
    let mut output_x = slope_m_squared.subtract_modular(&term_s_doubled);
    output_x.normalize_weak();

    let y_times_z = point.y.multiply_modular(&point.z);
    let output_z = y_times_z.add_modular(&y_times_z);

    let y_fourth = y_squared.square_modular();
    let eight_y_fourth = y_fourth.multiply_by_small_constant(8);
    let s_minus_x3 = term_s.subtract_modular(&output_x);
    let output_y = slope_m.multiply_modular(&s_minus_x3).subtract_modular(&eight_y_fourth);

    JacobianPoint { x: output_x, y: output_y, z: output_z, infinity_mask: 0 }
}

/// Suma un punto Jacobiano y uno afín (`Z2 = 1` implícita, 8M en vez de
/// 11M). Rama explícita sobre infinito y sobre colisión/inversión.
#[inline(always)]
#[instrument(level = "trace", skip_all)]
#[must_use]
pub fn add_mixed(p: &JacobianPoint, q: &AffinePoint) -> JacobianPoint {
    if p.is_infinity() {
        return JacobianPoint::from_affine(q);
    }
    if q.infinity {
        return *p;
    }

    let z1_squared = p.z.square_modular();
    let u2 = q.x.multiply_modular(&z1_squared);
    let z1_cubed = p.z.multiply_modular(&z1_squared);
    let s2 = q.y.multiply_modular(&z1_cubed);

    let horizontal_distance = u2.subtract_modular(&p.x);
    let vertical_slope = s2.subtract_modular(&p.y);

    if horizontal_distance.is_zero() {
        if vertical_slope.is_zero() {
            return double(p);
        }
        return JacobianPoint::infinity();
    }

    let h_squared = horizontal_distance.square_modular();
    let h_cubed = h_squared.multiply_modular(&horizontal_distance);
    let v = p.x.multiply_modular(&h_squared);

    let r_squared = vertical_slope.square_modular();
    let v_doubled = v.add_modular(&v);
    let mut output_x = r_squared.subtract_modular(&h_cubed).subtract_modular(&v_doubled);
    output_x.normalize_weak();

    let v_minus_x3 = v.subtract_modular(&output_x);
    let y1_h_cubed = p.y.multiply_modular(&h_cubed);
    let output_y = vertical_slope.multiply_modular(&v_minus_x3).subtract_modular(&y1_h_cubed);

    let output_z = p.z.multiply_modular(&horizontal_distance);

    JacobianPoint { x: output_x, y: output_y, z: output_z, infinity_mask: 0 }
}

/// Suma dos puntos Jacobianos genéricos. Rama explícita sobre infinito y
/// sobre colisión/inversión — sólo apta para datos públicos.
#[instrument(level = "trace", skip_all)]
#[must_use]
pub fn add(p: &JacobianPoint, q: &JacobianPoint) -> JacobianPoint {
    if p.is_infinity() {
        return *q;
    }
    if q.is_infinity() {
        return *p;
    }

    let z1_squared = p.z.square_modular();
    let z2_squared = q.z.square_modular();
    let u1 = p.x.multiply_modular(&z2_squared);
    let u2 = q.x.multiply_modular(&z1_squared);
    let z1_cubed = p.z.multiply_modular(&z1_squared);
    let z2_cubed = q.z.multiply_modular(&z2_squared);
    let s1 = p.y.multiply_modular(&z2_cubed);
    let s2 = q.y.multiply_modular(&z1_cubed);

    let horizontal_distance = u2.subtract_modular(&u1);
    let vertical_slope = s2.subtract_modular(&s1);

    if horizontal_distance.is_zero() {
        if vertical_slope.is_zero() {
            return double(p);
        }
        return JacobianPoint::infinity();
    }

    let h_squared = horizontal_distance.square_modular();
    let h_cubed = h_squared.multiply_modular(&horizontal_distance);
    let v = u1.multiply_modular(&h_squared);

    let r_squared = vertical_slope.square_modular();
    let v_doubled = v.add_modular(&v);
    let mut output_x = r_squared.subtract_modular(&h_cubed).subtract_modular(&v_doubled);
    output_x.normalize_weak();

    let v_minus_x3 = v.subtract_modular(&output_x);
    let s1_h_cubed = s1.multiply_modular(&h_cubed);
    let output_y = vertical_slope.multiply_modular(&v_minus_x3).subtract_modular(&s1_h_cubed);

    let output_z = p.z.multiply_modular(&q.z).multiply_modular(&horizontal_distance);

    JacobianPoint { x: output_x, y: output_y, z: output_z, infinity_mask: 0 }
}

/// Multiplicación escalar binaria (doble-y-suma, MSB primero) sin
/// protección contra canales laterales. Apta únicamente para el
/// autotest cruzado (§4.7) y la construcción de tablas de precómputo
/// del generador, donde ni el punto ni el escalar son secretos.
#[must_use]
pub fn scalar_mul(point: &AffinePoint, scalar: &crate::scalar::Scalar) -> JacobianPoint {
    let mut accumulator = JacobianPoint::infinity();
    for limb_index in (0..4).rev() {
        let limb = scalar.limbs[limb_index];
        for bit_index in (0..64).rev() {
            accumulator = double(&accumulator);
            if (limb >> bit_index) & 1 == 1 {
                accumulator = add_mixed(&accumulator, point);
            }
        }
    }
    accumulator
}
