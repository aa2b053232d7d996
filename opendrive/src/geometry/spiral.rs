//! Euler spiral (clothoid) evaluation through Fresnel integrals.

use std::f64::consts::PI;

/// Position and heading of a clothoid `ds` units from its start.
///
/// Curvature varies linearly from `curv_start` to `curv_end` over `length`.
/// When the curvature rate vanishes the result is the exact line or arc.
pub fn clothoid_at(
    x0: f64,
    y0: f64,
    hdg0: f64,
    curv_start: f64,
    curv_end: f64,
    length: f64,
    ds: f64,
) -> (f64, f64, f64) {
    let k0 = curv_start;
    let kp = (curv_end - curv_start) / length;
    let hdg = hdg0 + k0 * ds + 0.5 * kp * ds * ds;

    if kp.abs() < f64::EPSILON {
        if k0.abs() < f64::EPSILON {
            return (x0 + ds * hdg0.cos(), y0 + ds * hdg0.sin(), hdg);
        }
        let r = 1.0 / k0;
        let cx = x0 - r * hdg0.sin();
        let cy = y0 + r * hdg0.cos();
        return (cx + r * hdg.sin(), cy - r * hdg.cos(), hdg);
    }

    let alpha = kp / 2.0;
    let beta = k0;
    let delta = hdg0 - beta * beta / (4.0 * alpha);
    let sign = alpha.signum();
    let z = |x: f64| -> f64 { sign * (2.0 * alpha.abs() / PI).sqrt() * (x + beta / (2.0 * alpha)) };
    let (s0, c0) = fresnel::fresnl(z(0.0));
    let (s1, c1) = fresnel::fresnl(z(ds));
    let fac = (PI / (2.0 * alpha.abs())).sqrt();
    let dx = fac * ((c1 - c0) * delta.cos() - sign * (s1 - s0) * delta.sin());
    let dy = fac * ((s1 - s0) * delta.cos() + sign * (c1 - c0) * delta.sin());
    (x0 + dx, y0 + dy, hdg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_to_curve_transition() {
        let (x, y, hdg) = clothoid_at(0.0, 0.0, 0.0, 0.0, 0.01, 50.0, 50.0);
        assert!((x - 49.6884029).abs() < 1e-6);
        assert!((y - 4.1481024).abs() < 1e-6);
        assert!((hdg.cos() - 0.9689124).abs() < 1e-6);
        assert!((hdg.sin() - 0.2474039).abs() < 1e-6);
    }

    #[test]
    fn constant_curvature_matches_arc() {
        let k = 0.02;
        let (x, y, hdg) = clothoid_at(0.0, 0.0, 0.0, k, k, 30.0, 30.0);
        let r = 1.0 / k;
        assert!((x - r * (k * 30.0).sin()).abs() < 1e-9);
        assert!((y - r * (1.0 - (k * 30.0).cos())).abs() < 1e-9);
        assert!((hdg - 0.6).abs() < 1e-9);
    }

    #[test]
    fn zero_curvature_matches_line() {
        let (x, y, hdg) = clothoid_at(1.0, 2.0, 0.5, 0.0, 0.0, 10.0, 4.0);
        assert!((x - (1.0 + 4.0 * 0.5f64.cos())).abs() < 1e-9);
        assert!((y - (2.0 + 4.0 * 0.5f64.sin())).abs() < 1e-9);
        assert!((hdg - 0.5).abs() < 1e-9);
    }
}
