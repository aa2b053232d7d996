//! Cubic polynomial records and the step-function lookup shared by every
//! s-dependent property of a road (lane offset, elevation, lane width ...).

use nalgebra::{Matrix4, Vector4};

/// Records starting this close before a query still cover it.
const S_TOLERANCE: f64 = 1e-9;

/// Anything positioned along a road or lane section by a start offset.
pub trait SOffset {
    fn s_offset(&self) -> f64;
}

/// Returns the record with the greatest start offset `<= s`.
pub fn record_at<T: SOffset>(records: &[T], s: f64) -> Option<&T> {
    records
        .iter()
        .take_while(|r| r.s_offset() <= s + S_TOLERANCE)
        .last()
}

/// Inserts `record` keeping `records` sorted by start offset. A record at
/// the same offset as an existing one goes after it.
pub fn insert_sorted<T: SOffset>(records: &mut Vec<T>, record: T) {
    let idx = records
        .iter()
        .position(|r| r.s_offset() > record.s_offset())
        .unwrap_or(records.len());
    records.insert(idx, record);
}

/// `a + b*ds + c*ds^2 + d*ds^3` with `ds` measured from `s`.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct CubicPoly {
    pub s: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl SOffset for CubicPoly {
    fn s_offset(&self) -> f64 {
        self.s
    }
}

impl CubicPoly {
    pub fn new(s: f64, a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { s, a, b, c, d }
    }

    pub fn constant(s: f64, a: f64) -> Self {
        Self::new(s, a, 0.0, 0.0, 0.0)
    }

    /// Value at local offset `ds`.
    pub fn value(&self, ds: f64) -> f64 {
        self.a + self.b * ds + self.c * ds * ds + self.d * ds * ds * ds
    }

    /// First derivative at local offset `ds`.
    pub fn slope(&self, ds: f64) -> f64 {
        self.b + 2.0 * self.c * ds + 3.0 * self.d * ds * ds
    }

    /// Solves the cubic through `(s0, v0)` and `(s1, v1)` with the given end
    /// slopes. Falls back to a constant when the span is degenerate.
    pub fn from_endpoints(s0: f64, v0: f64, dv0: f64, s1: f64, v1: f64, dv1: f64) -> Self {
        let h = s1 - s0;
        let m = Matrix4::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            1.0, h, h * h, h * h * h, //
            0.0, 1.0, 2.0 * h, 3.0 * h * h,
        );
        let rhs = Vector4::new(v0, dv0, v1, dv1);
        match m.lu().solve(&rhs) {
            Some(c) if h.abs() > f64::EPSILON => Self::new(s0, c[0], c[1], c[2], c[3]),
            _ => Self::constant(s0, v0),
        }
    }

    /// Smooth ease between two values with flat ends.
    pub fn ease(s0: f64, v0: f64, s1: f64, v1: f64) -> Self {
        Self::from_endpoints(s0, v0, 0.0, s1, v1, 0.0)
    }
}

/// Evaluates the step function described by `records` at `s`; zero before
/// the first record.
pub fn poly_value_at(records: &[CubicPoly], s: f64) -> f64 {
    record_at(records, s)
        .map(|r| r.value(s - r.s))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_lookup_uses_last_record_before_s() {
        let records = vec![
            CubicPoly::constant(0.0, 0.0),
            CubicPoly::constant(10.0, 10.0),
            CubicPoly::constant(20.0, 20.0),
        ];
        assert!((poly_value_at(&records, 9.0) - 0.0).abs() < 1e-9);
        assert!((poly_value_at(&records, 10.0) - 10.0).abs() < 1e-9);
        assert!((poly_value_at(&records, 11.0) - 10.0).abs() < 1e-9);
        assert!((poly_value_at(&records, 25.0) - 20.0).abs() < 1e-9);
        assert!((poly_value_at(&[], 5.0)).abs() < 1e-9);
    }

    #[test]
    fn evaluates_relative_to_record_start() {
        let records = vec![CubicPoly::new(5.0, 1.0, 2.0, 0.0, 0.0)];
        assert!((poly_value_at(&records, 6.0) - 3.0).abs() < 1e-9);
        assert!((poly_value_at(&records, 4.0)).abs() < 1e-9);
    }

    #[test]
    fn ease_hits_both_ends_flat() {
        let poly = CubicPoly::ease(0.0, 3.0, 10.0, 4.0);
        assert!((poly.value(0.0) - 3.0).abs() < 1e-9);
        assert!((poly.value(10.0) - 4.0).abs() < 1e-9);
        assert!(poly.slope(0.0).abs() < 1e-9);
        assert!(poly.slope(10.0).abs() < 1e-9);
        assert!((poly.value(5.0) - 3.5).abs() < 1e-9);
    }

    #[test]
    fn degenerate_span_is_constant() {
        let poly = CubicPoly::ease(2.0, 3.0, 2.0, 4.0);
        assert_eq!(poly, CubicPoly::constant(2.0, 3.0));
    }

    #[test]
    fn insert_keeps_order() {
        let mut records = vec![CubicPoly::constant(0.0, 1.0), CubicPoly::constant(10.0, 2.0)];
        insert_sorted(&mut records, CubicPoly::constant(5.0, 3.0));
        let offsets: Vec<f64> = records.iter().map(|r| r.s).collect();
        assert_eq!(offsets, vec![0.0, 5.0, 10.0]);
    }
}
