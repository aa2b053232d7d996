use crate::error::GeometryError;
use crate::geometry::{distance, orientation, spiral, Point, PosTheta};

/// Arcs never carry exactly zero curvature; the radius stays finite.
pub const ARC_MIN_CURVATURE: f64 = 1e-10;

/// Offset before `s2` of the extra sample taken by the nearest point search.
pub const NEAREST_END_EPSILON: f64 = 1e-6;

/// Upper bound on samples per primitive in the nearest point search. Finer
/// steps are widened to fit.
pub const MAX_NEAREST_SAMPLES: usize = 100_000;

/// Samples used to measure the arc length of a synthesized spline.
const SPLINE_LENGTH_SAMPLES: usize = 200;

/// Parameter range of a parametric cubic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ParamRange {
    /// `p` runs over `[0, 1]`.
    #[default]
    Normalized,
    /// `p` runs over `[0, length]`.
    ArcLength,
}

/// Shape of a single reference line segment.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum GeometryKind {
    Line,
    Arc {
        curvature: f64,
    },
    Spiral {
        curv_start: f64,
        curv_end: f64,
    },
    Poly3 {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
    },
    ParamPoly3 {
        au: f64,
        bu: f64,
        cu: f64,
        du: f64,
        av: f64,
        bv: f64,
        cv: f64,
        dv: f64,
        p_range: ParamRange,
    },
}

impl GeometryKind {
    /// Element name used in the `planView` of an OpenDRIVE file.
    pub fn tag(&self) -> &'static str {
        match self {
            GeometryKind::Line => "line",
            GeometryKind::Arc { .. } => "arc",
            GeometryKind::Spiral { .. } => "spiral",
            GeometryKind::Poly3 { .. } => "poly3",
            GeometryKind::ParamPoly3 { .. } => "paramPoly3",
        }
    }
}

/// Closest sample found on a primitive, with `t` signed positive on the left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPoint {
    pub pose: PosTheta,
    pub distance: f64,
}

/// One parametric curve segment of a reference line.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeometryPrimitive {
    s: f64,
    x: f64,
    y: f64,
    hdg: f64,
    length: f64,
    kind: GeometryKind,
}

impl GeometryPrimitive {
    pub fn new(
        s: f64,
        x: f64,
        y: f64,
        hdg: f64,
        length: f64,
        kind: GeometryKind,
    ) -> Result<Self, GeometryError> {
        check_length(length)?;
        for (field, value) in [("s", s), ("x", x), ("y", y), ("hdg", hdg)] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { field, value });
            }
        }
        Ok(Self {
            s,
            x,
            y,
            hdg,
            length,
            kind: normalize_kind(kind),
        })
    }

    pub fn line(s: f64, x: f64, y: f64, hdg: f64, length: f64) -> Result<Self, GeometryError> {
        Self::new(s, x, y, hdg, length, GeometryKind::Line)
    }

    pub fn arc(
        s: f64,
        x: f64,
        y: f64,
        hdg: f64,
        length: f64,
        curvature: f64,
    ) -> Result<Self, GeometryError> {
        Self::new(s, x, y, hdg, length, GeometryKind::Arc { curvature })
    }

    pub fn spiral(
        s: f64,
        x: f64,
        y: f64,
        hdg: f64,
        length: f64,
        curv_start: f64,
        curv_end: f64,
    ) -> Result<Self, GeometryError> {
        Self::new(
            s,
            x,
            y,
            hdg,
            length,
            GeometryKind::Spiral {
                curv_start,
                curv_end,
            },
        )
    }

    /// Cubic Hermite spline from `start` to `end` expressed as a normalized
    /// parametric cubic. Tangent magnitudes equal the chord length.
    pub fn spline_between(s: f64, start: PosTheta, end: PosTheta) -> Result<Self, GeometryError> {
        let chord = distance(start.point(), end.point());
        let (cos, sin) = (start.hdg.cos(), start.hdg.sin());
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        // end point and tangents in the local frame of `start`
        let u1 = dx * cos + dy * sin;
        let v1 = -dx * sin + dy * cos;
        let dh = end.hdg - start.hdg;
        let (tu0, tv0) = (chord, 0.0);
        let (tu1, tv1) = (chord * dh.cos(), chord * dh.sin());

        let kind = GeometryKind::ParamPoly3 {
            au: 0.0,
            bu: tu0,
            cu: 3.0 * u1 - 2.0 * tu0 - tu1,
            du: -2.0 * u1 + tu0 + tu1,
            av: 0.0,
            bv: tv0,
            cv: 3.0 * v1 - 2.0 * tv0 - tv1,
            dv: -2.0 * v1 + tv0 + tv1,
            p_range: ParamRange::Normalized,
        };
        let length = param_curve_length(&kind);
        Self::new(s, start.x, start.y, start.hdg, length, kind)
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn s2(&self) -> f64 {
        self.s + self.length
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn hdg(&self) -> f64 {
        self.hdg
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn kind(&self) -> &GeometryKind {
        &self.kind
    }

    /// Radius of an arc, `None` for every other shape.
    pub fn radius(&self) -> Option<f64> {
        match self.kind {
            GeometryKind::Arc { curvature } => Some(1.0 / curvature.abs()),
            _ => None,
        }
    }

    pub fn set_s(&mut self, s: f64) {
        self.s = s;
    }

    pub fn set_start(&mut self, x: f64, y: f64, hdg: f64) {
        self.x = x;
        self.y = y;
        self.hdg = hdg;
    }

    pub fn set_length(&mut self, length: f64) -> Result<(), GeometryError> {
        check_length(length)?;
        self.length = length;
        Ok(())
    }

    pub fn set_kind(&mut self, kind: GeometryKind) {
        self.kind = normalize_kind(kind);
    }

    pub fn contains_s(&self, s: f64) -> bool {
        s >= self.s && s <= self.s2()
    }

    /// World position and heading at road coordinate `s`.
    pub fn evaluate(&self, s: f64) -> PosTheta {
        let ds = s - self.s;
        let (x, y, hdg) = match self.kind {
            GeometryKind::Line => (
                self.x + self.hdg.cos() * ds,
                self.y + self.hdg.sin() * ds,
                self.hdg,
            ),
            GeometryKind::Arc { curvature } => {
                let radius = 1.0 / curvature;
                // rotate the start point around the arc center
                let cx = self.x - radius * self.hdg.sin();
                let cy = self.y + radius * self.hdg.cos();
                let hdg = self.hdg + curvature * ds;
                (cx + radius * hdg.sin(), cy - radius * hdg.cos(), hdg)
            }
            GeometryKind::Spiral {
                curv_start,
                curv_end,
            } => spiral::clothoid_at(
                self.x,
                self.y,
                self.hdg,
                curv_start,
                curv_end,
                self.length,
                ds,
            ),
            GeometryKind::Poly3 { a, b, c, d } => {
                let u = ds;
                let v = a + b * u + c * u * u + d * u * u * u;
                let dv = b + 2.0 * c * u + 3.0 * d * u * u;
                let (x, y) = self.local_to_world(u, v);
                (x, y, self.hdg + dv.atan())
            }
            GeometryKind::ParamPoly3 {
                au,
                bu,
                cu,
                du,
                av,
                bv,
                cv,
                dv,
                p_range,
            } => {
                let p = match p_range {
                    ParamRange::Normalized => ds / self.length,
                    ParamRange::ArcLength => ds,
                };
                let u = au + bu * p + cu * p * p + du * p * p * p;
                let v = av + bv * p + cv * p * p + dv * p * p * p;
                let du_dp = bu + 2.0 * cu * p + 3.0 * du * p * p;
                let dv_dp = bv + 2.0 * cv * p + 3.0 * dv * p * p;
                let (x, y) = self.local_to_world(u, v);
                (x, y, self.hdg + dv_dp.atan2(du_dp))
            }
        };
        PosTheta {
            x,
            y,
            z: 0.0,
            hdg,
            s,
            t: 0.0,
        }
    }

    pub fn start_pose(&self) -> PosTheta {
        self.evaluate(self.s)
    }

    pub fn end_pose(&self) -> PosTheta {
        self.evaluate(self.s2())
    }

    fn local_to_world(&self, u: f64, v: f64) -> (f64, f64) {
        let (cos, sin) = (self.hdg.cos(), self.hdg.sin());
        (self.x + u * cos - v * sin, self.y + u * sin + v * cos)
    }

    /// Approximate projection of `(x, y)` onto the primitive.
    ///
    /// The segment is sampled every `step` units plus once just before `s2`,
    /// so the returned point is within `step` of the true foot point. At most
    /// `MAX_NEAREST_SAMPLES` samples are taken; a finer step is widened.
    pub fn nearest_point_from(
        &self,
        x: f64,
        y: f64,
        step: f64,
    ) -> Result<NearestPoint, GeometryError> {
        let target = Point::new(x, y);
        let step = if step > 0.0 && step.is_finite() { step } else { self.length };
        let samples = ((self.length / step).ceil() as usize).clamp(1, MAX_NEAREST_SAMPLES);
        let step = step.max(self.length / MAX_NEAREST_SAMPLES as f64);
        let mut best: Option<(f64, PosTheta)> = None;
        let mut consider = |pose: PosTheta| {
            let d = distance(pose.point(), target);
            if !d.is_finite() {
                return;
            }
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, pose));
            }
        };

        for i in 0..samples {
            consider(self.evaluate(self.s + i as f64 * step));
        }
        let last = (self.s2() - NEAREST_END_EPSILON).max(self.s);
        consider(self.evaluate(last));

        let (dist, mut pose) = best.ok_or(GeometryError::NoNearestPoint { s: self.s })?;
        let ahead = pose.point().project(pose.hdg, 1.0);
        let side = if orientation(pose.point(), ahead, target) >= 0.0 {
            1.0
        } else {
            -1.0
        };
        pose.t = side * dist;
        Ok(NearestPoint {
            pose,
            distance: dist,
        })
    }
}

fn normalize_kind(kind: GeometryKind) -> GeometryKind {
    match kind {
        GeometryKind::Arc { curvature } if curvature.abs() < ARC_MIN_CURVATURE => {
            GeometryKind::Arc {
                curvature: if curvature.is_sign_negative() {
                    -ARC_MIN_CURVATURE
                } else {
                    ARC_MIN_CURVATURE
                },
            }
        }
        other => other,
    }
}

/// Polyline length of a normalized parametric cubic.
fn param_curve_length(kind: &GeometryKind) -> f64 {
    let GeometryKind::ParamPoly3 {
        au,
        bu,
        cu,
        du,
        av,
        bv,
        cv,
        dv,
        ..
    } = *kind
    else {
        return 0.0;
    };
    let at = |p: f64| {
        Point::new(
            au + bu * p + cu * p * p + du * p * p * p,
            av + bv * p + cv * p * p + dv * p * p * p,
        )
    };
    let mut length = 0.0;
    let mut prev = at(0.0);
    for i in 1..=SPLINE_LENGTH_SAMPLES {
        let next = at(i as f64 / SPLINE_LENGTH_SAMPLES as f64);
        length += distance(prev, next);
        prev = next;
    }
    length
}

fn check_length(length: f64) -> Result<(), GeometryError> {
    if length.is_finite() && length > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidLength { length })
    }
}
