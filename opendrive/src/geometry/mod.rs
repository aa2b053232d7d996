//! Planar geometry used by road reference lines.

pub mod primitive;
pub mod spiral;

pub use primitive::{GeometryKind, GeometryPrimitive, NearestPoint, ParamRange};

use std::f64::consts::{FRAC_PI_2, PI};

/// Representation of a 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Moves the point `distance` units along `heading`.
    pub fn project(&self, heading: f64, distance: f64) -> Point {
        Point::new(
            self.x + heading.cos() * distance,
            self.y + heading.sin() * distance,
        )
    }
}

/// Calculates the Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Pose on a road: world position and heading together with the road
/// coordinates it was evaluated at.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct PosTheta {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub hdg: f64,
    pub s: f64,
    pub t: f64,
}

impl PosTheta {
    pub fn new(x: f64, y: f64, hdg: f64) -> Self {
        Self {
            x,
            y,
            hdg,
            ..Default::default()
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Shifts the pose laterally by `t` along the left-hand normal of its heading.
    pub fn add_lateral_offset(&mut self, t: f64) {
        let normal = self.hdg + FRAC_PI_2;
        self.x += normal.cos() * t;
        self.y += normal.sin() * t;
    }

    /// Same pose turned around by half a revolution.
    pub fn reversed(&self) -> PosTheta {
        PosTheta {
            hdg: normalize_angle(self.hdg + PI),
            ..*self
        }
    }
}

/// Wraps an angle into `(-PI, PI]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}

/// Signed area of the triangle `a`, `b`, `c`; positive when `c` lies to the
/// left of the directed line `a -> b`.
pub fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}
