//! Ordered, contiguous chain of geometry primitives along a road.

use crate::error::GeometryError;
use crate::geometry::{GeometryPrimitive, NearestPoint, PosTheta};

/// Tolerance for the `primitive[i].s2 == primitive[i + 1].s` invariant.
pub const CONTINUITY_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReferenceLine {
    geometries: Vec<GeometryPrimitive>,
}

impl ReferenceLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometries(&self) -> &[GeometryPrimitive] {
        &self.geometries
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// Sum of all primitive lengths.
    pub fn length(&self) -> f64 {
        self.geometries.iter().map(|g| g.length()).sum()
    }

    /// Inserts a primitive keeping the list sorted by `s`.
    pub fn add(&mut self, geometry: GeometryPrimitive) {
        let idx = self
            .geometries
            .iter()
            .position(|g| g.s() > geometry.s())
            .unwrap_or(self.geometries.len());
        self.geometries.insert(idx, geometry);
    }

    pub fn remove_last(&mut self) -> Option<GeometryPrimitive> {
        self.geometries.pop()
    }

    pub fn clear(&mut self) {
        self.geometries.clear();
    }

    /// `s` at which the next appended primitive starts.
    pub fn end_s(&self) -> f64 {
        self.geometries.last().map(|g| g.s2()).unwrap_or(0.0)
    }

    /// Pose at the end of the last primitive.
    pub fn end_pose(&self) -> Option<PosTheta> {
        self.geometries.last().map(|g| g.end_pose())
    }

    /// First primitive, in scan order, whose closed interval contains `s`.
    /// A shared boundary therefore resolves to the earlier primitive.
    pub fn geometry_at(&self, s: f64) -> Option<&GeometryPrimitive> {
        self.geometries.iter().find(|g| g.contains_s(s))
    }

    /// Index form of [`ReferenceLine::geometry_at`].
    pub fn geometry_index_at(&self, s: f64) -> Option<usize> {
        self.geometries.iter().position(|g| g.contains_s(s))
    }

    /// Position and heading at `s` together with the primitive that produced it.
    pub fn get_coords(&self, s: f64) -> Option<(PosTheta, &GeometryPrimitive)> {
        self.geometry_at(s).map(|g| (g.evaluate(s), g))
    }

    /// Global minimum over every primitive's sampled nearest point.
    pub fn nearest_point_from(
        &self,
        x: f64,
        y: f64,
        step: f64,
    ) -> Result<(NearestPoint, &GeometryPrimitive), GeometryError> {
        let mut best: Option<(NearestPoint, &GeometryPrimitive)> = None;
        for g in &self.geometries {
            let np = g.nearest_point_from(x, y, step)?;
            if best.map_or(true, |(b, _)| np.distance < b.distance) {
                best = Some((np, g));
            }
        }
        best.ok_or(GeometryError::NoNearestPoint { s: 0.0 })
    }

    /// Rebases every primitive so the chain starts at `s = 0` and each
    /// primitive begins where the previous one ends.
    pub fn recompute_offsets(&mut self) {
        let mut s = 0.0;
        for g in &mut self.geometries {
            g.set_s(s);
            s = g.s2();
        }
    }

    /// Indices `i` where `primitive[i].s2 != primitive[i + 1].s`.
    pub fn gaps(&self) -> Vec<usize> {
        self.geometries
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| (pair[0].s2() - pair[1].s()).abs() > CONTINUITY_EPSILON)
            .map(|(i, _)| i)
            .collect()
    }
}
