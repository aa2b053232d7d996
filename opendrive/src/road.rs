//! Road aggregate: reference line, lane sections and the s,t -> world pipeline.

use log::warn;

use crate::error::{OdrError, Result};
use crate::geometry::{GeometryKind, GeometryPrimitive, PosTheta};
use crate::lane::LaneSide;
use crate::lane_section::LaneSection;
use crate::link::{JunctionId, RoadId, RoadLink};
use crate::polynomial::{insert_sorted, poly_value_at, CubicPoly};
use crate::reference_line::{ReferenceLine, CONTINUITY_EPSILON};

/// Lane sections starting this close to `s` cover it.
const SECTION_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Road {
    id: RoadId,
    pub name: String,
    /// Junction this road belongs to when it is a connecting road.
    pub junction: Option<JunctionId>,
    length: f64,
    reference_line: ReferenceLine,
    lane_sections: Vec<LaneSection>,
    lane_offsets: Vec<CubicPoly>,
    elevations: Vec<CubicPoly>,
    superelevations: Vec<CubicPoly>,
    predecessor: Option<RoadLink>,
    successor: Option<RoadLink>,
}

impl Road {
    pub fn new(id: RoadId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            junction: None,
            length: 0.0,
            reference_line: ReferenceLine::new(),
            lane_sections: Vec::new(),
            lane_offsets: Vec::new(),
            elevations: Vec::new(),
            superelevations: Vec::new(),
            predecessor: None,
            successor: None,
        }
    }

    pub fn id(&self) -> RoadId {
        self.id
    }

    /// Re-keys the road and the back-references held by its lane sections.
    pub fn set_id(&mut self, id: RoadId) {
        self.id = id;
        for section in &mut self.lane_sections {
            section.road_id = id;
        }
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn is_connecting_road(&self) -> bool {
        self.junction.is_some()
    }

    pub fn reference_line(&self) -> &ReferenceLine {
        &self.reference_line
    }

    /// Geometry primitives in `s` order.
    pub fn geometry_block(&self) -> &[GeometryPrimitive] {
        self.reference_line.geometries()
    }

    // ---- geometry -------------------------------------------------------

    pub fn add_geometry(&mut self, geometry: GeometryPrimitive) {
        self.reference_line.add(geometry);
        self.update_length();
    }

    pub fn add_geometry_line(&mut self, s: f64, x: f64, y: f64, hdg: f64, length: f64) -> Result<()> {
        self.add_geometry(GeometryPrimitive::line(s, x, y, hdg, length)?);
        Ok(())
    }

    pub fn add_geometry_arc(
        &mut self,
        s: f64,
        x: f64,
        y: f64,
        hdg: f64,
        length: f64,
        curvature: f64,
    ) -> Result<()> {
        self.add_geometry(GeometryPrimitive::arc(s, x, y, hdg, length, curvature)?);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_geometry_spiral(
        &mut self,
        s: f64,
        x: f64,
        y: f64,
        hdg: f64,
        length: f64,
        curv_start: f64,
        curv_end: f64,
    ) -> Result<()> {
        self.add_geometry(GeometryPrimitive::spiral(
            s, x, y, hdg, length, curv_start, curv_end,
        )?);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_geometry_poly(
        &mut self,
        s: f64,
        x: f64,
        y: f64,
        hdg: f64,
        length: f64,
        a: f64,
        b: f64,
        c: f64,
        d: f64,
    ) -> Result<()> {
        self.add_geometry(GeometryPrimitive::new(
            s,
            x,
            y,
            hdg,
            length,
            GeometryKind::Poly3 { a, b, c, d },
        )?);
        Ok(())
    }

    /// `kind` must be [`GeometryKind::ParamPoly3`]; other shapes are accepted
    /// as-is.
    pub fn add_geometry_param_poly(
        &mut self,
        s: f64,
        x: f64,
        y: f64,
        hdg: f64,
        length: f64,
        kind: GeometryKind,
    ) -> Result<()> {
        self.add_geometry(GeometryPrimitive::new(s, x, y, hdg, length, kind)?);
        Ok(())
    }

    /// Appends a primitive starting at the current end pose of the road.
    pub fn append_geometry(&mut self, kind: GeometryKind, length: f64) -> Result<()> {
        let start = self
            .reference_line
            .end_pose()
            .unwrap_or_else(|| PosTheta::new(0.0, 0.0, 0.0));
        let s = self.reference_line.end_s();
        self.add_geometry(GeometryPrimitive::new(
            s, start.x, start.y, start.hdg, length, kind,
        )?);
        Ok(())
    }

    pub fn remove_last_geometry(&mut self) -> Option<GeometryPrimitive> {
        let removed = self.reference_line.remove_last();
        self.update_length();
        removed
    }

    pub fn clear_geometries(&mut self) {
        self.reference_line.clear();
        self.update_length();
    }

    /// Re-derives the road length from its geometry and the lane section
    /// lengths from the new road length.
    pub fn update_length(&mut self) {
        self.length = self.reference_line.length();
        self.compute_lane_section_lengths();
    }

    /// Checks that primitives chain without gaps from `s = 0` to the road
    /// length.
    pub fn is_continuous(&self) -> bool {
        let geometries = self.reference_line.geometries();
        let Some(first) = geometries.first() else {
            return self.length.abs() < CONTINUITY_EPSILON;
        };
        let Some(last) = geometries.last() else {
            return false;
        };
        first.s().abs() < CONTINUITY_EPSILON
            && self.reference_line.gaps().is_empty()
            && (last.s2() - self.length).abs() < CONTINUITY_EPSILON
    }

    // ---- lane sections --------------------------------------------------

    pub fn lane_sections(&self) -> &[LaneSection] {
        &self.lane_sections
    }

    pub fn lane_section(&self, index: usize) -> Option<&LaneSection> {
        self.lane_sections.get(index)
    }

    pub fn lane_section_mut(&mut self, index: usize) -> Option<&mut LaneSection> {
        self.lane_sections.get_mut(index)
    }

    /// Adds an empty lane section starting at `s` and returns it.
    pub fn add_lane_section(&mut self, s: f64, single_side: bool) -> Result<&mut LaneSection> {
        let section = LaneSection::new(0, self.id, s, single_side);
        self.insert_lane_section(section)
    }

    /// Adds a prepared lane section, re-keying it to this road.
    ///
    /// The section must start in `[0, length)`. A road without geometry yet
    /// only accepts `s = 0`.
    pub fn insert_lane_section(&mut self, mut section: LaneSection) -> Result<&mut LaneSection> {
        let s = section.s;
        let in_range = if self.reference_line.is_empty() {
            s == 0.0
        } else {
            s >= 0.0 && s < self.length
        };
        if !in_range {
            return Err(OdrError::LaneSectionOutOfRange {
                s,
                length: self.length,
                road: self.id,
            });
        }
        section.road_id = self.id;
        let idx = self
            .lane_sections
            .iter()
            .position(|ls| ls.s > s)
            .unwrap_or(self.lane_sections.len());
        self.lane_sections.insert(idx, section);
        for (i, ls) in self.lane_sections.iter_mut().enumerate() {
            ls.id = i;
        }
        self.compute_lane_section_lengths();
        Ok(&mut self.lane_sections[idx])
    }

    pub fn remove_lane_section(&mut self, index: usize) -> Option<LaneSection> {
        if index >= self.lane_sections.len() {
            return None;
        }
        let removed = self.lane_sections.remove(index);
        for (i, ls) in self.lane_sections.iter_mut().enumerate() {
            ls.id = i;
        }
        self.compute_lane_section_lengths();
        Some(removed)
    }

    fn compute_lane_section_lengths(&mut self) {
        let road_length = self.length;
        let starts: Vec<f64> = self.lane_sections.iter().map(|ls| ls.s).collect();
        for (i, section) in self.lane_sections.iter_mut().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(road_length);
            section.length = end - section.s;
        }
    }

    /// Index of the lane section covering `s`: the last one starting at or
    /// before it, or the first one for `s` before every section.
    pub fn lane_section_index_at(&self, s: f64) -> Option<usize> {
        if self.lane_sections.is_empty() {
            return None;
        }
        let idx = self
            .lane_sections
            .iter()
            .rposition(|ls| ls.s <= s + SECTION_EPSILON)
            .unwrap_or(0);
        Some(idx)
    }

    pub fn lane_section_at(&self, s: f64) -> Result<&LaneSection> {
        self.lane_section_index_at(s)
            .map(|i| &self.lane_sections[i])
            .ok_or(OdrError::LaneSectionNotFound { s, road: self.id })
    }

    pub fn lane_section_length(&self, index: usize) -> Option<f64> {
        self.lane_sections.get(index).map(|ls| ls.length)
    }

    // ---- polynomials ----------------------------------------------------

    pub fn add_lane_offset(&mut self, record: CubicPoly) {
        insert_sorted(&mut self.lane_offsets, record);
    }

    pub fn lane_offsets(&self) -> &[CubicPoly] {
        &self.lane_offsets
    }

    pub fn clear_lane_offsets(&mut self) {
        self.lane_offsets.clear();
    }

    pub fn lane_offset_value(&self, s: f64) -> f64 {
        poly_value_at(&self.lane_offsets, s)
    }

    pub fn add_elevation(&mut self, record: CubicPoly) {
        insert_sorted(&mut self.elevations, record);
    }

    pub fn elevations(&self) -> &[CubicPoly] {
        &self.elevations
    }

    pub fn elevation_at(&self, s: f64) -> f64 {
        poly_value_at(&self.elevations, s)
    }

    pub fn add_superelevation(&mut self, record: CubicPoly) {
        insert_sorted(&mut self.superelevations, record);
    }

    pub fn superelevations(&self) -> &[CubicPoly] {
        &self.superelevations
    }

    /// Roll angle of the cross section at `s`, in radians.
    pub fn superelevation_at(&self, s: f64) -> f64 {
        poly_value_at(&self.superelevations, s)
    }

    // ---- links ----------------------------------------------------------

    pub fn predecessor(&self) -> Option<&RoadLink> {
        self.predecessor.as_ref()
    }

    pub fn successor(&self) -> Option<&RoadLink> {
        self.successor.as_ref()
    }

    pub fn set_predecessor(&mut self, link: Option<RoadLink>) {
        self.predecessor = link;
    }

    pub fn set_successor(&mut self, link: Option<RoadLink>) {
        self.successor = link;
    }

    // ---- coordinate pipeline ----------------------------------------------

    /// Reference line pose at `s` with elevation applied and no lateral
    /// shift.
    pub fn reference_pose_at(&self, s: f64) -> Result<PosTheta> {
        if s < -CONTINUITY_EPSILON || s > self.length + CONTINUITY_EPSILON {
            warn!(
                "s={} is outside road {} (length {})",
                s, self.id, self.length
            );
        }
        // floating point drift during edits can overshoot the ends
        let lookup = s.clamp(0.0, self.length);
        let geometry = self
            .reference_line
            .geometry_at(lookup)
            .ok_or(OdrError::GeometryNotFoundAt { s, road: self.id })?;
        let mut pose = geometry.evaluate(s);
        pose.z = self.elevation_at(s);
        Ok(pose)
    }

    /// World pose at road coordinates `(s, t)`, lane offset included.
    pub fn get_road_coord_at(&self, s: f64, t: f64) -> Result<PosTheta> {
        let mut pose = self.reference_pose_at(s)?;
        let lane_offset = self.lane_offset_value(s);
        pose.add_lateral_offset(lane_offset);
        pose.add_lateral_offset(t);
        pose.t = t;
        Ok(pose)
    }

    pub fn start_pose(&self) -> Result<PosTheta> {
        self.reference_pose_at(0.0)
    }

    pub fn end_pose(&self) -> Result<PosTheta> {
        self.reference_pose_at(self.length)
    }

    fn lane_position(&self, lane_id: i32, s: f64, offset: f64, fraction: f64) -> Result<PosTheta> {
        let section = self.lane_section_at(s)?;
        let width = match fraction {
            f if f <= 0.0 => section.width_upto_start(lane_id, s)?,
            f if f >= 1.0 => section.width_upto_end(lane_id, s)?,
            _ => section.width_upto_center(lane_id, s)?,
        };
        let sign = match LaneSide::of(lane_id) {
            LaneSide::Right => -1.0,
            _ => 1.0,
        };
        let t = (width + offset) * sign;
        let mut pose = self.reference_pose_at(s)?;
        pose.add_lateral_offset(t);
        pose.t = t;
        Ok(pose)
    }

    /// Pose on the inner edge of `lane_id`, pushed `offset` further outward.
    pub fn get_lane_start_position(&self, lane_id: i32, s: f64, offset: f64) -> Result<PosTheta> {
        self.lane_position(lane_id, s, offset, 0.0)
    }

    pub fn get_lane_center_position(&self, lane_id: i32, s: f64, offset: f64) -> Result<PosTheta> {
        self.lane_position(lane_id, s, offset, 0.5)
    }

    pub fn get_lane_end_position(&self, lane_id: i32, s: f64, offset: f64) -> Result<PosTheta> {
        self.lane_position(lane_id, s, offset, 1.0)
    }
}
