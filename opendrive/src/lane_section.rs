//! Lane sections and cumulative lane width accounting.

use std::collections::BTreeMap;

use crate::error::{OdrError, Result};
use crate::lane::{Lane, LaneSide, LaneType};
use crate::link::RoadId;

/// Longitudinal span of a road with a fixed set of lanes.
///
/// Left lanes carry ids `1, 2, 3, ...` from the center outward, right lanes
/// `-1, -2, -3, ...`, and lane `0` is the center lane.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LaneSection {
    /// Index of the section inside its road.
    pub id: usize,
    /// Owning road, for lookups only.
    pub road_id: RoadId,
    pub s: f64,
    /// Derived from the next section start (or the road length).
    pub length: f64,
    pub single_side: bool,
    lanes: BTreeMap<i32, Lane>,
}

impl LaneSection {
    pub fn new(id: usize, road_id: RoadId, s: f64, single_side: bool) -> Self {
        Self {
            id,
            road_id,
            s,
            length: 0.0,
            single_side,
            lanes: BTreeMap::new(),
        }
    }

    pub fn end_s(&self) -> f64 {
        self.s + self.length
    }

    pub fn add_lane(&mut self, id: i32, lane_type: LaneType) -> Result<&mut Lane> {
        self.insert_lane(Lane::new(id, lane_type))
    }

    pub fn insert_lane(&mut self, lane: Lane) -> Result<&mut Lane> {
        let id = lane.id;
        if self.lanes.contains_key(&id) {
            return Err(OdrError::DuplicateLane(id));
        }
        Ok(self.lanes.entry(id).or_insert(lane))
    }

    /// Adds a lane just outside the current outermost lane of `side`.
    pub fn add_lane_on_side(&mut self, side: LaneSide, lane_type: LaneType) -> Result<&mut Lane> {
        let id = match side {
            LaneSide::Left => self.leftmost_id().max(0) + 1,
            LaneSide::Right => self.rightmost_id().min(0) - 1,
            LaneSide::Center => 0,
        };
        self.add_lane(id, lane_type)
    }

    /// Removes a lane and shifts the lanes outside it one step inward so ids
    /// stay contiguous.
    pub fn remove_lane(&mut self, id: i32) -> Option<Lane> {
        let removed = self.lanes.remove(&id)?;
        if id == 0 {
            return Some(removed);
        }
        let side = LaneSide::of(id);
        let outer: Vec<i32> = self
            .lanes
            .keys()
            .copied()
            .filter(|k| LaneSide::of(*k) == side && k.abs() > id.abs())
            .collect();
        let step = if side == LaneSide::Left { -1 } else { 1 };
        let mut ordered = outer;
        ordered.sort_by_key(|k| k.abs());
        for old in ordered {
            if let Some(mut lane) = self.lanes.remove(&old) {
                lane.id = old + step;
                self.lanes.insert(lane.id, lane);
            }
        }
        Some(removed)
    }

    pub fn lane(&self, id: i32) -> Option<&Lane> {
        self.lanes.get(&id)
    }

    pub fn lane_mut(&mut self, id: i32) -> Option<&mut Lane> {
        self.lanes.get_mut(&id)
    }

    /// Like [`LaneSection::lane`] but a miss is a structural error.
    pub fn get_lane(&self, id: i32) -> Result<&Lane> {
        self.lanes.get(&id).ok_or(OdrError::LaneNotFound {
            lane: id,
            section: self.id,
            road: self.road_id,
        })
    }

    /// All lanes in ascending id order.
    pub fn lanes(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.values()
    }

    pub fn lanes_mut(&mut self) -> impl Iterator<Item = &mut Lane> {
        self.lanes.values_mut()
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn center_lane(&self) -> Option<&Lane> {
        self.lanes.get(&0)
    }

    /// Left lanes from the center outward (`1, 2, 3, ...`).
    pub fn left_lanes(&self) -> Vec<&Lane> {
        self.lanes.range(1..).map(|(_, l)| l).collect()
    }

    /// Right lanes from the center outward (`-1, -2, -3, ...`).
    pub fn right_lanes(&self) -> Vec<&Lane> {
        self.lanes.range(..0).rev().map(|(_, l)| l).collect()
    }

    /// Lanes of `side` from the center outward.
    pub fn lanes_on_side(&self, side: LaneSide) -> Vec<&Lane> {
        match side {
            LaneSide::Left => self.left_lanes(),
            LaneSide::Right => self.right_lanes(),
            LaneSide::Center => self.center_lane().into_iter().collect(),
        }
    }

    /// Highest lane id, `0` when there are no left lanes.
    pub fn leftmost_id(&self) -> i32 {
        self.lanes.keys().next_back().copied().unwrap_or(0).max(0)
    }

    /// Lowest lane id, `0` when there are no right lanes.
    pub fn rightmost_id(&self) -> i32 {
        self.lanes.keys().next().copied().unwrap_or(0).min(0)
    }

    fn cumulative_width(&self, id: i32, s: f64, own_fraction: f64) -> Result<f64> {
        let lane = self.get_lane(id)?;
        let ds = s - self.s;
        let inner: f64 = match lane.side() {
            LaneSide::Left => (1..id)
                .filter_map(|i| self.lanes.get(&i))
                .map(|l| l.width_at(ds))
                .sum(),
            LaneSide::Right => (id + 1..0)
                .filter_map(|i| self.lanes.get(&i))
                .map(|l| l.width_at(ds))
                .sum(),
            LaneSide::Center => 0.0,
        };
        Ok(inner + own_fraction * lane.width_at(ds))
    }

    /// Distance from the reference line to the inner edge of lane `id` at road `s`.
    pub fn width_upto_start(&self, id: i32, s: f64) -> Result<f64> {
        self.cumulative_width(id, s, 0.0)
    }

    /// Distance from the reference line to the center of lane `id` at road `s`.
    pub fn width_upto_center(&self, id: i32, s: f64) -> Result<f64> {
        self.cumulative_width(id, s, 0.5)
    }

    /// Distance from the reference line to the outer edge of lane `id` at road `s`.
    pub fn width_upto_end(&self, id: i32, s: f64) -> Result<f64> {
        self.cumulative_width(id, s, 1.0)
    }

    /// Total width of all lanes on `side` at road `s`.
    pub fn carriageway_width(&self, side: LaneSide, s: f64) -> f64 {
        let ds = s - self.s;
        self.lanes_on_side(side)
            .iter()
            .map(|l| l.width_at(ds))
            .sum()
    }

    /// Lane covering lateral offset `t` at road `s`. `|t| <= center_epsilon`
    /// resolves to the center lane; offsets beyond the outermost lane miss.
    pub fn lane_at_t(&self, s: f64, t: f64, center_epsilon: f64) -> Option<&Lane> {
        if t.abs() <= center_epsilon {
            return self.center_lane();
        }
        let side = if t > 0.0 {
            LaneSide::Left
        } else {
            LaneSide::Right
        };
        let ds = s - self.s;
        let mut total = 0.0;
        for lane in self.lanes_on_side(side) {
            total += lane.width_at(ds);
            if total > t.abs() {
                return Some(lane);
            }
        }
        None
    }

    /// Copy of this section with every road mark removed.
    pub fn clone_without_road_marks(&self) -> LaneSection {
        let mut copy = self.clone();
        for lane in copy.lanes.values_mut() {
            lane.clear_road_marks();
        }
        copy
    }
}
