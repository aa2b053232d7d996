//! Transient positions passed between the road, junction and query layers.

use crate::link::{ContactPoint, RoadId};

/// Located position on a road reference line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadCoord {
    pub road_id: RoadId,
    pub s: f64,
    pub t: f64,
}

impl RoadCoord {
    pub fn new(road_id: RoadId, s: f64, t: f64) -> Self {
        Self { road_id, s, t }
    }

    /// Which end of a road of `length` this coordinate touches, if it lies
    /// within `epsilon` of either.
    pub fn contact_point(&self, length: f64, epsilon: f64) -> Option<ContactPoint> {
        if self.s.abs() <= epsilon {
            Some(ContactPoint::Start)
        } else if (length - self.s).abs() <= epsilon {
            Some(ContactPoint::End)
        } else {
            None
        }
    }
}

/// Located position resolved down to a lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneCoord {
    pub road_id: RoadId,
    pub s: f64,
    pub t: f64,
    /// Index of the lane section inside the road.
    pub section: usize,
    pub lane_id: i32,
}

impl LaneCoord {
    pub fn road_coord(&self) -> RoadCoord {
        RoadCoord::new(self.road_id, self.s, self.t)
    }
}
