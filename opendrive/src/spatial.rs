//! Maps world points to road and lane coordinates.

use log::trace;

use crate::config::QueryConfig;
use crate::coord::LaneCoord;
use crate::error::Result;
use crate::geometry::NearestPoint;
use crate::link::RoadId;
use crate::network::RoadNetwork;

/// Closest point of the closest road to `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadHit {
    pub road_id: RoadId,
    pub nearest: NearestPoint,
}

/// Scans every primitive of every road and keeps the global minimum. Ties
/// go to the road with the lower id. `None` for a network without geometry.
pub fn nearest_road(net: &RoadNetwork, x: f64, y: f64, config: &QueryConfig) -> Result<Option<RoadHit>> {
    let mut best: Option<RoadHit> = None;
    for road in net.roads() {
        if road.reference_line().is_empty() {
            continue;
        }
        let (nearest, _) = road
            .reference_line()
            .nearest_point_from(x, y, config.sample_step)?;
        if best.map_or(true, |b| nearest.distance < b.nearest.distance) {
            best = Some(RoadHit {
                road_id: road.id(),
                nearest,
            });
        }
    }
    if let Some(hit) = &best {
        trace!(
            "nearest road to ({x}, {y}) is {} at s={} t={}",
            hit.road_id,
            hit.nearest.pose.s,
            hit.nearest.pose.t
        );
    }
    Ok(best)
}

/// Resolves `(x, y)` to a lane of the nearest road. Points beyond the
/// outermost lane resolve to `None`.
pub fn nearest_lane(net: &RoadNetwork, x: f64, y: f64, config: &QueryConfig) -> Result<Option<LaneCoord>> {
    let Some(hit) = nearest_road(net, x, y, config)? else {
        return Ok(None);
    };
    let road = net.get_road(hit.road_id)?;
    let (s, t) = (hit.nearest.pose.s, hit.nearest.pose.t);
    let Some(section_index) = road.lane_section_index_at(s) else {
        return Ok(None);
    };
    let section = road.lane_section_at(s)?;
    Ok(section
        .lane_at_t(s, t, config.center_epsilon)
        .map(|lane| LaneCoord {
            road_id: hit.road_id,
            s,
            t,
            section: section_index,
            lane_id: lane.id,
        }))
}
