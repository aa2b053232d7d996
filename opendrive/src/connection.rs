//! Synthesizes connecting roads inside a junction.
//!
//! Given the end of an incoming road and the end of an outgoing road, lanes
//! flowing into the junction are paired with lanes flowing out of it. Every
//! accepted pair gets a connecting road owned by the junction, with a spline
//! reference line and one right lane easing between the two lane widths.
//! Traffic is right-hand: right lanes travel along `+s`, left lanes against it.

use std::collections::BTreeSet;
use std::f64::consts::PI;

use log::{debug, warn};

use crate::config::SynthesisConfig;
use crate::coord::RoadCoord;
use crate::error::Result;
use crate::geometry::{normalize_angle, GeometryPrimitive, PosTheta};
use crate::junction::{Connection, LaneLink};
use crate::lane::{Lane, LaneSide, LaneType};
use crate::lane_section::LaneSection;
use crate::link::{ConnectionId, ContactPoint, JunctionId, RoadId, RoadLink};
use crate::network::RoadNetwork;
use crate::polynomial::CubicPoly;
use crate::road::Road;

/// Lane id of the single lane on a synthesized connecting road.
pub const CONNECTING_LANE_ID: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TurnType {
    Straight,
    Left,
    Right,
}

impl TurnType {
    /// Classifies the turn from the travel heading entering the junction to
    /// the travel heading leaving it. Counter-clockwise changes are left turns.
    /// Lane-id sign and contact point only tell which lanes travel into and
    /// out of the junction, not which way the outgoing road bends, so the
    /// heading change decides.
    pub fn classify(heading_in: f64, heading_out: f64, straight_threshold: f64) -> Self {
        let delta = normalize_angle(heading_out - heading_in);
        if delta.abs() < straight_threshold {
            TurnType::Straight
        } else if delta > 0.0 {
            TurnType::Left
        } else {
            TurnType::Right
        }
    }
}

/// Which lanes take part in [`add_connections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum SynthesisMode {
    /// Driving lanes only; each lane joins at most one connection.
    #[default]
    Driving,
    /// Lanes of any type; lanes may join several connections.
    Corner,
}

/// One end of a road touching the junction, resolved to its lane section.
struct RoadEnd<'a> {
    road: &'a Road,
    s: f64,
    contact: ContactPoint,
    section: &'a LaneSection,
}

impl<'a> RoadEnd<'a> {
    fn resolve(net: &'a RoadNetwork, coord: RoadCoord, config: &SynthesisConfig) -> Result<Option<Self>> {
        let road = net.get_road(coord.road_id)?;
        let Some(contact) = coord.contact_point(road.length(), config.boundary_epsilon) else {
            warn!(
                "s={} is not an end of road {} (length {})",
                coord.s,
                coord.road_id,
                road.length()
            );
            return Ok(None);
        };
        let s = match contact {
            ContactPoint::Start => 0.0,
            ContactPoint::End => road.length(),
        };
        let section = road.lane_section_at(s)?;
        Ok(Some(Self {
            road,
            s,
            contact,
            section,
        }))
    }

    fn ds(&self) -> f64 {
        self.s - self.section.s
    }

    /// Side whose lanes flow into the junction at this end.
    fn incoming_side(&self) -> LaneSide {
        match self.contact {
            ContactPoint::End => LaneSide::Right,
            ContactPoint::Start => LaneSide::Left,
        }
    }

    /// Side whose lanes flow out of the junction at this end.
    fn outgoing_side(&self) -> LaneSide {
        self.incoming_side().opposite()
    }

    /// Heading of traffic in a lane of `side` at this end.
    fn travel_heading(&self, side: LaneSide) -> Result<f64> {
        let pose = self.road.reference_pose_at(self.s)?;
        Ok(match side {
            LaneSide::Left => normalize_angle(pose.hdg + PI),
            _ => pose.hdg,
        })
    }

    /// Inner edge of `lane_id`, heading along its direction of travel.
    fn lane_entry_pose(&self, lane_id: i32) -> Result<PosTheta> {
        let mut pose = self.road.get_lane_start_position(lane_id, self.s, 0.0)?;
        if LaneSide::of(lane_id) == LaneSide::Left {
            pose.hdg = normalize_angle(pose.hdg + PI);
        }
        Ok(pose)
    }

    /// Center lane position (lane offset included), heading along the
    /// travel direction of `side`.
    fn center_pose(&self, side: LaneSide) -> Result<PosTheta> {
        let mut pose = self.road.get_road_coord_at(self.s, 0.0)?;
        if side == LaneSide::Left {
            pose.hdg = normalize_angle(pose.hdg + PI);
        }
        Ok(pose)
    }
}

/// Lane ids and types of `side`, center outward.
fn lanes_of(section: &LaneSection, side: LaneSide) -> Vec<(i32, LaneType)> {
    section
        .lanes_on_side(side)
        .iter()
        .map(|l| (l.id, l.lane_type))
        .collect()
}

/// Rejects pairings that would skip across lanes of the same type.
fn passes_boundary(
    turn: TurnType,
    incoming: &[(i32, LaneType)],
    outgoing: &[(i32, LaneType)],
    in_lane: (i32, LaneType),
    out_lane: (i32, LaneType),
) -> bool {
    let rank = |lanes: &[(i32, LaneType)], lane: (i32, LaneType)| {
        let same: Vec<i32> = lanes
            .iter()
            .filter(|(_, t)| *t == lane.1)
            .map(|(id, _)| *id)
            .collect();
        let pos = same.iter().position(|id| *id == lane.0);
        (pos, same.len())
    };
    let (Some(k_in), n_in) = rank(incoming, in_lane) else {
        return false;
    };
    let (Some(k_out), n_out) = rank(outgoing, out_lane) else {
        return false;
    };
    match turn {
        TurnType::Straight => k_in == k_out,
        TurnType::Right => k_in + 1 == n_in && k_out + 1 == n_out,
        TurnType::Left => k_in == 0 && k_out == 0,
    }
}

/// Whether `junction` already holds a connection from `incoming` to
/// `outgoing` with exactly these lane links and connecting lane successors.
fn is_duplicate(
    net: &RoadNetwork,
    junction: JunctionId,
    incoming: RoadId,
    outgoing: RoadId,
    links: &BTreeSet<LaneLink>,
    successors: &BTreeSet<(i32, i32)>,
) -> Result<bool> {
    let junction = net.get_junction(junction)?;
    Ok(junction.connections_from(incoming).any(|c| {
        c.outgoing_road_id == Some(outgoing)
            && c.contact_point == ContactPoint::Start
            && c.lane_link_signature() == *links
            && net
                .road(c.connecting_road_id)
                .and_then(|r| r.lane_sections().first())
                .map(|ls| {
                    links
                        .iter()
                        .map(|l| (l.to, ls.lane(l.to).and_then(|lane| lane.successor).unwrap_or(0)))
                        .collect::<BTreeSet<_>>()
                        == *successors
                })
                .unwrap_or(false)
    }))
}

/// Points the touched end of `road_id` at the junction if it has no link yet.
fn link_end_to_junction(net: &mut RoadNetwork, road_id: RoadId, contact: ContactPoint, junction: JunctionId) -> Result<()> {
    let road = net.get_road_mut(road_id)?;
    match contact {
        ContactPoint::Start if road.predecessor().is_none() => {
            road.set_predecessor(Some(RoadLink::junction(junction)))
        }
        ContactPoint::End if road.successor().is_none() => {
            road.set_successor(Some(RoadLink::junction(junction)))
        }
        _ => {}
    }
    Ok(())
}

/// Stores `road` in the network as a connecting road of `junction` and
/// registers the connection for it.
fn register(
    net: &mut RoadNetwork,
    junction: JunctionId,
    mut road: Road,
    incoming: (RoadId, ContactPoint),
    outgoing: (RoadId, ContactPoint),
    links: &BTreeSet<LaneLink>,
) -> Result<ConnectionId> {
    road.set_id(net.next_road_id());
    road.junction = Some(junction);
    road.set_predecessor(Some(RoadLink::road(incoming.0, incoming.1)));
    road.set_successor(Some(RoadLink::road(outgoing.0, outgoing.1)));
    let road_id = net.add_road(road);

    link_end_to_junction(net, incoming.0, incoming.1, junction)?;
    link_end_to_junction(net, outgoing.0, outgoing.1, junction)?;

    let junction = net.get_junction_mut(junction)?;
    let mut connection = Connection::new(
        junction.next_connection_id(),
        incoming.0,
        road_id,
        ContactPoint::Start,
    );
    connection.outgoing_road_id = Some(outgoing.0);
    for link in links {
        connection.add_lane_link(link.from, link.to);
    }
    let id = junction.add_connection(connection);
    debug!(
        "junction {}: connection {} via road {} ({}:{:?} -> {}:{:?})",
        junction.id,
        id,
        road_id,
        incoming.0,
        links.iter().map(|l| l.from).collect::<Vec<_>>(),
        outgoing.0,
        links.iter().map(|l| l.to).collect::<Vec<_>>()
    );
    Ok(id)
}

/// Builds the connecting road between one incoming lane and one outgoing lane.
fn connecting_road(from: &RoadEnd, in_lane: i32, to: &RoadEnd, out_lane: i32) -> Result<Road> {
    let source = from.section.get_lane(in_lane)?;
    let target = to.section.get_lane(out_lane)?;

    let start = from.lane_entry_pose(in_lane)?;
    let end = to.lane_entry_pose(out_lane)?;
    let geometry = GeometryPrimitive::spline_between(0.0, start, end)?;
    let length = geometry.length();

    let mut road = Road::new(0, format!("{}_{}_{}_{}", from.road.id(), in_lane, to.road.id(), out_lane));
    road.add_geometry(geometry);
    let section = road.add_lane_section(0.0, true)?;
    section.add_lane(0, LaneType::None)?;
    let lane = section.add_lane(CONNECTING_LANE_ID, source.lane_type)?;
    lane.add_width(CubicPoly::ease(
        0.0,
        source.width_at(from.ds()),
        length,
        target.width_at(to.ds()),
    ));
    let (inner0, outer0) = source.height_at(from.ds());
    let (inner1, outer1) = target.height_at(to.ds());
    lane.add_height_record(0.0, inner0, outer0);
    lane.add_height_record(length, inner1, outer1);
    lane.predecessor = Some(in_lane);
    lane.successor = Some(out_lane);
    Ok(road)
}

/// Connects `in_lane` at the end of one road with `out_lane` at the end of
/// another through a new connecting road. Returns `None` when the same
/// connection already exists or a coordinate is not at a road end.
pub fn create_single_connection(
    net: &mut RoadNetwork,
    junction: JunctionId,
    incoming: RoadCoord,
    in_lane: i32,
    outgoing: RoadCoord,
    out_lane: i32,
    config: &SynthesisConfig,
) -> Result<Option<ConnectionId>> {
    net.get_junction(junction)?;
    let links: BTreeSet<LaneLink> = [LaneLink::new(in_lane, CONNECTING_LANE_ID)].into();
    let (road, incoming_end, outgoing_end) = {
        let Some(from) = RoadEnd::resolve(net, incoming, config)? else {
            return Ok(None);
        };
        let Some(to) = RoadEnd::resolve(net, outgoing, config)? else {
            return Ok(None);
        };
        let successors: BTreeSet<(i32, i32)> = [(CONNECTING_LANE_ID, out_lane)].into();
        if is_duplicate(net, junction, incoming.road_id, outgoing.road_id, &links, &successors)? {
            debug!(
                "junction {}: connection {}:{} -> {}:{} already exists",
                junction, incoming.road_id, in_lane, outgoing.road_id, out_lane
            );
            return Ok(None);
        }
        (
            connecting_road(&from, in_lane, &to, out_lane)?,
            (incoming.road_id, from.contact),
            (outgoing.road_id, to.contact),
        )
    };
    register(net, junction, road, incoming_end, outgoing_end, &links).map(Some)
}

/// Pairs the lanes flowing into the junction at `incoming` with lanes of the
/// same type flowing out at `outgoing` and synthesizes a connection for each
/// accepted pair. Incoming lanes without a partner stay unconnected.
pub fn add_connections(
    net: &mut RoadNetwork,
    junction: JunctionId,
    incoming: RoadCoord,
    outgoing: RoadCoord,
    mode: SynthesisMode,
    config: &SynthesisConfig,
) -> Result<Vec<ConnectionId>> {
    net.get_junction(junction)?;
    let pairs = {
        let Some(from) = RoadEnd::resolve(net, incoming, config)? else {
            return Ok(Vec::new());
        };
        let Some(to) = RoadEnd::resolve(net, outgoing, config)? else {
            return Ok(Vec::new());
        };
        let in_side = from.incoming_side();
        let out_side = to.outgoing_side();
        let in_lanes = lanes_of(from.section, in_side);
        let out_lanes = lanes_of(to.section, out_side);
        let turn = TurnType::classify(
            from.travel_heading(in_side)?,
            to.travel_heading(out_side)?,
            config.straight_threshold,
        );
        debug!(
            "junction {}: road {} -> road {} is {:?}",
            junction, incoming.road_id, outgoing.road_id, turn
        );

        let mut processed_in = BTreeSet::new();
        let mut processed_out = BTreeSet::new();
        let mut pairs = Vec::new();
        for &in_lane in &in_lanes {
            if mode == SynthesisMode::Driving
                && (in_lane.1 != LaneType::Driving || processed_in.contains(&in_lane.0))
            {
                continue;
            }
            let candidate = out_lanes.iter().copied().find(|out_lane| {
                out_lane.1 == in_lane.1
                    && !(mode == SynthesisMode::Driving && processed_out.contains(&out_lane.0))
                    && passes_boundary(turn, &in_lanes, &out_lanes, in_lane, *out_lane)
            });
            let Some(out_lane) = candidate else {
                debug!(
                    "junction {}: no partner for lane {} of road {}",
                    junction, in_lane.0, incoming.road_id
                );
                continue;
            };
            if mode == SynthesisMode::Driving {
                processed_in.insert(in_lane.0);
                processed_out.insert(out_lane.0);
            }
            pairs.push((in_lane.0, out_lane.0));
        }
        pairs
    };

    let mut created = Vec::new();
    for (in_lane, out_lane) in pairs {
        if let Some(id) =
            create_single_connection(net, junction, incoming, in_lane, outgoing, out_lane, config)?
        {
            created.push(id);
        }
    }
    Ok(created)
}

/// Builds a corner patch between the outer edges of two roads.
///
/// The lanes travelling toward the junction at `incoming` are copied onto
/// the connecting road (without road marks, widths frozen at the contact)
/// and a lane offset eases from zero to the difference of the two
/// carriageway widths, so the outer edge lands on the outgoing road's outer
/// edge. Only the outermost lanes are linked.
pub fn create_fake_corner(
    net: &mut RoadNetwork,
    junction: JunctionId,
    incoming: RoadCoord,
    outgoing: RoadCoord,
    config: &SynthesisConfig,
) -> Result<Option<ConnectionId>> {
    net.get_junction(junction)?;
    let (road, links, incoming_end, outgoing_end) = {
        let Some(from) = RoadEnd::resolve(net, incoming, config)? else {
            return Ok(None);
        };
        let Some(to) = RoadEnd::resolve(net, outgoing, config)? else {
            return Ok(None);
        };
        let in_side = from.incoming_side();
        let out_side = to.outgoing_side();
        let in_lanes = from.section.lanes_on_side(in_side);
        let Some(in_extreme) = in_lanes.last().map(|l| l.id) else {
            debug!("junction {}: road {} has no incoming lanes", junction, incoming.road_id);
            return Ok(None);
        };
        let Some(out_extreme) = to.section.lanes_on_side(out_side).last().map(|l| l.id) else {
            debug!("junction {}: road {} has no outgoing lanes", junction, outgoing.road_id);
            return Ok(None);
        };
        let corner_lane = -(in_lanes.len() as i32);
        let links: BTreeSet<LaneLink> = [LaneLink::new(in_extreme, corner_lane)].into();
        let successors: BTreeSet<(i32, i32)> = [(corner_lane, out_extreme)].into();
        if is_duplicate(net, junction, incoming.road_id, outgoing.road_id, &links, &successors)? {
            debug!("junction {}: corner {} -> {} already exists", junction, incoming.road_id, outgoing.road_id);
            return Ok(None);
        }

        let start = from.center_pose(in_side)?;
        let end = to.center_pose(out_side)?;
        let geometry = GeometryPrimitive::spline_between(0.0, start, end)?;
        let length = geometry.length();
        let width_in = from.section.carriageway_width(in_side, from.s);
        let width_out = to.section.carriageway_width(out_side, to.s);

        let template = from.section.clone_without_road_marks();
        let mut road = Road::new(0, format!("corner_{}_{}", incoming.road_id, outgoing.road_id));
        road.add_geometry(geometry);
        road.add_lane_offset(CubicPoly::ease(0.0, 0.0, length, width_in - width_out));
        let section = road.add_lane_section(0.0, true)?;
        let mut center = template
            .center_lane()
            .cloned()
            .unwrap_or_else(|| Lane::new(0, LaneType::None));
        center.predecessor = None;
        center.successor = None;
        section.insert_lane(center)?;
        for (k, source) in template.lanes_on_side(in_side).into_iter().enumerate() {
            let mut lane = source.clone();
            lane.id = -(k as i32 + 1);
            lane.clear_widths();
            lane.add_width_record(0.0, source.width_at(from.ds()), 0.0, 0.0, 0.0);
            let (inner, outer) = source.height_at(from.ds());
            lane.clear_heights();
            lane.add_height_record(0.0, inner, outer);
            lane.predecessor = Some(source.id);
            lane.successor = (source.id == in_extreme).then_some(out_extreme);
            section.insert_lane(lane)?;
        }
        (
            road,
            links,
            (incoming.road_id, from.contact),
            (outgoing.road_id, to.contact),
        )
    };
    register(net, junction, road, incoming_end, outgoing_end, &links).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn two_lane_road(net: &mut RoadNetwork, x: f64, y: f64, hdg: f64) -> RoadId {
        let road = net.create_road("r");
        road.add_geometry_line(0.0, x, y, hdg, 20.0).unwrap();
        let section = road.add_lane_section(0.0, false).unwrap();
        section.add_lane(0, LaneType::None).unwrap();
        for id in [1, -1] {
            section
                .add_lane(id, LaneType::Driving)
                .unwrap()
                .add_width_record(0.0, 3.5, 0.0, 0.0, 0.0);
        }
        for id in [2, -2] {
            section
                .add_lane(id, LaneType::Sidewalk)
                .unwrap()
                .add_width_record(0.0, 2.0, 0.0, 0.0, 0.0);
        }
        road.id()
    }

    #[test]
    fn classify_turns() {
        let t = FRAC_PI_2 / 3.0;
        assert_eq!(TurnType::classify(0.0, 0.1, t), TurnType::Straight);
        assert_eq!(TurnType::classify(0.0, FRAC_PI_2, t), TurnType::Left);
        assert_eq!(TurnType::classify(0.0, -FRAC_PI_2, t), TurnType::Right);
        assert_eq!(TurnType::classify(3.0, -3.0, t), TurnType::Straight);
    }

    #[test]
    fn straight_through_connects_driving_lane() {
        let mut net = RoadNetwork::new();
        let a = two_lane_road(&mut net, 0.0, 0.0, 0.0);
        let b = two_lane_road(&mut net, 30.0, 0.0, 0.0);
        let jid = net.create_junction("j").id;
        let config = SynthesisConfig::default();

        let created = add_connections(
            &mut net,
            jid,
            RoadCoord::new(a, 20.0, 0.0),
            RoadCoord::new(b, 0.0, 0.0),
            SynthesisMode::Driving,
            &config,
        )
        .unwrap();
        assert_eq!(created.len(), 1);

        let conn = net.junction(jid).unwrap().connection(created[0]).unwrap();
        assert_eq!(conn.incoming_road_id, a);
        assert_eq!(conn.outgoing_road_id, Some(b));
        assert_eq!(conn.contact_point, ContactPoint::Start);
        assert_eq!(conn.lane_links(), &[LaneLink::new(-1, -1)]);

        let road = net.road(conn.connecting_road_id).unwrap();
        assert_eq!(road.junction, Some(jid));
        assert!((road.length() - 10.0).abs() < 1e-3);
        let lane = road.lane_sections()[0].lane(-1).unwrap();
        assert_eq!(lane.predecessor, Some(-1));
        assert_eq!(lane.successor, Some(-1));
        assert!((lane.width_at(5.0) - 3.5).abs() < 1e-9);
        let start = road.get_road_coord_at(0.0, 0.0).unwrap();
        assert!(start.x.abs() > 19.9 && start.y.abs() < 1e-9);
        assert_eq!(
            net.road(a).unwrap().successor(),
            Some(&RoadLink::junction(jid))
        );
    }

    #[test]
    fn corner_mode_matches_sidewalks() {
        let mut net = RoadNetwork::new();
        let a = two_lane_road(&mut net, 0.0, 0.0, 0.0);
        let b = two_lane_road(&mut net, 30.0, 0.0, 0.0);
        let jid = net.create_junction("j").id;
        let created = add_connections(
            &mut net,
            jid,
            RoadCoord::new(a, 20.0, 0.0),
            RoadCoord::new(b, 0.0, 0.0),
            SynthesisMode::Corner,
            &SynthesisConfig::default(),
        )
        .unwrap();
        assert_eq!(created.len(), 2);
    }

    #[test]
    fn mid_road_coordinate_is_skipped() {
        let mut net = RoadNetwork::new();
        let a = two_lane_road(&mut net, 0.0, 0.0, 0.0);
        let b = two_lane_road(&mut net, 30.0, 0.0, 0.0);
        let jid = net.create_junction("j").id;
        let created = add_connections(
            &mut net,
            jid,
            RoadCoord::new(a, 10.0, 0.0),
            RoadCoord::new(b, 0.0, 0.0),
            SynthesisMode::Driving,
            &SynthesisConfig::default(),
        )
        .unwrap();
        assert!(created.is_empty());
    }

    #[test]
    fn right_turn_uses_outermost_lanes() {
        let in_lanes = [(-1, LaneType::Driving), (-2, LaneType::Driving)];
        let out_lanes = [(-1, LaneType::Driving), (-2, LaneType::Driving)];
        assert!(passes_boundary(TurnType::Right, &in_lanes, &out_lanes, in_lanes[1], out_lanes[1]));
        assert!(!passes_boundary(TurnType::Right, &in_lanes, &out_lanes, in_lanes[0], out_lanes[1]));
        assert!(passes_boundary(TurnType::Left, &in_lanes, &out_lanes, in_lanes[0], out_lanes[0]));
        assert!(!passes_boundary(TurnType::Left, &in_lanes, &out_lanes, in_lanes[1], out_lanes[0]));
        assert!(passes_boundary(TurnType::Straight, &in_lanes, &out_lanes, in_lanes[1], out_lanes[1]));
        assert!(!passes_boundary(TurnType::Straight, &in_lanes, &out_lanes, in_lanes[1], out_lanes[0]));
    }

    #[test]
    fn fake_corner_offsets_width_difference() {
        let mut net = RoadNetwork::new();
        let a = two_lane_road(&mut net, 0.0, 0.0, 0.0);
        // narrower road heading south from a point right of the end of `a`
        let b = {
            let road = net.create_road("narrow");
            road.add_geometry_line(0.0, 30.0, -10.0, -FRAC_PI_2, 20.0).unwrap();
            let section = road.add_lane_section(0.0, false).unwrap();
            section.add_lane(0, LaneType::None).unwrap();
            section
                .add_lane(-1, LaneType::Driving)
                .unwrap()
                .add_width_record(0.0, 3.0, 0.0, 0.0, 0.0);
            road.id()
        };
        let jid = net.create_junction("j").id;
        let id = create_fake_corner(
            &mut net,
            jid,
            RoadCoord::new(a, 20.0, 0.0),
            RoadCoord::new(b, 0.0, 0.0),
            &SynthesisConfig::default(),
        )
        .unwrap()
        .unwrap();

        let conn = net.junction(jid).unwrap().connection(id).unwrap();
        assert_eq!(conn.lane_links(), &[LaneLink::new(-2, -2)]);
        let road = net.road(conn.connecting_road_id).unwrap();
        let section = &road.lane_sections()[0];
        assert_eq!(section.lane_count(), 3);
        assert!(section.lanes().all(|l| l.road_marks().is_empty()));
        assert_eq!(section.lane(-2).unwrap().successor, Some(-1));
        assert_eq!(section.lane(-1).unwrap().successor, None);
        assert!(road.lane_offset_value(0.0).abs() < 1e-9);
        assert!((road.lane_offset_value(road.length()) - 2.5).abs() < 1e-6);

        let again = create_fake_corner(
            &mut net,
            jid,
            RoadCoord::new(a, 20.0, 0.0),
            RoadCoord::new(b, 0.0, 0.0),
            &SynthesisConfig::default(),
        )
        .unwrap();
        assert!(again.is_none());
    }
}
