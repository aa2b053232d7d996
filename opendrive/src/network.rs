//! Arena of roads and junctions keyed by id.

use std::collections::BTreeMap;

use log::debug;

use crate::error::{OdrError, Result};
use crate::junction::Junction;
use crate::link::{next_free_id, ElementType, JunctionId, RoadId, RoadLink};
use crate::road::Road;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Header {
    pub rev_major: u32,
    pub rev_minor: u32,
    pub name: String,
    pub version: String,
    pub date: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            rev_major: 1,
            rev_minor: 4,
            name: String::new(),
            version: "1.00".to_string(),
            date: String::new(),
        }
    }
}

/// Element counts of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetworkStats {
    pub roads: usize,
    pub geometries: usize,
    pub lane_sections: usize,
    pub lanes: usize,
    pub junctions: usize,
    pub connections: usize,
}

/// The road network every query and editing operation works on.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoadNetwork {
    pub header: Header,
    roads: BTreeMap<RoadId, Road>,
    junctions: BTreeMap<JunctionId, Junction>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_road_id(&self) -> RoadId {
        next_free_id(&self.roads, 1)
    }

    pub fn next_junction_id(&self) -> JunctionId {
        next_free_id(&self.junctions, 1)
    }

    /// Adds `road` under its own id, or under a fresh id when that one is taken.
    pub fn add_road(&mut self, mut road: Road) -> RoadId {
        if self.roads.contains_key(&road.id()) {
            let id = self.next_road_id();
            debug!("road id {} already in use, re-keyed to {}", road.id(), id);
            road.set_id(id);
        }
        let id = road.id();
        self.roads.insert(id, road);
        id
    }

    pub fn create_road(&mut self, name: impl Into<String>) -> &mut Road {
        let id = self.next_road_id();
        self.roads.entry(id).or_insert_with(|| Road::new(id, name))
    }

    /// Removes a road together with the junction connections that use it and
    /// their connecting roads. Links on other roads pointing at it are cleared.
    pub fn remove_road(&mut self, id: RoadId) -> Option<Road> {
        let road = self.roads.remove(&id)?;
        let mut orphaned = Vec::new();
        for junction in self.junctions.values_mut() {
            for cid in junction.connections_touching(id) {
                if let Some(conn) = junction.remove_connection(cid) {
                    if conn.connecting_road_id != id {
                        orphaned.push(conn.connecting_road_id);
                    }
                }
            }
        }
        for rid in orphaned {
            self.roads.remove(&rid);
        }
        self.clear_links_to(ElementType::Road, id);
        Some(road)
    }

    pub fn road(&self, id: RoadId) -> Option<&Road> {
        self.roads.get(&id)
    }

    pub fn road_mut(&mut self, id: RoadId) -> Option<&mut Road> {
        self.roads.get_mut(&id)
    }

    pub fn get_road(&self, id: RoadId) -> Result<&Road> {
        self.roads.get(&id).ok_or(OdrError::RoadNotFound(id))
    }

    pub fn get_road_mut(&mut self, id: RoadId) -> Result<&mut Road> {
        self.roads.get_mut(&id).ok_or(OdrError::RoadNotFound(id))
    }

    /// Roads in ascending id order.
    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.roads.values()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    /// Adds `junction` under its own id, or under a fresh id when that one is taken.
    pub fn add_junction_instance(&mut self, mut junction: Junction) -> JunctionId {
        if self.junctions.contains_key(&junction.id) {
            junction.id = self.next_junction_id();
        }
        let id = junction.id;
        self.junctions.insert(id, junction);
        id
    }

    pub fn create_junction(&mut self, name: impl Into<String>) -> &mut Junction {
        let id = self.next_junction_id();
        self.junctions
            .entry(id)
            .or_insert_with(|| Junction::new(id, name))
    }

    /// Removes a junction and every connecting road it owns.
    pub fn remove_junction(&mut self, id: JunctionId) -> Option<Junction> {
        let junction = self.junctions.remove(&id)?;
        for rid in junction.connecting_roads() {
            self.roads.remove(&rid);
        }
        self.roads.retain(|_, r| r.junction != Some(id));
        self.clear_links_to(ElementType::Junction, id);
        Some(junction)
    }

    pub fn junction(&self, id: JunctionId) -> Option<&Junction> {
        self.junctions.get(&id)
    }

    pub fn junction_mut(&mut self, id: JunctionId) -> Option<&mut Junction> {
        self.junctions.get_mut(&id)
    }

    pub fn get_junction(&self, id: JunctionId) -> Result<&Junction> {
        self.junctions.get(&id).ok_or(OdrError::JunctionNotFound(id))
    }

    pub fn get_junction_mut(&mut self, id: JunctionId) -> Result<&mut Junction> {
        self.junctions
            .get_mut(&id)
            .ok_or(OdrError::JunctionNotFound(id))
    }

    pub fn junctions(&self) -> impl Iterator<Item = &Junction> {
        self.junctions.values()
    }

    fn clear_links_to(&mut self, element_type: ElementType, id: u32) {
        let points_at = |link: Option<&RoadLink>| {
            link.map_or(false, |l| l.element_type == element_type && l.element_id == id)
        };
        for road in self.roads.values_mut() {
            if points_at(road.predecessor()) {
                road.set_predecessor(None);
            }
            if points_at(road.successor()) {
                road.set_successor(None);
            }
        }
    }

    pub fn stats(&self) -> NetworkStats {
        let mut stats = NetworkStats {
            roads: self.roads.len(),
            junctions: self.junctions.len(),
            ..Default::default()
        };
        for road in self.roads.values() {
            stats.geometries += road.geometry_block().len();
            stats.lane_sections += road.lane_sections().len();
            stats.lanes += road
                .lane_sections()
                .iter()
                .map(|ls| ls.lane_count())
                .sum::<usize>();
        }
        stats.connections = self
            .junctions
            .values()
            .map(|j| j.connection_count())
            .sum();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::junction::Connection;
    use crate::link::ContactPoint;

    #[test]
    fn ids_are_allocated_in_order() {
        let mut net = RoadNetwork::new();
        let a = net.create_road("a").id();
        let b = net.create_road("b").id();
        assert_eq!((a, b), (1, 2));
        let clash = net.add_road(Road::new(1, "c"));
        assert_eq!(clash, 3);
        assert_eq!(net.road(3).unwrap().name, "c");
    }

    #[test]
    fn ids_past_the_maximum_reuse_free_slots() {
        let mut net = RoadNetwork::new();
        net.add_road(Road::new(u32::MAX, "last"));
        net.add_road(Road::new(1, "first"));
        let id = net.create_road("x").id();
        assert_eq!(id, 2);
        assert_eq!(net.road(u32::MAX).unwrap().name, "last");
        assert_eq!(net.road_count(), 3);

        net.add_junction_instance(Junction::new(u32::MAX, "j"));
        assert_eq!(net.next_junction_id(), 1);
    }

    #[test]
    fn removing_a_road_drops_its_connections() {
        let mut net = RoadNetwork::new();
        let incoming = net.create_road("in").id();
        let outgoing = net.create_road("out").id();
        let connecting = net.create_road("conn").id();
        net.road_mut(incoming)
            .unwrap()
            .set_successor(Some(RoadLink::road(outgoing, ContactPoint::Start)));
        let jid = net.create_junction("j").id;
        net.road_mut(connecting).unwrap().junction = Some(jid);
        let mut conn = Connection::new(0, incoming, connecting, ContactPoint::Start);
        conn.outgoing_road_id = Some(outgoing);
        net.junction_mut(jid).unwrap().add_connection(conn);

        net.remove_road(outgoing).unwrap();
        assert!(net.road(connecting).is_none());
        assert_eq!(net.junction(jid).unwrap().connection_count(), 0);
        assert!(net.road(incoming).unwrap().successor().is_none());
    }

    #[test]
    fn removing_a_junction_drops_connecting_roads() {
        let mut net = RoadNetwork::new();
        let incoming = net.create_road("in").id();
        let jid = net.create_junction("j").id;
        let connecting = net.create_road("conn").id();
        net.road_mut(connecting).unwrap().junction = Some(jid);
        net.road_mut(incoming)
            .unwrap()
            .set_successor(Some(RoadLink::junction(jid)));
        net.remove_junction(jid).unwrap();
        assert!(net.road(connecting).is_none());
        assert!(net.road(incoming).unwrap().successor().is_none());
        assert!(matches!(net.get_junction(jid), Err(OdrError::JunctionNotFound(_))));
    }
}
