//! Junctions and the connections registered inside them.

use std::collections::{BTreeMap, BTreeSet};

use crate::link::{next_free_id, ConnectionId, ContactPoint, JunctionId, RoadId};

/// `from` is a lane on the incoming road, `to` a lane on the connecting road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct LaneLink {
    pub from: i32,
    pub to: i32,
}

impl LaneLink {
    pub fn new(from: i32, to: i32) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub incoming_road_id: RoadId,
    /// Road owned by the junction that carries the traffic.
    pub connecting_road_id: RoadId,
    /// Road the connecting road leads to, when known.
    pub outgoing_road_id: Option<RoadId>,
    pub contact_point: ContactPoint,
    lane_links: Vec<LaneLink>,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        incoming_road_id: RoadId,
        connecting_road_id: RoadId,
        contact_point: ContactPoint,
    ) -> Self {
        Self {
            id,
            incoming_road_id,
            connecting_road_id,
            outgoing_road_id: None,
            contact_point,
            lane_links: Vec::new(),
        }
    }

    pub fn add_lane_link(&mut self, from: i32, to: i32) {
        let link = LaneLink::new(from, to);
        if !self.lane_links.contains(&link) {
            self.lane_links.push(link);
        }
    }

    pub fn lane_links(&self) -> &[LaneLink] {
        &self.lane_links
    }

    pub fn lane_link_signature(&self) -> BTreeSet<LaneLink> {
        self.lane_links.iter().copied().collect()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Junction {
    pub id: JunctionId,
    pub name: String,
    connections: BTreeMap<ConnectionId, Connection>,
}

impl Junction {
    pub fn new(id: JunctionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            connections: BTreeMap::new(),
        }
    }

    pub fn next_connection_id(&self) -> ConnectionId {
        next_free_id(&self.connections, 0)
    }

    /// Registers `connection`, replacing any connection with the same id.
    pub fn add_connection(&mut self, connection: Connection) -> ConnectionId {
        let id = connection.id;
        self.connections.insert(id, connection);
        id
    }

    pub fn remove_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        self.connections.remove(&id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn connection_mut(&mut self, id: ConnectionId) -> Option<&mut Connection> {
        self.connections.get_mut(&id)
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn connections_from(&self, road: RoadId) -> impl Iterator<Item = &Connection> {
        self.connections
            .values()
            .filter(move |c| c.incoming_road_id == road)
    }

    /// Connections that use `road` as incoming, outgoing or connecting road.
    pub fn connections_touching(&self, road: RoadId) -> Vec<ConnectionId> {
        self.connections
            .values()
            .filter(|c| {
                c.incoming_road_id == road
                    || c.connecting_road_id == road
                    || c.outgoing_road_id == Some(road)
            })
            .map(|c| c.id)
            .collect()
    }

    /// Ids of every connecting road owned by this junction.
    pub fn connecting_roads(&self) -> BTreeSet<RoadId> {
        self.connections
            .values()
            .map(|c| c.connecting_road_id)
            .collect()
    }
}
