use assert_fs::prelude::*;
use opendrive::{
    config::{QueryConfig, SynthesisConfig},
    connection::{add_connections, create_fake_corner, SynthesisMode},
    coord::RoadCoord,
    io::{read_xodr, write_xodr},
    lane::{LaneType, RoadMark},
    network::RoadNetwork,
    polynomial::CubicPoly,
    spatial::nearest_lane,
};

fn build() -> RoadNetwork {
    let mut net = RoadNetwork::new();
    net.header.name = "roundtrip".to_string();
    let mut ids = Vec::new();
    for (x, y, hdg) in [(-60.0, 0.0, 0.0), (10.0, 0.0, 0.0)] {
        let road = net.create_road("arm");
        road.add_geometry_line(0.0, x, y, hdg, 25.0).unwrap();
        road.append_geometry(opendrive::geometry::GeometryKind::Arc { curvature: 1e-4 }, 25.0)
            .unwrap();
        road.add_elevation(CubicPoly::new(0.0, 1.0, 0.0, 0.0, 0.0));
        road.add_superelevation(CubicPoly::new(0.0, 0.02, 0.0, 0.0, 0.0));
        for s in [0.0, 20.0] {
            let section = road.add_lane_section(s, false).unwrap();
            section.add_lane(0, LaneType::None)
                .unwrap()
                .add_road_mark_record(RoadMark::new(0.0, "solid"));
            for id in [1, -1] {
                let lane = section.add_lane(id, LaneType::Driving).unwrap();
                lane.add_width_record(0.0, 3.25, 0.0, 0.0, 0.0);
                lane.add_road_mark_record(RoadMark::new(0.0, "broken"));
            }
            section
                .add_lane(-2, LaneType::Sidewalk)
                .unwrap()
                .add_height_record(0.0, 0.15, 0.15);
            section.lane_mut(-2).unwrap().add_width_record(0.0, 2.0, 0.0, 0.0, 0.0);
        }
        ids.push(road.id());
    }
    let jid = net.create_junction("j").id;
    let config = SynthesisConfig::default();
    let incoming = RoadCoord::new(ids[0], 50.0, 0.0);
    let outgoing = RoadCoord::new(ids[1], 0.0, 0.0);
    add_connections(&mut net, jid, incoming, outgoing, SynthesisMode::Driving, &config).unwrap();
    create_fake_corner(&mut net, jid, incoming, outgoing, &config).unwrap();
    net
}

#[test]
fn file_round_trip_keeps_counts() {
    let net = build();
    let before = net.stats();
    assert_eq!(before.roads, 4);
    assert_eq!(before.connections, 2);

    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("net.xodr");
    write_xodr(file.path(), &net).unwrap();
    file.assert(predicates::str::contains("<junction"));

    let back = read_xodr(file.path()).unwrap();
    assert_eq!(back.stats(), before);
    assert_eq!(back.header.name, "roundtrip");
    for (a, b) in net.roads().zip(back.roads()) {
        assert_eq!(a.id(), b.id());
        assert_eq!(a.junction, b.junction);
        assert!((a.length() - b.length()).abs() < 1e-9);
        assert_eq!(a.superelevations(), b.superelevations());
    }
    for (a, b) in net.junctions().zip(back.junctions()) {
        for (ca, cb) in a.connections().zip(b.connections()) {
            assert_eq!(ca.lane_link_signature(), cb.lane_link_signature());
            assert_eq!(ca.outgoing_road_id, cb.outgoing_road_id);
        }
    }
}

#[test]
fn queries_work_on_a_parsed_network() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("net.xodr");
    write_xodr(&path, &build()).unwrap();
    let net = read_xodr(&path).unwrap();
    let hit = nearest_lane(&net, -40.0, -1.0, &QueryConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(hit.road_id, 1);
    assert_eq!(hit.lane_id, -1);
}
