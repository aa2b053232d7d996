use opendrive::{config::QueryConfig, network::RoadNetwork, spatial::nearest_road};

fn three_roads() -> RoadNetwork {
    let mut net = RoadNetwork::new();
    for i in 0..3 {
        net.create_road(format!("r{}", i + 1))
            .add_geometry_line(0.0, 10.0 * i as f64, 0.0, 0.0, 10.0)
            .unwrap();
    }
    net
}

#[test]
fn resolves_adjacent_roads() {
    let net = three_roads();
    let config = QueryConfig::default();
    for (x, expected) in [(1.0, 1), (11.0, 2), (21.0, 3)] {
        for y in [0.0, 10.0, -10.0] {
            let hit = nearest_road(&net, x, y, &config).unwrap().unwrap();
            assert_eq!(hit.road_id, expected, "query at ({x}, {y})");
            assert!((hit.nearest.pose.s - 1.0).abs() < 1e-9);
            assert!((hit.nearest.pose.t - y).abs() < 1e-9);
        }
    }
}

#[test]
fn repeated_queries_agree() {
    let net = three_roads();
    let config = QueryConfig::default();
    let first = nearest_road(&net, 14.0, 3.0, &config).unwrap();
    let second = nearest_road(&net, 14.0, 3.0, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn finer_step_tightens_the_estimate() {
    let net = three_roads();
    let coarse = QueryConfig {
        sample_step: 2.0,
        ..Default::default()
    };
    let fine = QueryConfig {
        sample_step: 0.5,
        ..Default::default()
    };
    let c = nearest_road(&net, 3.5, 1.0, &coarse).unwrap().unwrap();
    let f = nearest_road(&net, 3.5, 1.0, &fine).unwrap().unwrap();
    assert!(f.nearest.distance <= c.nearest.distance);
    assert!((f.nearest.pose.s - 3.5).abs() < 1e-9);
}

#[test]
fn tiny_step_far_along_s_still_answers() {
    let mut net = RoadNetwork::new();
    net.create_road("far")
        .add_geometry_line(1e6, 0.0, 0.0, 0.0, 10.0)
        .unwrap();
    let config = QueryConfig {
        sample_step: 1e-12,
        ..Default::default()
    };
    let hit = nearest_road(&net, 1.0, 1.0, &config).unwrap().unwrap();
    assert_eq!(hit.road_id, 1);
    assert!((hit.nearest.pose.s - (1e6 + 1.0)).abs() < 1e-3);
    assert!((hit.nearest.pose.t - 1.0).abs() < 1e-6);
}
