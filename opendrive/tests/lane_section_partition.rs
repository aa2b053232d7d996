use opendrive::{road::Road, OdrError};

#[test]
fn section_lengths_partition_the_road() {
    let mut road = Road::new(1, "sections");
    road.add_geometry_line(0.0, 0.0, 0.0, 0.0, 100.0).unwrap();
    road.add_lane_section(50.0, false).unwrap();
    road.add_lane_section(0.0, false).unwrap();
    road.add_lane_section(40.0, false).unwrap();

    let lengths: Vec<f64> = road.lane_sections().iter().map(|ls| ls.length).collect();
    assert_eq!(lengths, vec![40.0, 10.0, 50.0]);
    let ids: Vec<usize> = road.lane_sections().iter().map(|ls| ls.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);

    assert_eq!(road.lane_section_at(39.9).unwrap().s, 0.0);
    assert_eq!(road.lane_section_at(40.0).unwrap().s, 40.0);
    assert_eq!(road.lane_section_at(100.0).unwrap().s, 50.0);
}

#[test]
fn lengths_follow_geometry_edits() {
    let mut road = Road::new(1, "sections");
    road.add_geometry_line(0.0, 0.0, 0.0, 0.0, 60.0).unwrap();
    road.add_lane_section(0.0, false).unwrap();
    road.add_lane_section(40.0, false).unwrap();
    assert_eq!(road.lane_section_length(1), Some(20.0));

    road.add_geometry_line(60.0, 60.0, 0.0, 0.0, 40.0).unwrap();
    assert_eq!(road.lane_section_length(1), Some(60.0));

    road.remove_lane_section(0);
    assert_eq!(road.lane_sections()[0].id, 0);
    assert_eq!(road.lane_section_length(0), Some(60.0));
}

#[test]
fn sections_outside_the_road_are_rejected() {
    let mut road = Road::new(1, "sections");
    road.add_geometry_line(0.0, 0.0, 0.0, 0.0, 100.0).unwrap();
    road.add_lane_section(0.0, false).unwrap();
    for s in [150.0, 100.0, -1.0, f64::NAN] {
        assert!(matches!(
            road.add_lane_section(s, false),
            Err(OdrError::LaneSectionOutOfRange { road: 1, .. })
        ));
    }
    assert_eq!(road.lane_sections().len(), 1);
    assert_eq!(road.lane_section_length(0), Some(100.0));
}

#[test]
fn road_without_geometry_takes_only_a_start_section() {
    let mut road = Road::new(2, "empty");
    assert!(road.add_lane_section(5.0, false).is_err());
    road.add_lane_section(0.0, false).unwrap();
    assert_eq!(road.lane_sections().len(), 1);
}
