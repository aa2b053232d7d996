use opendrive::{
    lane::{LaneSide, LaneType},
    lane_section::LaneSection,
};

fn ladder() -> LaneSection {
    let mut section = LaneSection::new(0, 1, 0.0, false);
    section.add_lane(0, LaneType::None).unwrap();
    for side in [LaneSide::Left, LaneSide::Right] {
        for _ in 0..3 {
            section
                .add_lane_on_side(side, LaneType::Driving)
                .unwrap()
                .add_width_record(0.0, 2.0, 0.0, 0.0, 0.0);
        }
    }
    section
}

#[test]
fn left_lanes_stack_outward() {
    let section = ladder();
    for s in [0.0, 12.5, 40.0] {
        assert!(section.width_upto_start(1, s).unwrap().abs() < 1e-9);
        assert!((section.width_upto_center(1, s).unwrap() - 1.0).abs() < 1e-9);
        assert!((section.width_upto_end(1, s).unwrap() - 2.0).abs() < 1e-9);
        assert!((section.width_upto_start(2, s).unwrap() - 2.0).abs() < 1e-9);
        assert!((section.width_upto_center(2, s).unwrap() - 3.0).abs() < 1e-9);
        assert!((section.width_upto_end(2, s).unwrap() - 4.0).abs() < 1e-9);
        assert!((section.width_upto_end(3, s).unwrap() - 6.0).abs() < 1e-9);
    }
}

#[test]
fn right_lanes_mirror_left_lanes() {
    let section = ladder();
    for id in 1..=3 {
        let s = 5.0;
        assert_eq!(
            section.width_upto_start(id, s).unwrap(),
            section.width_upto_start(-id, s).unwrap()
        );
        assert_eq!(
            section.width_upto_center(id, s).unwrap(),
            section.width_upto_center(-id, s).unwrap()
        );
        assert_eq!(
            section.width_upto_end(id, s).unwrap(),
            section.width_upto_end(-id, s).unwrap()
        );
    }
    assert!((section.carriageway_width(LaneSide::Right, 0.0) - 6.0).abs() < 1e-9);
}

#[test]
fn varying_width_uses_offset_into_section() {
    let mut section = LaneSection::new(0, 1, 10.0, false);
    section.add_lane(0, LaneType::None).unwrap();
    section
        .add_lane(1, LaneType::Driving)
        .unwrap()
        .add_width_record(0.0, 2.0, 0.1, 0.0, 0.0);
    section
        .add_lane(2, LaneType::Driving)
        .unwrap()
        .add_width_record(0.0, 1.0, 0.0, 0.0, 0.0);
    // road s = 20 is ds = 10 into the section
    assert!((section.width_upto_start(2, 20.0).unwrap() - 3.0).abs() < 1e-9);
    assert!((section.width_upto_end(2, 20.0).unwrap() - 4.0).abs() < 1e-9);
}
