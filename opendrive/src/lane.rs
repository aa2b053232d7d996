//! A single lane and the s-dependent records attached to it.

use std::fmt;
use std::str::FromStr;

use crate::polynomial::{insert_sorted, record_at, CubicPoly, SOffset};

/// Side of the reference line a lane lies on, derived from the sign of its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LaneSide {
    Left,
    Center,
    Right,
}

impl LaneSide {
    pub fn of(id: i32) -> Self {
        match id.signum() {
            1 => LaneSide::Left,
            -1 => LaneSide::Right,
            _ => LaneSide::Center,
        }
    }

    /// Sign of `t` for lanes on this side.
    pub fn sign(self) -> f64 {
        match self {
            LaneSide::Left => 1.0,
            LaneSide::Center => 0.0,
            LaneSide::Right => -1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            LaneSide::Left => LaneSide::Right,
            LaneSide::Center => LaneSide::Center,
            LaneSide::Right => LaneSide::Left,
        }
    }
}

/// Direction of traffic relative to increasing `s` (right-hand traffic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelDirection {
    Forward,
    Backward,
    Undirected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum LaneType {
    #[default]
    None,
    Driving,
    Stop,
    Shoulder,
    Biking,
    Sidewalk,
    Border,
    Restricted,
    Parking,
    Bidirectional,
    Median,
    Curb,
    Entry,
    Exit,
    OnRamp,
    OffRamp,
    ConnectingRamp,
    Tram,
    Rail,
    Bus,
    Taxi,
}

impl LaneType {
    pub fn as_str(self) -> &'static str {
        match self {
            LaneType::None => "none",
            LaneType::Driving => "driving",
            LaneType::Stop => "stop",
            LaneType::Shoulder => "shoulder",
            LaneType::Biking => "biking",
            LaneType::Sidewalk => "sidewalk",
            LaneType::Border => "border",
            LaneType::Restricted => "restricted",
            LaneType::Parking => "parking",
            LaneType::Bidirectional => "bidirectional",
            LaneType::Median => "median",
            LaneType::Curb => "curb",
            LaneType::Entry => "entry",
            LaneType::Exit => "exit",
            LaneType::OnRamp => "onRamp",
            LaneType::OffRamp => "offRamp",
            LaneType::ConnectingRamp => "connectingRamp",
            LaneType::Tram => "tram",
            LaneType::Rail => "rail",
            LaneType::Bus => "bus",
            LaneType::Taxi => "taxi",
        }
    }
}

impl fmt::Display for LaneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LaneType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = match s {
            "none" => LaneType::None,
            "driving" => LaneType::Driving,
            "stop" => LaneType::Stop,
            "shoulder" => LaneType::Shoulder,
            "biking" => LaneType::Biking,
            "sidewalk" => LaneType::Sidewalk,
            "border" => LaneType::Border,
            "restricted" => LaneType::Restricted,
            "parking" => LaneType::Parking,
            "bidirectional" => LaneType::Bidirectional,
            "median" => LaneType::Median,
            "curb" => LaneType::Curb,
            "entry" => LaneType::Entry,
            "exit" => LaneType::Exit,
            "onRamp" => LaneType::OnRamp,
            "offRamp" => LaneType::OffRamp,
            "connectingRamp" => LaneType::ConnectingRamp,
            "tram" => LaneType::Tram,
            "rail" => LaneType::Rail,
            "bus" => LaneType::Bus,
            "taxi" => LaneType::Taxi,
            other => return Err(format!("unknown lane type '{other}'")),
        };
        Ok(t)
    }
}

/// Inner and outer lane height above the road surface.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeightRecord {
    pub s_offset: f64,
    pub inner: f64,
    pub outer: f64,
}

impl SOffset for HeightRecord {
    fn s_offset(&self) -> f64 {
        self.s_offset
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoadMark {
    pub s_offset: f64,
    pub mark_type: String,
    pub weight: String,
    pub color: String,
    pub width: f64,
    pub lane_change: String,
    pub height: f64,
}

impl RoadMark {
    /// Standard white mark of `mark_type` ("solid", "broken", ...).
    pub fn new(s_offset: f64, mark_type: &str) -> Self {
        Self {
            s_offset,
            mark_type: mark_type.to_string(),
            weight: "standard".to_string(),
            color: "standard".to_string(),
            width: 0.15,
            lane_change: "none".to_string(),
            height: 0.0,
        }
    }
}

impl SOffset for RoadMark {
    fn s_offset(&self) -> f64 {
        self.s_offset
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaterialRecord {
    pub s_offset: f64,
    pub surface: String,
    pub friction: f64,
    pub roughness: f64,
}

impl SOffset for MaterialRecord {
    fn s_offset(&self) -> f64 {
        self.s_offset
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpeedRecord {
    pub s_offset: f64,
    pub max: f64,
    pub unit: String,
}

impl SOffset for SpeedRecord {
    fn s_offset(&self) -> f64 {
        self.s_offset
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AccessRecord {
    pub s_offset: f64,
    pub rule: String,
    pub restriction: String,
}

impl SOffset for AccessRecord {
    fn s_offset(&self) -> f64 {
        self.s_offset
    }
}

/// Lane of a lane section. Record offsets are relative to the section start.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Lane {
    pub id: i32,
    pub lane_type: LaneType,
    pub level: bool,
    pub predecessor: Option<i32>,
    pub successor: Option<i32>,
    widths: Vec<CubicPoly>,
    heights: Vec<HeightRecord>,
    road_marks: Vec<RoadMark>,
    materials: Vec<MaterialRecord>,
    speeds: Vec<SpeedRecord>,
    accesses: Vec<AccessRecord>,
}

impl Lane {
    pub fn new(id: i32, lane_type: LaneType) -> Self {
        Self {
            id,
            lane_type,
            level: false,
            predecessor: None,
            successor: None,
            widths: Vec::new(),
            heights: Vec::new(),
            road_marks: Vec::new(),
            materials: Vec::new(),
            speeds: Vec::new(),
            accesses: Vec::new(),
        }
    }

    pub fn side(&self) -> LaneSide {
        LaneSide::of(self.id)
    }

    pub fn travel_direction(&self) -> TravelDirection {
        match self.side() {
            LaneSide::Right => TravelDirection::Forward,
            LaneSide::Left => TravelDirection::Backward,
            LaneSide::Center => TravelDirection::Undirected,
        }
    }

    pub fn add_width_record(&mut self, s_offset: f64, a: f64, b: f64, c: f64, d: f64) {
        insert_sorted(&mut self.widths, CubicPoly::new(s_offset, a, b, c, d));
    }

    pub fn add_width(&mut self, record: CubicPoly) {
        insert_sorted(&mut self.widths, record);
    }

    pub fn add_height_record(&mut self, s_offset: f64, inner: f64, outer: f64) {
        insert_sorted(
            &mut self.heights,
            HeightRecord {
                s_offset,
                inner,
                outer,
            },
        );
    }

    pub fn add_road_mark_record(&mut self, mark: RoadMark) {
        insert_sorted(&mut self.road_marks, mark);
    }

    pub fn add_material_record(&mut self, record: MaterialRecord) {
        insert_sorted(&mut self.materials, record);
    }

    pub fn add_speed_record(&mut self, record: SpeedRecord) {
        insert_sorted(&mut self.speeds, record);
    }

    pub fn add_access_record(&mut self, record: AccessRecord) {
        insert_sorted(&mut self.accesses, record);
    }

    pub fn widths(&self) -> &[CubicPoly] {
        &self.widths
    }

    pub fn heights(&self) -> &[HeightRecord] {
        &self.heights
    }

    pub fn road_marks(&self) -> &[RoadMark] {
        &self.road_marks
    }

    pub fn materials(&self) -> &[MaterialRecord] {
        &self.materials
    }

    pub fn speeds(&self) -> &[SpeedRecord] {
        &self.speeds
    }

    pub fn accesses(&self) -> &[AccessRecord] {
        &self.accesses
    }

    pub fn clear_widths(&mut self) {
        self.widths.clear();
    }

    pub fn clear_heights(&mut self) {
        self.heights.clear();
    }

    pub fn clear_road_marks(&mut self) {
        self.road_marks.clear();
    }

    /// Width at `ds` from the lane section start. Center lanes have none.
    pub fn width_at(&self, ds: f64) -> f64 {
        if self.side() == LaneSide::Center {
            return 0.0;
        }
        record_at(&self.widths, ds)
            .map(|w| w.value(ds - w.s))
            .unwrap_or(0.0)
    }

    /// `(inner, outer)` height at `ds`, linearly interpolated between records
    /// and held constant outside them.
    pub fn height_at(&self, ds: f64) -> (f64, f64) {
        let table = &self.heights;
        let Some(first) = table.first() else {
            return (0.0, 0.0);
        };
        if ds <= first.s_offset {
            return (first.inner, first.outer);
        }
        for pair in table.windows(2) {
            let a = &pair[0];
            let b = &pair[1];
            if ds >= a.s_offset && ds <= b.s_offset {
                let t = if (b.s_offset - a.s_offset).abs() < f64::EPSILON {
                    0.0
                } else {
                    (ds - a.s_offset) / (b.s_offset - a.s_offset)
                };
                return (
                    a.inner + t * (b.inner - a.inner),
                    a.outer + t * (b.outer - a.outer),
                );
            }
        }
        table
            .last()
            .map(|h| (h.inner, h.outer))
            .unwrap_or((0.0, 0.0))
    }

    pub fn road_mark_at(&self, ds: f64) -> Option<&RoadMark> {
        record_at(&self.road_marks, ds)
    }

    pub fn speed_at(&self, ds: f64) -> Option<&SpeedRecord> {
        record_at(&self.speeds, ds)
    }

    pub fn material_at(&self, ds: f64) -> Option<&MaterialRecord> {
        record_at(&self.materials, ds)
    }

    pub fn access_at(&self, ds: f64) -> Option<&AccessRecord> {
        record_at(&self.accesses, ds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_segments_by_offset() {
        let mut lane = Lane::new(-1, LaneType::Driving);
        lane.add_width_record(10.0, 4.0, 0.0, 0.0, 0.0);
        lane.add_width_record(0.0, 3.0, 0.1, 0.0, 0.0);
        assert!((lane.width_at(0.0) - 3.0).abs() < 1e-9);
        assert!((lane.width_at(5.0) - 3.5).abs() < 1e-9);
        assert!((lane.width_at(10.0) - 4.0).abs() < 1e-9);
        assert!((lane.width_at(12.0) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn center_lane_has_no_width() {
        let mut lane = Lane::new(0, LaneType::None);
        lane.add_width_record(0.0, 3.0, 0.0, 0.0, 0.0);
        assert_eq!(lane.width_at(1.0), 0.0);
        assert_eq!(lane.side(), LaneSide::Center);
    }

    #[test]
    fn height_interpolates_between_records() {
        let mut lane = Lane::new(2, LaneType::Sidewalk);
        lane.add_height_record(0.0, 0.1, 0.2);
        lane.add_height_record(10.0, 0.2, 0.4);
        let (inner, outer) = lane.height_at(5.0);
        assert!((inner - 0.15).abs() < 1e-9);
        assert!((outer - 0.3).abs() < 1e-9);
        assert_eq!(lane.height_at(20.0), (0.2, 0.4));
    }

    #[test]
    fn lane_type_parsing() {
        assert_eq!("onRamp".parse::<LaneType>(), Ok(LaneType::OnRamp));
        assert_eq!(LaneType::Sidewalk.to_string(), "sidewalk");
        assert!("hovercraft".parse::<LaneType>().is_err());
    }

    #[test]
    fn travel_direction_follows_side() {
        assert_eq!(Lane::new(-2, LaneType::Driving).travel_direction(), TravelDirection::Forward);
        assert_eq!(Lane::new(1, LaneType::Driving).travel_direction(), TravelDirection::Backward);
    }
}
