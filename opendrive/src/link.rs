//! Road-to-road and road-to-junction linkage.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub type RoadId = u32;
pub type JunctionId = u32;
pub type ConnectionId = u32;

/// One past the highest id in `ids`, or `first` when empty. When the highest
/// id is `u32::MAX` the lowest unused id at or above `first` is returned.
pub fn next_free_id<V>(ids: &BTreeMap<u32, V>, first: u32) -> u32 {
    match ids.keys().next_back() {
        None => first,
        Some(&max) => max.checked_add(1).unwrap_or_else(|| lowest_unused(ids, first)),
    }
}

fn lowest_unused<V>(ids: &BTreeMap<u32, V>, first: u32) -> u32 {
    let mut candidate = first;
    for (&id, _) in ids.range(first..) {
        if id != candidate {
            break;
        }
        candidate = candidate.saturating_add(1);
    }
    candidate
}

/// End of a road that touches another element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum ContactPoint {
    /// `s = 0`.
    Start,
    /// `s = length`.
    End,
}

impl ContactPoint {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactPoint::Start => "start",
            ContactPoint::End => "end",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            ContactPoint::Start => ContactPoint::End,
            ContactPoint::End => ContactPoint::Start,
        }
    }
}

impl fmt::Display for ContactPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(ContactPoint::Start),
            "end" => Ok(ContactPoint::End),
            other => Err(format!("unknown contact point '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ElementType {
    Road,
    Junction,
}

impl ElementType {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Road => "road",
            ElementType::Junction => "junction",
        }
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "road" => Ok(ElementType::Road),
            "junction" => Ok(ElementType::Junction),
            other => Err(format!("unknown element type '{other}'")),
        }
    }
}

/// Predecessor or successor of a road. Junction links carry no contact point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoadLink {
    pub element_type: ElementType,
    pub element_id: u32,
    pub contact_point: Option<ContactPoint>,
}

impl RoadLink {
    pub fn road(id: RoadId, contact_point: ContactPoint) -> Self {
        Self {
            element_type: ElementType::Road,
            element_id: id,
            contact_point: Some(contact_point),
        }
    }

    pub fn junction(id: JunctionId) -> Self {
        Self {
            element_type: ElementType::Junction,
            element_id: id,
            contact_point: None,
        }
    }

    pub fn is_junction(&self) -> bool {
        self.element_type == ElementType::Junction
    }
}
