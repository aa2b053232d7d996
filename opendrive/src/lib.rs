//! Core library for OpenDRIVE road networks: reference line geometry, lane
//! cross sections, the road coordinate pipeline, junction connection
//! synthesis and spatial queries.

pub mod config;
pub mod connection;
pub mod coord;
pub mod error;
pub mod geometry;
pub mod io;
pub mod junction;
pub mod lane;
pub mod lane_section;
pub mod link;
pub mod network;
pub mod polynomial;
pub mod reference_line;
pub mod road;
pub mod spatial;

pub use error::{GeometryError, OdrError, Result};
pub use network::RoadNetwork;
