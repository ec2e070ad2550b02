//! Road network model

pub mod components;
pub mod network;

pub use components::{RoadNode, RoadSection, RoadType, TransportTypes};
pub use network::RoadGraph;
