//! Data model for multimodal routing
//!
//! Contains the road network, the public transport networks and the
//! container tying them together.

pub mod multimodal;
pub mod registry;
pub mod road;
pub mod transit;

pub use multimodal::{ImportStats, MultimodalEdge, MultimodalGraph, MultimodalVertex};
pub use registry::IdRegistry;
pub use road::{RoadGraph, RoadNode, RoadSection, RoadType, TransportTypes};
pub use transit::{PtGraph, PtSection, Stop};
