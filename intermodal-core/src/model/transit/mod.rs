//! Public transport network model

pub mod components;
pub mod network;

pub use components::{PtSection, Stop};
pub use network::PtGraph;
