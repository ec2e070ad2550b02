//! Public transport network components

use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::DbId;

/// Public transport graph vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Persisted id of the stop
    pub db_id: DbId,
    pub name: String,
    pub is_station: bool,
    /// Parent station in the same network, if it could be resolved
    pub parent_station: Option<NodeIndex>,
    /// Road section the stop is located on
    pub road_section: EdgeIndex,
    pub zone_id: String,
    /// Position along `road_section`, from 0 (start) to 1 (end)
    pub abscissa_road_section: f64,
}

impl Stop {
    pub fn has_parent(&self) -> bool {
        self.parent_station.is_some()
    }
}

/// Public transport graph edge. Timetable data is not part of the
/// static network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtSection;
