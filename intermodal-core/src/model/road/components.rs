//! Road network components - nodes, sections and their classifications

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::DbId;

/// Road classification, stored as an integer code by the persistence layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadType {
    Motorway = 1,
    PrimaryRoad = 2,
    SecondaryRoad = 3,
    Street = 4,
    Other = 5,
    CycleWay = 6,
    PedestrianOnly = 7,
}

impl RoadType {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(RoadType::Motorway),
            2 => Some(RoadType::PrimaryRoad),
            3 => Some(RoadType::SecondaryRoad),
            4 => Some(RoadType::Street),
            5 => Some(RoadType::Other),
            6 => Some(RoadType::CycleWay),
            7 => Some(RoadType::PedestrianOnly),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Set of transport modes allowed on a road section, one bit per mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportTypes(u32);

impl TransportTypes {
    pub const NONE: Self = Self(0);
    pub const CAR: Self = Self(1);
    pub const PEDESTRIAN: Self = Self(2);
    pub const CYCLE: Self = Self(4);
    pub const BUS: Self = Self(8);
    pub const TRAMWAY: Self = Self(16);
    pub const METRO: Self = Self(32);
    pub const TRAIN: Self = Self(64);
    pub const SHUTTLE: Self = Self(128);
    pub const BOAT: Self = Self(256);
    pub const TAXI: Self = Self(512);
    pub const CAR_POOL: Self = Self(1024);
    pub const BICYCLE_SHARING: Self = Self(2048);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TransportTypes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TransportTypes {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Road graph vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadNode {
    /// Persisted id of the node
    pub db_id: DbId,
    pub is_junction: bool,
    pub is_bifurcation: bool,
}

/// Road graph edge (directed road section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSection {
    /// Persisted id of the section
    pub db_id: DbId,
    pub road_type: Option<RoadType>,
    /// Modes allowed from `node_from` to `node_to`
    pub transport_type_ft: TransportTypes,
    /// Modes allowed from `node_to` to `node_from`
    pub transport_type_tf: TransportTypes,
    /// Length in meters
    pub length: f64,
    pub car_speed_limit: f64,
    pub car_average_speed: f64,
    pub transit_average_speed: f64,
    pub road_name: String,
    pub address_left_side: String,
    pub address_right_side: String,
    pub lane: i32,
    pub is_roundabout: bool,
    pub is_bridge: bool,
    pub is_tunnel: bool,
    pub is_ramp: bool,
    pub is_tollway: bool,
}

impl RoadSection {
    /// Whether `mode` may travel the section in its forward direction
    pub fn allows_forward(&self, mode: TransportTypes) -> bool {
        self.transport_type_ft.contains(mode)
    }

    /// Whether `mode` may travel the section against its direction
    pub fn allows_backward(&self, mode: TransportTypes) -> bool {
        self.transport_type_tf.contains(mode)
    }
}
