//! Rows supplied by the persistence layer

use serde::{Deserialize, Serialize};

use super::de::{deserialize_flag, deserialize_optional_id};
use crate::{DbId, Error};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadNodeRecord {
    pub id: DbId,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_junction: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_bifurcation: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadSectionRecord {
    pub id: DbId,
    pub road_type: Option<i32>,
    pub node_from: DbId,
    pub node_to: DbId,
    pub transport_type_forward: u32,
    pub transport_type_backward: u32,
    pub length: f64,
    pub car_speed_limit: f64,
    pub car_average_speed: f64,
    pub transit_average_speed: f64,
    pub road_name: String,
    pub address_left: String,
    pub address_right: String,
    pub lane_count: i32,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_roundabout: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_bridge: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_tunnel: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_ramp: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_tollway: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopRecord {
    pub id: DbId,
    pub name: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_station: bool,
    /// `None` and `Some(0)` both mean the stop has no parent
    #[serde(deserialize_with = "deserialize_optional_id")]
    pub parent_station: Option<DbId>,
    pub road_section_id: DbId,
    pub zone_id: String,
    pub abscissa: f64,
}

impl StopRecord {
    /// Parent station id, with the `0` placeholder mapped to `None`
    pub fn parent_id(&self) -> Option<DbId> {
        self.parent_station.filter(|&id| id != 0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtSectionRecord {
    pub stop_from: DbId,
    pub stop_to: DbId,
}

/// Stop and section rows of one public transport network
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkRecords {
    pub network_id: DbId,
    pub name: String,
    pub stops: Vec<StopRecord>,
    pub sections: Vec<PtSectionRecord>,
}

/// Supplier of the record streams consumed by the import pipeline.
///
/// Streams are requested in pipeline order: road nodes, road sections,
/// then public transport networks. A failing stream aborts the import
/// without retry.
pub trait RecordSource {
    /// # Errors
    ///
    /// [`Error::SourceUnavailable`] or a decoding error if rows cannot be produced
    fn road_nodes(&self) -> Result<Vec<RoadNodeRecord>, Error>;

    /// # Errors
    ///
    /// [`Error::SourceUnavailable`] or a decoding error if rows cannot be produced
    fn road_sections(&self) -> Result<Vec<RoadSectionRecord>, Error>;

    /// # Errors
    ///
    /// [`Error::SourceUnavailable`] or a decoding error if rows cannot be produced
    fn public_transport_networks(&self) -> Result<Vec<NetworkRecords>, Error>;
}

/// Record streams held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub road_nodes: Vec<RoadNodeRecord>,
    pub road_sections: Vec<RoadSectionRecord>,
    pub networks: Vec<NetworkRecords>,
}

impl RecordSource for MemorySource {
    fn road_nodes(&self) -> Result<Vec<RoadNodeRecord>, Error> {
        Ok(self.road_nodes.clone())
    }

    fn road_sections(&self) -> Result<Vec<RoadSectionRecord>, Error> {
        Ok(self.road_sections.clone())
    }

    fn public_transport_networks(&self) -> Result<Vec<NetworkRecords>, Error> {
        Ok(self.networks.clone())
    }
}
