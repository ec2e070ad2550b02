//! In-memory multimodal network core.
//!
//! Builds a road graph and any number of public transport graphs from
//! persisted records, and defines the [`Roadmap`] model that route search
//! algorithms use to report their results.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod roadmap;

pub use error::{Error, RecordKind};
pub use loading::{
    ImportOptions, NetworkConfig, ParentStationResolution, ProgressCallback, RowErrorPolicy,
    create_multimodal_graph, import_graph,
};
pub use model::{MultimodalGraph, PtGraph, RoadGraph};
pub use roadmap::{Costs, CostId, Roadmap, RouteResult, Step, get_total_costs};

/// Identifier assigned to a record by the persistence layer
pub type DbId = i64;
