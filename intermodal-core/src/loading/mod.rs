//! This module is responsible for reading persisted network records
//! and building the multimodal graph from them.

mod builder;
mod config;
pub mod csv_source;
mod de;
mod progress;
mod records;

pub use builder::{create_multimodal_graph, import_graph};
pub use config::{
    ImportOptions, NetworkConfig, ParentStationResolution, PtNetworkConfig, RowErrorPolicy,
};
pub use csv_source::{CsvSource, deserialize_records};
pub use progress::{NoProgress, ProgressCallback};
pub use records::{
    MemorySource, NetworkRecords, PtSectionRecord, RecordSource, RoadNodeRecord,
    RoadSectionRecord, StopRecord,
};
