pub use crate::DbId;
pub use crate::error::{Error, RecordKind};

// Import pipeline
pub use crate::loading::{
    CsvSource, ImportOptions, MemorySource, NetworkConfig, NetworkRecords, ParentStationResolution,
    ProgressCallback, PtNetworkConfig, RecordSource, RowErrorPolicy, create_multimodal_graph,
    import_graph,
};
pub use crate::loading::{PtSectionRecord, RoadNodeRecord, RoadSectionRecord, StopRecord};

// Network model
pub use crate::model::{
    IdRegistry, MultimodalEdge, MultimodalGraph, MultimodalVertex, PtGraph, PtSection, RoadGraph,
    RoadNode, RoadSection, RoadType, Stop, TransportTypes,
};

// Route results
pub use crate::roadmap::{
    CostId, Costs, EndMovement, Kilometers, PathTrace, PublicTransportStep, RoadStep, Roadmap,
    RouteResult, Step, StepGeometrySource, StepKind, StepType, TraceEdge, TransferStep,
    TraversedDistance, get_total_costs,
};
