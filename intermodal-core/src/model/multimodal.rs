//! Container for the road network and the public transport networks

use std::fmt;

use itertools::Itertools;
use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use super::registry::IdRegistry;
use super::road::{RoadGraph, RoadNode, RoadSection};
use super::transit::{PtGraph, Stop};
use crate::{DbId, RecordKind};

/// Location in one of the graphs of a [`MultimodalGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MultimodalVertex {
    Road(NodeIndex),
    PublicTransport {
        /// Index of the network in [`MultimodalGraph::public_transports`]
        network: usize,
        stop: NodeIndex,
    },
}

/// Directed pair of multimodal locations, possibly in different graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultimodalEdge {
    pub source: MultimodalVertex,
    pub target: MultimodalVertex,
}

impl MultimodalEdge {
    pub fn new(source: MultimodalVertex, target: MultimodalVertex) -> Self {
        Self { source, target }
    }
}

/// Counters collected while importing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Rows dropped under [`crate::RowErrorPolicy::Skip`], per record kind
    pub skipped_road_nodes: usize,
    pub skipped_road_sections: usize,
    pub skipped_stops: usize,
    pub skipped_pt_sections: usize,
    /// Stops whose parent station id could not be resolved
    pub unresolved_parent_stations: usize,
}

impl ImportStats {
    pub fn skipped(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::RoadNode => self.skipped_road_nodes,
            RecordKind::RoadSection => self.skipped_road_sections,
            RecordKind::Stop => self.skipped_stops,
            RecordKind::PtSection => self.skipped_pt_sections,
        }
    }

    pub(crate) fn record_skip(&mut self, kind: RecordKind) {
        match kind {
            RecordKind::RoadNode => self.skipped_road_nodes += 1,
            RecordKind::RoadSection => self.skipped_road_sections += 1,
            RecordKind::Stop => self.skipped_stops += 1,
            RecordKind::PtSection => self.skipped_pt_sections += 1,
        }
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped_road_nodes
            + self.skipped_road_sections
            + self.skipped_stops
            + self.skipped_pt_sections
    }
}

/// Road graph plus an ordered, append-only list of public transport graphs.
///
/// The container does not check references between graphs; the import
/// pipeline does. Once built it is only read, and can be shared between
/// threads without locking.
#[derive(Debug, Clone)]
pub struct MultimodalGraph {
    road: RoadGraph,
    public_transports: Vec<PtGraph>,
    road_nodes: IdRegistry<NodeIndex>,
    road_sections: IdRegistry<EdgeIndex>,
    meta: ImportStats,
}

impl Default for MultimodalGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl MultimodalGraph {
    pub fn new() -> Self {
        Self::with_road(
            RoadGraph::new(),
            IdRegistry::new(RecordKind::RoadNode),
            IdRegistry::new(RecordKind::RoadSection),
        )
    }

    pub(crate) fn with_road(
        road: RoadGraph,
        road_nodes: IdRegistry<NodeIndex>,
        road_sections: IdRegistry<EdgeIndex>,
    ) -> Self {
        Self {
            road,
            public_transports: Vec::new(),
            road_nodes,
            road_sections,
            meta: ImportStats::default(),
        }
    }

    pub fn road(&self) -> &RoadGraph {
        &self.road
    }

    pub fn public_transports(&self) -> &[PtGraph] {
        &self.public_transports
    }

    pub fn public_transport(&self, network: usize) -> Option<&PtGraph> {
        self.public_transports.get(network)
    }

    /// Appends a public transport network and returns its index
    pub fn push_public_transport(&mut self, network: PtGraph) -> usize {
        self.public_transports.push(network);
        self.public_transports.len() - 1
    }

    pub fn road_node_registry(&self) -> &IdRegistry<NodeIndex> {
        &self.road_nodes
    }

    pub fn road_section_registry(&self) -> &IdRegistry<EdgeIndex> {
        &self.road_sections
    }

    /// Handle and attributes of the road node with the given persisted id
    pub fn road_node(&self, db_id: DbId) -> Option<(NodeIndex, &RoadNode)> {
        let idx = self.road_nodes.get(db_id)?;
        self.road.node(idx).map(|node| (idx, node))
    }

    /// Handle and attributes of the road section with the given persisted id
    pub fn road_section(&self, db_id: DbId) -> Option<(EdgeIndex, &RoadSection)> {
        let idx = self.road_sections.get(db_id)?;
        self.road.section(idx).map(|section| (idx, section))
    }

    /// Handle and attributes of a stop of the given network
    pub fn stop(&self, network: usize, db_id: DbId) -> Option<(NodeIndex, &Stop)> {
        let pt = self.public_transports.get(network)?;
        let idx = pt.stop_by_db_id(db_id)?;
        pt.stop(idx).map(|stop| (idx, stop))
    }

    /// Persisted id of the node or stop behind a multimodal location
    pub fn vertex_db_id(&self, vertex: MultimodalVertex) -> Option<DbId> {
        match vertex {
            MultimodalVertex::Road(node) => self.road.node(node).map(|n| n.db_id),
            MultimodalVertex::PublicTransport { network, stop } => self
                .public_transports
                .get(network)
                .and_then(|pt| pt.stop(stop))
                .map(|s| s.db_id),
        }
    }

    /// Stop name of a public transport location; road nodes carry no name
    pub fn vertex_name(&self, vertex: MultimodalVertex) -> Option<&str> {
        match vertex {
            MultimodalVertex::Road(_) => None,
            MultimodalVertex::PublicTransport { network, stop } => self
                .public_transports
                .get(network)
                .and_then(|pt| pt.stop(stop))
                .map(|s| s.name.as_str()),
        }
    }

    pub fn meta(&self) -> &ImportStats {
        &self.meta
    }

    pub(crate) fn meta_mut(&mut self) -> &mut ImportStats {
        &mut self.meta
    }

    /// One line description of the graph sizes
    pub fn summary(&self) -> String {
        let networks = self
            .public_transports
            .iter()
            .map(|pt| {
                format!(
                    "{} ({} stops, {} sections)",
                    pt.name,
                    pt.stop_count(),
                    pt.section_count()
                )
            })
            .join(", ");
        format!(
            "road network with {} nodes and {} sections; {} public transport networks: [{}]",
            self.road.node_count(),
            self.road.section_count(),
            self.public_transports.len(),
            networks
        )
    }
}

impl fmt::Display for MultimodalGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PtGraph;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn container_is_shareable_between_threads() {
        assert_send_sync::<MultimodalGraph>();
    }

    #[test]
    fn public_transport_networks_keep_insertion_order() {
        let mut graph = MultimodalGraph::new();
        assert_eq!(graph.push_public_transport(PtGraph::new(1, "bus")), 0);
        assert_eq!(graph.push_public_transport(PtGraph::new(2, "metro")), 1);

        let names: Vec<_> = graph
            .public_transports()
            .iter()
            .map(|pt| pt.name.as_str())
            .collect();
        assert_eq!(names, ["bus", "metro"]);
        assert_eq!(graph.public_transport(1).unwrap().network_id, 2);
        assert!(graph.public_transport(2).is_none());
    }

    #[test]
    fn vertex_lookups_on_missing_graph_elements() {
        let graph = MultimodalGraph::new();
        assert_eq!(graph.vertex_db_id(MultimodalVertex::Road(NodeIndex::new(0))), None);
        assert_eq!(
            graph.vertex_db_id(MultimodalVertex::PublicTransport {
                network: 0,
                stop: NodeIndex::new(0)
            }),
            None
        );
        assert!(graph.summary().starts_with("road network with 0 nodes"));
    }
}
