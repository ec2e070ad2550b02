use std::ops::Deref;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use super::components::{PtSection, Stop};
use crate::model::IdRegistry;
use crate::{DbId, Error, RecordKind};

/// Stops and sections of one public transport network
#[derive(Debug, Clone)]
pub struct PtGraph {
    /// Persisted id of the network
    pub network_id: DbId,
    pub name: String,
    graph: DiGraph<Stop, PtSection>,
    stops: IdRegistry<NodeIndex>,
}

impl PtGraph {
    pub fn new(network_id: DbId, name: impl Into<String>) -> Self {
        Self {
            network_id,
            name: name.into(),
            graph: DiGraph::new(),
            stops: IdRegistry::new(RecordKind::Stop),
        }
    }

    /// Adds a stop and registers its persisted id.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateId`] if a stop with the same id already exists, in
    /// which case the graph is left unchanged.
    pub fn add_stop(&mut self, stop: Stop) -> Result<NodeIndex, Error> {
        if self.stops.contains(stop.db_id) {
            return Err(Error::DuplicateId {
                kind: RecordKind::Stop,
                id: stop.db_id,
            });
        }
        let db_id = stop.db_id;
        let idx = self.graph.add_node(stop);
        self.stops.register(db_id, idx)?;
        Ok(idx)
    }

    /// Adds a section between two existing stops.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNodeIndex`] if either handle does not belong to this graph.
    pub fn add_section(&mut self, from: NodeIndex, to: NodeIndex) -> Result<EdgeIndex, Error> {
        if from.index() >= self.graph.node_count() || to.index() >= self.graph.node_count() {
            return Err(Error::InvalidNodeIndex);
        }
        Ok(self.graph.add_edge(from, to, PtSection))
    }

    /// Links a stop to its parent station.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNodeIndex`] if either handle does not belong to this
    /// graph or a stop is given as its own parent.
    pub fn set_parent_station(&mut self, stop: NodeIndex, parent: NodeIndex) -> Result<(), Error> {
        if stop == parent || self.graph.node_weight(parent).is_none() {
            return Err(Error::InvalidNodeIndex);
        }
        let weight = self
            .graph
            .node_weight_mut(stop)
            .ok_or(Error::InvalidNodeIndex)?;
        weight.parent_station = Some(parent);
        Ok(())
    }

    pub fn stop(&self, stop: NodeIndex) -> Option<&Stop> {
        self.graph.node_weight(stop)
    }

    /// Parent station of a stop, if any
    pub fn parent_station(&self, stop: NodeIndex) -> Option<&Stop> {
        self.stop(stop)
            .and_then(|s| s.parent_station)
            .and_then(|parent| self.stop(parent))
    }

    /// Handle of the stop with the given persisted id
    pub fn stop_by_db_id(&self, db_id: DbId) -> Option<NodeIndex> {
        self.stops.get(db_id)
    }

    pub fn stop_registry(&self) -> &IdRegistry<NodeIndex> {
        &self.stops
    }

    pub fn endpoints(&self, section: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(section)
    }

    pub fn stop_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn section_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn stops(&self) -> impl Iterator<Item = (NodeIndex, &Stop)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    pub fn graph(&self) -> &DiGraph<Stop, PtSection> {
        &self.graph
    }
}

impl Deref for PtGraph {
    type Target = DiGraph<Stop, PtSection>;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}
