use std::ops::Deref;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use super::components::{RoadNode, RoadSection};
use crate::Error;

/// Directed road multigraph.
///
/// Vertices and edges live in dense arrays and are addressed by stable
/// indices, since the graph never removes anything. Read-only access to
/// the underlying `petgraph` graph is available through `Deref`.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    graph: DiGraph<RoadNode, RoadSection>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, sections: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, sections),
        }
    }

    pub fn add_node(&mut self, node: RoadNode) -> NodeIndex {
        self.graph.add_node(node)
    }

    /// Adds a section between two existing nodes. Parallel sections
    /// between the same pair of nodes are allowed.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNodeIndex`] if either handle does not belong to this graph.
    pub fn add_section(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        section: RoadSection,
    ) -> Result<EdgeIndex, Error> {
        if from.index() >= self.graph.node_count() || to.index() >= self.graph.node_count() {
            return Err(Error::InvalidNodeIndex);
        }
        Ok(self.graph.add_edge(from, to, section))
    }

    pub fn node(&self, node: NodeIndex) -> Option<&RoadNode> {
        self.graph.node_weight(node)
    }

    pub fn section(&self, section: EdgeIndex) -> Option<&RoadSection> {
        self.graph.edge_weight(section)
    }

    /// Source and target nodes of a section
    pub fn endpoints(&self, section: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(section)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn section_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &RoadNode)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    pub fn sections(&self) -> impl Iterator<Item = (EdgeIndex, &RoadSection)> {
        self.graph
            .edge_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    pub fn graph(&self) -> &DiGraph<RoadNode, RoadSection> {
        &self.graph
    }
}

impl Deref for RoadGraph {
    type Target = DiGraph<RoadNode, RoadSection>;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}
