use crate::domain::edge::{EdgeData, Section};
use crate::domain::node::{NodeData, PortName};
use parking_lot::Mutex;
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("port not in graph: {0}")]
    UnknownNode(PortName),
}

#[derive(Debug, Clone, Default)]
struct GraphInner {
    graph: DiGraph<NodeData, EdgeData>,
    name_to_node: HashMap<PortName, NodeIndex>,
}

impl GraphInner {
    fn index_of(&self, name: &str) -> Result<NodeIndex, GraphError> {
        self.name_to_node
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))
    }
}

/// Dependency graph shared between traversal and decoration.
///
/// Cloning the handle is cheap and every clone sees the same graph. Each
/// operation takes the lock for exactly one mutation or lookup, so callers
/// never hold it across oracle I/O.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    inner: Arc<Mutex<GraphInner>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.lock().name_to_node.contains_key(name)
    }

    /// Insert `name` unless it is already present.
    ///
    /// Returns the node index and whether this call created the node. The
    /// check and the insert happen under the same lock.
    pub fn add_node(&self, name: &str) -> (NodeIndex, bool) {
        let mut inner = self.inner.lock();
        if let Some(&idx) = inner.name_to_node.get(name) {
            return (idx, false);
        }
        let idx = inner.graph.add_node(NodeData::new(name));
        inner.name_to_node.insert(name.to_string(), idx);
        (idx, true)
    }

    /// Append a `parent -> child` edge. Parallel edges are kept.
    pub fn add_edge(
        &self,
        parent: &str,
        child: &str,
        section: Section,
    ) -> Result<EdgeIndex, GraphError> {
        let mut inner = self.inner.lock();
        let source = inner.index_of(parent)?;
        let target = inner.index_of(child)?;
        Ok(inner.graph.add_edge(source, target, EdgeData { section }))
    }

    /// Run `f` against the node's data while holding the lock.
    pub fn update_node<R>(
        &self,
        name: &str,
        f: impl FnOnce(&mut NodeData) -> R,
    ) -> Result<R, GraphError> {
        let mut inner = self.inner.lock();
        let idx = inner.index_of(name)?;
        Ok(f(&mut inner.graph[idx]))
    }

    pub fn node_data(&self, name: &str) -> Option<NodeData> {
        let inner = self.inner.lock();
        inner
            .name_to_node
            .get(name)
            .map(|&idx| inner.graph[idx].clone())
    }

    pub fn node_count(&self) -> usize {
        self.inner.lock().graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.lock().graph.edge_count()
    }

    /// Take a read-only copy of the current graph for rendering.
    pub fn freeze(&self) -> GraphSnapshot {
        let inner = self.inner.lock().clone();
        GraphSnapshot {
            graph: inner.graph,
            name_to_node: inner.name_to_node,
        }
    }
}

/// Immutable view of a finished dependency graph
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    pub graph: DiGraph<NodeData, EdgeData>,
    pub name_to_node: HashMap<PortName, NodeIndex>,
}

impl GraphSnapshot {
    pub fn node(&self, name: &str) -> Option<&NodeData> {
        self.name_to_node.get(name).map(|&idx| &self.graph[idx])
    }

    /// Nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges in discovery order as `(parent, child, data)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &EdgeData)> {
        self.graph.edge_references().map(move |e| {
            (
                self.graph[e.source()].name.as_str(),
                self.graph[e.target()].name.as_str(),
                e.weight(),
            )
        })
    }

    /// Outgoing `(child, section)` pairs of `name`, in discovery order.
    pub fn dependencies_of(&self, name: &str) -> Vec<(&str, &Section)> {
        let Some(&idx) = self.name_to_node.get(name) else {
            return Vec::new();
        };
        let mut deps: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.id(), self.graph[e.target()].name.as_str(), &e.weight().section))
            .collect();
        // petgraph walks the adjacency list newest-first
        deps.sort_by_key(|(id, _, _)| *id);
        deps.into_iter().map(|(_, child, section)| (child, section)).collect()
    }

    /// Number of edges pointing at `name`.
    pub fn in_degree(&self, name: &str) -> usize {
        self.name_to_node
            .get(name)
            .map(|&idx| self.graph.edges_directed(idx, Direction::Incoming).count())
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
