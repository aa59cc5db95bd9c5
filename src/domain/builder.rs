use crate::domain::decorator::{DecorationStopped, StatusDecorator};
use crate::domain::graph::{DependencyGraph, GraphSnapshot};
use crate::domain::node::PortName;
use crate::domain::ports::{Dependency, DependencyOracle};
use anyhow::{Context as _, Result, anyhow};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// A port is expanded at most once per distinct variant set. Expanding it
/// again under another variant set re-appends its edges.
type VisitKey = (PortName, Vec<String>);

/// Counters for one root traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Ports whose dependencies were fetched from the oracle
    pub expanded: usize,
    /// Edges appended to the graph
    pub edges: usize,
}

/// Graph builder - Domain Service that populates a [`DependencyGraph`] from
/// the oracle, one root at a time, while a [`StatusDecorator`] annotates the
/// discovered ports in the background.
pub struct GraphBuilder {
    oracle: Arc<dyn DependencyOracle>,
    graph: DependencyGraph,
    /// Taken once the worker has failed, to surface its error.
    decorator: Option<StatusDecorator>,
    visited: HashSet<VisitKey>,
}

impl GraphBuilder {
    pub fn new(oracle: Arc<dyn DependencyOracle>) -> Result<Self> {
        let graph = DependencyGraph::new();
        let decorator = StatusDecorator::spawn(oracle.clone(), graph.clone())?;
        Ok(Self {
            oracle,
            graph,
            decorator: Some(decorator),
            visited: HashSet::new(),
        })
    }

    /// Handle to the graph being built.
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Walk the dependency closure of `root` built with `variants`.
    ///
    /// Depth-first with an explicit stack: each child is fully expanded before
    /// its next sibling, so oracle calls happen in the same order as a plain
    /// recursive walk. Stops as soon as status decoration has failed and
    /// returns the decoration error.
    pub fn traverse(&mut self, root: &str, variants: &[String]) -> Result<TraversalStats> {
        info!(port = root, ?variants, "traversing dependencies");
        let decorator = self
            .decorator
            .as_ref()
            .ok_or_else(|| anyhow!("Status decoration already failed"))?;
        let mut ctx = TraversalContext {
            oracle: self.oracle.as_ref(),
            graph: &self.graph,
            decorator,
            visited: &mut self.visited,
            variants,
            visit_variants: normalize_variants(variants),
            stats: TraversalStats::default(),
        };

        let result = ctx.walk(root);
        if let Err(err) = &result {
            if err.downcast_ref::<DecorationStopped>().is_some() {
                return Err(self.take_decoration_error(err.to_string()));
            }
        }
        let stats = result?;
        debug!(
            port = root,
            expanded = stats.expanded,
            edges = stats.edges,
            "traversal done"
        );
        Ok(stats)
    }

    /// Wait for all pending status lookups, then freeze the graph.
    pub fn finish(self) -> Result<GraphSnapshot> {
        let decorator = self
            .decorator
            .ok_or_else(|| anyhow!("Status decoration already failed"))?;
        let decorated = decorator.finish().context("Status decoration failed")?;
        debug!(decorated, "status decoration complete");
        Ok(self.graph.freeze())
    }

    /// Join the stopped worker and return the error it stopped on.
    fn take_decoration_error(&mut self, fallback: String) -> anyhow::Error {
        let Some(decorator) = self.decorator.take() else {
            return anyhow!(fallback);
        };
        match decorator.finish() {
            Err(err) => err.context("Status decoration failed"),
            Ok(_) => anyhow!(fallback),
        }
    }
}

/// One port whose dependency list is being walked
struct Frame {
    name: PortName,
    is_root: bool,
    pending: std::vec::IntoIter<Dependency>,
}

/// Shared state threaded through a single root traversal
struct TraversalContext<'a> {
    oracle: &'a dyn DependencyOracle,
    graph: &'a DependencyGraph,
    decorator: &'a StatusDecorator,
    visited: &'a mut HashSet<VisitKey>,
    variants: &'a [String],
    visit_variants: Vec<String>,
    stats: TraversalStats,
}

impl TraversalContext<'_> {
    fn walk(&mut self, root: &str) -> Result<TraversalStats> {
        let mut stack: Vec<Frame> = Vec::new();
        stack.extend(self.expand(root, true)?);

        while let Some(frame) = stack.last_mut() {
            let Some(dependency) = frame.pending.next() else {
                stack.pop();
                continue;
            };
            if self.decorator.is_stopped() {
                return Err(DecorationStopped.into());
            }
            let parent = frame.name.clone();
            let parent_is_root = frame.is_root;

            let Dependency { section, name } = dependency;
            self.insert(&name)?;
            self.graph.add_edge(&parent, &name, section)?;
            self.stats.edges += 1;
            if !parent_is_root {
                self.graph
                    .update_node(&parent, |node| node.has_children = true)?;
            }
            stack.extend(self.expand(&name, false)?);
        }
        Ok(self.stats)
    }

    /// Ensure the port exists in the graph; new ports go to the decorator.
    fn insert(&self, name: &str) -> Result<(), DecorationStopped> {
        let (_, inserted) = self.graph.add_node(name);
        if inserted {
            self.decorator.enqueue(name)?;
        }
        Ok(())
    }

    /// Mark `name` visited and fetch its dependencies. `None` when it was
    /// already expanded with this variant set.
    fn expand(&mut self, name: &str, is_root: bool) -> Result<Option<Frame>> {
        if !self
            .visited
            .insert((name.to_string(), self.visit_variants.clone()))
        {
            return Ok(None);
        }
        self.insert(name)?;

        let dependencies = self
            .oracle
            .list_dependencies(name, self.variants)
            .with_context(|| format!("Failed to list dependencies of {}", name))?;
        debug!(port = name, count = dependencies.len(), "listed dependencies");
        self.stats.expanded += 1;

        Ok(Some(Frame {
            name: name.to_string(),
            is_root,
            pending: dependencies.into_iter(),
        }))
    }
}

fn normalize_variants(variants: &[String]) -> Vec<String> {
    let mut normalized = variants.to_vec();
    normalized.sort();
    normalized.dedup();
    normalized
}
