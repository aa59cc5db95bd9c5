use crate::app::request::TraversalRequest;
use crate::domain::builder::{GraphBuilder, TraversalStats};
use crate::domain::graph::GraphSnapshot;
use crate::domain::ports::DependencyOracle;
use crate::render::{self, OutputFormat, RenderedGraph};
use anyhow::{Context as _, Result};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// Drives one traversal per request over a shared graph and renders it.
#[derive(Clone)]
pub struct DeptreeEngine {
    oracle: Arc<dyn DependencyOracle>,
}

impl DeptreeEngine {
    pub fn new(oracle: Arc<dyn DependencyOracle>) -> Self {
        Self { oracle }
    }

    /// Traverse every request, then wait for status decoration to drain.
    ///
    /// The returned snapshot is complete: no node is left undecorated.
    pub fn build(&self, requests: &[TraversalRequest]) -> Result<GraphSnapshot> {
        let mut builder = GraphBuilder::new(self.oracle.clone())?;
        let mut total = TraversalStats::default();
        for request in requests {
            info!("Calculating dependencies for {}", request);
            let stats = builder
                .traverse(&request.port, &request.variants)
                .with_context(|| format!("Failed to traverse dependencies of {}", request))?;
            total.expanded += stats.expanded;
            total.edges += stats.edges;
        }
        info!(
            expanded = total.expanded,
            edges = total.edges,
            "traversal complete, waiting for status lookups"
        );
        builder.finish()
    }

    /// Build the graph and write it to `out` in `format`.
    pub fn run<W: Write>(
        &self,
        requests: &[TraversalRequest],
        format: OutputFormat,
        out: &mut W,
    ) -> Result<RenderedGraph> {
        let snapshot = self.build(requests)?;
        let rendered = render::build_output(&snapshot);
        render::write_output(&rendered, format, out).context("Failed to write graph")?;
        out.flush().context("Failed to flush output")?;
        Ok(rendered)
    }
}
