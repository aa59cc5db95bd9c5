//! Rendering of a finished dependency graph.
//!
//! [`build_output`] turns a frozen [`GraphSnapshot`] into styled node and
//! edge records plus a status summary. Writers in [`dot`] and [`json`]
//! serialize that record set.

pub mod dot;
pub mod json;
pub mod style;

use crate::domain::graph::GraphSnapshot;
use crate::domain::node::NodeStatus;
use serde::Serialize;
use std::io::{self, Write};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Graphviz dot - pipe into `dot -Tpdf`
    #[default]
    Dot,
    /// JSON - machine-readable node and edge records
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" => Ok(OutputFormat::Dot),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown output format: '{}'. Valid formats: dot, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRecord {
    pub id: String,
    pub status: NodeStatus,
    pub shape: &'static str,
    pub color: &'static str,
    pub fillcolor: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeRecord {
    pub parent: String,
    pub child: String,
    pub section: String,
    pub color: &'static str,
    pub fontcolor: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Node counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub not_installed: usize,
    pub outdated: usize,
    /// Installed and up to date
    pub normal: usize,
}

impl StatusSummary {
    fn count(&mut self, status: NodeStatus) {
        self.total += 1;
        match status {
            NodeStatus::Missing => self.not_installed += 1,
            NodeStatus::Outdated => self.outdated += 1,
            NodeStatus::Installed | NodeStatus::Unknown => self.normal += 1,
        }
    }
}

impl std::fmt::Display for StatusSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total: {} ({} upgrades, {} new)",
            self.total, self.outdated, self.not_installed
        )
    }
}

/// Styled, serializable form of a dependency graph
#[derive(Debug, Clone, Serialize)]
pub struct RenderedGraph {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    pub summary: StatusSummary,
}

pub fn build_output(snapshot: &GraphSnapshot) -> RenderedGraph {
    let mut summary = StatusSummary::default();
    let nodes = snapshot
        .nodes()
        .map(|node| {
            summary.count(node.status);
            let (color, fillcolor) = style::status_colors(node.status);
            NodeRecord {
                id: node.name.clone(),
                status: node.status,
                shape: style::node_shape(node),
                color,
                fillcolor,
            }
        })
        .collect();

    let edges = snapshot
        .edges()
        .map(|(parent, child, data)| {
            let color = style::section_color(&data.section);
            EdgeRecord {
                parent: parent.to_string(),
                child: child.to_string(),
                section: data.section.to_string(),
                color,
                fontcolor: color,
                label: style::section_label(&data.section),
            }
        })
        .collect();

    RenderedGraph {
        nodes,
        edges,
        summary,
    }
}

/// Trait for graph writers
pub trait GraphWriter {
    fn write<W: Write>(&self, graph: &RenderedGraph, writer: &mut W) -> io::Result<()>;
}

/// Write `graph` in the requested format.
pub fn write_output<W: Write>(
    graph: &RenderedGraph,
    format: OutputFormat,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Dot => dot::DotWriter.write(graph, writer),
        OutputFormat::Json => json::JsonWriter.write(graph, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_str() {
        assert_eq!("DOT".parse::<OutputFormat>(), Ok(OutputFormat::Dot));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("svg".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn summary_line_matches_classic_report() {
        let summary = StatusSummary {
            total: 12,
            not_installed: 3,
            outdated: 2,
            normal: 7,
        };
        assert_eq!(summary.to_string(), "Total: 12 (2 upgrades, 3 new)");
    }
}
