//! Graphviz dot writer.

use super::style::{DEFAULT_COLOR, DEFAULT_FILLCOLOR, DEFAULT_SHAPE, NODE_STYLE};
use super::{GraphWriter, RenderedGraph};
use std::io::{self, Write};

pub struct DotWriter;

/// Quote a dot identifier.
fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

impl GraphWriter for DotWriter {
    fn write<W: Write>(&self, graph: &RenderedGraph, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "digraph G {{")?;
        writeln!(writer, "    graph [overlap=false, bgcolor=transparent];")?;
        writeln!(
            writer,
            "    node [style={}, color={}, fillcolor={}, shape={}];",
            NODE_STYLE, DEFAULT_COLOR, DEFAULT_FILLCOLOR, DEFAULT_SHAPE
        )?;

        for node in &graph.nodes {
            let mut attrs = Vec::new();
            if node.shape != DEFAULT_SHAPE {
                attrs.push(format!("shape={}", node.shape));
            }
            if node.color != DEFAULT_COLOR {
                attrs.push(format!("color={}", node.color));
            }
            if node.fillcolor != DEFAULT_FILLCOLOR {
                attrs.push(format!("fillcolor={}", node.fillcolor));
            }
            if attrs.is_empty() {
                writeln!(writer, "    {};", quote(&node.id))?;
            } else {
                writeln!(writer, "    {} [{}];", quote(&node.id), attrs.join(", "))?;
            }
        }

        for edge in &graph.edges {
            let mut attrs = vec![
                format!("color={}", edge.color),
                format!("fontcolor={}", edge.fontcolor),
            ];
            if let Some(label) = &edge.label {
                attrs.push(format!("label={}", quote(label)));
            }
            writeln!(
                writer,
                "    {} -> {} [{}];",
                quote(&edge.parent),
                quote(&edge.child),
                attrs.join(", ")
            )?;
        }

        writeln!(writer, "}}")
    }
}
