//! Static style table mapping graph semantics to Graphviz attributes.

use crate::domain::edge::Section;
use crate::domain::node::{NodeData, NodeStatus};

pub const DEFAULT_SHAPE: &str = "doublecircle";
pub const PARENT_SHAPE: &str = "circle";
pub const DEFAULT_COLOR: &str = "black";
pub const DEFAULT_FILLCOLOR: &str = "white";
pub const NODE_STYLE: &str = "filled";

/// Border and fill color for a node status.
pub fn status_colors(status: NodeStatus) -> (&'static str, &'static str) {
    match status {
        NodeStatus::Missing => ("red", "moccasin"),
        NodeStatus::Outdated => ("forestgreen", "lightblue"),
        NodeStatus::Installed | NodeStatus::Unknown => (DEFAULT_COLOR, DEFAULT_FILLCOLOR),
    }
}

pub fn node_shape(node: &NodeData) -> &'static str {
    if node.has_children {
        PARENT_SHAPE
    } else {
        DEFAULT_SHAPE
    }
}

pub fn section_color(section: &Section) -> &'static str {
    match section {
        Section::Library => "black",
        Section::Fetch => "forestgreen",
        Section::Extract => "darkgreen",
        Section::Build => "blue",
        Section::Runtime => "red",
        Section::Other(_) => "green",
    }
}

/// Library is the implicit default kind and stays unlabeled.
pub fn section_label(section: &Section) -> Option<String> {
    match section {
        Section::Library => None,
        other => Some(other.as_str().to_string()),
    }
}
