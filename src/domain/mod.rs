pub mod node;
pub mod edge;
pub mod graph;
pub mod ports;
pub mod builder;
pub mod decorator;
