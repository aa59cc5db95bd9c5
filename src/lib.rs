//! port-deptree library: MacPorts dependency graph construction and rendering.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod render;
