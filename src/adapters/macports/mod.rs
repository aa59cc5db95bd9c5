//! MacPorts oracle adapter
//!
//! Shells out to the `port` command for dependency listings and
//! installed/outdated checks, and parses its line-oriented output.

pub mod adapter;
pub mod parser;

pub use adapter::{MacPortsAdapter, MacPortsConfig, StatusMode};
