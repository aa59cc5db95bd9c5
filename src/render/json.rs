//! JSON writer for machine-readable output.

use super::{GraphWriter, RenderedGraph};
use std::io::{self, Write};

pub struct JsonWriter;

impl GraphWriter for JsonWriter {
    fn write<W: Write>(&self, graph: &RenderedGraph, writer: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, graph)?;
        writeln!(writer)
    }
}
