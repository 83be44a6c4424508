use std::fmt::Write as _;
use std::io::Write;

use serde::Serialize;

use super::aggregate::{FunnelGraph, TransitionEdge};

#[derive(Debug, Serialize)]
struct EdgeRow<'a> {
    #[serde(rename = "From")]
    from: &'a str,
    #[serde(rename = "To")]
    to: &'a str,
    #[serde(rename = "Count")]
    count: u32,
}

/// Writes one CSV row per edge, with a `From,To,Count` header.
pub fn write_csv<W: Write>(edges: &[TransitionEdge], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    for edge in edges {
        csv_writer.serialize(EdgeRow {
            from: edge.from.label(),
            to: edge.to.label(),
            count: edge.count,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Plain-text rendering used by the CLI.
pub fn render_table(graph: &FunnelGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Applications tracked: {}", graph.total_applications);

    if graph.is_empty() {
        let _ = writeln!(out, "No status transitions recorded");
        return out;
    }

    let width = graph
        .nodes
        .iter()
        .map(|stage| stage.display_name().len())
        .max()
        .unwrap_or(0);

    for edge in &graph.links {
        let _ = writeln!(
            out,
            "- {:<width$} -> {:<width$} {:>5}",
            edge.from.display_name(),
            edge.to.display_name(),
            edge.count,
        );
    }
    out
}
