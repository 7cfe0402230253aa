//! Line-by-line graph entry from a terminal (or any reader).

use std::io::{BufRead, Write};

use crate::model::Graph;
use crate::Result;

use super::parse_line;

/// Read `Node -> N1,N2,...` lines until `done` (any case) or end of input.
///
/// Prompts and complaints about malformed lines go to `out`. The returned
/// graph is closed.
pub fn read_interactive<R: BufRead, W: Write>(reader: R, out: &mut W) -> Result<Graph> {
    writeln!(
        out,
        "Enter the graph connections (format: Node -> Neighbor1,Neighbor2,...). Type 'done' to finish:"
    )?;
    out.flush()?;

    let mut graph = Graph::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("done") {
            break;
        }
        match parse_line(trimmed) {
            Some((node, neighbors)) => graph.insert(node, neighbors),
            None => {
                writeln!(out, "Invalid format. Try again.")?;
                out.flush()?;
            }
        }
    }

    graph.close();
    Ok(graph)
}
